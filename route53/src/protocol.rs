/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The REST-XML protocol
//!
//! Operations are bound to an HTTP method and a URI path under `/2013-04-01/`. Resource ids are
//! URI labels. Request and response bodies, when present, are XML documents in the Route 53
//! namespace. Errors are `ErrorResponse` documents.

use crate::config::Config;
use crate::error::{Error, ErrorKind};
use aws_auth::Credentials;
use aws_http::request_id::extract_request_id;
use aws_http::xml_errors;
use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::Method;
use sdk_http::body::SdkBody;
use sdk_http::label;
use sdk_http::operation::{self, BuildError, Operation};
use sdk_http::response::{ClassifyError, Marshall, ResponseHandler, Unmarshall};
use sdk_xml::decode::XmlError;
use std::error::Error as StdError;
use std::fmt;

/// An operation input of a REST-XML service
pub trait RestXmlInput {
    const NAME: &'static str;
    const METHOD: Method;

    type Output: 'static;

    /// Path and query of the request, with every label already encoded.
    fn uri(&self) -> Result<String, BuildError>;

    /// XML request document, for operations that send one.
    fn body(&self) -> Result<Option<String>, BuildError> {
        Ok(None)
    }

    fn parse(response: &http::Response<Bytes>) -> Result<Self::Output, XmlError>;

    fn credentials_override(&self) -> Option<&Credentials>;
}

/// Strip the resource type prefix from an id passed as input
///
/// The service returns ids like `/hostedzone/Z1D633PJN98FT9` but only accepts the bare id in
/// request URIs.
pub fn trim_resource_id(resource_id: &str) -> &str {
    const PREFIXES: &[&str] = &[
        "/hostedzone/",
        "hostedzone/",
        "/change/",
        "change/",
        "/delegationset/",
        "delegationset/",
    ];

    PREFIXES
        .iter()
        .find_map(|prefix| resource_id.strip_prefix(prefix))
        .unwrap_or(resource_id)
}

/// A required resource id, trimmed and encoded as a URI label
pub(crate) fn resource_label(
    resource_id: &Option<String>,
    field: &'static str,
) -> Result<String, BuildError> {
    let resource_id = resource_id.as_deref().ok_or(BuildError::MissingField {
        field,
        details: "this field is required",
    })?;
    let trimmed = trim_resource_id(resource_id);
    if trimmed.is_empty() {
        return Err(BuildError::InvalidField {
            field,
            details: format!("`{}` does not name a resource", resource_id),
        });
    }
    Ok(label::fmt_string(trimmed, false))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RestXmlMarshaller;

impl<I: RestXmlInput> Marshall<I> for RestXmlMarshaller {
    fn marshall(&self, input: &I) -> Result<http::Request<SdkBody>, BuildError> {
        let uri = input.uri()?;
        let builder = http::Request::builder().method(I::METHOD).uri(uri);
        let request = match input.body()? {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/xml")
                .header(CONTENT_LENGTH, body.len())
                .body(SdkBody::from(body))?,
            None => builder.body(SdkBody::empty())?,
        };
        Ok(request)
    }
}

type ParseFn<T> = fn(&http::Response<Bytes>) -> Result<T, XmlError>;

/// Reads a success document with the parser of the operation that produced it
///
/// Keyed on the output type so an operation's handler does not borrow from its input.
pub struct XmlUnmarshaller<T> {
    parse: ParseFn<T>,
}

impl<T> XmlUnmarshaller<T> {
    pub fn new(parse: ParseFn<T>) -> Self {
        XmlUnmarshaller { parse }
    }

    pub fn for_input<I: RestXmlInput<Output = T>>() -> Self {
        Self::new(I::parse)
    }
}

impl<T> Clone for XmlUnmarshaller<T> {
    fn clone(&self) -> Self {
        XmlUnmarshaller { parse: self.parse }
    }
}

impl<T> fmt::Debug for XmlUnmarshaller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlUnmarshaller").finish()
    }
}

impl<T> Unmarshall for XmlUnmarshaller<T> {
    type Output = T;

    fn unmarshall(
        &self,
        response: &http::Response<Bytes>,
    ) -> Result<Self::Output, Box<dyn StdError + Send + Sync>> {
        Ok((self.parse)(response)?)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Route53ErrorClassifier;

impl ClassifyError for Route53ErrorClassifier {
    type Error = Error;

    fn classify(&self, response: &http::Response<Bytes>) -> Error {
        let raw_body = || String::from_utf8_lossy(response.body()).into_owned();
        match xml_errors::parse_generic_error(response) {
            Ok(meta) => match meta.code().map(ErrorKind::from_code) {
                Some(kind) => Error::new(kind, meta),
                None => Error::unhandled(meta, raw_body()),
            },
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    status = %response.status(),
                    "unparseable error body"
                );
                let mut meta = sdk_types::Error::builder();
                if let Some(request_id) = extract_request_id(response.headers()) {
                    meta.request_id(request_id);
                }
                Error::unhandled(meta.build(), raw_body())
            }
        }
    }
}

pub type XmlResponseHandler<T> = ResponseHandler<XmlUnmarshaller<T>, Route53ErrorClassifier>;

pub fn make_operation<I: RestXmlInput>(
    input: &I,
    conf: &Config,
) -> Result<Operation<XmlResponseHandler<I::Output>>, BuildError> {
    let request = RestXmlMarshaller.marshall(input)?;
    let mut request = operation::Request::new(request);
    {
        let mut properties = request.properties_mut();
        conf.apply(&mut properties);
        aws_auth::set_override(&mut properties, input.credentials_override().cloned());
    }
    Ok(Operation::new(
        request,
        ResponseHandler::new(XmlUnmarshaller::for_input::<I>(), Route53ErrorClassifier),
    ))
}

#[cfg(test)]
mod test {
    use super::{make_operation, resource_label, trim_resource_id, Route53ErrorClassifier};
    use crate::config::Config;
    use crate::error::ErrorKind;
    use super::RestXmlInput;
    use crate::input::{DeleteHostedZoneInput, GetChangeInput, GetHostedZoneInput};
    use aws_types::os_shim_internal::Env;
    use bytes::Bytes;
    use sdk_http::operation::BuildError;
    use sdk_http::response::ClassifyError;
    use tracing_test::traced_test;

    fn response(status: u16, body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(status)
            .header("x-amzn-requestid", "req-1")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn ids_lose_their_type_prefix() {
        assert_eq!(trim_resource_id("Z0441723226OZ66S5ZCNZ"), "Z0441723226OZ66S5ZCNZ");
        assert_eq!(trim_resource_id("/hostedzone/Z0441723226OZ66S5ZCNZ"), "Z0441723226OZ66S5ZCNZ");
        assert_eq!(trim_resource_id("hostedzone/Z0441723226OZ66S5ZCNZ"), "Z0441723226OZ66S5ZCNZ");
        assert_eq!(trim_resource_id("/change/C1"), "C1");
        assert_eq!(trim_resource_id("delegationset/N1"), "N1");
        // only one prefix is removed
        assert_eq!(trim_resource_id("/change/change/C1"), "change/C1");
    }

    #[test]
    fn labels_are_encoded_after_trimming() {
        assert_eq!(
            resource_label(&Some("/change/C1/2".into()), "id").unwrap(),
            "C1%2F2"
        );
        assert!(matches!(
            resource_label(&Some("/hostedzone/".into()), "id"),
            Err(BuildError::InvalidField { field: "id", .. })
        ));
        assert!(matches!(
            resource_label(&None, "id"),
            Err(BuildError::MissingField { field: "id", .. })
        ));
    }

    #[test]
    fn rest_bindings() {
        let conf = Config::builder().env(Env::from_slice(&[])).build();
        let operation = make_operation(
            &GetHostedZoneInput {
                id: Some("/hostedzone/Z1D633PJN98FT9".into()),
                ..Default::default()
            },
            &conf,
        )
        .expect("valid input");
        let request = operation.request().http();
        assert_eq!(request.method(), http::Method::GET);
        assert_eq!(request.uri(), "/2013-04-01/hostedzone/Z1D633PJN98FT9");
        assert_eq!(request.body().bytes(), Some(&b""[..]));
        assert!(request.headers().get("content-type").is_none());

        let operation = make_operation(
            &DeleteHostedZoneInput {
                id: Some("Z1D633PJN98FT9".into()),
                ..Default::default()
            },
            &conf,
        )
        .expect("valid input");
        assert_eq!(operation.request().http().method(), http::Method::DELETE);
    }

    fn assert_send_sync_static<T: Send + Sync + 'static>(_: &T) {}

    // Generic over inputs that are not 'static; only compiles while the handler names the
    // output type rather than the input.
    fn handler_outlives_input<I: RestXmlInput>(input: &I, conf: &Config) {
        let operation = make_operation(input, conf).expect("valid input");
        let (_, parts) = operation.into_request_response();
        assert_send_sync_static(&parts.response_handler);
        let _ = parts.response_handler.clone();
    }

    #[test]
    fn handlers_do_not_borrow_the_input() {
        let conf = Config::builder().env(Env::from_slice(&[])).build();
        handler_outlives_input(
            &GetChangeInput {
                id: Some("C2682N5HXP0BZ4".into()),
                ..Default::default()
            },
            &conf,
        );
    }

    #[test]
    fn declared_codes_are_classified() {
        let error = Route53ErrorClassifier.classify(&response(
            400,
            r#"<?xml version="1.0"?>
            <ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
              <Error>
                <Type>Sender</Type>
                <Code>NoSuchHostedZone</Code>
                <Message>No hosted zone found with ID: Z1</Message>
              </Error>
              <RequestId>8a6c3c86-3a5e-4f5b-9b66-3b0e7d2e1f10</RequestId>
            </ErrorResponse>"#,
        ));
        assert_eq!(error.kind(), ErrorKind::NoSuchHostedZone);
        assert_eq!(error.message(), Some("No hosted zone found with ID: Z1"));
        assert_eq!(error.request_id(), Some("8a6c3c86-3a5e-4f5b-9b66-3b0e7d2e1f10"));
        assert_eq!(error.raw_body(), None);
    }

    #[traced_test]
    #[test]
    fn unparseable_errors_are_logged_and_kept() {
        let error = Route53ErrorClassifier.classify(&response(503, "Service Unavailable"));
        assert_eq!(error.kind(), ErrorKind::Unhandled);
        assert_eq!(error.request_id(), Some("req-1"));
        assert_eq!(error.raw_body(), Some("Service Unavailable"));
        assert!(logs_contain("unparseable error body"));
    }
}
