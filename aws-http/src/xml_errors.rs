/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Generic error parsing for the REST-XML protocol.
//!
//! ```xml
//! <ErrorResponse>
//!   <Error>
//!     <Type>Sender</Type>
//!     <Code>InvalidDomainName</Code>
//!     <Message>The domain name is invalid</Message>
//!   </Error>
//!   <RequestId>foo-id</RequestId>
//! </ErrorResponse>
//! ```

use crate::request_id::extract_request_id;
use bytes::Bytes;
use sdk_xml::decode::{try_data, Document, ScopedDecoder, XmlError};
use std::convert::TryFrom;

/// Parse the generic error metadata out of a REST-XML error response
///
/// A `RequestId` element wins over the `x-amzn-RequestId` header.
pub fn parse_generic_error(
    response: &http::Response<Bytes>,
) -> Result<sdk_types::Error, XmlError> {
    let mut doc = Document::try_from(response.body().as_ref())?;
    let mut root = doc.root_element()?;
    if !root.start_el().matches("ErrorResponse") {
        return Err(XmlError::custom(format!(
            "expected ErrorResponse, found {}",
            root.start_el().local()
        )));
    }
    let mut err_builder = sdk_types::Error::builder();
    let mut request_id = None;
    while let Some(mut tag) = root.next_tag() {
        match tag.start_el().local() {
            "Error" => parse_error_element(&mut tag, &mut err_builder)?,
            "RequestId" => request_id = Some(try_data(&mut tag)?.into_owned()),
            _ => {}
        }
    }
    if let Some(request_id) = request_id
        .as_deref()
        .or_else(|| extract_request_id(response.headers()))
    {
        err_builder.request_id(request_id);
    }
    Ok(err_builder.build())
}

fn parse_error_element(
    error: &mut ScopedDecoder,
    err_builder: &mut sdk_types::error::Builder,
) -> Result<(), XmlError> {
    while let Some(mut tag) = error.next_tag() {
        match tag.start_el().local() {
            "Code" => {
                err_builder.code(try_data(&mut tag)?);
            }
            "Message" => {
                err_builder.message(try_data(&mut tag)?);
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::parse_generic_error;
    use bytes::Bytes;

    fn response(body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(400)
            .header("x-amzn-requestid", "header-id")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn parse_error_response() {
        let xml = r#"<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
            <Error>
                <Type>Sender</Type>
                <Code>InvalidDomainName</Code>
                <Message>The domain name is &lt;invalid&gt;</Message>
                <AnotherSetting>some value</AnotherSetting>
            </Error>
            <RequestId>foo-id</RequestId>
        </ErrorResponse>"#;
        let error = parse_generic_error(&response(xml)).expect("valid error");
        assert_eq!(
            error,
            sdk_types::Error::builder()
                .code("InvalidDomainName")
                .message("The domain name is <invalid>")
                .request_id("foo-id")
                .build()
        );
    }

    #[test]
    fn request_id_falls_back_to_the_header() {
        let xml = r#"<ErrorResponse><Error><Code>NoSuchHostedZone</Code></Error></ErrorResponse>"#;
        let error = parse_generic_error(&response(xml)).expect("valid error");
        assert_eq!(error.code(), Some("NoSuchHostedZone"));
        assert_eq!(error.message(), None);
        assert_eq!(error.request_id(), Some("header-id"));
    }

    #[test]
    fn unexpected_root_is_an_error() {
        assert!(parse_generic_error(&response("<html><body>oops</body></html>")).is_err());
    }

    #[test]
    fn empty_body_is_an_error() {
        assert!(parse_generic_error(&response("")).is_err());
    }
}
