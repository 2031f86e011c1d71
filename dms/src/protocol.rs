/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The `awsJson1_1` protocol
//!
//! Every operation is a `POST /` whose `X-Amz-Target` header names the operation. Inputs and
//! outputs are JSON documents; errors carry their code in `x-amzn-ErrorType` or `__type`.

use crate::config::Config;
use crate::error::{Error, ErrorKind};
use aws_auth::Credentials;
use aws_http::json_errors;
use aws_http::request_id::extract_request_id;
use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use sdk_http::body::SdkBody;
use sdk_http::operation::{self, BuildError, Operation};
use sdk_http::response::{ClassifyError, Marshall, ResponseHandler, Unmarshall};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error as StdError;
use std::marker::PhantomData;

const TARGET_PREFIX: &str = "AmazonDMSv20160101";
const CONTENT_TYPE_JSON_1_1: &str = "application/x-amz-json-1.1";

/// An operation input of a JSON RPC service
pub trait JsonRpcInput: Serialize {
    /// Operation name, sent as `X-Amz-Target: {prefix}.{NAME}`
    const NAME: &'static str;

    type Output: DeserializeOwned + 'static;

    /// Reject inputs that break the operation's own preconditions.
    fn validate(&self) -> Result<(), BuildError>;

    /// Credentials to use for this call instead of the client's provider.
    fn credentials_override(&self) -> Option<&Credentials>;
}

pub(crate) fn required<T>(field: &Option<T>, name: &'static str) -> Result<(), BuildError> {
    match field {
        Some(_) => Ok(()),
        None => Err(BuildError::MissingField {
            field: name,
            details: "this field is required",
        }),
    }
}

#[derive(Clone, Copy, Debug)]
pub struct JsonRpcMarshaller {
    target_prefix: &'static str,
}

impl JsonRpcMarshaller {
    pub fn new(target_prefix: &'static str) -> Self {
        JsonRpcMarshaller { target_prefix }
    }
}

impl<I: JsonRpcInput> Marshall<I> for JsonRpcMarshaller {
    fn marshall(&self, input: &I) -> Result<http::Request<SdkBody>, BuildError> {
        input.validate()?;
        let body = serde_json::to_vec(input).map_err(BuildError::serialization)?;
        Ok(http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON_1_1)
            .header("X-Amz-Target", format!("{}.{}", self.target_prefix, I::NAME))
            .header(CONTENT_LENGTH, body.len())
            .body(SdkBody::from(body))?)
    }
}

/// Deserializes a successful response. An empty body is the empty document `{}`.
#[derive(Debug)]
pub struct JsonUnmarshaller<T> {
    _output: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonUnmarshaller<T> {
    fn clone(&self) -> Self {
        JsonUnmarshaller::new()
    }
}

impl<T> JsonUnmarshaller<T> {
    pub fn new() -> Self {
        JsonUnmarshaller {
            _output: PhantomData,
        }
    }
}

impl<T> Default for JsonUnmarshaller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Unmarshall for JsonUnmarshaller<T> {
    type Output = T;

    fn unmarshall(
        &self,
        response: &http::Response<Bytes>,
    ) -> Result<Self::Output, Box<dyn StdError + Send + Sync>> {
        let body = response.body();
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            body
        };
        Ok(serde_json::from_slice(body)?)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DmsErrorClassifier;

impl ClassifyError for DmsErrorClassifier {
    type Error = Error;

    fn classify(&self, response: &http::Response<Bytes>) -> Error {
        let raw_body = || String::from_utf8_lossy(response.body()).into_owned();
        match json_errors::parse_generic_error(response) {
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

pub type JsonResponseHandler<T> = ResponseHandler<JsonUnmarshaller<T>, DmsErrorClassifier>;

/// Marshall `input` and attach everything the AWS middleware reads from the property bag.
pub fn make_operation<I: JsonRpcInput>(
    input: &I,
    conf: &Config,
) -> Result<Operation<JsonResponseHandler<I::Output>>, BuildError> {
    let request = JsonRpcMarshaller::new(TARGET_PREFIX).marshall(input)?;
    let mut request = operation::Request::new(request);
    {
        let mut properties = request.properties_mut();
        conf.apply(&mut properties);
        aws_auth::set_override(&mut properties, input.credentials_override().cloned());
    }
    Ok(Operation::new(
        request,
        ResponseHandler::new(JsonUnmarshaller::new(), DmsErrorClassifier),
    ))
}
