/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Generic error parsing for the awsJson protocols.

use crate::request_id::extract_request_id;
use bytes::Bytes;
use serde::Deserialize;
use std::borrow::Cow;

#[derive(Deserialize, Default)]
struct ErrorBody<'a> {
    #[serde(rename = "__type", borrow, default)]
    error_type: Option<Cow<'a, str>>,
    #[serde(borrow, default)]
    code: Option<Cow<'a, str>>,
    #[serde(borrow, default)]
    message: Option<Cow<'a, str>>,
    // Some services capitalize it; bodies carrying both spellings are accepted.
    #[serde(rename = "Message", borrow, default)]
    capitalized_message: Option<Cow<'a, str>>,
}

/// Strips the namespace (`#` prefix) and URL (`:` suffix) from an error code
///
/// ```text
/// aws.protocoltests.restjson#FooError:http://internal.amazon.com/coral/com.amazon.coral.validate/
/// ```
/// becomes `FooError`.
pub fn sanitize_error_code(error_code: &str) -> &str {
    // Trim a trailing URL from the error code, beginning with a `:`
    let error_code = match error_code.find(':') {
        Some(idx) => &error_code[..idx],
        None => error_code,
    };

    // Trim a prefixing namespace from the error code, beginning with a `#`
    match error_code.find('#') {
        Some(idx) => &error_code[idx + 1..],
        None => error_code,
    }
}

fn error_type_from_header<B>(response: &http::Response<B>) -> Option<&str> {
    response
        .headers()
        .get("X-Amzn-Errortype")
        .and_then(|value| value.to_str().ok())
}

/// Parse the generic error metadata out of a JSON error response
///
/// The code comes from the `x-amzn-ErrorType` header, then from the body's `__type`, then from
/// `code`. An empty body is accepted; only a body that is present but not JSON is an error.
pub fn parse_generic_error(
    response: &http::Response<Bytes>,
) -> Result<sdk_types::Error, serde_json::Error> {
    let body = response.body();
    let ErrorBody {
        error_type,
        code,
        message,
        capitalized_message,
    } = if body.iter().all(u8::is_ascii_whitespace) {
        ErrorBody::default()
    } else {
        serde_json::from_slice(body).map_err(|err| {
            tracing::debug!(error = %err, status = %response.status(), "error body is not JSON");
            err
        })?
    };
    let mut err_builder = sdk_types::Error::builder();
    let code = error_type_from_header(response)
        .or_else(|| error_type.as_deref())
        .or_else(|| code.as_deref())
        .map(sanitize_error_code);
    if let Some(code) = code {
        err_builder.code(code);
    }
    if let Some(message) = message.or(capitalized_message) {
        err_builder.message(message);
    }
    if let Some(request_id) = extract_request_id(response.headers()) {
        err_builder.request_id(request_id);
    }
    Ok(err_builder.build())
}
