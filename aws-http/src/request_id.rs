/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::{HeaderMap, HeaderValue};
use sdk_http::result::SdkError;

/// Implementers add a function to return an AWS request ID
pub trait RequestId {
    /// Returns the request ID if it's available.
    fn request_id(&self) -> Option<&str>;
}

impl<E> RequestId for SdkError<E> {
    fn request_id(&self) -> Option<&str> {
        self.raw_response()
            .and_then(|raw| extract_request_id(raw.headers()))
    }
}

impl RequestId for sdk_types::Error {
    fn request_id(&self) -> Option<&str> {
        sdk_types::Error::request_id(self)
    }
}

impl<B> RequestId for http::Response<B> {
    fn request_id(&self) -> Option<&str> {
        extract_request_id(self.headers())
    }
}

/// Extracts a request ID from HTTP response headers
pub fn extract_request_id(headers: &HeaderMap<HeaderValue>) -> Option<&str> {
    headers
        .get("x-amzn-requestid")
        .or_else(|| headers.get("x-amz-request-id"))
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod test {
    use super::RequestId;
    use sdk_http::body::SdkBody;
    use sdk_http::result::SdkError;

    #[test]
    fn request_id_from_either_header() {
        let resp = http::Response::builder()
            .header("x-amzn-RequestId", "abc-123")
            .body(())
            .unwrap();
        assert_eq!(resp.request_id(), Some("abc-123"));

        let resp = http::Response::builder()
            .header("x-amz-request-id", "def-456")
            .body(())
            .unwrap();
        assert_eq!(resp.request_id(), Some("def-456"));
    }

    #[test]
    fn sdk_errors_expose_the_raw_request_id() {
        let raw = http::Response::builder()
            .status(400)
            .header("x-amzn-RequestId", "abc-123")
            .body(SdkBody::empty())
            .unwrap();
        let err: SdkError<()> = SdkError::ServiceError { raw, err: () };
        assert_eq!(err.request_id(), Some("abc-123"));

        let err: SdkError<()> = SdkError::DispatchFailure("boom".into());
        assert_eq!(err.request_id(), None);
    }
}
