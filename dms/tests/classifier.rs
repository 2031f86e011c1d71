/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use bytes::Bytes;
use dms::error::{ErrorKind, ERRORS};
use dms::protocol::DmsErrorClassifier;
use proptest::prelude::*;
use sdk_http::response::ClassifyError;

fn codes() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(ERRORS.codes().collect::<Vec<_>>())
}

fn body_response(status: u16, body: String) -> http::Response<Bytes> {
    http::Response::builder()
        .status(status)
        .body(Bytes::from(body))
        .unwrap()
}

proptest! {
    #[test]
    fn declared_codes_classify_the_same_way_every_time(
        code in codes(),
        message in ".*",
        status in 400u16..600,
    ) {
        let body = serde_json::json!({ "__type": code, "message": message }).to_string();
        let first = DmsErrorClassifier.classify(&body_response(status, body.clone()));
        let second = DmsErrorClassifier.classify(&body_response(status, body));
        prop_assert_eq!(first.kind(), ErrorKind::from_code(code));
        prop_assert_eq!(first.kind(), second.kind());
        prop_assert_ne!(first.kind(), ErrorKind::Unhandled);
        prop_assert_eq!(first.code(), Some(code));
        prop_assert_eq!(first.message(), Some(message.as_str()));
    }

    #[test]
    fn header_code_wins_over_the_body(code in codes(), other in codes()) {
        let response = http::Response::builder()
            .status(400)
            .header("x-amzn-ErrorType", format!("{}:http://internal.amazon.com/coral/", code))
            .body(Bytes::from(serde_json::json!({ "__type": other }).to_string()))
            .unwrap();
        let error = DmsErrorClassifier.classify(&response);
        prop_assert_eq!(error.kind(), ErrorKind::from_code(code));
        prop_assert_eq!(error.code(), Some(code));
    }

    #[test]
    fn undeclared_codes_are_unhandled(code in "[A-Z][a-zA-Z]{0,20}Unknown") {
        let body = serde_json::json!({ "__type": format!("aws.dms#{}", code) }).to_string();
        let error = DmsErrorClassifier.classify(&body_response(400, body));
        prop_assert_eq!(error.kind(), ErrorKind::Unhandled);
        prop_assert_eq!(error.code(), Some(code.as_str()));
    }
}
