/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_hyper::test_connection::{capture_request, FailingConnection, TestConnection};
use aws_types::os_shim_internal::Env;
use dms::input::{AddTagsToResourceInput, DeleteEndpointInput, DescribeEndpointsInput};
use dms::model::Tag;
use dms::{Config, Credentials, Endpoint, ErrorKind, Region, SdkError};
use http::header::{HeaderName, AUTHORIZATION, USER_AGENT};
use http::Uri;
use sdk_http::body::SdkBody;
use sdk_http::context::InvocationContext;
use sdk_http::interceptor::{Interceptor, InvocationOutcome};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn conf() -> Config {
    Config::builder()
        .env(Env::from_slice(&[]))
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::from_keys("AKID_A", "secret_a", None))
        .build()
}

fn delete_endpoint() -> DeleteEndpointInput {
    DeleteEndpointInput {
        endpoint_arn: Some("dms-1".to_string()),
        ..Default::default()
    }
}

fn response(status: u16, body: &'static str) -> http::Response<&'static str> {
    http::Response::builder()
        .status(status)
        .header("x-amzn-requestid", "6c5b9c88-0f1e-4b5f-9d3e-1a2b3c4d5e6f")
        .header("content-type", "application/x-amz-json-1.1")
        .body(body)
        .unwrap()
}

fn expected_request(target: &str, body: &'static str) -> http::Request<SdkBody> {
    http::Request::builder()
        .method("POST")
        .uri(Uri::from_static("https://dms.us-east-1.amazonaws.com/"))
        .header("content-type", "application/x-amz-json-1.1")
        .header("x-amz-target", target)
        .header("host", "dms.us-east-1.amazonaws.com")
        .body(SdkBody::from(body))
        .unwrap()
}

#[derive(Clone, Default)]
struct Outcomes(Arc<Mutex<Vec<InvocationOutcome>>>);

impl Outcomes {
    fn get(&self) -> Vec<InvocationOutcome> {
        self.0.lock().unwrap().clone()
    }
}

impl Interceptor for Outcomes {
    fn on_invocation_end(
        &self,
        _context: &InvocationContext,
        outcome: InvocationOutcome,
        _elapsed: Duration,
    ) {
        self.0.lock().unwrap().push(outcome);
    }
}

#[tokio::test]
async fn delete_endpoint_with_empty_body_succeeds() {
    let conn = TestConnection::new(vec![(
        expected_request(
            "AmazonDMSv20160101.DeleteEndpoint",
            r#"{"EndpointArn":"dms-1"}"#,
        ),
        response(200, ""),
    )]);
    let client = dms::Client::from_conf_conn(conf(), conn.clone());
    let output = client
        .delete_endpoint(delete_endpoint())
        .await
        .expect("empty body is a valid result");
    assert_eq!(output.endpoint, None);
    assert_eq!(conn.requests().len(), 1);
    conn.assert_requests_match(&[
        AUTHORIZATION,
        USER_AGENT,
        HeaderName::from_static("x-amz-date"),
        HeaderName::from_static("x-amz-user-agent"),
    ]);
}

#[tokio::test]
async fn delete_endpoint_not_found() {
    let conn = TestConnection::new(vec![(
        expected_request(
            "AmazonDMSv20160101.DeleteEndpoint",
            r#"{"EndpointArn":"dms-1"}"#,
        ),
        response(
            400,
            r#"{"__type":"ResourceNotFoundFault","message":"Endpoint dms-1 not found"}"#,
        ),
    )]);
    let client = dms::Client::from_conf_conn(conf(), conn);
    let err = client
        .delete_endpoint(delete_endpoint())
        .await
        .expect_err("service error");
    let raw_status = err.raw_response().map(|raw| raw.status().as_u16());
    let service_error = err.into_service_error().expect("declared by the service");
    assert_eq!(service_error.kind(), ErrorKind::ResourceNotFound);
    assert!(service_error.is_resource_not_found());
    assert_eq!(service_error.code(), Some("ResourceNotFoundFault"));
    assert_eq!(service_error.message(), Some("Endpoint dms-1 not found"));
    assert_eq!(
        service_error.request_id(),
        Some("6c5b9c88-0f1e-4b5f-9d3e-1a2b3c4d5e6f")
    );
    assert_eq!(raw_status, Some(400));
}

#[tokio::test]
async fn unknown_codes_are_unhandled() {
    let conn = TestConnection::new(vec![(
        expected_request("AmazonDMSv20160101.DeleteEndpoint", ""),
        response(400, r#"{"__type":"aws.dms#BrandNewFault","message":"new"}"#),
    )]);
    let client = dms::Client::from_conf_conn(conf(), conn);
    let err = client
        .delete_endpoint(delete_endpoint())
        .await
        .expect_err("service error");
    let service_error = err.service_error().expect("declared by the service");
    assert_eq!(service_error.kind(), ErrorKind::Unhandled);
    assert_eq!(service_error.code(), Some("BrandNewFault"));
    assert_eq!(service_error.message(), Some("new"));
}

#[tokio::test]
async fn describe_endpoints_parses_the_page() {
    let conn = TestConnection::new(vec![(
        expected_request("AmazonDMSv20160101.DescribeEndpoints", "{}"),
        response(
            200,
            r#"{"Marker":"next","Endpoints":[{"EndpointIdentifier":"source-db","EndpointType":"SOURCE","EngineName":"mysql","Port":3306,"Status":"active","Unmodeled":true}]}"#,
        ),
    )]);
    let client = dms::Client::from_conf_conn(conf(), conn.clone());
    let output = client
        .describe_endpoints(DescribeEndpointsInput::default())
        .await
        .expect("valid page");
    assert_eq!(output.marker.as_deref(), Some("next"));
    assert_eq!(output.endpoints.len(), 1);
    let endpoint = &output.endpoints[0];
    assert_eq!(endpoint.endpoint_identifier.as_deref(), Some("source-db"));
    assert_eq!(endpoint.endpoint_type.as_deref(), Some("SOURCE"));
    assert_eq!(endpoint.port, Some(3306));
    conn.assert_requests_match(&[
        AUTHORIZATION,
        USER_AGENT,
        HeaderName::from_static("x-amz-date"),
        HeaderName::from_static("x-amz-user-agent"),
    ]);
}

#[tokio::test]
async fn malformed_success_body_is_a_response_error() {
    let conn = TestConnection::new(vec![(
        expected_request("AmazonDMSv20160101.DeleteEndpoint", ""),
        response(200, r#"{"Endpoint": {"#),
    )]);
    let client = dms::Client::from_conf_conn(conf(), conn);
    match client.delete_endpoint(delete_endpoint()).await {
        Err(SdkError::ResponseError { raw, .. }) => assert_eq!(raw.status(), 200),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn credentials_override_is_used_for_signing() {
    let (conn, request) = capture_request(None);
    let client = dms::Client::from_conf_conn(conf(), conn);
    client
        .add_tags_to_resource(AddTagsToResourceInput {
            resource_arn: Some("arn:aws:dms:us-east-1:123456789012:endpoint:dms-1".into()),
            tags: vec![Tag::new("team", "data")],
            credentials_override: Some(Credentials::from_keys("AKID_B", "secret_b", None)),
        })
        .await
        .expect("success");
    let request = request.expect_request();
    let auth = request.headers()[AUTHORIZATION].to_str().unwrap();
    assert!(auth.contains("Credential=AKID_B/"), "{}", auth);
    assert!(!auth.contains("AKID_A"), "{}", auth);
}

#[tokio::test]
async fn client_credentials_are_used_without_an_override() {
    let (conn, request) = capture_request(None);
    let client = dms::Client::from_conf_conn(conf(), conn);
    client.delete_endpoint(delete_endpoint()).await.expect("success");
    let request = request.expect_request();
    let auth = request.headers()[AUTHORIZATION].to_str().unwrap();
    assert!(
        auth.contains("Credential=AKID_A/") && auth.contains("/us-east-1/dms/aws4_request"),
        "{}",
        auth
    );
    let ua = request.headers()["x-amz-user-agent"].to_str().unwrap();
    assert!(ua.contains("api/dms/"), "{}", ua);
}

#[tokio::test]
async fn missing_credentials_never_reach_the_transport() {
    let conn = FailingConnection::new("must not be called");
    let conf = Config::builder()
        .env(Env::from_slice(&[]))
        .region(Region::new("us-east-1"))
        .build();
    let client = dms::Client::from_conf_conn(conf, conn.clone());
    match client.delete_endpoint(delete_endpoint()).await {
        Err(SdkError::ConstructionFailure(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(conn.calls(), 0);
}

#[tokio::test]
async fn invalid_input_never_reaches_the_transport() {
    let conn = FailingConnection::new("must not be called");
    let client = dms::Client::from_conf_conn(conf(), conn.clone());
    match client.delete_endpoint(DeleteEndpointInput::default()).await {
        Err(SdkError::ConstructionFailure(err)) => {
            assert!(err.to_string().contains("endpoint_arn"), "{}", err)
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(conn.calls(), 0);
}

#[tokio::test]
async fn every_outcome_finalizes_exactly_once() {
    let outcomes = Outcomes::default();
    let conn = TestConnection::new(vec![
        (
            expected_request("AmazonDMSv20160101.DeleteEndpoint", ""),
            response(200, "{}"),
        ),
        (
            expected_request("AmazonDMSv20160101.DeleteEndpoint", ""),
            response(400, r#"{"__type":"InvalidResourceStateFault"}"#),
        ),
    ]);
    let client = dms::Client::with_client(
        aws_hyper::builder()
            .shared_interceptor(Arc::new(outcomes.clone()))
            .connector(conn)
            .build(),
        conf(),
    );
    client.delete_endpoint(delete_endpoint()).await.expect("success");
    client
        .delete_endpoint(delete_endpoint())
        .await
        .expect_err("service error");

    let failing = FailingConnection::new("connection reset");
    let client = dms::Client::with_client(
        aws_hyper::builder()
            .shared_interceptor(Arc::new(outcomes.clone()))
            .connector(failing.clone())
            .build(),
        conf(),
    );
    match client.delete_endpoint(delete_endpoint()).await {
        Err(SdkError::DispatchFailure(err)) => assert_eq!(err.to_string(), "connection reset"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(failing.calls(), 1);
    assert_eq!(
        outcomes.get(),
        vec![
            InvocationOutcome::Success,
            InvocationOutcome::ServiceError,
            InvocationOutcome::ClientError
        ]
    );
}

#[tokio::test]
async fn static_endpoint_override() {
    let (conn, request) = capture_request(None);
    let mut client = dms::Client::from_conf_conn(conf(), conn);
    client.set_endpoint(Endpoint::immutable(Uri::from_static(
        "http://localhost:8000/proxy",
    )));
    client.delete_endpoint(delete_endpoint()).await.expect("success");
    let request = request.expect_request();
    assert_eq!(request.uri(), &Uri::from_static("http://localhost:8000/proxy/"));
    assert_eq!(request.headers()["host"], "localhost:8000");
}

#[test]
fn blocking_client_returns_synchronously() {
    let conn = TestConnection::new(vec![(
        expected_request("AmazonDMSv20160101.DeleteEndpoint", ""),
        response(
            200,
            r#"{"Endpoint":{"EndpointArn":"dms-1","Status":"deleting"}}"#,
        ),
    )]);
    let client = dms::blocking::Client::from_conf_conn(conf(), conn).expect("runtime starts");
    let output = client
        .delete_endpoint(delete_endpoint())
        .expect("success");
    let endpoint = output.endpoint.expect("endpoint is returned");
    assert_eq!(endpoint.endpoint_arn.as_deref(), Some("dms-1"));
    assert_eq!(endpoint.status.as_deref(), Some("deleting"));
}
