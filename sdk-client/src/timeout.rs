/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Transport-level timeouts.

use crate::BoxError;
use bytes::BytesMut;
use http_body::Body;
use sdk_http::body::SdkBody;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use thiserror::Error;
use tower::Service;

/// The connector did not produce a response in time.
#[derive(Debug, Error)]
#[error("request did not complete within {timeout:?}")]
pub struct RequestTimeoutError {
    timeout: Duration,
}

impl RequestTimeoutError {
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Wraps a connector so that every request is bounded by a timeout.
///
/// The deadline covers the whole exchange: a streaming response body is read into memory before
/// the deadline passes, so a body that stalls after the headers arrived fails the same way.
#[derive(Clone, Debug)]
pub struct TimeoutConnector<C> {
    inner: C,
    timeout: Duration,
}

impl<C> TimeoutConnector<C> {
    pub fn new(inner: C, timeout: Duration) -> Self {
        TimeoutConnector { inner, timeout }
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send>>;

impl<C> Service<http::Request<SdkBody>> for TimeoutConnector<C>
where
    C: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>,
    C::Error: Into<BoxError>,
    C::Future: Send + 'static,
{
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = BoxFuture<Self::Response>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(|err| err.into())
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> Self::Future {
        let timeout = self.timeout;
        let deadline = tokio::time::Instant::now() + timeout;
        let future = self.inner.call(req);
        Box::pin(async move {
            let response = tokio::time::timeout_at(deadline, future)
                .await
                .map_err(|_elapsed| RequestTimeoutError { timeout })?
                .map_err(Into::<BoxError>::into)?;
            if response.body().bytes().is_some() {
                return Ok(response);
            }
            let (parts, body) = response.into_parts();
            let body = tokio::time::timeout_at(deadline, buffer(body))
                .await
                .map_err(|_elapsed| RequestTimeoutError { timeout })??;
            Ok(http::Response::from_parts(parts, body))
        })
    }
}

async fn buffer(mut body: SdkBody) -> Result<SdkBody, BoxError> {
    let mut buffered = BytesMut::new();
    while let Some(chunk) = body.data().await {
        buffered.extend_from_slice(&chunk?);
    }
    Ok(SdkBody::from(buffered.freeze()))
}
