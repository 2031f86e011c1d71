/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The outermost layer of an invocation
//!
//! Splits an [`Operation`] into the request, which is sent through the inner stack, and the
//! response handler, which turns whatever comes back into a typed [`SdkSuccess`] or [`SdkError`].

use crate::SendOperationError;
use sdk_http::body::SdkBody;
use sdk_http::middleware::load_response;
use sdk_http::operation::{self, Operation};
use sdk_http::response::{ParseFailure, ParseHttpResponse};
use sdk_http::result::{SdkError, SdkSuccess};
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug_span, Instrument};

pub struct ParseResponseLayer<H> {
    _handler: PhantomData<fn() -> H>,
}

impl<H> ParseResponseLayer<H> {
    pub fn new() -> Self {
        ParseResponseLayer {
            _handler: PhantomData,
        }
    }
}

impl<H> Default for ParseResponseLayer<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, H> Layer<S> for ParseResponseLayer<H>
where
    S: Service<operation::Request>,
{
    type Service = ParseResponseService<S, H>;

    fn layer(&self, inner: S) -> Self::Service {
        ParseResponseService {
            inner,
            _handler: PhantomData,
        }
    }
}

/// Accepts `Operation<H>` and produces the result of `H` applied to the raw response
///
/// `S` must speak `operation::Request`; in practice it is the middleware stack ending in a
/// `DispatchService`. Transport failures surface unchanged as dispatch failures and are never
/// given to the handler.
pub struct ParseResponseService<S, H> {
    inner: S,
    _handler: PhantomData<fn() -> H>,
}

impl<S: Clone, H> Clone for ParseResponseService<S, H> {
    fn clone(&self) -> Self {
        ParseResponseService {
            inner: self.inner.clone(),
            _handler: PhantomData,
        }
    }
}

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S, H, T, E> Service<Operation<H>> for ParseResponseService<S, H>
where
    S: Service<operation::Request, Response = http::Response<SdkBody>, Error = SendOperationError>,
    S::Future: Send + 'static,
    H: ParseHttpResponse<SdkBody, Output = Result<T, ParseFailure<E>>> + Send + Sync + 'static,
    T: 'static,
    E: 'static,
{
    type Response = SdkSuccess<T>;
    type Error = SdkError<E>;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(SdkError::from)
    }

    fn call(&mut self, operation: Operation<H>) -> Self::Future {
        let (request, parts) = operation.into_request_response();
        let span = match &parts.metadata {
            Some(metadata) => debug_span!(
                "parse_response",
                service = metadata.service(),
                operation = metadata.name()
            ),
            None => debug_span!("parse_response"),
        };
        let handler = parts.response_handler;
        let sent = self.inner.call(request);
        Box::pin(
            async move {
                let response = sent.await.map_err(SdkError::from)?;
                tracing::trace!(status = %response.status(), "response received");
                load_response(response, &handler).await
            }
            .instrument(span),
        )
    }
}
