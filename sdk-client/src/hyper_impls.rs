/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::Builder;
use http::Request;
use hyper::client::connect::Connect;
use hyper::client::HttpConnector;
use sdk_http::body::SdkBody;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Service;

/// Adapter from a [`hyper::Client`] to a connector usable by a [`Client`](crate::Client).
///
/// Responses come back with a streaming body that is read to completion by the response
/// parser.
#[derive(Clone, Debug)]
pub struct HyperAdapter<C>(hyper::Client<C, SdkBody>);

impl<C> From<hyper::Client<C, SdkBody>> for HyperAdapter<C> {
    fn from(hc: hyper::Client<C, SdkBody>) -> Self {
        Self(hc)
    }
}

/// An HTTPS connector backed by rustls with the platform's native root certificates.
pub type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector>;

impl HyperAdapter<HttpsConnector> {
    /// Build an HTTPS adapter backed by rustls.
    pub fn https() -> Self {
        let https = hyper_rustls::HttpsConnector::with_native_roots();
        HyperAdapter(hyper::Client::builder().build(https))
    }
}

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<C> Service<Request<SdkBody>> for HyperAdapter<C>
where
    C: Clone + Send + Sync + 'static,
    C: Connect,
{
    type Response = http::Response<SdkBody>;
    type Error = hyper::Error;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.0.poll_ready(cx)
    }

    fn call(&mut self, req: Request<SdkBody>) -> Self::Future {
        let fut = self.0.call(req);
        Box::pin(async move { Ok(fut.await?.map(SdkBody::from)) })
    }
}

impl<M> Builder<(), M> {
    /// Connect to the service over HTTPS, using rustls for TLS.
    pub fn https(self) -> Builder<HyperAdapter<HttpsConnector>, M> {
        self.connector(HyperAdapter::https())
    }
}

impl<M> Builder<(), M> {
    /// Use a hyper client as the connector.
    pub fn hyper<HC>(self, connector: hyper::Client<HC, SdkBody>) -> Builder<HyperAdapter<HC>, M>
    where
        HC: Clone + Send + Sync + 'static,
        HC: Connect,
    {
        self.connector(HyperAdapter::from(connector))
    }
}
