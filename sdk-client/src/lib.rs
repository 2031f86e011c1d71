/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */
//! A generic, tower-based operation invoker.
//!
//! Every service operation runs through the same pipeline: build the [`Operation`], run the
//! caller-supplied middleware (credentials, endpoint, signing), dispatch over the connector and
//! parse the response into either a typed output or a classified [`SdkError`].
#![warn(missing_debug_implementations)]

pub mod blocking;
mod builder;
mod invocation;
pub mod timeout;

#[cfg(feature = "test-util")]
pub mod test_connection;

#[cfg(feature = "rustls")]
mod hyper_impls;
#[cfg(feature = "rustls")]
pub use hyper_impls::{HttpsConnector, HyperAdapter};

pub use builder::Builder;
pub use invocation::Invocation;

use sdk_http::body::SdkBody;
use sdk_http::interceptor::Interceptors;
use sdk_http::operation::{BuildError, Metadata, Operation};
pub use sdk_http::result::{SdkError, SdkSuccess};
use sdk_http_tower::dispatch::DispatchLayer;
use sdk_http_tower::parse_response::ParseResponseLayer;
use std::error::Error;
use tower::{Layer, Service, ServiceBuilder, ServiceExt};
use tracing::Instrument;

type BoxError = Box<dyn Error + Send + Sync>;

/// Service client.
///
/// The service client is customizable in a number of ways (see [`Builder`]). The middleware fills
/// out the [`http::Request`] for each higher-level operation so that it can ultimately be sent to
/// the remote host. The middleware is responsible for filling in any request parameters that
/// aren't specified by the protocol definition, such as those used for routing (like the URL),
/// authentication, and authorization.
///
/// The middleware takes the form of a [`tower::Layer`] that wraps the actual connection for each
/// request. The [`tower::Service`] that the middleware produces must accept requests of the type
/// [`sdk_http::operation::Request`] and return responses of the type
/// [`http::Response<SdkBody>`], most likely by modifying the provided request in place, passing it
/// to the inner service, and then ultimately returning the inner service's response.
///
/// A `Client` is immutable once built and can be shared between concurrent invocations.
#[derive(Debug)]
pub struct Client<Connector, Middleware> {
    connector: Connector,
    middleware: Middleware,
    interceptors: Interceptors,
}

impl<C, M> Client<C, M> {
    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

impl<C, M> Client<C, M>
where
    C: bounds::SdkConnector,
    M: bounds::SdkMiddleware<C>,
{
    /// Dispatch this request to the network
    ///
    /// For ergonomics, this does not include the raw response for successful responses. To
    /// access the raw response use `call_raw`.
    pub async fn call<O, T, E>(&self, input: Operation<O>) -> Result<T, SdkError<E>>
    where
        bounds::Parsed<<M as bounds::SdkMiddleware<C>>::Service, O>:
            Service<Operation<O>, Response = SdkSuccess<T>, Error = SdkError<E>> + Clone,
    {
        self.call_raw(input).await.map(|res| res.parsed)
    }

    /// Dispatch this request to the network
    ///
    /// The returned result contains the raw HTTP response which can be useful for debugging or
    /// implementing unsupported features.
    pub async fn call_raw<O, T, E>(
        &self,
        mut input: Operation<O>,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        // This bound is not _technically_ inferred by all the previous bounds, but in practice it
        // is because _we_ know that there is only implementation of Service for Parsed
        // (ParsedResponseService), and it will apply as long as the bounds on C and M hold,
        // and will produce (as expected) Response = SdkSuccess<T>, Error = SdkError<E>. But Rust
        // doesn't know that -- there _could_ theoretically be other implementations of Service for
        // Parsed that don't return those same types. So, we must give the bound.
        bounds::Parsed<<M as bounds::SdkMiddleware<C>>::Service, O>:
            Service<Operation<O>, Response = SdkSuccess<T>, Error = SdkError<E>> + Clone,
    {
        let metadata = input
            .metadata()
            .cloned()
            .unwrap_or_else(|| Metadata::new("unnamed", "unnamed"));
        let invocation = Invocation::start(metadata, &self.interceptors);
        input
            .properties_mut()
            .insert(invocation.context().clone());
        let span = invocation.span().clone();
        let result = self.dispatch(input).instrument(span).await;
        invocation.finish(&result);
        result
    }

    /// Build and dispatch one operation.
    ///
    /// The invocation is opened before `make_operation` runs, so marshalling and validation
    /// failures are observed by interceptors like every other outcome. A construction failure
    /// never reaches the connector.
    pub async fn invoke<O, T, E, F>(
        &self,
        metadata: Metadata,
        make_operation: F,
    ) -> Result<T, SdkError<E>>
    where
        F: FnOnce() -> Result<Operation<O>, BuildError>,
        bounds::Parsed<<M as bounds::SdkMiddleware<C>>::Service, O>:
            Service<Operation<O>, Response = SdkSuccess<T>, Error = SdkError<E>> + Clone,
    {
        let invocation = Invocation::start(metadata.clone(), &self.interceptors);
        let span = invocation.span().clone();
        let result = match span.in_scope(make_operation) {
            Err(err) => {
                tracing::debug!(parent: &span, error = %err, "failed to construct operation");
                Err(SdkError::ConstructionFailure(err.into()))
            }
            Ok(operation) => {
                let mut operation = operation.with_metadata(metadata);
                operation
                    .properties_mut()
                    .insert(invocation.context().clone());
                self.dispatch(operation).instrument(span).await
            }
        };
        invocation.finish(&result);
        result.map(|success| success.parsed)
    }

    async fn dispatch<O, T, E>(&self, input: Operation<O>) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        bounds::Parsed<<M as bounds::SdkMiddleware<C>>::Service, O>:
            Service<Operation<O>, Response = SdkSuccess<T>, Error = SdkError<E>> + Clone,
    {
        let connector = self.connector.clone();
        let mut svc = ServiceBuilder::new()
            .layer(ParseResponseLayer::<O>::new())
            // These layers can be considered as occurring in order. That is, first invoke the
            // customer-provided middleware, then dispatch over the wire.
            .layer(&self.middleware)
            .layer(DispatchLayer::with_interceptors(self.interceptors.clone()))
            .service(connector);
        svc.ready().await?.call(input).await
    }
}

/// This module holds convenient short-hands for the otherwise fairly extensive trait bounds
/// required for `call` and friends.
///
/// The short-hands will one day be true [trait aliases], but for now they are traits with blanket
/// implementations. Also, due to [compiler limitations], the bounds repeat a number of associated
/// types with bounds so that those bounds [do not need to be repeated] at the call site. It's a
/// bit of a mess to define, but _should_ be invisible to callers.
///
/// [trait aliases]: https://rust-lang.github.io/rfcs/1733-trait-alias.html
/// [compiler limitations]: https://github.com/rust-lang/rust/issues/20671
/// [do not need to be repeated]: https://github.com/rust-lang/rust/issues/20671#issuecomment-529752828
pub mod bounds {
    use super::*;

    /// A service that has parsed a raw response.
    pub type Parsed<S, O> = sdk_http_tower::parse_response::ParseResponseService<S, O>;

    /// A low-level connector that maps from [`http::Request`] to [`http::Response`].
    ///
    /// This trait has a blanket implementation for all compatible types, and should never need to
    /// be implemented.
    pub trait SdkConnector:
        Service<
            http::Request<SdkBody>,
            Response = http::Response<SdkBody>,
            Error = <Self as SdkConnector>::Error,
            Future = <Self as SdkConnector>::Future,
        > + Send
        + Sync
        + Clone
        + 'static
    {
        /// Forwarding type to `<Self as Service>::Error` for bound inference.
        ///
        /// See module-level docs for details.
        type Error: Into<BoxError> + Send + Sync + 'static;

        /// Forwarding type to `<Self as Service>::Future` for bound inference.
        ///
        /// See module-level docs for details.
        type Future: Send + 'static;
    }

    impl<T> SdkConnector for T
    where
        T: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
            + Send
            + Sync
            + Clone
            + 'static,
        T::Error: Into<BoxError> + Send + Sync + 'static,
        T::Future: Send + 'static,
    {
        type Error = T::Error;
        type Future = T::Future;
    }

    /// A middleware service that adjusts [`sdk_http::operation::Request`]s.
    ///
    /// This trait has a blanket implementation for all compatible types, and should never need to
    /// be implemented.
    pub trait SdkMiddlewareService:
        Service<
        sdk_http::operation::Request,
        Response = http::Response<SdkBody>,
        Error = sdk_http_tower::SendOperationError,
        Future = <Self as SdkMiddlewareService>::Future,
    >
    {
        /// Forwarding type to `<Self as Service>::Future` for bound inference.
        ///
        /// See module-level docs for details.
        type Future: Send + 'static;
    }

    impl<T> SdkMiddlewareService for T
    where
        T: Service<
            sdk_http::operation::Request,
            Response = http::Response<SdkBody>,
            Error = sdk_http_tower::SendOperationError,
        >,
        T::Future: Send + 'static,
    {
        type Future = T::Future;
    }

    /// A middleware layer (i.e., factory).
    ///
    /// This trait has a blanket implementation for all compatible types, and should never need to
    /// be implemented.
    pub trait SdkMiddleware<C>:
        Layer<
        sdk_http_tower::dispatch::DispatchService<C>,
        Service = <Self as SdkMiddleware<C>>::Service,
    >
    {
        /// Forwarding type to `<Self as Layer>::Service` for bound inference.
        ///
        /// See module-level docs for details.
        type Service: SdkMiddlewareService + Send + Clone + 'static;
    }

    impl<T, C> SdkMiddleware<C> for T
    where
        T: Layer<sdk_http_tower::dispatch::DispatchService<C>>,
        T::Service: SdkMiddlewareService + Send + Clone + 'static,
    {
        type Service = T::Service;
    }
}
