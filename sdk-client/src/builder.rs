/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::timeout::TimeoutConnector;
use crate::{BoxError, Client};
use sdk_http::body::SdkBody;
use sdk_http::interceptor::{Interceptor, Interceptors};
use std::sync::Arc;
use std::time::Duration;

/// A builder that provides more customization options when constructing a [`Client`].
///
/// To start, call [`Builder::new`]. Then, chain the method calls to configure the `Builder`.
/// When configured to your liking, call [`Builder::build`]. The individual methods have additional
/// documentation.
#[derive(Clone, Debug)]
pub struct Builder<C, M> {
    connector: C,
    middleware: M,
    interceptors: Interceptors,
}

impl Default for Builder<(), ()> {
    fn default() -> Self {
        Builder {
            connector: (),
            middleware: (),
            interceptors: Interceptors::new(),
        }
    }
}

impl Builder<(), ()> {
    /// Construct a new, unconfigured builder.
    ///
    /// This builder cannot yet be used, as it does not specify a [connector](Builder::connector)
    /// or [middleware](Builder::middleware).
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, M> Builder<C, M> {
    /// Specify the connector for the eventual client to use.
    ///
    /// The connector dictates how requests are turned into responses. Normally, this would entail
    /// sending the request to some kind of remote server, but in certain settings it's useful to
    /// be able to use a custom connector instead, such as to mock the network for tests.
    ///
    /// If you just want to specify a function from request to response instead, use
    /// [`Builder::map_connector`].
    pub fn connector<C2>(self, connector: C2) -> Builder<C2, M> {
        Builder {
            connector,
            middleware: self.middleware,
            interceptors: self.interceptors,
        }
    }

    /// Specify the middleware for the eventual client to use.
    ///
    /// The middleware adjusts requests before they are dispatched to the connector. It is
    /// responsible for filling in any request parameters that aren't specified by the protocol
    /// definition, such as those used for routing (like the URL), authentication, and
    /// authorization.
    ///
    /// If your requests are already ready to be sent and need no adjustment, you can use
    /// [`tower::layer::util::Identity`] as your middleware.
    pub fn middleware<M2>(self, middleware: M2) -> Builder<C, M2> {
        Builder {
            connector: self.connector,
            middleware,
            interceptors: self.interceptors,
        }
    }

    /// Append an interceptor. Interceptors run in the order they were added.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Append an interceptor that is also held elsewhere, for example by a test.
    pub fn shared_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push_shared(interceptor);
        self
    }

    /// Replace all interceptors.
    pub fn interceptors(mut self, interceptors: Interceptors) -> Self {
        self.interceptors = interceptors;
        self
    }

    /// Bound every request sent through the connector by `timeout`.
    ///
    /// A request that does not produce a response in time fails with
    /// [`SdkError::DispatchFailure`](crate::SdkError::DispatchFailure).
    pub fn timeout(self, timeout: Duration) -> Builder<TimeoutConnector<C>, M> {
        Builder {
            connector: TimeoutConnector::new(self.connector, timeout),
            middleware: self.middleware,
            interceptors: self.interceptors,
        }
    }

    /// Use a connector that directly maps each request to a response.
    ///
    /// ```rust
    /// use sdk_client::Builder;
    /// use sdk_http::body::SdkBody;
    /// let client = Builder::new()
    /// # /*
    ///   .middleware(..)
    /// # */
    /// # .middleware(tower::layer::util::Identity::new())
    ///   .map_connector(|req: http::Request<SdkBody>| {
    ///     async move {
    ///       Ok(http::Response::new(SdkBody::empty()))
    ///     }
    ///   })
    ///   .build();
    /// ```
    pub fn map_connector<F, FF>(self, map: F) -> Builder<tower::util::ServiceFn<F>, M>
    where
        F: Fn(http::Request<SdkBody>) -> FF + Send,
        FF: std::future::Future<Output = Result<http::Response<SdkBody>, BoxError>>,
    {
        self.connector(tower::service_fn(map))
    }

    /// Build a [`Client`].
    pub fn build(self) -> Client<C, M> {
        Client {
            connector: self.connector,
            middleware: self.middleware,
            interceptors: self.interceptors,
        }
    }
}
