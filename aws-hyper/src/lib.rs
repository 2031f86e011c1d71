/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The AWS flavor of the generic operation invoker.
//!
//! [`AwsMiddleware`] resolves credentials, resolves the endpoint, adds the user agent and signs
//! the request, in that order. Service crates pair it with a connector through [`Client`].

use aws_auth::middleware::CredentialsStage;
use aws_endpoint::AwsEndpointStage;
use aws_http::user_agent::UserAgentStage;
use aws_sig_auth::middleware::SigV4SigningStage;
use aws_sig_auth::signer::SigV4Signer;
use sdk_http_tower::map_request::MapRequestLayer;
use std::fmt;
use tower::layer::util::{Identity, Stack};
use tower::{Layer, ServiceBuilder};

pub use sdk_client::{SdkError, SdkSuccess};

#[cfg(feature = "test-util")]
pub use sdk_client::test_connection;

type AwsMiddlewareStack = Stack<
    MapRequestLayer<SigV4SigningStage>,
    Stack<
        MapRequestLayer<UserAgentStage>,
        Stack<MapRequestLayer<AwsEndpointStage>, Stack<CredentialsStage, Identity>>,
    >,
>;

/// AWS Middleware Stack
///
/// This implements the middleware stack for this service. It will:
/// 1. Load credentials from the credentials provider (or the request override)
/// 2. Resolve the endpoint and the signing scope
/// 3. Add a user agent
/// 4. Sign with credentials
///
/// Credentials are resolved first so that a missing credential fails before anything else
/// touches the request.
#[derive(Clone, Default)]
#[non_exhaustive]
pub struct AwsMiddleware;

impl AwsMiddleware {
    pub fn new() -> Self {
        AwsMiddleware
    }
}

impl fmt::Debug for AwsMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsMiddleware").finish()
    }
}

impl<S> Layer<S> for AwsMiddleware {
    type Service = <AwsMiddlewareStack as Layer<S>>::Service;

    fn layer(&self, inner: S) -> Self::Service {
        let credential_provider = CredentialsStage::new();
        let signer = MapRequestLayer::for_mapper(SigV4SigningStage::new(SigV4Signer::new()));
        let endpoint_resolver = MapRequestLayer::for_mapper(AwsEndpointStage);
        let user_agent = MapRequestLayer::for_mapper(UserAgentStage::new());
        // These layers can be considered as occurring in order, that is:
        // 1. Resolve credentials
        // 2. Resolve an endpoint
        // 3. Add a user agent
        // 4. Sign
        // (5. Dispatch over the wire)
        ServiceBuilder::new()
            .layer(credential_provider)
            .layer(endpoint_resolver)
            .layer(user_agent)
            .layer(signer)
            .service(inner)
    }
}

/// AWS service client
///
/// A generic client whose middleware is always [`AwsMiddleware`].
pub type Client<C> = sdk_client::Client<C, AwsMiddleware>;

/// Start building a client with the AWS middleware in place.
pub fn builder() -> sdk_client::Builder<(), AwsMiddleware> {
    sdk_client::Builder::new().middleware(AwsMiddleware::new())
}

/// A client that talks HTTPS through hyper and rustls.
#[cfg(feature = "rustls")]
pub type HttpsClient = Client<sdk_client::HyperAdapter<sdk_client::HttpsConnector>>;

/// Build a client that talks HTTPS through hyper and rustls.
#[cfg(feature = "rustls")]
pub fn https() -> HttpsClient {
    builder().https().build()
}

/// Build a client around an arbitrary connector, for example a test connection.
pub fn with_connector<C>(connector: C) -> Client<C> {
    builder().connector(connector).build()
}
