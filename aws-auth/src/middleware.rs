/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::provider::{CredentialsError, SharedCredentialsProvider};
use crate::{Credentials, CredentialsOverride};
use sdk_http::operation;
use sdk_http_tower::SendOperationError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tower::{Layer, Service};
use tracing::{debug, Instrument};

#[derive(Debug, Error)]
pub enum CredentialsStageError {
    #[error("No credentials provider in the property bag")]
    MissingCredentialsProvider,
    #[error("Failed to load credentials from the credentials provider")]
    CredentialsLoadingError(#[from] CredentialsError),
}

/// Middleware stage that resolves credentials for one request
///
/// A [`CredentialsOverride`](CredentialsOverride) in the property bag wins. Otherwise the
/// [`SharedCredentialsProvider`](SharedCredentialsProvider) in the property bag is asked for
/// credentials. The result is stored in the property bag as [`Credentials`](Credentials) for
/// the signing stage.
///
/// A resolution failure is a construction error: the inner service is never called.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct CredentialsStage;

impl CredentialsStage {
    pub fn new() -> Self {
        CredentialsStage
    }
}

impl<S> Layer<S> for CredentialsStage {
    type Service = CredentialsStageService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CredentialsStageService { inner }
    }
}

#[derive(Clone, Debug)]
pub struct CredentialsStageService<S> {
    inner: S,
}

enum CredentialsSource {
    Override(Credentials),
    Provider(SharedCredentialsProvider),
}

fn credentials_source(
    request: &operation::Request,
) -> Result<CredentialsSource, CredentialsStageError> {
    let properties = request.properties();
    if let Some(CredentialsOverride(credentials)) = properties.get::<CredentialsOverride>() {
        return Ok(CredentialsSource::Override(credentials.clone()));
    }
    properties
        .get::<SharedCredentialsProvider>()
        .cloned()
        .map(CredentialsSource::Provider)
        .ok_or(CredentialsStageError::MissingCredentialsProvider)
}

type BoxedResultFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S> Service<operation::Request> for CredentialsStageService<S>
where
    S: Service<operation::Request, Error = SendOperationError> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = SendOperationError;
    type Future = BoxedResultFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: operation::Request) -> Self::Future {
        // The readied service moves into the future, a fresh clone stays behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let source = credentials_source(&request);
        let fut = async move {
            let credentials = match source {
                Ok(CredentialsSource::Override(credentials)) => {
                    debug!(
                        provider = credentials.provider_name(),
                        "using request credentials override"
                    );
                    credentials
                }
                Ok(CredentialsSource::Provider(provider)) => provider
                    .provide_credentials()
                    .await
                    .map_err(|err| construction_error(err.into()))?,
                Err(err) => return Err(construction_error(err)),
            };
            request.properties_mut().insert(credentials);
            inner.call(request).await
        };
        Box::pin(fut.instrument(tracing::debug_span!("resolve_credentials")))
    }
}

fn construction_error(err: CredentialsStageError) -> SendOperationError {
    debug!(error = %err, "failed to resolve credentials");
    SendOperationError::RequestConstructionError(err.into())
}

#[cfg(test)]
mod test {
    use super::CredentialsStage;
    use crate::provider::{CredentialsError, ProvideCredentials, SharedCredentialsProvider};
    use crate::{set_override, set_provider, Credentials};
    use sdk_http::body::SdkBody;
    use sdk_http::operation;
    use sdk_http_tower::SendOperationError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::{service_fn, Layer, Service, ServiceExt};

    #[derive(Clone, Default)]
    struct CountingProvider(Arc<AtomicUsize>);

    impl ProvideCredentials for CountingProvider {
        fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Credentials::from_keys("AKID_A", "secret_a", None))
        }
    }

    struct Unavailable;

    impl ProvideCredentials for Unavailable {
        fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
            Err(CredentialsError::CredentialsNotLoaded)
        }
    }

    fn request() -> operation::Request {
        operation::Request::new(http::Request::new(SdkBody::from("body")))
    }

    /// Echoes the access key id the stage resolved.
    async fn echo_access_key(
        request: operation::Request,
    ) -> Result<String, SendOperationError> {
        let properties = request.properties();
        let creds = properties
            .get::<Credentials>()
            .expect("credentials resolved before the inner service");
        Ok(creds.access_key_id().to_string())
    }

    #[tokio::test]
    async fn provider_credentials_are_stored_in_the_bag() {
        let provider = CountingProvider::default();
        let mut req = request();
        set_provider(
            &mut req.properties_mut(),
            SharedCredentialsProvider::new(provider.clone()),
        );
        let mut svc = CredentialsStage::new().layer(service_fn(echo_access_key));
        let akid = svc.ready().await.unwrap().call(req).await.unwrap();
        assert_eq!(akid, "AKID_A");
        assert_eq!(provider.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn override_takes_precedence_over_the_provider() {
        let provider = CountingProvider::default();
        let mut req = request();
        {
            let mut props = req.properties_mut();
            set_provider(&mut props, SharedCredentialsProvider::new(provider.clone()));
            set_override(
                &mut props,
                Some(Credentials::from_keys("AKID_B", "secret_b", None)),
            );
        }
        let mut svc = CredentialsStage::new().layer(service_fn(echo_access_key));
        let akid = svc.ready().await.unwrap().call(req).await.unwrap();
        assert_eq!(akid, "AKID_B");
        assert_eq!(provider.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn resolution_failure_never_reaches_the_inner_service() {
        let called = Arc::new(AtomicUsize::new(0));
        let inner_called = called.clone();
        let inner = service_fn(move |_req: operation::Request| {
            inner_called.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, SendOperationError>(()) }
        });
        let mut req = request();
        set_provider(
            &mut req.properties_mut(),
            SharedCredentialsProvider::new(Unavailable),
        );
        let mut svc = CredentialsStage::new().layer(inner);
        match svc.ready().await.unwrap().call(req).await {
            Err(SendOperationError::RequestConstructionError(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(called.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_provider_is_a_construction_error() {
        let mut svc = CredentialsStage::new().layer(service_fn(echo_access_key));
        match svc.ready().await.unwrap().call(request()).await {
            Err(SendOperationError::RequestConstructionError(err)) => {
                assert!(err.to_string().contains("No credentials provider"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
