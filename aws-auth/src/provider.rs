/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod env;

use crate::Credentials;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::future::{self, Future};
use std::pin::Pin;
use std::sync::Arc;

#[derive(Debug)]
#[non_exhaustive]
pub enum CredentialsError {
    CredentialsNotLoaded,
    Unhandled(Box<dyn Error + Send + Sync + 'static>),
}

impl Display for CredentialsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::CredentialsNotLoaded => write!(f, "CredentialsNotLoaded"),
            CredentialsError::Unhandled(err) => write!(f, "{}", err),
        }
    }
}

impl Error for CredentialsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CredentialsError::Unhandled(e) => Some(e.as_ref() as _),
            _ => None,
        }
    }
}

pub type CredentialsResult = Result<Credentials, CredentialsError>;
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// An asynchronous credentials provider
///
/// If your use-case is synchronous, you should implement [ProvideCredentials] instead.
pub trait AsyncProvideCredentials: Send + Sync {
    fn provide_credentials(&self) -> BoxFuture<CredentialsResult>;
}

/// A synchronous credentials provider
///
/// This is offered as a convenience for credential provider implementations that don't
/// need to be async. Otherwise, implement [AsyncProvideCredentials].
pub trait ProvideCredentials: Send + Sync {
    fn provide_credentials(&self) -> Result<Credentials, CredentialsError>;
}

impl<T> AsyncProvideCredentials for T
where
    T: ProvideCredentials,
{
    fn provide_credentials(&self) -> BoxFuture<CredentialsResult> {
        let result = ProvideCredentials::provide_credentials(self);
        Box::pin(future::ready(result))
    }
}

impl ProvideCredentials for Credentials {
    fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
        Ok(self.clone())
    }
}

/// Credentials provider shared by every operation of a client.
#[derive(Clone)]
pub struct SharedCredentialsProvider(Arc<dyn AsyncProvideCredentials>);

impl SharedCredentialsProvider {
    pub fn new(provider: impl AsyncProvideCredentials + 'static) -> Self {
        SharedCredentialsProvider(Arc::new(provider))
    }

    pub fn provide_credentials(&self) -> BoxFuture<CredentialsResult> {
        self.0.provide_credentials()
    }
}

impl From<Arc<dyn AsyncProvideCredentials>> for SharedCredentialsProvider {
    fn from(provider: Arc<dyn AsyncProvideCredentials>) -> Self {
        SharedCredentialsProvider(provider)
    }
}

impl Debug for SharedCredentialsProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCredentialsProvider").finish()
    }
}

pub fn default_provider() -> impl AsyncProvideCredentials {
    env::EnvironmentVariableCredentialsProvider::new()
}

#[cfg(test)]
mod test {
    use super::{CredentialsError, ProvideCredentials, SharedCredentialsProvider};
    use crate::Credentials;

    struct NoCredentials;

    impl ProvideCredentials for NoCredentials {
        fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
            Err(CredentialsError::CredentialsNotLoaded)
        }
    }

    #[tokio::test]
    async fn sync_providers_are_usable_as_async_providers() {
        let creds = Credentials::from_keys("akid", "secret", None);
        let provider = SharedCredentialsProvider::new(creds.clone());
        assert_eq!(provider.provide_credentials().await.unwrap(), creds);
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let provider = SharedCredentialsProvider::new(NoCredentials);
        match provider.provide_credentials().await {
            Err(CredentialsError::CredentialsNotLoaded) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
