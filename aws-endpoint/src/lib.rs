/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod partition;

pub use partition::{Partition, PartitionResolver};

use aws_types::region::{Region, SigningRegion};
use aws_types::SigningService;
use http::header::{InvalidHeaderValue, HOST};
use http::HeaderValue;
use sdk_http::endpoint::{Endpoint, InvalidEndpoint};
use sdk_http::middleware::MapRequest;
use sdk_http::operation::Request;
use sdk_http::property_bag::PropertyBag;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Endpoint to connect to plus the scope its requests are signed for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwsEndpoint {
    endpoint: Endpoint,
    credential_scope: CredentialScope,
}

impl AwsEndpoint {
    pub fn new(endpoint: Endpoint, credential_scope: CredentialScope) -> Self {
        AwsEndpoint {
            endpoint,
            credential_scope,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn credential_scope(&self) -> &CredentialScope {
        &self.credential_scope
    }

    pub fn set_endpoint(&self, uri: &mut http::Uri) -> Result<(), InvalidEndpoint> {
        self.endpoint.set_endpoint(uri)
    }
}

/// Signing region and service overrides. Unset fields fall back to the request's own values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialScope {
    region: Option<SigningRegion>,
    service: Option<SigningService>,
}

impl CredentialScope {
    pub fn builder() -> credential_scope::Builder {
        credential_scope::Builder::default()
    }

    pub fn region(&self) -> Option<&SigningRegion> {
        self.region.as_ref()
    }

    pub fn service(&self) -> Option<&SigningService> {
        self.service.as_ref()
    }
}

pub mod credential_scope {
    use crate::CredentialScope;
    use aws_types::region::SigningRegion;
    use aws_types::SigningService;

    #[derive(Debug, Default)]
    pub struct Builder {
        region: Option<SigningRegion>,
        service: Option<SigningService>,
    }

    impl Builder {
        pub fn region(mut self, region: impl Into<SigningRegion>) -> Self {
            self.region = Some(region.into());
            self
        }

        pub fn service(mut self, service: impl Into<SigningService>) -> Self {
            self.service = Some(service.into());
            self
        }

        pub fn build(self) -> CredentialScope {
            CredentialScope {
                region: self.region,
                service: self.service,
            }
        }
    }
}

/// Resolve the AWS Endpoint for a given region
///
/// To provide a static endpoint, [`Endpoint`](sdk_http::endpoint::Endpoint) implements this trait.
/// Example usage:
/// ```rust
/// # mod dms {
/// # use aws_endpoint::ResolveAwsEndpoint;
/// # pub struct ConfigBuilder;
/// # impl ConfigBuilder {
/// #     pub fn endpoint(&mut self, resolver: impl ResolveAwsEndpoint + 'static) {
/// #         // ...
/// #     }
/// # }
/// # pub struct Config;
/// # impl Config {
/// #     pub fn builder() -> ConfigBuilder {
/// #         ConfigBuilder
/// #     }
/// # }
/// # }
/// use sdk_http::endpoint::Endpoint;
/// use http::Uri;
/// let config = dms::Config::builder()
///     .endpoint(Endpoint::immutable(Uri::from_static("http://localhost:8080")));
/// ```
pub trait ResolveAwsEndpoint: Send + Sync {
    fn resolve_endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError>;
}

impl ResolveAwsEndpoint for Endpoint {
    fn resolve_endpoint(&self, _region: &Region) -> Result<AwsEndpoint, BoxError> {
        Ok(AwsEndpoint {
            endpoint: self.clone(),
            credential_scope: Default::default(),
        })
    }
}

pub type AwsEndpointResolver = Arc<dyn ResolveAwsEndpoint>;

pub fn get_endpoint_resolver(properties: &PropertyBag) -> Option<&AwsEndpointResolver> {
    properties.get()
}

pub fn set_endpoint_resolver(properties: &mut PropertyBag, provider: AwsEndpointResolver) {
    properties.insert(provider);
}

/// Middleware Stage to Add an Endpoint to a Request
///
/// AwsEndpointStage implements [`MapRequest`](sdk_http::middleware::MapRequest). It will:
/// 1. Load an endpoint provider from the property bag.
/// 2. Load an endpoint given the [`Region`](aws_types::region::Region) in the property bag.
/// 3. Apply the endpoint to the URI in the request and set the `Host` header
/// 4. Set the `SigningRegion` and `SigningService` in the property bag to drive downstream
/// signing middleware.
#[derive(Clone, Debug, Default)]
pub struct AwsEndpointStage;

#[derive(Debug, Error)]
pub enum AwsEndpointStageError {
    #[error("No endpoint resolver in the property bag")]
    NoEndpointResolver,
    #[error("No region in the property bag")]
    NoRegion,
    #[error("Failed to resolve the endpoint")]
    EndpointResolutionError(#[source] BoxError),
    #[error("Failed to apply the endpoint to the request")]
    InvalidEndpoint(#[from] InvalidEndpoint),
    #[error("Endpoint authority is not a valid Host header")]
    InvalidHost(#[from] InvalidHeaderValue),
}

impl MapRequest for AwsEndpointStage {
    type Error = AwsEndpointStageError;

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut http_req, props| {
            let provider = get_endpoint_resolver(props)
                .cloned()
                .ok_or(AwsEndpointStageError::NoEndpointResolver)?;
            let region = props
                .get::<Region>()
                .cloned()
                .ok_or(AwsEndpointStageError::NoRegion)?;
            let endpoint = provider
                .resolve_endpoint(&region)
                .map_err(AwsEndpointStageError::EndpointResolutionError)?;
            tracing::debug!(endpoint = ?endpoint, base_region = %region, "resolved endpoint");
            let signing_region = endpoint
                .credential_scope()
                .region()
                .cloned()
                .unwrap_or_else(|| region.into());
            props.insert::<SigningRegion>(signing_region);
            if let Some(signing_service) = endpoint.credential_scope().service() {
                props.insert::<SigningService>(signing_service.clone());
            }
            endpoint.set_endpoint(http_req.uri_mut())?;
            if let Some(authority) = http_req.uri().authority() {
                let host = HeaderValue::from_str(authority.as_str())?;
                http_req.headers_mut().insert(HOST, host);
            }
            Ok(http_req)
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use http::header::HOST;
    use http::Uri;

    use aws_types::region::{Region, SigningRegion};
    use aws_types::SigningService;
    use sdk_http::body::SdkBody;
    use sdk_http::endpoint::Endpoint;
    use sdk_http::middleware::MapRequest;
    use sdk_http::operation;

    use crate::partition::endpoint::{Definition, Protocol, SignatureVersion};
    use crate::{set_endpoint_resolver, AwsEndpointStage, AwsEndpointStageError, CredentialScope};

    fn request(uri: &'static str) -> operation::Request {
        operation::Request::new(
            http::Request::builder()
                .uri(uri)
                .body(SdkBody::from(""))
                .unwrap(),
        )
    }

    #[test]
    fn default_endpoint_updates_request() {
        let provider = Arc::new(Definition {
            uri_template: "dms.{region}.amazonaws.com",
            protocol: Protocol::Https,
            credential_scope: Default::default(),
            signature_versions: SignatureVersion::V4,
        });
        let region = Region::new("us-east-1");
        let mut req = request("/");
        {
            let mut props = req.properties_mut();
            props.insert(region.clone());
            props.insert(SigningService::from_static("dms"));
            set_endpoint_resolver(&mut props, provider);
        };
        let req = AwsEndpointStage.apply(req).expect("should succeed");
        assert_eq!(req.properties().get(), Some(&SigningRegion::from(region)));
        assert_eq!(
            req.properties().get(),
            Some(&SigningService::from_static("dms"))
        );

        let (req, _conf) = req.into_parts();
        assert_eq!(
            req.uri(),
            &Uri::from_static("https://dms.us-east-1.amazonaws.com/")
        );
        assert_eq!(req.headers().get(HOST).unwrap(), "dms.us-east-1.amazonaws.com");
    }

    #[test]
    fn sets_service_override_when_set() {
        let provider = Arc::new(Definition {
            uri_template: "www.service.com",
            protocol: Protocol::Http,
            credential_scope: CredentialScope::builder()
                .service(SigningService::from_static("qldb-override"))
                .region(SigningRegion::from_static("us-east-override"))
                .build(),
            signature_versions: SignatureVersion::V4,
        });
        let mut req = request("/");
        {
            let mut props = req.properties_mut();
            props.insert(Region::new("us-east-1"));
            props.insert(SigningService::from_static("dms"));
            set_endpoint_resolver(&mut props, provider);
        };
        let req = AwsEndpointStage.apply(req).expect("should succeed");
        assert_eq!(
            req.properties().get(),
            Some(&SigningRegion::from(Region::new("us-east-override")))
        );
        assert_eq!(
            req.properties().get(),
            Some(&SigningService::from_static("qldb-override"))
        );
    }

    #[test]
    fn static_endpoint_override() {
        let mut req = request("/2013-04-01/hostedzone/Z1");
        {
            let mut props = req.properties_mut();
            props.insert(Region::new("eu-west-1"));
            set_endpoint_resolver(
                &mut props,
                Arc::new(Endpoint::immutable(Uri::from_static(
                    "http://localhost:8000/proxy",
                ))),
            );
        };
        let req = AwsEndpointStage.apply(req).expect("should succeed");
        assert_eq!(
            req.properties().get(),
            Some(&SigningRegion::from_static("eu-west-1"))
        );
        let (req, _conf) = req.into_parts();
        assert_eq!(
            req.uri(),
            &Uri::from_static("http://localhost:8000/proxy/2013-04-01/hostedzone/Z1")
        );
        assert_eq!(req.headers().get(HOST).unwrap(), "localhost:8000");
    }

    #[test]
    fn missing_region_is_an_error() {
        let mut req = request("/");
        set_endpoint_resolver(
            &mut req.properties_mut(),
            Arc::new(Endpoint::mutable(Uri::from_static("https://localhost"))),
        );
        match AwsEndpointStage.apply(req) {
            Err(AwsEndpointStageError::NoRegion) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
