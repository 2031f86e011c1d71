/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_auth::{AsyncProvideCredentials, SharedCredentialsProvider};
use aws_endpoint::partition::endpoint::{Definition, Protocol, SignatureVersion};
use aws_endpoint::{AwsEndpointResolver, Partition, PartitionResolver, ResolveAwsEndpoint};
use aws_http::user_agent::{ApiMetadata, AwsUserAgent};
use aws_sig_auth::signer::OperationSigningConfig;
use aws_types::os_shim_internal::Env;
use aws_types::region::{self, ProvideRegion, Region};
use aws_types::SigningService;
use sdk_http::property_bag::PropertyBag;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

const API_METADATA: ApiMetadata = ApiMetadata::new(crate::SERVICE_NAME, env!("CARGO_PKG_VERSION"));

/// Client configuration
///
/// A `Config` is immutable once built. Every operation copies what it needs into its own request,
/// so one configuration can back any number of concurrent invocations.
#[derive(Clone)]
pub struct Config {
    pub(crate) region: Region,
    pub(crate) credentials_provider: SharedCredentialsProvider,
    pub(crate) endpoint_resolver: AwsEndpointResolver,
    pub(crate) user_agent: AwsUserAgent,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("user_agent", &self.user_agent.aws_ua_header())
            .finish()
    }
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Load every part of the operation's property bag that comes from configuration.
    pub(crate) fn apply(&self, properties: &mut PropertyBag) {
        properties.insert(self.region.clone());
        properties.insert(SigningService::from_static(crate::SERVICE_NAME));
        properties.insert(OperationSigningConfig::default_config());
        properties.insert(self.user_agent.clone());
        aws_endpoint::set_endpoint_resolver(properties, self.endpoint_resolver.clone());
        aws_auth::set_provider(properties, self.credentials_provider.clone());
    }
}

#[derive(Default)]
pub struct Builder {
    region: Option<Region>,
    credentials_provider: Option<SharedCredentialsProvider>,
    endpoint_resolver: Option<AwsEndpointResolver>,
    app_name: Option<Cow<'static, str>>,
    env: Option<Env>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region. When unset, `AWS_REGION` then `AWS_DEFAULT_REGION` are read, and the
    /// client falls back to `us-east-1`.
    pub fn region(mut self, region_provider: impl ProvideRegion) -> Self {
        self.region = region_provider.region();
        self
    }

    /// Set the client-wide credentials provider. Defaults to the environment.
    pub fn credentials_provider(
        mut self,
        credentials_provider: impl AsyncProvideCredentials + 'static,
    ) -> Self {
        self.credentials_provider = Some(SharedCredentialsProvider::new(credentials_provider));
        self
    }

    /// Send every request to a fixed endpoint instead of the regional one.
    ///
    /// ```rust
    /// use dms::Endpoint;
    /// use http::Uri;
    /// let config = dms::Config::builder()
    ///     .endpoint(Endpoint::immutable(Uri::from_static("http://localhost:8080")))
    ///     .build();
    /// ```
    pub fn endpoint(mut self, endpoint_resolver: impl ResolveAwsEndpoint + 'static) -> Self {
        self.endpoint_resolver = Some(Arc::new(endpoint_resolver));
        self
    }

    /// Application name appended to the user agent as `app/{name}`.
    pub fn user_agent_app_name(mut self, app_name: impl Into<Cow<'static, str>>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Environment used for the region, credentials and user agent defaults.
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Config {
        let env = self.env.unwrap_or_else(Env::real);
        let region = match self.region {
            Some(region) => region,
            None => region::region_or_default(&region::EnvironmentProvider::new_with_env(
                env.clone(),
            )),
        };
        let credentials_provider = self.credentials_provider.unwrap_or_else(|| {
            SharedCredentialsProvider::new(
                aws_auth::provider::env::EnvironmentVariableCredentialsProvider::new_with_env(
                    env.clone(),
                ),
            )
        });
        Config {
            region,
            credentials_provider,
            endpoint_resolver: self
                .endpoint_resolver
                .unwrap_or_else(|| Arc::new(endpoint_resolver())),
            user_agent: AwsUserAgent::new_from_environment(&env, API_METADATA, self.app_name),
        }
    }
}

fn regionalized(uri_template: &'static str) -> Definition {
    Definition {
        uri_template,
        protocol: Protocol::Https,
        credential_scope: Default::default(),
        signature_versions: SignatureVersion::V4,
    }
}

/// `dms.{region}.amazonaws.com`, with the `.com.cn` suffix in the China partition.
pub fn endpoint_resolver() -> PartitionResolver {
    PartitionResolver::new(
        Partition {
            id: "aws",
            region_prefixes: &["us-", "eu-", "ap-", "sa-", "ca-", "me-", "af-"],
            regionalized: regionalized("dms.{region}.amazonaws.com"),
            global: None,
        },
        vec![
            Partition {
                id: "aws-cn",
                region_prefixes: &["cn-"],
                regionalized: regionalized("dms.{region}.amazonaws.com.cn"),
                global: None,
            },
            Partition {
                id: "aws-us-gov",
                region_prefixes: &["us-gov-"],
                regionalized: regionalized("dms.{region}.amazonaws.com"),
                global: None,
            },
        ],
    )
}

#[cfg(test)]
mod test {
    use super::{endpoint_resolver, Config};
    use aws_endpoint::ResolveAwsEndpoint;
    use aws_types::os_shim_internal::Env;
    use aws_types::region::Region;

    #[test]
    fn region_defaults_from_the_environment() {
        let conf = Config::builder()
            .env(Env::from_slice(&[("AWS_DEFAULT_REGION", "eu-west-1")]))
            .build();
        assert_eq!(conf.region(), &Region::new("eu-west-1"));

        let conf = Config::builder().env(Env::from_slice(&[])).build();
        assert_eq!(conf.region(), &Region::new("us-east-1"));
    }

    #[test]
    fn explicit_region_wins() {
        let conf = Config::builder()
            .env(Env::from_slice(&[("AWS_REGION", "eu-west-1")]))
            .region(Region::new("ap-south-1"))
            .build();
        assert_eq!(conf.region(), &Region::new("ap-south-1"));
    }

    #[test]
    fn china_uses_its_own_suffix() {
        let resolver = endpoint_resolver();
        let endpoint = resolver
            .resolve_endpoint(&Region::new("cn-north-1"))
            .expect("valid endpoint");
        let mut uri = http::Uri::from_static("/");
        endpoint.set_endpoint(&mut uri).expect("valid uri");
        assert_eq!(uri, http::Uri::from_static("https://dms.cn-north-1.amazonaws.com.cn/"));
    }

    #[test]
    fn app_name_is_in_the_user_agent() {
        let conf = Config::builder()
            .env(Env::from_slice(&[]))
            .user_agent_app_name("migrator")
            .build();
        let ua = conf.user_agent.aws_ua_header();
        assert!(ua.contains("api/dms/"), "{}", ua);
        assert!(ua.ends_with("app/migrator"), "{}", ua);
    }
}
