/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::error::Error;
use crate::input::{
    CreateHostedZoneInput, DeleteHostedZoneInput, GetChangeInput, GetHostedZoneInput,
};
use crate::output::{
    CreateHostedZoneOutput, DeleteHostedZoneOutput, GetChangeOutput, GetHostedZoneOutput,
};
use crate::protocol::{make_operation, RestXmlInput};
use aws_endpoint::ResolveAwsEndpoint;
use aws_types::region::Region;
use aws_hyper::AwsMiddleware;
use sdk_client::bounds::{SdkConnector, SdkMiddleware};
use sdk_client::SdkError;
use sdk_http::operation::Metadata;
use std::sync::Arc;

/// Route 53 client
#[derive(Debug)]
pub struct Client<C> {
    client: aws_hyper::Client<C>,
    conf: Config,
}

impl<C> Client<C> {
    pub fn from_conf_conn(conf: Config, conn: C) -> Self {
        Client {
            client: aws_hyper::with_connector(conn),
            conf,
        }
    }

    pub fn with_client(client: aws_hyper::Client<C>, conf: Config) -> Self {
        Client { client, conf }
    }

    pub fn conf(&self) -> &Config {
        &self.conf
    }

    /// Send every following request to `endpoint` instead of the global endpoint.
    pub fn set_endpoint(&mut self, endpoint: impl ResolveAwsEndpoint + 'static) {
        self.conf.endpoint_resolver = Arc::new(endpoint);
    }

    /// Select the partition of every following request. The signing region is unaffected.
    pub fn set_region(&mut self, region: Region) {
        self.conf.region = region;
    }
}

#[cfg(feature = "rustls")]
impl Client<sdk_client::HyperAdapter<sdk_client::HttpsConnector>> {
    pub fn from_conf(conf: Config) -> Self {
        Client {
            client: aws_hyper::https(),
            conf,
        }
    }

    pub fn from_env() -> Self {
        Self::from_conf(Config::builder().build())
    }
}

impl<C> Client<C>
where
    C: SdkConnector,
    AwsMiddleware: SdkMiddleware<C>,
{
    async fn send<I>(&self, input: I) -> Result<I::Output, SdkError<Error>>
    where
        I: RestXmlInput,
    {
        self.client
            .invoke(Metadata::new(I::NAME, crate::SERVICE_NAME), || {
                make_operation(&input, &self.conf)
            })
            .await
    }

    /// Creates a public or private hosted zone.
    ///
    /// The zone is usable once the returned change is `INSYNC`; poll it with
    /// [`get_change`](Client::get_change).
    pub async fn create_hosted_zone(
        &self,
        input: CreateHostedZoneInput,
    ) -> Result<CreateHostedZoneOutput, SdkError<Error>> {
        self.send(input).await
    }

    pub async fn get_hosted_zone(
        &self,
        input: GetHostedZoneInput,
    ) -> Result<GetHostedZoneOutput, SdkError<Error>> {
        self.send(input).await
    }

    /// Deletes a hosted zone that holds no records besides its SOA and NS records.
    pub async fn delete_hosted_zone(
        &self,
        input: DeleteHostedZoneInput,
    ) -> Result<DeleteHostedZoneOutput, SdkError<Error>> {
        self.send(input).await
    }

    /// Returns the propagation status of a change.
    pub async fn get_change(
        &self,
        input: GetChangeInput,
    ) -> Result<GetChangeOutput, SdkError<Error>> {
        self.send(input).await
    }
}
