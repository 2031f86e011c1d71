/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::error::Error;
use crate::input::{
    AddTagsToResourceInput, CreateEndpointInput, DeleteEndpointInput, DescribeEndpointsInput,
    TestConnectionInput,
};
use crate::output::{
    AddTagsToResourceOutput, CreateEndpointOutput, DeleteEndpointOutput, DescribeEndpointsOutput,
    TestConnectionOutput,
};
use crate::protocol::{make_operation, JsonRpcInput};
use aws_endpoint::ResolveAwsEndpoint;
use aws_hyper::AwsMiddleware;
use aws_types::region::Region;
use sdk_client::bounds::{SdkConnector, SdkMiddleware};
use sdk_client::SdkError;
use sdk_http::operation::Metadata;
use std::sync::Arc;

/// Database Migration Service client
///
/// Each operation method takes its input by value and resolves to the typed output or to an
/// [`SdkError`] whose service variant is a classified [`Error`]. A `Client` can be shared across
/// tasks; configuration changes need `&mut self`, so they can't race with calls in flight.
#[derive(Debug)]
pub struct Client<C> {
    client: aws_hyper::Client<C>,
    conf: Config,
}

impl<C> Client<C> {
    /// Build a client on a connector, typically a test connection.
    pub fn from_conf_conn(conf: Config, conn: C) -> Self {
        Client {
            client: aws_hyper::with_connector(conn),
            conf,
        }
    }

    /// Build a client from an already configured invoker, eg. one carrying interceptors.
    pub fn with_client(client: aws_hyper::Client<C>, conf: Config) -> Self {
        Client { client, conf }
    }

    pub fn conf(&self) -> &Config {
        &self.conf
    }

    /// Send every following request to `endpoint`.
    pub fn set_endpoint(&mut self, endpoint: impl ResolveAwsEndpoint + 'static) {
        self.conf.endpoint_resolver = Arc::new(endpoint);
    }

    pub fn set_region(&mut self, region: Region) {
        self.conf.region = region;
    }
}

#[cfg(feature = "rustls")]
impl Client<sdk_client::HyperAdapter<sdk_client::HttpsConnector>> {
    /// Build an HTTPS client from `conf`.
    pub fn from_conf(conf: Config) -> Self {
        Client {
            client: aws_hyper::https(),
            conf,
        }
    }

    /// Build an HTTPS client with region and credentials taken from the environment.
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
        I: JsonRpcInput,
    {
        self.client
            .invoke(Metadata::new(I::NAME, crate::SERVICE_NAME), || {
                make_operation(&input, &self.conf)
            })
            .await
    }

    /// Adds metadata tags to a DMS resource: a replication instance, endpoint or task.
    pub async fn add_tags_to_resource(
        &self,
        input: AddTagsToResourceInput,
    ) -> Result<AddTagsToResourceOutput, SdkError<Error>> {
        self.send(input).await
    }

    /// Creates an endpoint from the provided settings.
    pub async fn create_endpoint(
        &self,
        input: CreateEndpointInput,
    ) -> Result<CreateEndpointOutput, SdkError<Error>> {
        self.send(input).await
    }

    /// Deletes the specified endpoint. All tasks associated with the endpoint must be deleted
    /// first.
    pub async fn delete_endpoint(
        &self,
        input: DeleteEndpointInput,
    ) -> Result<DeleteEndpointOutput, SdkError<Error>> {
        self.send(input).await
    }

    /// Returns one page of the endpoints of this account in the current region.
    pub async fn describe_endpoints(
        &self,
        input: DescribeEndpointsInput,
    ) -> Result<DescribeEndpointsOutput, SdkError<Error>> {
        self.send(input).await
    }

    /// Tests the connection between a replication instance and an endpoint.
    pub async fn test_connection(
        &self,
        input: TestConnectionInput,
    ) -> Result<TestConnectionOutput, SdkError<Error>> {
        self.send(input).await
    }
}
