/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! A synchronous Database Migration Service client.
//!
//! Each method blocks the calling thread until the invocation finishes. Do not call these from
//! inside an async runtime; use [`crate::Client`] there.

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
use aws_hyper::AwsMiddleware;
use sdk_client::blocking::Runtime;
use sdk_client::bounds::{SdkConnector, SdkMiddleware};
use sdk_client::SdkError;
use std::io;

#[derive(Debug)]
pub struct Client<C> {
    inner: crate::Client<C>,
    rt: Runtime,
}

impl<C> Client<C> {
    pub fn new(inner: crate::Client<C>) -> io::Result<Self> {
        Ok(Client {
            inner,
            rt: Runtime::new()?,
        })
    }

    pub fn from_conf_conn(conf: Config, conn: C) -> io::Result<Self> {
        Self::new(crate::Client::from_conf_conn(conf, conn))
    }

    pub fn conf(&self) -> &Config {
        self.inner.conf()
    }
}

#[cfg(feature = "rustls")]
impl Client<sdk_client::HyperAdapter<sdk_client::HttpsConnector>> {
    pub fn from_conf(conf: Config) -> io::Result<Self> {
        Self::new(crate::Client::from_conf(conf))
    }
}

impl<C> Client<C>
where
    C: SdkConnector,
    AwsMiddleware: SdkMiddleware<C>,
{
    pub fn add_tags_to_resource(
        &self,
        input: AddTagsToResourceInput,
    ) -> Result<AddTagsToResourceOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.add_tags_to_resource(input))
    }

    pub fn create_endpoint(
        &self,
        input: CreateEndpointInput,
    ) -> Result<CreateEndpointOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.create_endpoint(input))
    }

    pub fn delete_endpoint(
        &self,
        input: DeleteEndpointInput,
    ) -> Result<DeleteEndpointOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.delete_endpoint(input))
    }

    pub fn describe_endpoints(
        &self,
        input: DescribeEndpointsInput,
    ) -> Result<DescribeEndpointsOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.describe_endpoints(input))
    }

    pub fn test_connection(
        &self,
        input: TestConnectionInput,
    ) -> Result<TestConnectionOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.test_connection(input))
    }
}
