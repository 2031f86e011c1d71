/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! A synchronous Route 53 client. Do not call it from inside an async runtime.

use crate::config::Config;
use crate::error::Error;
use crate::input::{
    CreateHostedZoneInput, DeleteHostedZoneInput, GetChangeInput, GetHostedZoneInput,
};
use crate::output::{
    CreateHostedZoneOutput, DeleteHostedZoneOutput, GetChangeOutput, GetHostedZoneOutput,
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
    pub fn create_hosted_zone(
        &self,
        input: CreateHostedZoneInput,
    ) -> Result<CreateHostedZoneOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.create_hosted_zone(input))
    }

    pub fn get_hosted_zone(
        &self,
        input: GetHostedZoneInput,
    ) -> Result<GetHostedZoneOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.get_hosted_zone(input))
    }

    pub fn delete_hosted_zone(
        &self,
        input: DeleteHostedZoneInput,
    ) -> Result<DeleteHostedZoneOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.delete_hosted_zone(input))
    }

    pub fn get_change(&self, input: GetChangeInput) -> Result<GetChangeOutput, SdkError<Error>> {
        self.rt.block_on(self.inner.get_change(input))
    }
}
