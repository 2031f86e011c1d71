/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation inputs
//!
//! Inputs are plain structs. Required members are `Option`s so that a missing member is reported
//! as a [`BuildError`] before any I/O instead of being sent with a default value. Every input
//! carries an optional `credentials_override` that replaces the client's credentials provider
//! for that one call. It is never serialized.

use crate::model::{DmsSslModeValue, Filter, ReplicationEndpointTypeValue, Tag};
use crate::output;
use crate::protocol::{required, JsonRpcInput};
use aws_auth::Credentials;
use sdk_http::operation::BuildError;
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddTagsToResourceInput {
    /// ARN of the endpoint, replication instance or task to tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    pub tags: Vec<Tag>,
    #[serde(skip)]
    pub credentials_override: Option<Credentials>,
}

impl JsonRpcInput for AddTagsToResourceInput {
    const NAME: &'static str = "AddTagsToResource";
    type Output = output::AddTagsToResourceOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(&self.resource_arn, "resource_arn")
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateEndpointInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<ReplicationEndpointTypeValue>,
    /// eg. `mysql`, `oracle`, `postgres`, `aurora`, `s3`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_connection_attributes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_mode: Option<DmsSslModeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_access_role_arn: Option<String>,
    #[serde(skip)]
    pub credentials_override: Option<Credentials>,
}

impl JsonRpcInput for CreateEndpointInput {
    const NAME: &'static str = "CreateEndpoint";
    type Output = output::CreateEndpointOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(&self.endpoint_identifier, "endpoint_identifier")?;
        required(&self.endpoint_type, "endpoint_type")?;
        required(&self.engine_name, "engine_name")?;
        if let Some(port) = self.port {
            if !(0..=65535).contains(&port) {
                return Err(BuildError::InvalidField {
                    field: "port",
                    details: format!("{} is not a valid port", port),
                });
            }
        }
        Ok(())
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteEndpointInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_arn: Option<String>,
    #[serde(skip)]
    pub credentials_override: Option<Credentials>,
}

impl JsonRpcInput for DeleteEndpointInput {
    const NAME: &'static str = "DeleteEndpoint";
    type Output = output::DeleteEndpointOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(&self.endpoint_arn, "endpoint_arn")
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeEndpointsInput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    /// Page size, between 20 and 100. The service default is 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_records: Option<i32>,
    /// `marker` from the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip)]
    pub credentials_override: Option<Credentials>,
}

impl JsonRpcInput for DescribeEndpointsInput {
    const NAME: &'static str = "DescribeEndpoints";
    type Output = output::DescribeEndpointsOutput;

    fn validate(&self) -> Result<(), BuildError> {
        match self.max_records {
            Some(max_records) if !(20..=100).contains(&max_records) => {
                Err(BuildError::InvalidField {
                    field: "max_records",
                    details: format!("{} is outside 20..=100", max_records),
                })
            }
            _ => Ok(()),
        }
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestConnectionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_instance_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_arn: Option<String>,
    #[serde(skip)]
    pub credentials_override: Option<Credentials>,
}

impl JsonRpcInput for TestConnectionInput {
    const NAME: &'static str = "TestConnection";
    type Output = output::TestConnectionOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(&self.replication_instance_arn, "replication_instance_arn")?;
        required(&self.endpoint_arn, "endpoint_arn")
    }

    fn credentials_override(&self) -> Option<&Credentials> {
        self.credentials_override.as_ref()
    }
}
