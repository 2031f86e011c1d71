/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Shapes shared by several operations.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// Narrows a `Describe*` call, eg. `endpoint-type` = `source`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicationEndpointTypeValue {
    Source,
    Target,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DmsSslModeValue {
    None,
    Require,
    VerifyCa,
    VerifyFull,
}

/// A source or target database known to the service.
///
/// Enumerated values (`endpoint_type`, `ssl_mode`, `status`) are kept as the strings the service
/// returned.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Endpoint {
    pub endpoint_identifier: Option<String>,
    pub endpoint_type: Option<String>,
    pub engine_name: Option<String>,
    pub engine_display_name: Option<String>,
    pub username: Option<String>,
    pub server_name: Option<String>,
    pub port: Option<i32>,
    pub database_name: Option<String>,
    pub extra_connection_attributes: Option<String>,
    pub status: Option<String>,
    pub kms_key_id: Option<String>,
    pub endpoint_arn: Option<String>,
    pub certificate_arn: Option<String>,
    pub ssl_mode: Option<String>,
    pub service_access_role_arn: Option<String>,
    pub external_table_definition: Option<String>,
    pub external_id: Option<String>,
}

/// The result of testing an endpoint from a replication instance.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Connection {
    pub replication_instance_arn: Option<String>,
    pub endpoint_arn: Option<String>,
    pub status: Option<String>,
    pub last_failure_message: Option<String>,
    pub endpoint_identifier: Option<String>,
    pub replication_instance_identifier: Option<String>,
}
