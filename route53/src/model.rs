/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use sdk_types::Instant;

/// A public or private DNS zone
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostedZone {
    /// Zone id as returned by the service, eg. `/hostedzone/Z1D633PJN98FT9`
    pub id: Option<String>,
    pub name: Option<String>,
    pub caller_reference: Option<String>,
    pub config: Option<HostedZoneConfig>,
    pub resource_record_set_count: Option<i64>,
}

impl HostedZone {
    /// The zone id without its `/hostedzone/` prefix
    pub fn bare_id(&self) -> Option<&str> {
        self.id.as_deref().map(crate::protocol::trim_resource_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostedZoneConfig {
    pub comment: Option<String>,
    pub private_zone: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeStatus {
    Pending,
    /// The change has reached every Route 53 DNS server.
    Insync,
    Unknown(String),
}

impl ChangeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeStatus::Pending => "PENDING",
            ChangeStatus::Insync => "INSYNC",
            ChangeStatus::Unknown(status) => status,
        }
    }
}

impl From<&str> for ChangeStatus {
    fn from(status: &str) -> Self {
        match status {
            "PENDING" => ChangeStatus::Pending,
            "INSYNC" => ChangeStatus::Insync,
            other => ChangeStatus::Unknown(other.to_string()),
        }
    }
}

/// Status of a change batch, returned by every mutating call
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeInfo {
    pub id: String,
    pub status: ChangeStatus,
    pub submitted_at: Instant,
    pub comment: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelegationSet {
    pub id: Option<String>,
    pub caller_reference: Option<String>,
    pub name_servers: Vec<String>,
}

/// A VPC associated with a private hosted zone
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vpc {
    /// eg. `us-east-1`
    pub vpc_region: Option<String>,
    pub vpc_id: Option<String>,
}
