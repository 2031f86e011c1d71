/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::model::{ChangeInfo, DelegationSet, HostedZone, Vpc};

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateHostedZoneOutput {
    pub hosted_zone: Option<HostedZone>,
    pub change_info: Option<ChangeInfo>,
    /// Name servers assigned to a public zone
    pub delegation_set: Option<DelegationSet>,
    pub vpc: Option<Vpc>,
    /// URL of the new zone, from the `Location` header
    pub location: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetHostedZoneOutput {
    pub hosted_zone: Option<HostedZone>,
    pub delegation_set: Option<DelegationSet>,
    /// VPCs of a private zone
    pub vpcs: Vec<Vpc>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteHostedZoneOutput {
    pub change_info: Option<ChangeInfo>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetChangeOutput {
    pub change_info: Option<ChangeInfo>,
}
