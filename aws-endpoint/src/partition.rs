/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod endpoint;

use crate::{AwsEndpoint, BoxError, ResolveAwsEndpoint};
use aws_types::region::Region;
use endpoint::Definition;

/// A partition is a group of regions sharing a DNS suffix, eg. `aws` or `aws-cn`.
///
/// Regionalized services use `regionalized`. Services that only exist once per partition (like
/// Route 53) set `global`, which then wins for every region of the partition.
#[derive(Debug)]
pub struct Partition {
    pub id: &'static str,

    /// Region name prefixes that belong to this partition, eg. `cn-`
    pub region_prefixes: &'static [&'static str],

    pub regionalized: Definition,

    pub global: Option<Definition>,
}

impl Partition {
    fn contains(&self, region: &Region) -> bool {
        self.region_prefixes
            .iter()
            .any(|prefix| region.as_ref().starts_with(prefix))
    }

    fn definition(&self) -> &Definition {
        self.global.as_ref().unwrap_or(&self.regionalized)
    }
}

impl ResolveAwsEndpoint for Partition {
    fn resolve_endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError> {
        self.definition().resolve_endpoint(region)
    }
}

/// Selects the partition for a region. Regions that match no partition use `base`.
#[derive(Debug)]
pub struct PartitionResolver {
    base: Partition,
    rest: Vec<Partition>,
}

impl PartitionResolver {
    pub fn new(base: Partition, rest: Vec<Partition>) -> Self {
        Self { base, rest }
    }

    pub fn partition(&self, region: &Region) -> &Partition {
        self.rest
            .iter()
            .find(|partition| partition.contains(region))
            .unwrap_or(&self.base)
    }
}

impl ResolveAwsEndpoint for PartitionResolver {
    fn resolve_endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError> {
        let partition = self.partition(region);
        tracing::trace!(partition = partition.id, region = %region, "selected partition");
        partition.resolve_endpoint(region)
    }
}
