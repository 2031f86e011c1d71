/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Per-call scoped state shared by the client, the dispatch stack and interceptors.

use crate::operation::Metadata;
use std::fmt;
use std::time::{Duration, Instant};

/// Random identifier of a single invocation, used to correlate log events.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct InvocationId(u64);

impl InvocationId {
    pub fn random() -> Self {
        InvocationId(fastrand::u64(..))
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// State scoped to exactly one operation invocation.
///
/// A context is created when an invocation starts and is never shared between invocations.
#[derive(Clone, Debug)]
pub struct InvocationContext {
    metadata: Metadata,
    invocation_id: InvocationId,
    started: Instant,
}

impl InvocationContext {
    pub fn new(metadata: Metadata) -> Self {
        InvocationContext {
            metadata,
            invocation_id: InvocationId::random(),
            started: Instant::now(),
        }
    }

    pub fn operation(&self) -> &str {
        self.metadata.name()
    }

    pub fn service(&self) -> &str {
        self.metadata.service()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
