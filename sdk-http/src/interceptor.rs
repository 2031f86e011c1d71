/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Hooks into the lifecycle of an invocation.
//!
//! Interceptors are handed to the client explicitly when it is built. All hooks have no-op
//! defaults so implementations only override what they need.

use crate::body::SdkBody;
use crate::context::InvocationContext;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type BoxError = Box<dyn Error + Send + Sync>;

/// How an invocation finished.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvocationOutcome {
    /// The operation output was returned.
    Success,

    /// The service declared a failure.
    ServiceError,

    /// Construction, credential resolution, dispatch or response parsing failed.
    ClientError,

    /// The invocation future was dropped before it completed.
    Cancelled,
}

pub trait Interceptor: Send + Sync {
    fn on_invocation_start(&self, _context: &InvocationContext) {}

    /// Last chance to modify the request before it is handed to the transport.
    ///
    /// Returning an error aborts the invocation before any I/O happens.
    fn modify_before_transmit(
        &self,
        _context: &InvocationContext,
        _request: &mut http::Request<SdkBody>,
    ) -> Result<(), BoxError> {
        Ok(())
    }

    fn read_after_transmit(
        &self,
        _context: &InvocationContext,
        _response: &http::Response<SdkBody>,
    ) {
    }

    /// Called exactly once per invocation, whatever the outcome.
    fn on_invocation_end(
        &self,
        _context: &InvocationContext,
        _outcome: InvocationOutcome,
        _elapsed: Duration,
    ) {
    }
}

/// An ordered list of interceptors. Hooks run in insertion order.
#[derive(Clone, Default)]
pub struct Interceptors(Vec<Arc<dyn Interceptor>>);

impl Interceptors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interceptor: impl Interceptor + 'static) {
        self.0.push(Arc::new(interceptor));
    }

    pub fn push_shared(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.0.push(interceptor);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Interceptor> {
        self.0.iter().map(|i| i.as_ref())
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Interceptors").field(&self.0.len()).finish()
    }
}
