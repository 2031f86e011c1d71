/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use sdk_http::context::InvocationContext;
use sdk_http::interceptor::{Interceptors, InvocationOutcome};
use sdk_http::operation::Metadata;
use sdk_http::result::SdkError;
use tracing::{debug, debug_span, Span};

/// Scope of a single operation invocation.
///
/// Created before anything else happens for a call. Finalization runs exactly once: either
/// through [`Invocation::finish`] with the call's result or, if the invocation future is dropped
/// mid-flight, from `Drop` with [`InvocationOutcome::Cancelled`].
#[derive(Debug)]
pub struct Invocation {
    context: InvocationContext,
    interceptors: Interceptors,
    span: Span,
    finished: bool,
}

impl Invocation {
    pub fn start(metadata: Metadata, interceptors: &Interceptors) -> Self {
        let context = InvocationContext::new(metadata);
        let span = debug_span!(
            "invoke",
            operation = %context.operation(),
            service = %context.service(),
            invocation_id = %context.invocation_id(),
        );
        span.in_scope(|| {
            debug!("invocation started");
            for interceptor in interceptors.iter() {
                interceptor.on_invocation_start(&context);
            }
        });
        Invocation {
            context,
            interceptors: interceptors.clone(),
            span,
            finished: false,
        }
    }

    pub fn context(&self) -> &InvocationContext {
        &self.context
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Finalize with the outcome of `result`.
    pub fn finish<T, E>(mut self, result: &Result<T, SdkError<E>>) {
        let outcome = match result {
            Ok(_) => InvocationOutcome::Success,
            Err(SdkError::ServiceError { .. }) => InvocationOutcome::ServiceError,
            Err(_) => InvocationOutcome::ClientError,
        };
        self.finalize(outcome);
    }

    fn finalize(&mut self, outcome: InvocationOutcome) {
        if self.finished {
            return;
        }
        self.finished = true;
        let elapsed = self.context.elapsed();
        let _enter = self.span.enter();
        debug!(outcome = ?outcome, elapsed = ?elapsed, "invocation finished");
        for interceptor in self.interceptors.iter() {
            interceptor.on_invocation_end(&self.context, outcome, elapsed);
        }
    }
}

impl Drop for Invocation {
    fn drop(&mut self) {
        self.finalize(InvocationOutcome::Cancelled);
    }
}
