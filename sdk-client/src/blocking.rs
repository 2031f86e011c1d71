/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! A synchronous facade over the async invoker.
//!
//! Service crates wrap their async clients with a [`Runtime`] to offer a plain
//! `(input) -> Result<output, error>` surface. Each call blocks the calling thread until the
//! network exchange finishes.

use std::future::Future;
use std::io;

/// A private multi-threaded tokio runtime used to drive invocations to completion.
///
/// `block_on` may be called from several threads at once; each call drives its own invocation.
/// It must not be called from within an async context.
#[derive(Debug)]
pub struct Runtime {
    rt: tokio::runtime::Runtime,
}

impl Runtime {
    pub fn new() -> io::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("sdk-blocking")
            .enable_all()
            .build()?;
        Ok(Runtime { rt })
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.rt.block_on(future)
    }
}
