/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Value types shared across protocols and services.

pub mod error;
pub mod instant;

pub use crate::error::{Error, ErrorTable, ProvideErrorMetadata};
pub use crate::instant::Instant;
