/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS Signature Authentication Package
//!
//! The signature algorithm itself comes from `aws-sigv4`. This crate wires it into the request
//! pipeline.

pub mod middleware;
pub mod signer;
