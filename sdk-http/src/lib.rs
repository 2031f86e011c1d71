/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Framework agnostic HTTP plumbing: request and response bodies, the operation model, the
//! marshaller / unmarshaller / error classifier contracts, and invocation hooks.

pub mod body;
pub mod context;
pub mod endpoint;
pub mod interceptor;
pub mod label;
pub mod middleware;
pub mod operation;
mod pin_util;
pub mod property_bag;
pub mod response;
pub mod result;
