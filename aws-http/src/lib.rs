/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS protocol helpers shared by the service crates: error body parsing, request ids and the
//! user agent stage.

pub mod json_errors;
pub mod request_id;
pub mod user_agent;
pub mod xml_errors;
