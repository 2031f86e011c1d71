/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Abstractions for reading and writing the XML documents used by REST-XML services.
pub mod decode;
pub mod encode;
mod escape;
mod unescape;
