/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS Database Migration Service
//!
//! A thin client over the AWS invoker: every operation is a typed input that is marshalled to an
//! `awsJson1_1` request, signed, sent, and parsed back into a typed output or a classified
//! [`Error`].
//!
//! ```no_run
//! # async fn docs() -> Result<(), Box<dyn std::error::Error>> {
//! use dms::input::DeleteEndpointInput;
//! let client = dms::Client::from_env();
//! let output = client
//!     .delete_endpoint(DeleteEndpointInput {
//!         endpoint_arn: Some("arn:aws:dms:us-east-1:123456789012:endpoint:dms-1".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("deleted {:?}", output.endpoint);
//! # Ok(())
//! # }
//! ```

pub mod blocking;
mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod protocol;

pub use aws_auth::Credentials;
pub use aws_types::region::Region;
pub use client::Client;
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use sdk_client::SdkError;
pub use sdk_http::endpoint::Endpoint;

/// The signing name and endpoint prefix of the service.
pub const SERVICE_NAME: &str = "dms";
