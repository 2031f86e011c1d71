/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Amazon Route 53
//!
//! Hosted zone management over the REST-XML protocol. Route 53 is a global service: every
//! request goes to `https://route53.amazonaws.com` and is signed for `us-east-1`, whatever region
//! the client is configured with.
//!
//! ```no_run
//! # async fn docs() -> Result<(), Box<dyn std::error::Error>> {
//! use route53::input::GetChangeInput;
//! let client = route53::Client::from_env();
//! let output = client
//!     .get_change(GetChangeInput {
//!         id: Some("/change/C2682N5HXP0BZ4".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("change status: {:?}", output.change_info.map(|info| info.status));
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
mod xml_deser;

pub use aws_auth::Credentials;
pub use aws_types::region::Region;
pub use client::Client;
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use sdk_client::SdkError;
pub use sdk_http::endpoint::Endpoint;

/// The signing name of the service.
pub const SERVICE_NAME: &str = "route53";

/// XML namespace of every request and response document.
pub const NAMESPACE: &str = "https://route53.amazonaws.com/doc/2013-04-01/";
