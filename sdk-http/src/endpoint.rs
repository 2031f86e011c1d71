/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::uri::{Authority, Scheme};
use http::Uri;
use thiserror::Error;

/// API Endpoint
///
/// This implements an API endpoint as specified in the
/// [Smithy Endpoint Specification](https://awslabs.github.io/smithy/1.0/spec/core/endpoint-traits.html)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endpoint {
    uri: Uri,

    /// If true, the configured path of `uri` is prepended to every request path
    immutable: bool,
}

#[derive(Debug, Error)]
pub enum InvalidEndpoint {
    #[error("endpoint `{0}` has no authority")]
    MissingAuthority(Uri),

    #[error("failed to apply endpoint")]
    Http(#[from] http::Error),
}

impl Endpoint {
    /// Create a new endpoint from a URI
    ///
    /// Only the scheme and authority of `uri` are applied to requests. The request path is left
    /// untouched. If the scheme is missing, HTTPS is assumed.
    pub fn mutable(uri: Uri) -> Self {
        Endpoint {
            uri,
            immutable: false,
        }
    }

    /// Create a new immutable endpoint from a URI
    ///
    /// ```rust
    /// # use sdk_http::endpoint::Endpoint;
    /// use http::Uri;
    /// let endpoint = Endpoint::immutable(Uri::from_static("http://localhost:8000/proxy"));
    /// let mut uri = Uri::from_static("/2013-04-01/hostedzone");
    /// endpoint.set_endpoint(&mut uri).unwrap();
    /// assert_eq!(uri, Uri::from_static("http://localhost:8000/proxy/2013-04-01/hostedzone"));
    /// ```
    pub fn immutable(uri: Uri) -> Self {
        Endpoint {
            uri,
            immutable: true,
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn authority(&self) -> Option<&Authority> {
        self.uri.authority()
    }

    /// Sets the endpoint on `uri`, potentially applying the configured path prefix.
    pub fn set_endpoint(&self, uri: &mut Uri) -> Result<(), InvalidEndpoint> {
        let authority = self
            .uri
            .authority()
            .cloned()
            .ok_or_else(|| InvalidEndpoint::MissingAuthority(self.uri.clone()))?;
        let scheme = self.uri.scheme().cloned().unwrap_or(Scheme::HTTPS);
        let request_path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        let path = if self.immutable {
            format!("{}{}", self.uri.path().trim_end_matches('/'), request_path)
        } else {
            request_path.to_string()
        };
        *uri = Uri::builder()
            .scheme(scheme)
            .authority(authority)
            .path_and_query(path.as_str())
            .build()?;
        Ok(())
    }
}
