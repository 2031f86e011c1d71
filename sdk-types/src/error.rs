/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Generic error metadata and the code → kind lookup used by service error classifiers.

use std::fmt;
use std::fmt::{Display, Formatter};

/// Generic Error type
///
/// For many services, Errors are modeled. However, many services only partially model errors or don't
/// model errors at all. In these cases, the SDK will return this generic error type to expose the
/// `code`, `message` and `request_id`.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct Error {
    code: Option<String>,
    message: Option<String>,
    request_id: Option<String>,
}

/// Builder for [`Error`].
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct Builder {
    inner: Error,
}

impl Builder {
    pub fn message(&mut self, message: impl Into<String>) -> &mut Self {
        self.inner.message = Some(message.into());
        self
    }

    pub fn code(&mut self, code: impl Into<String>) -> &mut Self {
        self.inner.code = Some(code.into());
        self
    }

    pub fn request_id(&mut self, request_id: impl Into<String>) -> &mut Self {
        self.inner.request_id = Some(request_id.into());
        self
    }

    pub fn build(&mut self) -> Error {
        std::mem::take(&mut self.inner)
    }
}

impl Error {
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut fmt = f.debug_struct("Error");
        if let Some(code) = &self.code {
            fmt.field("code", code);
        }
        if let Some(message) = &self.message {
            fmt.field("message", message);
        }
        if let Some(request_id) = &self.request_id {
            fmt.field("request_id", request_id);
        }
        fmt.finish()
    }
}

impl std::error::Error for Error {}

/// Accessors for the metadata every service error carries.
pub trait ProvideErrorMetadata {
    /// Returns the service-declared error code, if one was present in the response.
    fn code(&self) -> Option<&str>;

    /// Returns the human readable message, if one was present in the response.
    fn message(&self) -> Option<&str>;
}

impl ProvideErrorMetadata for Error {
    fn code(&self) -> Option<&str> {
        Error::code(self)
    }

    fn message(&self) -> Option<&str> {
        Error::message(self)
    }
}

/// An ordered, static mapping from service-declared error codes to a service's error kinds.
///
/// Lookup is first-match-wins. Codes not present in the table yield `None`; the caller is
/// expected to fall back to its catch-all kind.
#[derive(Debug)]
pub struct ErrorTable<K: 'static> {
    entries: &'static [(&'static str, K)],
}

impl<K: Copy + 'static> ErrorTable<K> {
    pub const fn new(entries: &'static [(&'static str, K)]) -> Self {
        ErrorTable { entries }
    }

    pub fn lookup(&self, code: &str) -> Option<K> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, kind)| *kind)
    }

    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }
}
