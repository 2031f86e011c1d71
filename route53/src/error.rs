/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use sdk_types::{ErrorTable, ProvideErrorMetadata};
use std::fmt;

/// Failure categories declared by Route 53.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    ConcurrentModification,
    ConflictingDomainExists,
    DelegationSetNotAvailable,
    DelegationSetNotReusable,
    HostedZoneAlreadyExists,
    /// The zone still holds records other than the default SOA and NS records.
    HostedZoneNotEmpty,
    HostedZoneNotFound,
    InvalidArgument,
    InvalidDomainName,
    InvalidInput,
    InvalidVpcId,
    NoSuchChange,
    NoSuchDelegationSet,
    NoSuchHostedZone,
    PriorRequestNotComplete,
    Throttling,
    TooManyHostedZones,
    /// The code was missing or is not declared by the service.
    Unhandled,
}

pub static ERRORS: ErrorTable<ErrorKind> = ErrorTable::new(&[
    ("ConcurrentModification", ErrorKind::ConcurrentModification),
    ("ConflictingDomainExists", ErrorKind::ConflictingDomainExists),
    ("DelegationSetNotAvailable", ErrorKind::DelegationSetNotAvailable),
    ("DelegationSetNotReusable", ErrorKind::DelegationSetNotReusable),
    ("HostedZoneAlreadyExists", ErrorKind::HostedZoneAlreadyExists),
    ("HostedZoneNotEmpty", ErrorKind::HostedZoneNotEmpty),
    ("HostedZoneNotFound", ErrorKind::HostedZoneNotFound),
    ("InvalidArgument", ErrorKind::InvalidArgument),
    ("InvalidDomainName", ErrorKind::InvalidDomainName),
    ("InvalidInput", ErrorKind::InvalidInput),
    ("InvalidVPCId", ErrorKind::InvalidVpcId),
    ("NoSuchChange", ErrorKind::NoSuchChange),
    ("NoSuchDelegationSet", ErrorKind::NoSuchDelegationSet),
    ("NoSuchHostedZone", ErrorKind::NoSuchHostedZone),
    ("PriorRequestNotComplete", ErrorKind::PriorRequestNotComplete),
    ("Throttling", ErrorKind::Throttling),
    ("TooManyHostedZones", ErrorKind::TooManyHostedZones),
]);

impl ErrorKind {
    pub fn from_code(code: &str) -> ErrorKind {
        ERRORS.lookup(code).unwrap_or(ErrorKind::Unhandled)
    }
}

/// A failure declared by Route 53
///
/// Unparseable error documents, and documents without a code, keep their text in
/// [`Error::raw_body`].
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    meta: sdk_types::Error,
    raw_body: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, meta: sdk_types::Error) -> Self {
        Error {
            kind,
            meta,
            raw_body: None,
        }
    }

    pub fn unhandled(meta: sdk_types::Error, raw_body: impl Into<String>) -> Self {
        Error {
            kind: ErrorKind::Unhandled,
            meta,
            raw_body: Some(raw_body.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn meta(&self) -> &sdk_types::Error {
        &self.meta
    }

    pub fn code(&self) -> Option<&str> {
        self.meta.code()
    }

    pub fn message(&self) -> Option<&str> {
        self.meta.message()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.meta.request_id()
    }

    pub fn raw_body(&self) -> Option<&str> {
        self.raw_body.as_deref()
    }

    pub fn is_no_such_hosted_zone(&self) -> bool {
        self.kind == ErrorKind::NoSuchHostedZone
    }

    pub fn is_invalid_domain_name(&self) -> bool {
        self.kind == ErrorKind::InvalidDomainName
    }

    /// Throttling and concurrent modification clear up on their own; the call can be repeated.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Throttling
                | ErrorKind::PriorRequestNotComplete
                | ErrorKind::ConcurrentModification
        )
    }

    pub fn is_unhandled(&self) -> bool {
        self.kind == ErrorKind::Unhandled
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{}", code)?,
            None => write!(f, "{:?}", self.kind)?,
        }
        if let Some(message) = self.message() {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl ProvideErrorMetadata for Error {
    fn code(&self) -> Option<&str> {
        Error::code(self)
    }

    fn message(&self) -> Option<&str> {
        Error::message(self)
    }
}
