/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use sdk_types::{ErrorTable, ProvideErrorMetadata};
use std::fmt;

/// Failure categories declared by Database Migration Service.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    AccessDenied,
    InsufficientResourceCapacity,
    InvalidCertificate,
    InvalidResourceState,
    InvalidSubnet,
    KmsAccessDenied,
    KmsDisabled,
    KmsInvalidState,
    KmsKeyNotAccessible,
    KmsNotFound,
    KmsThrottling,
    ReplicationSubnetGroupDoesNotCoverEnoughAZs,
    ResourceAlreadyExists,
    ResourceNotFound,
    ResourceQuotaExceeded,
    SnsInvalidTopic,
    SnsNoAuthorization,
    StorageQuotaExceeded,
    SubnetAlreadyInUse,
    UpgradeDependencyFailure,
    /// The code was missing or is not declared by the service.
    Unhandled,
}

/// Error codes as they appear on the wire, mapped to their kinds.
pub static ERRORS: ErrorTable<ErrorKind> = ErrorTable::new(&[
    ("AccessDeniedFault", ErrorKind::AccessDenied),
    ("InsufficientResourceCapacityFault", ErrorKind::InsufficientResourceCapacity),
    ("InvalidCertificateFault", ErrorKind::InvalidCertificate),
    ("InvalidResourceStateFault", ErrorKind::InvalidResourceState),
    ("InvalidSubnet", ErrorKind::InvalidSubnet),
    ("KMSAccessDeniedFault", ErrorKind::KmsAccessDenied),
    ("KMSDisabledFault", ErrorKind::KmsDisabled),
    ("KMSInvalidStateFault", ErrorKind::KmsInvalidState),
    ("KMSKeyNotAccessibleFault", ErrorKind::KmsKeyNotAccessible),
    ("KMSNotFoundFault", ErrorKind::KmsNotFound),
    ("KMSThrottlingFault", ErrorKind::KmsThrottling),
    (
        "ReplicationSubnetGroupDoesNotCoverEnoughAZs",
        ErrorKind::ReplicationSubnetGroupDoesNotCoverEnoughAZs,
    ),
    ("ResourceAlreadyExistsFault", ErrorKind::ResourceAlreadyExists),
    ("ResourceNotFoundFault", ErrorKind::ResourceNotFound),
    ("ResourceQuotaExceededFault", ErrorKind::ResourceQuotaExceeded),
    ("SNSInvalidTopicFault", ErrorKind::SnsInvalidTopic),
    ("SNSNoAuthorizationFault", ErrorKind::SnsNoAuthorization),
    ("StorageQuotaExceededFault", ErrorKind::StorageQuotaExceeded),
    ("SubnetAlreadyInUse", ErrorKind::SubnetAlreadyInUse),
    ("UpgradeDependencyFailureFault", ErrorKind::UpgradeDependencyFailure),
]);

impl ErrorKind {
    /// Classify a service-declared error code. Unknown codes are [`ErrorKind::Unhandled`].
    pub fn from_code(code: &str) -> ErrorKind {
        ERRORS.lookup(code).unwrap_or(ErrorKind::Unhandled)
    }
}

/// A failure declared by the service
///
/// Every service error carries the generic metadata (code, message, request id) whatever its
/// kind. When the error body could not be parsed, or it declared no code, the body text is kept
/// in [`Error::raw_body`] for diagnosis.
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

    /// An unclassified error that keeps the response body
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

    pub fn is_resource_not_found(&self) -> bool {
        self.kind == ErrorKind::ResourceNotFound
    }

    pub fn is_resource_already_exists(&self) -> bool {
        self.kind == ErrorKind::ResourceAlreadyExists
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
