/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Response handling: the parse traits used by the dispatch stack and the per-operation
//! marshaller, unmarshaller and error classifier contracts.

use crate::body::SdkBody;
use crate::operation::BuildError;
use bytes::Bytes;
use http::Response;
use std::error::Error;
use std::fmt;

type BoxError = Box<dyn Error + Send + Sync>;

/// `ParseHttpResponse` is a generic trait for parsing structured data from HTTP responses.
///
/// The split between `parse_unloaded` and `parse_loaded` enables keeping the parsing code pure and sync
/// whenever possible and delegating the process of actually reading the HTTP response to the caller when
/// the required behavior is simply "read to the end."
///
/// It also enables this critical and core trait to avoid being async, and it makes code that uses
/// the trait easier to test.
pub trait ParseHttpResponse<B> {
    /// Output type of the HttpResponse.
    ///
    /// For request/response style operations, this is typically something like:
    /// `Result<DeleteEndpointOutput, ParseFailure<dms::Error>>`
    type Output;

    /// Parse an HTTP request without reading the body. If the body must be provided to proceed,
    /// return `None`
    fn parse_unloaded(&self, response: &mut http::Response<B>) -> Option<Self::Output>;

    /// Parse an HTTP request from a fully loaded body.
    fn parse_loaded(&self, response: &http::Response<Bytes>) -> Self::Output;
}

/// Convenience Trait for non-streaming APIs
///
/// `ParseStrictResponse` enables operations that _never_ need to stream the body incrementally to
/// have cleaner implementations. There is a blanket implementation
pub trait ParseStrictResponse {
    type Output;
    fn parse(&self, response: &Response<Bytes>) -> Self::Output;
}

impl<B, T> ParseHttpResponse<B> for T
where
    T: ParseStrictResponse,
{
    type Output = T::Output;

    fn parse_unloaded(&self, _response: &mut Response<B>) -> Option<Self::Output> {
        None
    }

    fn parse_loaded(&self, response: &Response<Bytes>) -> Self::Output {
        self.parse(response)
    }
}

/// Converts a typed operation input into a wire-level request.
///
/// Implementations must be total over valid inputs and must reject inputs that fail the
/// operation's own preconditions with a [`BuildError`] rather than filling in defaults.
pub trait Marshall<I> {
    fn marshall(&self, input: &I) -> Result<http::Request<SdkBody>, BuildError>;
}

/// Converts a successful (2xx) response into the operation's typed output.
pub trait Unmarshall {
    type Output;

    fn unmarshall(&self, response: &http::Response<Bytes>) -> Result<Self::Output, BoxError>;
}

/// Maps a failure response to exactly one typed service error.
///
/// Classification is infallible: a response whose code is missing or unknown maps to the
/// service's catch-all error.
pub trait ClassifyError {
    type Error;

    fn classify(&self, response: &http::Response<Bytes>) -> Self::Error;
}

/// The two ways a received response can fail to produce an output.
#[derive(Debug)]
pub enum ParseFailure<E> {
    /// The service declared a failure.
    Service(E),

    /// The service reported success but the body could not be unmarshalled.
    Malformed(BoxError),
}

impl<E: fmt::Display> fmt::Display for ParseFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Service(err) => write!(f, "service error: {}", err),
            ParseFailure::Malformed(err) => write!(f, "malformed response: {}", err),
        }
    }
}

/// Response handler for request/response operations: 2xx responses are unmarshalled, anything
/// else goes to the error classifier.
#[derive(Clone, Debug)]
pub struct ResponseHandler<U, C> {
    unmarshaller: U,
    classifier: C,
}

impl<U, C> ResponseHandler<U, C> {
    pub fn new(unmarshaller: U, classifier: C) -> Self {
        ResponseHandler {
            unmarshaller,
            classifier,
        }
    }
}

impl<U, C> ParseStrictResponse for ResponseHandler<U, C>
where
    U: Unmarshall,
    C: ClassifyError,
{
    type Output = Result<U::Output, ParseFailure<C::Error>>;

    fn parse(&self, response: &Response<Bytes>) -> Self::Output {
        if response.status().is_success() {
            self.unmarshaller
                .unmarshall(response)
                .map_err(ParseFailure::Malformed)
        } else {
            Err(ParseFailure::Service(self.classifier.classify(response)))
        }
    }
}
