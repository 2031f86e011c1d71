/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use bytes::Bytes;
use http::{HeaderMap, HeaderValue};
use std::error::Error;
use std::fmt::{self, Debug, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};

type BodyError = Box<dyn Error + Send + Sync>;

/// SdkBody type
///
/// This is the Body used for dispatching all HTTP Requests and for the raw responses handed back
/// to callers. Request bodies are always fully buffered; `Streaming` only appears on responses
/// coming straight off the transport.
pub enum SdkBody {
    Once(Option<Bytes>),
    Streaming(hyper::Body),
}

impl Debug for SdkBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SdkBody::Once(Some(bytes)) => f.debug_tuple("Once").field(bytes).finish(),
            SdkBody::Once(None) => f.write_str("Once(<empty>)"),
            SdkBody::Streaming(_) => f.write_str("Streaming(<hyper body>)"),
        }
    }
}

impl SdkBody {
    pub fn empty() -> Self {
        SdkBody::Once(None)
    }

    fn poll_inner(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Bytes, BodyError>>> {
        match self {
            SdkBody::Once(ref mut opt) => Poll::Ready(opt.take().map(Ok)),
            SdkBody::Streaming(body) => {
                http_body::Body::poll_data(Pin::new(body), cx).map_err(|err| err.into())
            }
        }
    }

    /// If possible, return a reference to this body as `&[u8]`
    ///
    /// If this SdkBody is NOT streaming, this will return the byte slab
    /// If this SdkBody is streaming, this will return `None`
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            SdkBody::Once(Some(b)) => Some(b),
            SdkBody::Once(None) => Some(&[]),
            SdkBody::Streaming(_) => None,
        }
    }

    pub fn try_clone(&self) -> Option<Self> {
        match self {
            SdkBody::Once(bytes) => Some(SdkBody::Once(bytes.clone())),
            SdkBody::Streaming(_) => None,
        }
    }

    pub fn content_length(&self) -> Option<u64> {
        self.bytes().map(|b| b.len() as u64)
    }
}

impl From<&str> for SdkBody {
    fn from(s: &str) -> Self {
        SdkBody::Once(Some(Bytes::copy_from_slice(s.as_bytes())))
    }
}

impl From<String> for SdkBody {
    fn from(s: String) -> Self {
        SdkBody::from(Bytes::from(s))
    }
}

impl From<Bytes> for SdkBody {
    fn from(bytes: Bytes) -> Self {
        SdkBody::Once(Some(bytes))
    }
}

impl From<Vec<u8>> for SdkBody {
    fn from(data: Vec<u8>) -> SdkBody {
        Self::from(Bytes::from(data))
    }
}

impl From<hyper::Body> for SdkBody {
    fn from(body: hyper::Body) -> Self {
        SdkBody::Streaming(body)
    }
}

impl http_body::Body for SdkBody {
    type Data = Bytes;
    type Error = BodyError;

    fn poll_data(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Self::Data, Self::Error>>> {
        self.poll_inner(cx)
    }

    fn poll_trailers(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Result<Option<HeaderMap<HeaderValue>>, Self::Error>> {
        Poll::Ready(Ok(None))
    }

    fn is_end_stream(&self) -> bool {
        match self {
            SdkBody::Once(None) => true,
            SdkBody::Once(Some(bytes)) => bytes.is_empty(),
            SdkBody::Streaming(body) => http_body::Body::is_end_stream(body),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use http_body::Body;

    #[tokio::test]
    async fn once_body_yields_data_once() {
        let mut body = SdkBody::from("hello");
        assert_eq!(body.content_length(), Some(5));
        let data = body.data().await;
        assert_eq!(data.unwrap().unwrap().as_ref(), b"hello");
        assert!(body.data().await.is_none());
    }

    #[test]
    fn streaming_bodies_cannot_be_cloned() {
        let body = SdkBody::from(hyper::Body::from("data"));
        assert!(body.try_clone().is_none());
        assert!(body.bytes().is_none());
        assert_eq!(SdkBody::empty().bytes(), Some(&[][..]));
    }
}
