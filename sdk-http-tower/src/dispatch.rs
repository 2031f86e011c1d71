/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::SendOperationError;
use sdk_http::body::SdkBody;
use sdk_http::context::InvocationContext;
use sdk_http::interceptor::Interceptors;
use sdk_http::operation;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};
use tracing::{debug, trace};

/// Connects Operation driven middleware to an HTTP implementation.
///
/// It will also wrap the error type in OperationError to enable operation middleware
/// reporting specific errors. Interceptors get their transmit hooks run here, immediately
/// around the transport call.
#[derive(Clone)]
pub struct DispatchService<S> {
    inner: S,
    interceptors: Interceptors,
}

type BoxedResultFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S> Service<operation::Request> for DispatchService<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = SendOperationError;
    type Future = BoxedResultFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .poll_ready(cx)
            .map_err(|e| SendOperationError::RequestDispatchError(e.into()))
    }

    fn call(&mut self, req: operation::Request) -> Self::Future {
        let (mut req, properties) = req.into_parts();
        let context = properties.acquire().get::<InvocationContext>().cloned();
        if let Some(context) = &context {
            for interceptor in self.interceptors.iter() {
                if let Err(err) = interceptor.modify_before_transmit(context, &mut req) {
                    return Box::pin(std::future::ready(Err(
                        SendOperationError::RequestConstructionError(err),
                    )));
                }
            }
        }
        debug!(method = %req.method(), uri = %req.uri(), "dispatching request");
        let interceptors = self.interceptors.clone();
        let future = self.inner.call(req);
        Box::pin(async move {
            let response = future.await.map_err(|err| {
                let err = err.into();
                debug!(error = %err, "dispatch failed");
                SendOperationError::RequestDispatchError(err)
            })?;
            trace!(status = %response.status(), "response received");
            if let Some(context) = &context {
                for interceptor in interceptors.iter() {
                    interceptor.read_after_transmit(context, &response);
                }
            }
            Ok(response)
        })
    }
}

#[derive(Clone, Default)]
#[non_exhaustive]
pub struct DispatchLayer {
    interceptors: Interceptors,
}

impl DispatchLayer {
    pub fn new() -> Self {
        DispatchLayer::default()
    }

    pub fn with_interceptors(interceptors: Interceptors) -> Self {
        DispatchLayer { interceptors }
    }
}

impl<S> Layer<S> for DispatchLayer
where
    S: Service<http::Request<SdkBody>>,
{
    type Service = DispatchService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DispatchService {
            inner,
            interceptors: self.interceptors.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::dispatch::DispatchLayer;
    use crate::SendOperationError;
    use sdk_http::body::SdkBody;
    use sdk_http::context::InvocationContext;
    use sdk_http::interceptor::{Interceptor, Interceptors};
    use sdk_http::operation::{Metadata, Request};
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};
    use tower::{service_fn, BoxError, Layer, Service};

    struct Tag;
    impl Interceptor for Tag {
        fn modify_before_transmit(
            &self,
            context: &InvocationContext,
            request: &mut http::Request<SdkBody>,
        ) -> Result<(), BoxError> {
            request
                .headers_mut()
                .insert("x-invocation", context.operation().parse()?);
            Ok(())
        }
    }

    struct Veto;
    impl Interceptor for Veto {
        fn modify_before_transmit(
            &self,
            _context: &InvocationContext,
            _request: &mut http::Request<SdkBody>,
        ) -> Result<(), BoxError> {
            Err("vetoed".into())
        }
    }

    #[derive(Clone, Default)]
    struct Statuses(Arc<Mutex<Vec<(String, u16)>>>);

    impl Statuses {
        fn seen(&self) -> Vec<(String, u16)> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Interceptor for Statuses {
        fn read_after_transmit(
            &self,
            context: &InvocationContext,
            response: &http::Response<SdkBody>,
        ) {
            self.0
                .lock()
                .unwrap()
                .push((context.operation().to_string(), response.status().as_u16()));
        }
    }

    fn interceptors(statuses: &Statuses) -> Interceptors {
        let mut interceptors = Interceptors::new();
        interceptors.push(statuses.clone());
        interceptors
    }

    fn request() -> Request {
        let mut request = Request::new(http::Request::new(SdkBody::empty()));
        request
            .properties_mut()
            .insert(InvocationContext::new(Metadata::new("GetChange", "route53")));
        request
    }

    #[tokio::test]
    async fn interceptors_modify_requests_before_transmit() {
        let transport = service_fn(|req: http::Request<SdkBody>| async move {
            assert_eq!(req.headers()["x-invocation"], "GetChange");
            Ok::<_, Infallible>(http::Response::new(SdkBody::empty()))
        });
        let mut interceptors = Interceptors::new();
        interceptors.push(Tag);
        let mut svc = DispatchLayer::with_interceptors(interceptors).layer(transport);
        svc.call(request()).await.expect("success");
    }

    #[tokio::test]
    async fn interceptor_failures_are_construction_failures() {
        let transport = service_fn(|_req: http::Request<SdkBody>| async move {
            Err::<http::Response<SdkBody>, _>("unreachable")
        });
        let mut interceptors = Interceptors::new();
        interceptors.push(Veto);
        let mut svc = DispatchLayer::with_interceptors(interceptors).layer(transport);
        match svc.call(request()).await {
            Err(SendOperationError::RequestConstructionError(err)) => {
                assert_eq!(err.to_string(), "vetoed")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn transport_failures_are_dispatch_failures() {
        let transport = service_fn(|_req: http::Request<SdkBody>| async move {
            Err::<http::Response<SdkBody>, _>("connection reset")
        });
        let mut svc = DispatchLayer::new().layer(transport);
        match svc.call(request()).await {
            Err(SendOperationError::RequestDispatchError(err)) => {
                assert_eq!(err.to_string(), "connection reset")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn every_response_is_read_once_after_transmit() {
        for status in [200u16, 404, 503] {
            let transport = service_fn(move |_req: http::Request<SdkBody>| async move {
                let mut response = http::Response::new(SdkBody::from("body"));
                *response.status_mut() = http::StatusCode::from_u16(status).unwrap();
                Ok::<_, Infallible>(response)
            });
            let statuses = Statuses::default();
            let mut svc =
                DispatchLayer::with_interceptors(interceptors(&statuses)).layer(transport);
            let response = svc.call(request()).await.expect("transport answered");
            assert_eq!(response.status().as_u16(), status);
            assert_eq!(statuses.seen(), vec![("GetChange".to_string(), status)]);
        }
    }

    #[tokio::test]
    async fn failed_transmits_have_no_response_to_read() {
        let transport = service_fn(|_req: http::Request<SdkBody>| async move {
            Err::<http::Response<SdkBody>, _>("connection reset")
        });
        let statuses = Statuses::default();
        let mut svc = DispatchLayer::with_interceptors(interceptors(&statuses)).layer(transport);
        assert!(svc.call(request()).await.is_err());
        assert!(statuses.seen().is_empty());
    }
}
