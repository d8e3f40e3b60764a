//! Middleware that logs each outbound response after the handler returns.

use axum::{
    body::Body,
    http::{Request, Response},
};
use httplog_core::SharedSink;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use super::intercept::{InterceptedBody, PendingRecord};
use super::options::LoggerOptions;
use super::request_line::{RequestLine, header_values};

/// Creates a layer that writes a response record to `sink` for every response.
pub fn response_logger(sink: SharedSink) -> ResponseLoggerLayer {
    ResponseLoggerLayer {
        sink,
        options: LoggerOptions::default(),
    }
}

/// Layer that logs responses.
#[derive(Clone)]
pub struct ResponseLoggerLayer {
    sink: SharedSink,
    options: LoggerOptions,
}

impl ResponseLoggerLayer {
    /// Replaces the logger options.
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }
}

impl<S> Layer<S> for ResponseLoggerLayer {
    type Service = ResponseLoggerMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ResponseLoggerMiddleware {
            inner,
            sink: self.sink.clone(),
            options: self.options,
        }
    }
}

/// Middleware that swaps the handler's response body for an
/// [`InterceptedBody`].
///
/// Status and headers are taken from the response the handler returned; a
/// handler that never sets a status produces the implicit `200 OK`. The
/// record itself is written once the body has been fully sent (or dropped),
/// so it never precedes the handler's own work.
#[derive(Clone)]
pub struct ResponseLoggerMiddleware<S> {
    inner: S,
    sink: SharedSink,
    options: LoggerOptions,
}

impl<S> Service<Request<Body>> for ResponseLoggerMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let line = RequestLine::capture(request.method(), request.uri(), request.headers());
        let sink = self.sink.clone();
        let capture = self.options.body_capture;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(request).await?;
            let (parts, body) = response.into_parts();

            let pending = PendingRecord {
                line,
                status: parts.status.as_u16(),
                headers: header_values(&parts.headers, false),
                sink,
            };
            let body = Body::new(InterceptedBody::new(body, capture, pending));

            Ok(Response::from_parts(parts, body))
        })
    }
}
