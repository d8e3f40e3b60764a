//! Middleware that logs each inbound request before delegating.

use axum::{
    body::Body,
    http::{Request, Response},
};
use httplog_core::{LogRecord, SharedSink};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{Instrument, debug, debug_span};

use super::options::LoggerOptions;
use super::replay::ReadBody;
use super::request_line::{RequestLine, header_values};

/// Creates a layer that writes a request record to `sink` for every request.
pub fn request_logger(sink: SharedSink) -> RequestLoggerLayer {
    RequestLoggerLayer {
        sink,
        options: LoggerOptions::default(),
    }
}

/// Layer that logs requests.
#[derive(Clone)]
pub struct RequestLoggerLayer {
    sink: SharedSink,
    options: LoggerOptions,
}

impl RequestLoggerLayer {
    /// Replaces the logger options.
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }
}

impl<S> Layer<S> for RequestLoggerLayer {
    type Service = RequestLoggerMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLoggerMiddleware {
            inner,
            sink: self.sink.clone(),
            options: self.options,
        }
    }
}

/// Middleware that reads the whole request body, writes a request record,
/// then hands the request to the inner service.
///
/// Body read errors are recorded as an empty body, and the inner service
/// sees the bytes read so far followed by the same error. Sink failures are
/// ignored.
#[derive(Clone)]
pub struct RequestLoggerMiddleware<S> {
    inner: S,
    sink: SharedSink,
    options: LoggerOptions,
}

impl<S> Service<Request<Body>> for RequestLoggerMiddleware<S>
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
        let sink = self.sink.clone();
        let restore = self.options.restore_request_body;
        let mut inner = self.inner.clone();
        let span = debug_span!(
            "request_logger",
            method = %request.method(),
            path = %request.uri().path(),
        );

        Box::pin(
            async move {
                let (parts, body) = request.into_parts();

                let read = ReadBody::read(body).await;
                if let Some(error) = &read.error {
                    debug!(%error, "Request body unreadable, logging it as empty");
                }

                let line = RequestLine::capture(&parts.method, &parts.uri, &parts.headers);
                let record = LogRecord::request(
                    line.host,
                    line.url,
                    line.method,
                    header_values(&parts.headers, true),
                    read.logged(),
                );
                if let Err(error) = record.emit(sink.as_ref()) {
                    debug!(%error, "Request record dropped");
                }

                let body = if restore {
                    read.replay()
                } else {
                    Body::empty()
                };

                inner.call(Request::from_parts(parts, body)).await
            }
            .instrument(span),
        )
    }
}
