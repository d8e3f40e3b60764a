//! Test helpers for httplog-server.

#![allow(dead_code, unused_imports)]

pub mod client;
pub mod sinks;

use std::sync::Arc;

use axum::Router;
use httplog_core::{MemorySink, SharedSink};
use httplog_server::{LoggerOptions, Settings, build_router, request_logger, response_logger};

pub use client::{TestClient, TestResponse};
pub use sinks::*;

/// Wraps `router` with both loggers, request logger outermost.
pub fn logged(router: Router, sink: SharedSink, options: LoggerOptions) -> Router {
    router
        .layer(response_logger(sink.clone()).options(options))
        .layer(request_logger(sink).options(options))
}

/// Client for the demo router, logging into a fresh memory sink.
pub fn client() -> (TestClient, MemorySink) {
    let sink = MemorySink::new();
    let router = build_router(&Settings::default(), Arc::new(sink.clone()));
    (TestClient::new(router), sink)
}
