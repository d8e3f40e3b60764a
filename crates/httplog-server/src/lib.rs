//! httplog server: request/response logging middleware for axum.
//!
//! The middleware writes one JSON record per request and one per response to
//! a [`httplog_core::LogSink`]. The rest of the crate is the demo server that
//! wires it up: settings, router and process lifecycle.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axum::{Router, routing::get};
//! use httplog_core::{SharedSink, StdoutSink};
//! use httplog_server::{request_logger, response_logger};
//!
//! let sink: SharedSink = Arc::new(StdoutSink);
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "hi" }))
//!     .layer(response_logger(sink.clone()))
//!     .layer(request_logger(sink));
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod settings;

pub use error::ConfigError;
pub use handlers::HealthResponse;
pub use middleware::{
    BodyCapture, InterceptedBody, LoggerOptions, RequestLoggerLayer, ResponseLoggerLayer,
    request_logger, response_logger,
};
pub use server::{build_router, run_server};
pub use settings::{LogSettings, ServerSettings, Settings};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
