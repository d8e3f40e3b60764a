//! Logging middleware for the HTTP server.
//!
//! Two independent Tower layers, each parameterized by a log sink:
//! - `RequestLoggerLayer`: writes a request record, then delegates
//! - `ResponseLoggerLayer`: delegates, then writes a response record
//!
//! They can be stacked in either order.

mod intercept;
mod options;
mod replay;
mod request_line;
mod request_logger;
mod response_logger;

pub use intercept::InterceptedBody;
pub use options::{BodyCapture, LoggerOptions, LoggerOptionsBuilder};
pub use request_logger::{RequestLoggerLayer, RequestLoggerMiddleware, request_logger};
pub use response_logger::{ResponseLoggerLayer, ResponseLoggerMiddleware, response_logger};
