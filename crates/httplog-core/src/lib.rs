//! httplog core: log records, their encoding, and the sinks they are written to.
//!
//! This crate has no HTTP framework dependency. The middleware that builds
//! records from live requests and responses lives in `httplog-server`.
//!
//! # Example
//!
//! ```
//! use httplog_core::{HeaderValues, LogRecord, MemorySink, RecordKind};
//!
//! let sink = MemorySink::new();
//! let headers: HeaderValues = [("x-test", "a")].into_iter().collect();
//! let record = LogRecord::request("example.com", "/items?x=1", "POST", headers, "payload");
//!
//! record.emit(&sink).unwrap();
//!
//! let written = LogRecord::from_json(&sink.writes()[0]).unwrap();
//! assert_eq!(written.kind(), RecordKind::Request);
//! assert_eq!(written.body(), b"payload");
//! ```

pub mod error;
pub mod headers;
pub mod record;
pub mod sink;

pub use error::{HttplogError, Result};
pub use headers::{HeaderValues, canonical_header_name};
pub use record::{LogRecord, RecordKind};
pub use sink::{
    Delimited, Delimiter, DiscardSink, LogSink, MemorySink, SharedSink, SinkKind, SinkSettings,
    StderrSink, StdoutSink, WriterSink, open_sink,
};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
