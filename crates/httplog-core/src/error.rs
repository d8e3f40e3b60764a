//! Error types for httplog.
//!
//! Record emission is best-effort: the middleware layers discard every error
//! produced here so that logging can never change what the client sees. The
//! errors still exist as values so that callers outside the request path
//! (sink construction, tests, tooling) can inspect them.
//!
//! # Example
//!
//! ```
//! use httplog_core::{HttplogError, Result};
//!
//! fn open(kind: &str) -> Result<()> {
//!     if kind.is_empty() {
//!         return Err(HttplogError::invalid_sink(kind, "sink kind cannot be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(open("").unwrap_err().is_invalid_sink());
//! ```

use std::io;
use thiserror::Error;

/// Main error type for httplog operations.
#[derive(Debug, Error)]
pub enum HttplogError {
    /// A record could not be serialized.
    #[error("Failed to encode {kind} record: {source}")]
    Encode {
        /// Phase of the record that failed to encode
        kind: &'static str,
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// The sink rejected a write.
    #[error("Sink write failed: {0}")]
    Sink(#[from] io::Error),

    /// The sink accepted fewer bytes than the record length.
    #[error("Short write to sink: {written} of {expected} bytes")]
    ShortWrite {
        /// Bytes reported as written
        written: usize,
        /// Length of the encoded record
        expected: usize,
    },

    /// A sink could not be built from its configuration.
    #[error("Invalid sink '{name}': {reason}")]
    InvalidSink {
        /// Configured sink name
        name: String,
        /// Why it's invalid
        reason: String,
    },
}

impl HttplogError {
    /// Creates an Encode error.
    pub fn encode(kind: &'static str, source: serde_json::Error) -> Self {
        Self::Encode { kind, source }
    }

    /// Creates an InvalidSink error.
    pub fn invalid_sink(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSink {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the record could not be serialized.
    pub fn is_encode_error(&self) -> bool {
        matches!(self, Self::Encode { .. })
    }

    /// Returns true if the sink failed or accepted a partial record.
    pub fn is_sink_error(&self) -> bool {
        matches!(self, Self::Sink(_) | Self::ShortWrite { .. })
    }

    /// Returns true if this is a sink configuration error.
    pub fn is_invalid_sink(&self) -> bool {
        matches!(self, Self::InvalidSink { .. })
    }
}

/// Type alias for Results with HttplogError.
pub type Result<T> = std::result::Result<T, HttplogError>;
