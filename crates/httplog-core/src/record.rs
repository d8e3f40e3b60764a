//! The log record written for each intercepted request and response.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{HttplogError, Result};
use crate::headers::HeaderValues;
use crate::sink::LogSink;

/// Which phase produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Written before the handler runs.
    Request,
    /// Written after the response has been handed to the transport.
    Response,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Request => "request",
            RecordKind::Response => "response",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured request or response log record.
///
/// Records are immutable: they are built once, encoded, and handed to a sink.
/// The JSON form uses the field names `Host`, `URL`, `Method`, `Header`,
/// `Status`, `Body` and `Type`; the body is base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Host")]
    host: String,

    #[serde(rename = "URL")]
    url: String,

    #[serde(rename = "Method")]
    method: String,

    #[serde(rename = "Header")]
    headers: HeaderValues,

    /// Always 0 for request records.
    #[serde(rename = "Status")]
    status: u16,

    #[serde(
        rename = "Body",
        serialize_with = "serialize_body",
        deserialize_with = "deserialize_body"
    )]
    body: Vec<u8>,

    #[serde(rename = "Type")]
    kind: RecordKind,
}

impl LogRecord {
    /// Creates a request-phase record. Its status is 0.
    pub fn request(
        host: impl Into<String>,
        url: impl Into<String>,
        method: impl Into<String>,
        headers: HeaderValues,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            host: host.into(),
            url: url.into(),
            method: method.into(),
            headers,
            status: 0,
            body: body.into(),
            kind: RecordKind::Request,
        }
    }

    /// Creates a response-phase record.
    pub fn response(
        host: impl Into<String>,
        url: impl Into<String>,
        method: impl Into<String>,
        headers: HeaderValues,
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            host: host.into(),
            url: url.into(),
            method: method.into(),
            headers,
            status,
            body: body.into(),
            kind: RecordKind::Response,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &HeaderValues {
        &self.headers
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Encodes the record as a single JSON object, without trailing newline.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| HttplogError::encode(self.kind.as_str(), e))
    }

    /// Parses a record previously produced by [`LogRecord::to_json`].
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| HttplogError::encode("unknown", e))
    }

    /// Encodes the record and hands it to `sink` in a single write.
    ///
    /// Returns the number of bytes the sink accepted.
    pub fn emit(&self, sink: &dyn LogSink) -> Result<usize> {
        let encoded = self.to_json()?;
        let written = sink.write(&encoded)?;
        if written < encoded.len() {
            return Err(HttplogError::ShortWrite {
                written,
                expected: encoded.len(),
            });
        }
        Ok(written)
    }
}

fn serialize_body<S>(body: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(body))
}

fn deserialize_body<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = Option::<String>::deserialize(deserializer)?;
    match encoded {
        Some(s) => STANDARD.decode(s).map_err(serde::de::Error::custom),
        None => Ok(Vec::new()),
    }
}
