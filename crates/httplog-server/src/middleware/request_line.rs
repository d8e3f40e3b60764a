//! Request fields shared by both record kinds.

use axum::http::{HeaderMap, Method, Uri, header};
use httplog_core::HeaderValues;

/// Host, URL and method of a request, captured before it is handed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestLine {
    pub host: String,
    pub url: String,
    pub method: String,
}

impl RequestLine {
    pub fn capture(method: &Method, uri: &Uri, headers: &HeaderMap) -> Self {
        Self {
            host: host_of(uri, headers),
            url: uri.to_string(),
            method: method.as_str().to_string(),
        }
    }
}

/// The `Host` header, falling back to the URI authority (HTTP/2).
fn host_of(uri: &Uri, headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default()
}

/// Copies a header map into record form.
///
/// `Host` is skipped for requests since it is already recorded on its own.
pub(crate) fn header_values(headers: &HeaderMap, skip_host: bool) -> HeaderValues {
    let mut values = HeaderValues::new();
    for (name, value) in headers {
        if skip_host && *name == header::HOST {
            continue;
        }
        values.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    values
}
