#![allow(dead_code)]
use httplog_core::{HeaderValues, LogRecord};

/// Builds a GET request record for `url` with a single header.
pub fn request_record(url: &str) -> LogRecord {
    let headers: HeaderValues = [("user-agent", "tests")].into_iter().collect();
    LogRecord::request("localhost:8080", url, "GET", headers, Vec::new())
}

/// Builds a response record for `url`.
pub fn response_record(url: &str, status: u16, body: &[u8]) -> LogRecord {
    let headers: HeaderValues = [("content-type", "text/plain; charset=utf-8")]
        .into_iter()
        .collect();
    LogRecord::response("localhost:8080", url, "GET", headers, status, body.to_vec())
}
