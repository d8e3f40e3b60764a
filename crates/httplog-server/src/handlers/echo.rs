use axum::{
    body::Bytes,
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};

/// Handler for `POST /echo`: returns the request body unchanged.
///
/// The request `Content-Type` is reused when present.
pub async fn echo(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

    ([(header::CONTENT_TYPE, content_type)], body)
}
