//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Request and response bodies longer than this many bytes are truncated in the logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Request bodies larger than this many bytes are rejected before reaching a handler.
///
/// Matches axum's default body limit, which the logging middleware would
/// otherwise bypass by buffering the body first.
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// The request line and response status are logged at the `info` level.
/// Headers and bodies are logged at the `debug` level with the session cookie
/// redacted, and bodies longer than [LOG_BODY_LENGTH_LIMIT] bytes are truncated.
///
/// The bodies are passed on byte for byte, only the logged copy is decoded.
/// Request bodies over [MAX_REQUEST_BODY_SIZE] bytes are rejected with 400 Bad Request.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    tracing::info!("{} {}", request.method(), request.uri());

    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, MAX_REQUEST_BODY_SIZE).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return Error::InvalidBody(format!(
                "could not read a request body of at most {MAX_REQUEST_BODY_SIZE} bytes"
            ))
            .into_response();
        }
    };
    tracing::debug!(
        "Request headers: {:?}\nbody: {}",
        redact_cookies(&parts.headers),
        truncate(&body_text(&body_bytes))
    );

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            Bytes::new()
        }
    };
    tracing::info!("Sending response: {}", parts.status);
    tracing::debug!(
        "Response headers: {:?}\nbody: {}",
        redact_cookies(&parts.headers),
        truncate(&body_text(&body_bytes))
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

fn body_text(body_bytes: &Bytes) -> String {
    String::from_utf8_lossy(body_bytes).into_owned()
}

fn redact_cookies(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();

    for name in [COOKIE, SET_COOKIE] {
        if headers.contains_key(&name) {
            headers.insert(name, HeaderValue::from_static("********"));
        }
    }

    headers
}

/// Cut `text` down to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate(text: &str) -> String {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return format!("{text:?}");
    }

    let end = (0..=LOG_BODY_LENGTH_LIMIT)
        .rev()
        .find(|&index| text.is_char_boundary(index))
        .unwrap_or(0);

    format!("{:?}...", &text[..end])
}
