//! Response handling and error mapping.
//!
//! # Responsibilities
//! - Relay the upstream response (status, headers, body) to the caller
//! - Map relay failures to JSON error responses with the right status
//!
//! # Design Decisions
//! - The upstream body is streamed chunk by chunk, never buffered whole
//! - Upstream headers are copied verbatim; upstream 4xx/5xx are not errors
//! - Every locally generated error is `{"error": <message>}` as JSON

use std::error::Error as StdError;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures on the proxied route. Each maps to one response status.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound body exceeded the configured limit.
    #[error("Request too large")]
    BodyTooLarge,

    /// The client stream failed before the body completed.
    #[error("{0}")]
    BodyRead(#[from] axum::Error),

    /// Body was not valid JSON (or not UTF-8).
    #[error("Invalid JSON")]
    InvalidJson,

    /// Connecting to or talking with the upstream failed before headers arrived.
    #[error("{}", error_chain(.0))]
    Upstream(#[from] reqwest::Error),

    /// Upstream did not send response headers in time.
    #[error("Upstream did not respond within {0} seconds")]
    UpstreamTimeout(u64),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::BodyRead(_) | RelayError::InvalidJson => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) | RelayError::UpstreamTimeout(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let mut response = json_error(self.status(), self.to_string());

        // Remaining request bytes are left unread; don't reuse the connection.
        if matches!(self, RelayError::BodyTooLarge) {
            response
                .headers_mut()
                .insert(header::CONNECTION, HeaderValue::from_static("close"));
        }
        response
    }
}

/// `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    (status, Json(json!({ "error": message }))).into_response()
}

/// Render an error with its sources, e.g.
/// `error sending request: client error (Connect): Connection refused`.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Turn an upstream response into the caller's response.
///
/// Status and headers are copied as-is and the body is relayed as a stream.
pub fn relay_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
