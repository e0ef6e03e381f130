//! Request handling and transformation.
//!
//! # Responsibilities
//! - Parse the buffered body as JSON
//! - Derive the outbound headers from the inbound ones
//!
//! # Design Decisions
//! - An empty body counts as `{}`
//! - Inbound headers pass through untouched except `host`, `content-type`
//!   and the framing headers, which must describe the new body

use axum::http::{header, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::UpstreamTarget;
use crate::http::response::RelayError;

/// Parse a buffered request body.
///
/// The body is decoded as UTF-8 text first; malformed sequences become
/// U+FFFD rather than failing the request. Nesting deeper than serde_json's
/// recursion limit (128) is rejected as invalid.
pub fn parse_payload(raw: &[u8]) -> Result<Value, RelayError> {
    if raw.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    let text = String::from_utf8_lossy(raw);
    serde_json::from_str(&text).map_err(|_| RelayError::InvalidJson)
}

/// Build the headers sent upstream.
///
/// `host` points at the upstream, `content-type` is forced to JSON, and the
/// inbound `content-length`/`transfer-encoding` are dropped so the client
/// library frames the re-serialized body itself.
pub fn outbound_headers(inbound: &HeaderMap, target: &UpstreamTarget) -> HeaderMap {
    let mut headers = inbound.clone();

    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);

    match HeaderValue::from_str(&target.host_header()) {
        Ok(host) => {
            headers.insert(header::HOST, host);
        }
        Err(_) => {
            // Validated URLs always yield a legal host; let the client derive it.
            headers.remove(header::HOST);
        }
    }

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    headers
}
