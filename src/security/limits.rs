//! Request body limits.
//!
//! # Responsibilities
//! - Accumulate the inbound body chunk by chunk
//! - Stop reading as soon as the running total exceeds the limit
//! - Surface client stream errors separately from oversize bodies
//!
//! # Design Decisions
//! - Checked while streaming, not after; oversized bodies are never held whole
//! - The remaining bytes are not drained; the caller closes the connection

use axum::body::Body;
use futures_util::StreamExt;

use crate::http::response::RelayError;

/// Read a request body into memory, failing once it grows past `max_bytes`.
pub async fn read_body_limited(body: Body, max_bytes: usize) -> Result<Vec<u8>, RelayError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if buf.len() + chunk.len() > max_bytes {
            return Err(RelayError::BodyTooLarge);
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf)
}
