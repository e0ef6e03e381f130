//! Per-request spans.

use axum::body::Body;
use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// Span for one inbound request, tagged with a fresh request id.
pub fn make_request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        path = %req.uri().path(),
    )
}

