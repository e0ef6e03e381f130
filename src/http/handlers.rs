//! Request handlers.
//!
//! Every request lands in [`dispatch`], which resolves the route and runs
//! one of: the health check, the chat-completions relay, or the 404 reply.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::request::{outbound_headers, parse_payload};
use crate::http::response::{json_error, relay_response, RelayError};
use crate::http::server::AppState;
use crate::routing::RouteKind;
use crate::security::limits::read_body_limited;

/// Entry point for all requests.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    match state.router.match_request(&request) {
        RouteKind::Health => health().await.into_response(),
        RouteKind::ChatCompletions => match relay_chat_completion(&state, request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(status = %e.status(), error = %e, "Relay failed");
                e.into_response()
            }
        },
        RouteKind::NotFound => json_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// Liveness check. Never touches the upstream.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Buffer, parse, strip, forward, relay.
async fn relay_chat_completion(
    state: &AppState,
    request: Request<Body>,
) -> Result<Response, RelayError> {
    let (parts, body) = request.into_parts();

    let raw = read_body_limited(body, state.max_body_bytes).await?;
    let payload = parse_payload(&raw)?;
    let payload = state.transformer.transform(payload);

    let body = payload.to_string().into_bytes();
    let headers = outbound_headers(&parts.headers, state.upstream.target());

    tracing::debug!(
        inbound_bytes = raw.len(),
        outbound_bytes = body.len(),
        "Forwarding chat completion"
    );

    let upstream = state.upstream.forward(headers, body).await?;
    Ok(relay_response(upstream))
}
