//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup → logging.rs (subscriber, env filter)
//! each request → tracing.rs (span with request id, method, path)
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`
//! - Request and response payloads are never logged
//! - The request id lives in the span only; it is not injected into the
//!   forwarded headers

pub mod logging;
pub mod tracing;
