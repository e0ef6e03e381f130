//! Upstream communication.
//!
//! # Data Flow
//! ```text
//! sanitized JSON bytes + outbound headers
//!     → client.rs (POST to the configured target)
//!     → reqwest::Response (headers received, body still streaming)
//!     → http::response::relay_response
//! ```
//!
//! # Design Decisions
//! - One client, built at startup, shared by every request
//! - No retries: a failed call is reported to the caller as 502
//! - Redirects and system proxies are not followed; the target is exactly
//!   what `UPSTREAM_URL` names

pub mod client;

pub use client::UpstreamClient;
