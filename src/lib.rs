//! Reasoning-stripping relay for OpenAI-compatible chat completions.
//!
//! Accepts `POST /api/v1/chat/completions`, removes reasoning control fields
//! from the JSON body, forwards it to the upstream named by `UPSTREAM_URL`
//! and streams the upstream response back unchanged.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod transform;
pub mod upstream;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
