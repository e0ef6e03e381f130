//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! UPSTREAM_URL (environment)
//!     → loader.rs (read & parse URL)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → handed to the HTTP server, shared via Arc with handlers
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never mutated
//! - Missing or invalid upstream is fatal before any traffic is served
//! - Listen address and body limit are constants, not environment driven

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_from, ConfigError, UPSTREAM_URL_VAR};
pub use schema::{
    LimitsConfig, ListenerConfig, RelayConfig, TimeoutConfig, UpstreamScheme, UpstreamTarget,
};
