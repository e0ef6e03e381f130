//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, request target)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: matched RouteKind or NotFound
//! ```
//!
//! # Design Decisions
//! - Route table built at startup, immutable at runtime
//! - Exact matching on method and full request target (path + query)
//! - Deterministic: same input always matches same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use router::{RouteKind, Router, CHAT_COMPLETIONS_PATH, HEALTH_PATH};
