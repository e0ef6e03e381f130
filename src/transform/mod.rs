//! Request payload transforms.
//!
//! # Data Flow
//! ```text
//! parsed JSON payload (serde_json::Value)
//!     → Transformer::transform (pure, total)
//!     → re-serialized and forwarded upstream
//! ```
//!
//! # Design Decisions
//! - Payloads are schema-free maps; no struct is imposed on the body
//! - Transforms only remove keys, never add or rewrite values
//! - Every transform is idempotent

pub mod reasoning;

use serde_json::Value;

pub use reasoning::{strip_reasoning, StripReasoning};

/// A rewrite applied to the request payload before forwarding.
pub trait Transformer: Send + Sync {
    fn transform(&self, payload: Value) -> Value;
}
