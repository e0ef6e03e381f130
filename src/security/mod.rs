//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request on the proxied route:
//!     → limits.rs (bounded body read)
//!     → Pass to parsing and transform
//! ```
//!
//! # Design Decisions
//! - Fail closed: an oversized body is rejected, never truncated
//! - No authentication; caller credentials are forwarded untouched

pub mod limits;
