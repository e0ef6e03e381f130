//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing layer)
//!     → handlers.rs (route dispatch)
//!     → request.rs (parse body, derive outbound headers)
//!     → [upstream client forwards]
//!     → response.rs (relay upstream response or JSON error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use response::RelayError;
pub use server::{AppState, HttpServer};
