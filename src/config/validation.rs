//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of the upstream URL (the `url` crate handles syntax)
//! - Only `http` and `https` upstreams are accepted
//! - An upstream must name a host
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: &Url → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Scheme other than http/https.
    UnsupportedScheme(String),
    /// URL without a host component.
    MissingHost,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnsupportedScheme(s) => {
                write!(f, "unsupported scheme '{}' (expected http or https)", s)
            }
            ValidationError::MissingHost => write!(f, "URL has no host"),
        }
    }
}

/// Validate a parsed upstream URL.
pub fn validate_upstream(url: &Url) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !matches!(url.scheme(), "http" | "https") {
        errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        errors.push(ValidationError::MissingHost);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
