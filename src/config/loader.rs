//! Configuration loading from the environment.

use thiserror::Error;
use url::Url;

use crate::config::schema::{RelayConfig, UpstreamTarget};
use crate::config::validation::{validate_upstream, ValidationError};

/// Environment variable holding the full upstream endpoint URL.
pub const UPSTREAM_URL_VAR: &str = "UPSTREAM_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing UPSTREAM_URL")]
    Missing,

    #[error("Invalid UPSTREAM_URL '{value}': {source}")]
    Parse {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid UPSTREAM_URL '{value}': {}", join_errors(.errors))]
    Validation {
        value: String,
        errors: Vec<ValidationError>,
    },
}

impl ConfigError {
    /// Example invocation printed next to startup failures.
    pub fn usage() -> &'static str {
        "  export UPSTREAM_URL=\"$OPENWEBUI_URL/api/v1/chat/completions\""
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
pub fn load_config() -> Result<RelayConfig, ConfigError> {
    load_config_from(std::env::var(UPSTREAM_URL_VAR).ok())
}

/// Build the configuration from a raw upstream URL value.
///
/// An unset or empty value is treated as missing.
pub fn load_config_from(raw: Option<String>) -> Result<RelayConfig, ConfigError> {
    let value = match raw {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => return Err(ConfigError::Missing),
    };

    let url = Url::parse(&value).map_err(|source| ConfigError::Parse {
        value: value.clone(),
        source,
    })?;

    validate_upstream(&url).map_err(|errors| ConfigError::Validation {
        value: value.clone(),
        errors,
    })?;

    let upstream = UpstreamTarget::from_url(&url).ok_or_else(|| ConfigError::Validation {
        value: value.clone(),
        errors: vec![ValidationError::MissingHost],
    })?;

    Ok(RelayConfig::new(upstream))
}
