//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! Everything except the upstream target is fixed at build time; the upstream
//! is resolved from the environment by [`crate::config::loader`].

use std::fmt;

use serde::Serialize;
use url::Url;

/// Address the proxy listens on.
pub const BIND_ADDRESS: &str = "127.0.0.1:3457";

/// Largest inbound body accepted before answering 413 (25 MiB).
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Root configuration for the relay proxy.
#[derive(Debug, Clone, Serialize)]
pub struct RelayConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Where sanitized requests are forwarded.
    pub upstream: UpstreamTarget,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Outbound timeouts.
    pub timeouts: TimeoutConfig,
}

impl RelayConfig {
    /// Build a configuration around an already resolved upstream, using the
    /// fixed defaults for everything else.
    pub fn new(upstream: UpstreamTarget) -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream,
            limits: LimitsConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3457").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: BIND_ADDRESS.to_string(),
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Serialize)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

/// Timeout configuration for the upstream call.
///
/// Only connection setup and the wait for response headers can be bounded.
/// Relaying the response body is never timed, so long streaming completions
/// are not cut off.
#[derive(Debug, Clone, Serialize)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Maximum wait for upstream response headers in seconds.
    /// `None` waits as long as the upstream takes.
    pub response_headers_secs: Option<u64>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            response_headers_secs: None,
        }
    }
}

/// Transport selected from the upstream URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamScheme {
    Http,
    Https,
}

impl UpstreamScheme {
    /// Port used when the URL does not name one.
    pub fn default_port(self) -> u16 {
        match self {
            UpstreamScheme::Http => 80,
            UpstreamScheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamScheme::Http => "http",
            UpstreamScheme::Https => "https",
        }
    }
}

/// The single upstream endpoint, resolved once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamTarget {
    pub scheme: UpstreamScheme,

    /// Host name or IP literal (IPv6 literals keep their brackets).
    pub host: String,

    /// Port from the URL, if one was written explicitly.
    pub explicit_port: Option<u16>,

    /// Path component, always starting with `/`.
    pub path: String,

    /// Query string without the leading `?`.
    pub query: Option<String>,
}

impl UpstreamTarget {
    /// Effective port: the explicit one or the scheme default.
    pub fn port(&self) -> u16 {
        self.explicit_port
            .unwrap_or_else(|| self.scheme.default_port())
    }

    /// Value for the outbound `host` header: `host` or `host:port` when the
    /// URL carried an explicit port.
    pub fn host_header(&self) -> String {
        match self.explicit_port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// Path plus query, as sent on the request line.
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Absolute URL the outbound POST is sent to.
    pub fn endpoint(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme.as_str(),
            self.host,
            self.port(),
            self.path_and_query()
        )
    }

    /// Extract the target fields from a parsed URL.
    ///
    /// Callers are expected to have validated the URL first; an unsupported
    /// scheme or missing host yields `None`.
    pub fn from_url(url: &Url) -> Option<Self> {
        let scheme = match url.scheme() {
            "http" => UpstreamScheme::Http,
            "https" => UpstreamScheme::Https,
            _ => return None,
        };
        let host = url.host_str()?.to_string();

        Some(Self {
            scheme,
            host,
            explicit_port: url.port(),
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
        })
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}{}",
            self.scheme.as_str(),
            self.host_header(),
            self.path_and_query()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(raw: &str) -> UpstreamTarget {
        UpstreamTarget::from_url(&Url::parse(raw).unwrap()).unwrap()
    }

    #[test]
    fn test_default_ports() {
        let https = target("https://api.example.com/api/v1/chat/completions");
        assert_eq!(https.port(), 443);
        assert_eq!(https.explicit_port, None);
        assert_eq!(https.host_header(), "api.example.com");

        let http = target("http://localhost/v1/chat/completions");
        assert_eq!(http.port(), 80);
        assert_eq!(http.scheme, UpstreamScheme::Http);
    }

    #[test]
    fn test_explicit_port_in_host_header() {
        let t = target("http://10.0.0.5:8080/api/v1/chat/completions?debug=1");
        assert_eq!(t.port(), 8080);
        assert_eq!(t.host_header(), "10.0.0.5:8080");
        assert_eq!(t.path_and_query(), "/api/v1/chat/completions?debug=1");
        assert_eq!(
            t.endpoint(),
            "http://10.0.0.5:8080/api/v1/chat/completions?debug=1"
        );
    }

    #[test]
    fn test_ipv6_host_keeps_brackets() {
        let t = target("http://[::1]:9000/chat");
        assert_eq!(t.host_header(), "[::1]:9000");
        assert_eq!(t.endpoint(), "http://[::1]:9000/chat");
    }

    #[test]
    fn test_unsupported_scheme() {
        let url = Url::parse("ftp://example.com/file").unwrap();
        assert!(UpstreamTarget::from_url(&url).is_none());
    }

    #[test]
    fn test_config_serializes_for_startup_log() {
        let config = RelayConfig::new(target("https://example.com:8443/v1/chat?x=1"));
        let logged: serde_json::Value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            logged,
            serde_json::json!({
                "listener": {"bind_address": "127.0.0.1:3457"},
                "upstream": {
                    "scheme": "https",
                    "host": "example.com",
                    "explicit_port": 8443,
                    "path": "/v1/chat",
                    "query": "x=1",
                },
                "limits": {"max_body_bytes": 26_214_400},
                "timeouts": {"connect_secs": 10, "response_headers_secs": null},
            })
        );
    }

    #[test]
    fn test_relay_config_defaults() {
        let config = RelayConfig::new(target("https://example.com/x"));
        assert_eq!(config.listener.bind_address, "127.0.0.1:3457");
        assert_eq!(config.limits.max_body_bytes, 26_214_400);
        assert_eq!(config.timeouts.response_headers_secs, None);
    }
}
