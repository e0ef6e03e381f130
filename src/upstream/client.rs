//! HTTP client for the configured upstream.

use std::time::Duration;

use axum::http::HeaderMap;
use reqwest::{redirect, Client, Response};

use crate::config::{RelayConfig, UpstreamTarget};
use crate::http::response::RelayError;

/// Sends sanitized requests to the single upstream target.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http_client: Client,
    target: UpstreamTarget,
    endpoint: String,
    response_headers_timeout: Option<Duration>,
}

impl UpstreamClient {
    /// Build the client from the relay configuration.
    ///
    /// Plain or TLS transport is chosen per request from the target scheme.
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .redirect(redirect::Policy::none())
            .no_proxy()
            .build()?;

        Ok(Self {
            http_client,
            target: config.upstream.clone(),
            endpoint: config.upstream.endpoint(),
            response_headers_timeout: config.timeouts.response_headers_secs.map(Duration::from_secs),
        })
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// POST `body` upstream and wait for the response headers.
    ///
    /// The returned response still has its body pending so the caller can
    /// relay it as it arrives.
    pub async fn forward(&self, headers: HeaderMap, body: Vec<u8>) -> Result<Response, RelayError> {
        let send = self
            .http_client
            .post(&self.endpoint)
            .headers(headers)
            .body(body)
            .send();

        let response = match self.response_headers_timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| RelayError::UpstreamTimeout(limit.as_secs()))??,
            None => send.await?,
        };

        tracing::debug!(
            status = %response.status(),
            upstream = %self.target,
            "Upstream responded"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from;

    #[test]
    fn test_endpoint_uses_scheme_default_port() {
        let config = load_config_from(Some("https://chat.example.com/api/v1/chat/completions".into())).unwrap();
        let client = UpstreamClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "https://chat.example.com:443/api/v1/chat/completions");
        assert_eq!(client.target().host, "chat.example.com");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_upstream_error() {
        // Bind then drop to get a local port with nothing listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = load_config_from(Some(format!("http://{addr}/v1/chat/completions"))).unwrap();
        let client = UpstreamClient::new(&config).unwrap();

        let err = client.forward(HeaderMap::new(), b"{}".to_vec()).await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(_)));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_response_headers_timeout() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut config = load_config_from(Some(format!("http://{addr}/v1/chat/completions"))).unwrap();
        config.timeouts.response_headers_secs = Some(1);
        let client = UpstreamClient::new(&config).unwrap();

        let err = client.forward(HeaderMap::new(), b"{}".to_vec()).await.unwrap_err();
        assert!(matches!(err, RelayError::UpstreamTimeout(1)));
    }
}
