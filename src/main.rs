//! Reasoning-stripping relay proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │             STRIP-REASONING PROXY             │
//!                        │                                              │
//!   POST /api/v1/chat/   │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   completions ─────────┼─▶│ routing │──▶│  limits  │──▶│ transform │  │
//!                        │  └─────────┘   │ (25 MiB) │   │ (strip)   │  │
//!                        │                └──────────┘   └─────┬─────┘  │
//!                        │                                     ▼        │
//!   streamed response    │  ┌──────────┐              ┌─────────────┐   │
//!   ◀────────────────────┼──│ response │◀─────────────│  upstream   │◀──┼──── UPSTREAM_URL
//!                        │  │  relay   │              │   client    │   │
//!                        │  └──────────┘              └─────────────┘   │
//!                        └──────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;

use strip_reasoning_proxy::config::{load_config, ConfigError};
use strip_reasoning_proxy::lifecycle::{signals, Shutdown};
use strip_reasoning_proxy::observability::logging::init_logging;
use strip_reasoning_proxy::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}. Example:");
            eprintln!("{}", ConfigError::usage());
            std::process::exit(1);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %serde_json::to_string(&config)?,
        "Configuration loaded"
    );

    let bind_address = config.listener.bind_address.clone();
    let upstream = config.upstream.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        forwarding_to = %upstream,
        "strip-reasoning-proxy listening on http://{}",
        local_addr
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
