//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    routing::any,
    Router,
};
use strip_reasoning_proxy::config::load_config_from;
use strip_reasoning_proxy::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

/// A request as seen by a mock upstream.
#[derive(Debug)]
#[allow(dead_code)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Start the proxy in front of `upstream_url` on an ephemeral port.
pub async fn start_proxy(upstream_url: &str) -> (SocketAddr, Shutdown) {
    let config = load_config_from(Some(upstream_url.to_string())).unwrap();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Client that never routes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Start an upstream that records every request and answers 200 with a
/// small completion body.
#[allow(dead_code)]
pub async fn start_recording_upstream() -> (SocketAddr, mpsc::UnboundedReceiver<Captured>) {
    let (tx, rx) = mpsc::unbounded_channel();

    async fn record(
        State(tx): State<mpsc::UnboundedSender<Captured>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> ([(&'static str, &'static str); 2], &'static str) {
        let _ = tx.send(Captured {
            method,
            uri,
            headers,
            body,
        });
        (
            [
                ("content-type", "application/json"),
                ("x-upstream", "recorder"),
            ],
            r#"{"id":"chatcmpl-1","object":"chat.completion"}"#,
        )
    }

    let app = Router::new()
        .route("/{*path}", any(record))
        .with_state(tx);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, rx)
}

/// Read one HTTP/1.1 request with a `content-length` body off the socket.
pub async fn read_request(socket: &mut TcpStream) -> (String, Vec<u8>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    let mut body = buf[head_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed mid body");
        body.extend_from_slice(&chunk[..n]);
    }

    (head, body)
}

/// Start an upstream that answers every request with a raw, fixed response.
#[allow(dead_code)]
pub async fn start_fixed_upstream(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request(&mut socket).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start an upstream that streams a chunked response: `first` immediately,
/// `rest` only after `release` fires.
#[allow(dead_code)]
pub async fn start_streaming_upstream(
    first: &'static str,
    rest: &'static [&'static str],
    release: oneshot::Receiver<()>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;

        let head = "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nTransfer-Encoding: chunked\r\n\r\n";
        socket.write_all(head.as_bytes()).await.unwrap();
        write_chunk(&mut socket, first).await;

        let _ = release.await;
        for data in rest {
            write_chunk(&mut socket, data).await;
        }
        socket.write_all(b"0\r\n\r\n").await.unwrap();
        let _ = socket.shutdown().await;
    });

    addr
}

async fn write_chunk(socket: &mut TcpStream, data: &str) {
    let frame = format!("{:x}\r\n{}\r\n", data.len(), data);
    socket.write_all(frame.as_bytes()).await.unwrap();
    socket.flush().await.unwrap();
}
