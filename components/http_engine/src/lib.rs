//! http_engine component
//!
//! HTTP/1.1 client implementation with connection pooling and keep-alive,
//! exposed behind the [`HttpEngine`] trait so the orchestrator can swap in a
//! mock for tests. Request and response bodies are streamed rather than
//! collected into a buffer up front, matching the "lazy byte stream"
//! requirement the rest of this crate depends on.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use async_trait::async_trait;
use bytes::Bytes;
use fetch_errors::FetchError;
use fetch_types::{BodyStream, EngineRequest, EngineResponse};
use futures::stream::{self, StreamExt};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, StreamBody};
use hyper::body::Frame;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// The abstract HTTP engine the orchestrator sends requests through.
///
/// Deliberately narrow — method/URL/headers/body in, status/headers/body
/// out. Everything about redirects, cookies, caching, and content decoding
/// is the orchestrator's and content decoder's problem.
#[async_trait]
pub trait HttpEngine: Send + Sync {
    /// Send a single request and return its response.
    ///
    /// Does not follow redirects and does not decode `Content-Encoding` —
    /// both are the orchestrator's responsibility, layered on top.
    async fn send(&self, request: EngineRequest) -> Result<EngineResponse, FetchError>;
}

/// Configuration for HTTP/1.1 client behavior
///
/// Controls connection pooling, keep-alive, and timeout settings.
#[derive(Debug, Clone)]
pub struct Http1Config {
    /// Maximum number of connections in the pool
    pub pool_size: usize,

    /// Duration before idle connections are closed
    pub idle_timeout: Duration,

    /// Maximum connections allowed per host
    pub max_connections_per_host: usize,

    /// Enable HTTP keep-alive for persistent connections
    pub enable_keepalive: bool,
}

impl Default for Http1Config {
    fn default() -> Self {
        Self {
            pool_size: 20,
            idle_timeout: Duration::from_secs(90),
            max_connections_per_host: 6,
            enable_keepalive: true,
        }
    }
}

type OutgoingBody = BoxBody<Bytes, FetchError>;

/// Represents an HTTP/1.1 connection
pub struct Http1Connection {
    sender: http1::SendRequest<OutgoingBody>,
    host: String,
    port: u16,
    last_used: Instant,
}

/// Key for identifying connections by host and port
type PoolKey = (String, u16);

/// Internal pool state
struct PoolState {
    idle_connections: HashMap<PoolKey, Vec<Http1Connection>>,
    active_counts: HashMap<PoolKey, usize>,
}

/// Connection pool for HTTP/1.1 connections
///
/// Manages connection reuse, idle timeout, and per-host limits.
pub struct ConnectionPool {
    config: Http1Config,
    state: Arc<Mutex<PoolState>>,
}

impl ConnectionPool {
    /// Create a new connection pool with the given configuration
    pub fn new(config: Http1Config) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(PoolState {
                idle_connections: HashMap::new(),
                active_counts: HashMap::new(),
            })),
        }
    }

    /// Get a connection to the specified host and port
    ///
    /// Reuses an existing idle connection if available, otherwise creates a new one.
    pub async fn get_connection(
        &self,
        host: &str,
        port: u16,
    ) -> Result<Http1Connection, FetchError> {
        let key = (host.to_string(), port);

        {
            let mut state = self.state.lock().await;

            if let Some(conns) = state.idle_connections.get_mut(&key) {
                conns.retain(|conn| conn.last_used.elapsed() < self.config.idle_timeout);

                if let Some(conn) = conns.pop() {
                    let count = state.active_counts.entry(key.clone()).or_insert(0);
                    *count += 1;
                    debug!(host, port, "reused pooled connection");
                    return Ok(conn);
                }
            }
        }

        self.create_new_connection(host, port).await
    }

    /// Return a connection to the pool for reuse
    ///
    /// If keep-alive is disabled, the connection is dropped instead.
    pub async fn return_connection(&self, mut connection: Http1Connection) {
        if !self.config.enable_keepalive {
            return;
        }

        let key = (connection.host.clone(), connection.port);
        connection.last_used = Instant::now();

        let mut state = self.state.lock().await;

        if let Some(count) = state.active_counts.get_mut(&key) {
            *count = count.saturating_sub(1);
        }

        let idle = state.idle_connections.entry(key).or_default();
        idle.push(connection);
    }

    /// Create a new HTTP/1.1 connection
    async fn create_new_connection(
        &self,
        host: &str,
        port: u16,
    ) -> Result<Http1Connection, FetchError> {
        let addr = format!("{}:{}", host, port);
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        let io = TokioIo::new(stream);

        let (sender, conn) = http1::handshake(io)
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                warn!(error = %e, "http/1.1 connection task ended with an error");
            }
        });

        let key = (host.to_string(), port);
        {
            let mut state = self.state.lock().await;
            let count = state.active_counts.entry(key.clone()).or_insert(0);
            *count += 1;
        }

        debug!(host, port, "established new connection");

        Ok(Http1Connection {
            sender,
            host: host.to_string(),
            port,
            last_used: Instant::now(),
        })
    }
}

/// HTTP/1.1 client with connection pooling
///
/// Provides request/response streaming on top of [`ConnectionPool`],
/// implementing [`HttpEngine`].
pub struct Http1Client {
    pool: Arc<ConnectionPool>,
}

impl Http1Client {
    /// Create a new HTTP/1.1 client with the given configuration
    pub fn new(config: Http1Config) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new(config)),
        }
    }

    fn build_hyper_request(
        &self,
        request: EngineRequest,
    ) -> Result<hyper::Request<OutgoingBody>, FetchError> {
        let mut builder = hyper::Request::builder()
            .method(request.method)
            .uri(request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let body: OutgoingBody = match request.body {
            Some(stream) => StreamBody::new(stream.map(|chunk| chunk.map(Frame::data))).boxed(),
            None => Empty::<Bytes>::new()
                .map_err(|never| match never {})
                .boxed(),
        };

        builder
            .body(body)
            .map_err(|e| FetchError::Other(e.to_string()))
    }

    /// Wrap the response body in a stream that returns `conn` to `pool` once
    /// the body has been fully drained, not the moment the response headers
    /// arrive. A connection is only handed back on a clean end-of-body; a
    /// mid-body read error drops it instead of returning it in an unknown
    /// state.
    fn response_body_stream(
        pool: Arc<ConnectionPool>,
        conn: Http1Connection,
        body: hyper::body::Incoming,
    ) -> BodyStream {
        let frames = http_body_util::BodyStream::new(body);
        Box::pin(stream::unfold(
            (frames, Some(conn)),
            move |(mut frames, mut conn_slot)| {
                let pool = pool.clone();
                async move {
                    loop {
                        match frames.next().await {
                            Some(Ok(frame)) => match frame.into_data() {
                                Ok(bytes) => return Some((Ok(bytes), (frames, conn_slot))),
                                Err(_) => continue,
                            },
                            Some(Err(e)) => {
                                return Some((
                                    Err(FetchError::ProtocolError(e.to_string())),
                                    (frames, conn_slot.take()),
                                ));
                            }
                            None => {
                                if let Some(conn) = conn_slot.take() {
                                    pool.return_connection(conn).await;
                                }
                                return None;
                            }
                        }
                    }
                }
            },
        ))
    }
}

#[async_trait]
impl HttpEngine for Http1Client {
    async fn send(&self, request: EngineRequest) -> Result<EngineResponse, FetchError> {
        let host = request
            .url
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl("Missing host in URL".to_string()))?
            .to_string();

        let port = request
            .url
            .port_or_known_default()
            .ok_or_else(|| FetchError::InvalidUrl("Cannot determine port".to_string()))?;

        let mut conn = self.pool.get_connection(&host, port).await?;

        let http_request = self.build_hyper_request(request)?;

        let response = conn
            .sender
            .send_request(http_request)
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        let body = Self::response_body_stream(self.pool.clone(), conn, response.into_body());

        Ok(EngineResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

/// Send a request and collect its full response body into memory.
///
/// Convenient for tests and for small well-known payloads; production
/// callers should prefer [`HttpEngine::send`] and consume the streamed body
/// lazily.
pub async fn fetch_collected(
    engine: &dyn HttpEngine,
    request: EngineRequest,
) -> Result<(u16, Vec<fetch_types::HeaderPair>, Vec<u8>), FetchError> {
    let response = engine.send(request).await?;
    let mut body = Vec::new();
    let mut stream = response.body;
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok((response.status, response.headers, body))
}
