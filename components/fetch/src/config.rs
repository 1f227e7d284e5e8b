//! Ambient configuration: the one place policy (redirect budget, default
//! headers) is separated from transport (the injected engine).

use http_engine::{Http1Client, Http1Config, HttpEngine};
use std::sync::Arc;

/// Configuration for a `fetch` call: the redirect budget, an optional
/// `User-Agent` to attach to every outgoing request, and the engine to send
/// through.
pub struct FetchConfig {
    /// The HTTP engine requests are sent through. Defaults to a pooled
    /// HTTP/1.1 client; tests substitute a mock implementation here.
    pub engine: Arc<dyn HttpEngine>,
    /// Maximum redirects to follow before failing with
    /// [`fetch_errors::FetchError::MaxRedirectsExceeded`].
    pub max_redirects: u8,
    /// `User-Agent` to set on every request that doesn't already have one.
    pub user_agent: Option<String>,
}

impl FetchConfig {
    /// Build a config around a specific engine, with the default redirect
    /// budget and no `User-Agent` override.
    pub fn new(engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            engine,
            max_redirects: 20,
            user_agent: None,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(Arc::new(Http1Client::new(Http1Config::default())))
    }
}
