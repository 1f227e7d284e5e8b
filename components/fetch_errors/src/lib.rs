//! fetch_errors component
//!
//! Error handling: `FetchError` enum, `FetchResult` type, error conversion traits.
//!
//! This component provides the error taxonomy for the fetch executor, covering
//! connection failures, protocol violations, timeouts, cancellation, and the
//! request-construction/redirect-policy errors raised by the orchestrator before
//! any bytes reach the wire.
//!
//! # Examples
//!
//! ```
//! use fetch_errors::{FetchError, FetchResult};
//! use std::time::Duration;
//!
//! fn perform_request() -> FetchResult<String> {
//!     Err(FetchError::Timeout(Duration::from_secs(30)))
//! }
//!
//! match perform_request() {
//!     Ok(data) => println!("Success: {}", data),
//!     Err(FetchError::Timeout(d)) => println!("Request timed out after {:?}", d),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use std::time::Duration;
use thiserror::Error;

/// Fetch error types
///
/// Represents every failure mode the fetch executor can surface: transport
/// failures from the HTTP engine, and request-construction/redirect-policy
/// errors raised by the orchestrator itself. Several variants carry the exact
/// wording tests assert against; do not reword their `#[error(...)]` strings.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection to the remote host failed.
    ///
    /// Surfaced as-is from the HTTP engine (refused, reset, unreachable).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The HTTP engine reported a protocol-level violation.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// The request did not complete within the configured deadline.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The request was aborted via its `AbortSignal` before completion.
    #[error("Request aborted")]
    Aborted,

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL's scheme is not `http`/`https`.
    #[error("URL scheme must be a HTTP(S) scheme")]
    NonHttpScheme,

    /// The URL's scheme is syntactically valid but not one this executor handles.
    #[error("URL scheme \"{0}\" is not supported.")]
    UnsupportedScheme(String),

    /// The requested HTTP method is forbidden (`CONNECT`, `TRACE`, `TRACK`).
    #[error("Failed to construct 'Request': '{0}' HTTP method is unsupported.")]
    UnsupportedMethod(String),

    /// `init.redirect` was set to something other than `follow`/`manual`/`error`.
    #[error("Request constructor: {0} is not an accepted type. Expected one of follow, manual, error.")]
    InvalidRedirectMode(String),

    /// A redirect was received while `redirect: "error"` was in effect.
    #[error("URI requested responds with a redirect, redirect mode is set to error")]
    RedirectPolicy,

    /// The redirect chain exceeded the configured maximum.
    #[error("maximum redirect reached at: {0}")]
    MaxRedirectsExceeded(String),

    /// A redirect was received but the request body is a non-replayable stream.
    #[error("Cannot follow redirect with a streamed body")]
    StreamedBodyRedirect,

    /// Low-level I/O error, converted via `From`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for errors that don't fit another category.
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for fetch operations.
///
/// # Examples
///
/// ```
/// use fetch_errors::{FetchError, FetchResult};
///
/// fn fetch_data(url: &str) -> FetchResult<Vec<u8>> {
///     if url.is_empty() {
///         return Err(FetchError::InvalidUrl("URL cannot be empty".to_string()));
///     }
///     Ok(vec![1, 2, 3])
/// }
/// ```
pub type FetchResult<T> = Result<T, FetchError>;
