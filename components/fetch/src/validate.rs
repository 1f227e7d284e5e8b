//! URL/Method Validator (C5).
//!
//! Enforces the request-construction checks that must pass before a
//! [`fetch_types::RequestPlan`] is allowed to reach SEND: scheme, forbidden
//! methods, and redirect mode.

use fetch_errors::FetchError;
use fetch_types::{Method, RedirectMode};
use url::Url;

const FORBIDDEN_METHODS: [&str; 3] = ["CONNECT", "TRACE", "TRACK"];

/// Validate the initial request URL's scheme. Only `http`/`https` are
/// supported; anything else (including otherwise well-formed schemes like
/// `ftp` or `data`) is rejected.
pub fn validate_scheme(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Validate a redirect target's scheme. Distinct error from
/// [`validate_scheme`]: a redirect landing on a non-HTTP(S) scheme is a
/// protocol violation, not an unsupported-from-the-start request.
pub fn validate_redirect_scheme(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(FetchError::NonHttpScheme),
    }
}

/// Normalize and validate the request method. Absent defaults to `GET`;
/// `CONNECT`/`TRACE`/`TRACK` are rejected regardless of case.
pub fn validate_method(method: Option<&str>) -> Result<Method, FetchError> {
    let raw = method.unwrap_or("GET");
    let upper = raw.to_ascii_uppercase();
    if FORBIDDEN_METHODS.contains(&upper.as_str()) {
        return Err(FetchError::UnsupportedMethod(upper));
    }
    Method::from_bytes(upper.as_bytes()).map_err(|_| FetchError::UnsupportedMethod(upper))
}

/// Parse a `redirect` option string. Absent defaults to `follow`.
pub fn parse_redirect_mode(value: Option<&str>) -> Result<RedirectMode, FetchError> {
    match value {
        None => Ok(RedirectMode::Follow),
        Some(v) => v.parse(),
    }
}
