//! `Request`/`RequestInit` merging, ahead of C5 validation.
//!
//! `fetch`'s first argument and its `init` overrides are merged field by
//! field before validation ever runs, mirroring the `input` ∪ `init`
//! resolution the standard describes in §6.

use fetch_types::{AbortSignal, BodyInput, FormDataBody, HeaderPair, Method, RedirectMode};
use std::sync::Arc;
use url::Url;

/// Everything `fetch`'s first argument can be.
pub enum FetchInput {
    /// An already-parsed URL.
    Url(Url),
    /// A URL string, parsed during resolution.
    Str(String),
    /// A pre-built request whose fields serve as defaults for `init`.
    Request(Box<Request>),
}

impl From<Url> for FetchInput {
    fn from(url: Url) -> Self {
        FetchInput::Url(url)
    }
}

impl From<&str> for FetchInput {
    fn from(s: &str) -> Self {
        FetchInput::Str(s.to_string())
    }
}

impl From<String> for FetchInput {
    fn from(s: String) -> Self {
        FetchInput::Str(s)
    }
}

impl From<Request> for FetchInput {
    fn from(r: Request) -> Self {
        FetchInput::Request(Box::new(r))
    }
}

/// A pre-built request, as `fetch`'s first argument or produced by a prior
/// call. Fields here are defaults; a same-named `RequestInit` field
/// overrides them.
pub struct Request {
    /// Target URL.
    pub url: Url,
    /// Request method.
    pub method: Method,
    /// Request headers.
    pub headers: Vec<HeaderPair>,
    /// Request body, not yet extracted.
    pub body: Option<BodyInput>,
    /// Cancellation signal.
    pub signal: Option<AbortSignal>,
    /// Redirect handling mode.
    pub redirect: RedirectMode,
}

impl Request {
    /// Construct a `GET` request with no body, `follow` redirects, and no
    /// signal — the same defaults `fetch(url)` alone would use.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: Method::GET,
            headers: Vec::new(),
            body: None,
            signal: None,
            redirect: RedirectMode::Follow,
        }
    }
}

/// Per-call overrides layered onto a [`FetchInput`]. Each field left `None`
/// leaves the corresponding `FetchInput` field untouched; `Some` replaces it
/// entirely (no merging within a field, e.g. headers are replaced wholesale,
/// not unioned).
#[derive(Default)]
pub struct RequestInit {
    /// Overrides the method, case-insensitively.
    pub method: Option<String>,
    /// Overrides the full header list.
    pub headers: Option<Vec<HeaderPair>>,
    /// Overrides the body.
    pub body: Option<BodyInput>,
    /// Overrides the cancellation signal.
    pub signal: Option<AbortSignal>,
    /// Overrides the redirect mode (`"follow"`/`"manual"`/`"error"`).
    pub redirect: Option<String>,
}

/// The result of merging a [`FetchInput`] with an optional [`RequestInit`]:
/// still-unvalidated raw fields, ready for C5.
pub struct Resolved {
    /// Target URL.
    pub url: Url,
    /// Raw method string, if any was given; `None` means "default to GET".
    pub method: Option<String>,
    /// Merged header list.
    pub headers: Vec<HeaderPair>,
    /// Merged body, not yet extracted.
    pub body: Option<BodyInput>,
    /// Merged cancellation signal.
    pub signal: Option<AbortSignal>,
    /// Raw redirect mode string, if any was given.
    pub redirect: Option<String>,
}

/// Merge a [`FetchInput`] and optional [`RequestInit`] into [`Resolved`].
pub fn resolve(
    input: FetchInput,
    init: Option<RequestInit>,
) -> Result<Resolved, fetch_errors::FetchError> {
    let mut resolved = match input {
        FetchInput::Url(url) => Resolved {
            url,
            method: None,
            headers: Vec::new(),
            body: None,
            signal: None,
            redirect: None,
        },
        FetchInput::Str(s) => {
            let url = Url::parse(&s).map_err(|e| fetch_errors::FetchError::InvalidUrl(e.to_string()))?;
            Resolved {
                url,
                method: None,
                headers: Vec::new(),
                body: None,
                signal: None,
                redirect: None,
            }
        }
        FetchInput::Request(r) => Resolved {
            url: r.url,
            method: Some(r.method.as_str().to_string()),
            headers: r.headers,
            body: r.body,
            signal: r.signal,
            redirect: Some(redirect_mode_to_str(r.redirect).to_string()),
        },
    };

    if let Some(init) = init {
        if let Some(method) = init.method {
            resolved.method = Some(method);
        }
        if let Some(headers) = init.headers {
            resolved.headers = headers;
        }
        if init.body.is_some() {
            resolved.body = init.body;
        }
        if init.signal.is_some() {
            resolved.signal = init.signal;
        }
        if let Some(redirect) = init.redirect {
            resolved.redirect = Some(redirect);
        }
    }

    Ok(resolved)
}

fn redirect_mode_to_str(mode: RedirectMode) -> &'static str {
    match mode {
        RedirectMode::Follow => "follow",
        RedirectMode::Error => "error",
        RedirectMode::Manual => "manual",
    }
}

/// The subset of [`BodyInput`] the orchestrator can regenerate a fresh
/// stream from after a redirect consumed the first one.
///
/// `ReadableStream`/`NativeStream`/`Iterable`/`MultipartStream` bodies are
/// push-based and carry no reusable source, so [`from_body_input`] returns
/// `None` for them; a redirect that needs to resend such a body must fail
/// with `StreamedBodyRedirect` instead.
pub enum ReplaySource {
    /// A plain string body.
    Text(String),
    /// A `URLSearchParams`-style body.
    UrlSearchParams(Vec<(String, String)>),
    /// Raw bytes.
    Bytes(bytes::Bytes),
    /// A re-openable blob.
    Blob(Arc<dyn fetch_types::BlobLike>),
    /// Structured form data, re-encoded from scratch on replay.
    FormData(FormDataBody),
}

impl ReplaySource {
    /// Capture a replay source from a body, if the body's kind allows it.
    pub fn from_body_input(input: &BodyInput) -> Option<Self> {
        match input {
            BodyInput::Text(s) => Some(ReplaySource::Text(s.clone())),
            BodyInput::UrlSearchParams(pairs) => Some(ReplaySource::UrlSearchParams(pairs.clone())),
            BodyInput::Bytes(b) => Some(ReplaySource::Bytes(b.clone())),
            BodyInput::Blob(b) => Some(ReplaySource::Blob(b.clone())),
            BodyInput::FormData(f) => Some(ReplaySource::FormData(f.clone())),
            BodyInput::MultipartStream(_)
            | BodyInput::ReadableStream(_)
            | BodyInput::NativeStream(_)
            | BodyInput::Iterable(_)
            | BodyInput::Unknown => None,
        }
    }

    /// Re-extract a fresh [`fetch_types::BodyState`] from this source, as a
    /// redirect resend requires.
    pub fn re_extract(&self) -> Result<Option<fetch_types::BodyState>, fetch_errors::FetchError> {
        let input = match self {
            ReplaySource::Text(s) => BodyInput::Text(s.clone()),
            ReplaySource::UrlSearchParams(pairs) => BodyInput::UrlSearchParams(pairs.clone()),
            ReplaySource::Bytes(b) => BodyInput::Bytes(b.clone()),
            ReplaySource::Blob(b) => BodyInput::Blob(b.clone()),
            ReplaySource::FormData(f) => BodyInput::FormData(f.clone()),
        };
        fetch_body::extract(Some(input))
    }
}
