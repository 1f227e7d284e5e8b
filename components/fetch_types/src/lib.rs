//! fetch_types component
//!
//! Core data model for the fetch executor: the `BodyInput` classification used
//! by the body extractor, the streaming `BodyState`/`ResponseBody` wire shapes,
//! the `RequestPlan` the orchestrator mutates as it walks the redirect state
//! machine, and the `AbortSignal`/`AbortController` pair used for cancellation.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use bytes::Bytes;
use fetch_errors::FetchError;
use futures::stream::Stream;
use http::HeaderMap;
use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use url::Url;

/// The HTTP method type used throughout the crate.
///
/// `fetch` accepts arbitrary/extension methods the way the Fetch standard
/// does, so this is `http::Method` rather than a closed enum; only
/// `CONNECT`/`TRACE`/`TRACK` are rejected, and that check lives with the
/// URL/method validator, not the type itself.
pub use http::Method;

/// A single raw header as sent/received over the wire.
///
/// This is the engine's flat wire format: case is preserved, duplicates are
/// allowed, and no folding/merging has happened yet. The header adapter is
/// responsible for turning a `HeaderMap` into a `Vec<HeaderPair>` and back.
pub type HeaderPair = (String, String);

/// A boxed, pinned byte stream — the lazy body representation used
/// end-to-end: request bodies that came in as streams, and every response
/// body regardless of how it started out.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send + Sync>>;

/// Capability trait for `Blob`-like request bodies.
///
/// The body extractor never checks a concrete type for "is this a Blob" —
/// it asks whether the value implements this trait, mirroring the "ask the
/// object, don't ask its constructor" duck-typing the web platform does for
/// `Blob`/`File`.
pub trait BlobLike: Send + Sync {
    /// Total size in bytes, if known ahead of time.
    fn size(&self) -> u64;
    /// The blob's MIME type, if any (used to set `Content-Type` when the
    /// caller hasn't set one explicitly).
    fn content_type(&self) -> Option<String>;
    /// Open a fresh byte stream over the blob's contents.
    fn stream(&self) -> BodyStream;
}

/// Capability trait for a body that already knows how to render itself as a
/// `multipart/form-data` byte stream (e.g. a `FormData` that was pre-encoded
/// upstream, or a caller-supplied multipart producer).
pub trait MultipartStreamLike: Send + Sync {
    /// The `boundary` parameter the stream was framed with.
    fn boundary(&self) -> &str;
    /// Total encoded length, if the stream can report it up front.
    fn known_length(&self) -> Option<u64>;
    /// Consume `self` and produce the encoded byte stream.
    fn into_stream(self: Arc<Self>) -> BodyStream;
}

/// A single file attached to a [`FormDataBody`] field.
#[derive(Debug, Clone)]
pub struct FormDataFile {
    /// The form field name the file was attached under.
    pub field_name: String,
    /// The file's name, as reported in its `Content-Disposition`.
    pub filename: String,
    /// The file's MIME type.
    pub content_type: String,
    /// The file's bytes.
    pub data: Vec<u8>,
}

/// An in-memory `multipart/form-data` payload: text fields plus file
/// attachments, not yet encoded to wire bytes.
///
/// Encoding (boundary generation, part framing) is the multipart encoder's
/// job, not this type's — this is purely the data the caller assembled.
#[derive(Debug, Clone, Default)]
pub struct FormDataBody {
    /// Text fields, in insertion order.
    pub fields: Vec<(String, String)>,
    /// File attachments, in insertion order relative to `fields`' tail.
    pub files: Vec<FormDataFile>,
}

impl FormDataBody {
    /// Construct an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn append_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Append a file attachment.
    pub fn append_file(
        &mut self,
        field_name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) {
        self.files.push(FormDataFile {
            field_name: field_name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        });
    }

    /// `true` if the form has neither fields nor files.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }
}

/// The classification the body extractor assigns to whatever value a caller
/// passed as a request body.
///
/// Order matters where classification is ambiguous: the extractor checks
/// variants top-to-bottom, so a value satisfying both `Blob` and a generic
/// byte-iterable capability is classified as `Blob`.
pub enum BodyInput {
    /// A plain string body. Gets `text/plain;charset=UTF-8` unless the
    /// caller already set `Content-Type`.
    Text(String),
    /// A `URLSearchParams`-style key/value body, serialized as
    /// `application/x-www-form-urlencoded`.
    UrlSearchParams(Vec<(String, String)>),
    /// Raw bytes with a known, fixed length.
    Bytes(Bytes),
    /// A `Blob`-capable value: known size, optional content type, re-openable
    /// stream (so it survives a redirect replay).
    Blob(Arc<dyn BlobLike>),
    /// Structured form data to be multipart-encoded by the multipart encoder.
    FormData(FormDataBody),
    /// A body that already knows how to stream itself as framed
    /// `multipart/form-data` (boundary fixed, not replayable).
    MultipartStream(Arc<dyn MultipartStreamLike>),
    /// A web-platform `ReadableStream`-shaped body: push-based, not
    /// replayable, length unknown unless the caller states one.
    ReadableStream(BodyStream),
    /// A Node-style native `Readable` body. Distinguished from
    /// `ReadableStream` only by provenance; both end up as the same
    /// `BodyStream` shape once adapted.
    NativeStream(BodyStream),
    /// A synchronous/async iterable of chunks that hasn't been read yet.
    Iterable(BodyStream),
    /// Nothing recognized — the extractor could not classify the value.
    Unknown,
}

impl fmt::Debug for BodyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyInput::Text(s) => f.debug_tuple("Text").field(s).finish(),
            BodyInput::UrlSearchParams(pairs) => {
                f.debug_tuple("UrlSearchParams").field(pairs).finish()
            }
            BodyInput::Bytes(b) => f
                .debug_tuple("Bytes")
                .field(&format!("{} bytes", b.len()))
                .finish(),
            BodyInput::Blob(_) => f.debug_tuple("Blob").field(&"<blob>").finish(),
            BodyInput::FormData(form) => f.debug_tuple("FormData").field(form).finish(),
            BodyInput::MultipartStream(_) => f
                .debug_tuple("MultipartStream")
                .field(&"<stream>")
                .finish(),
            BodyInput::ReadableStream(_) => {
                f.debug_tuple("ReadableStream").field(&"<stream>").finish()
            }
            BodyInput::NativeStream(_) => {
                f.debug_tuple("NativeStream").field(&"<stream>").finish()
            }
            BodyInput::Iterable(_) => f.debug_tuple("Iterable").field(&"<stream>").finish(),
            BodyInput::Unknown => f.debug_tuple("Unknown").finish(),
        }
    }
}

/// The extracted, ready-to-send-or-buffer form of a request body.
///
/// This is what [`BodyInput`] classification is extracted *into*: a lazy
/// byte stream plus whatever metadata is known without consuming it.
pub struct BodyState {
    /// The body's bytes, as a lazy stream. Empty bodies still get a stream
    /// that immediately ends — there is no separate "no body" variant here;
    /// `RequestPlan::body` is `None` for that case instead.
    pub stream: BodyStream,
    /// `Content-Length`, if known before the stream is drained (text, bytes,
    /// url-encoded form, blob, and length-declaring multipart streams all
    /// know this; arbitrary `ReadableStream`/iterable bodies usually don't).
    pub content_length: Option<u64>,
    /// The `Content-Type` the extractor derived, if the caller didn't
    /// already set one explicitly.
    pub content_type: Option<String>,
    /// `true` if this stream cannot be safely re-read (push-based sources:
    /// `ReadableStream`, native streams, multipart streams, iterables).
    /// A redirect that needs to resend the body with such a stream attached
    /// must fail rather than silently drop or replay it.
    pub replayable: bool,
}

impl fmt::Debug for BodyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyState")
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .field("replayable", &self.replayable)
            .finish()
    }
}

/// Redirect handling mode, as passed in `RequestInit::redirect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectMode {
    /// Follow redirects automatically, up to the configured maximum.
    Follow,
    /// Treat any redirect response as an error.
    Error,
    /// Don't follow redirects; return the redirect response itself.
    Manual,
}

impl std::str::FromStr for RedirectMode {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow" => Ok(RedirectMode::Follow),
            "error" => Ok(RedirectMode::Error),
            "manual" => Ok(RedirectMode::Manual),
            other => Err(FetchError::InvalidRedirectMode(other.to_string())),
        }
    }
}

/// Response type classification forced onto the assembled [`FetchResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Ordinary, non-redirected response.
    Basic,
    /// A redirect response returned as-is because `redirect: "manual"` was set.
    OpaqueRedirect,
    /// Network-level error; no response was actually received.
    Error,
}

/// The abstract HTTP engine's request shape.
///
/// Deliberately narrow: method, URL, raw header pairs, and an optional body
/// stream with a declared length. Everything about redirects, cookies, or
/// caching is the orchestrator's problem, not the engine's.
pub struct EngineRequest {
    /// Request method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// Raw outgoing headers, already finalized by the header adapter.
    pub headers: Vec<HeaderPair>,
    /// The request body, if any.
    pub body: Option<BodyStream>,
    /// Declared `Content-Length`, if known.
    pub content_length: Option<u64>,
}

impl fmt::Debug for EngineRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// The abstract HTTP engine's response shape: status, raw header pairs, and
/// a lazy body stream the caller (the orchestrator) decides how to consume.
pub struct EngineResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw incoming headers, in wire order.
    pub headers: Vec<HeaderPair>,
    /// The response body as a lazy byte stream.
    pub body: BodyStream,
}

impl fmt::Debug for EngineResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish()
    }
}

/// The assembled response the public `fetch()` API returns.
pub struct FetchResponse {
    /// The final URL, after any redirects were followed.
    pub url: Url,
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text (reason phrase).
    pub status_text: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// The response body, as a lazy stream.
    pub body: BodyStream,
    /// `true` if one or more redirects were followed to reach this response.
    pub redirected: bool,
    /// The forced response type.
    pub type_: ResponseType,
}

impl fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResponse")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .field("redirected", &self.redirected)
            .field("type_", &self.type_)
            .finish()
    }
}

/// The orchestrator's working state for a single `fetch()` call: everything
/// that changes as it walks the redirect state machine (INIT -> SEND ->
/// RECEIVING_HEADERS -> DECIDE -> (REDIRECT -> SEND)* -> DELIVER -> DONE).
pub struct RequestPlan {
    /// Current method. Rewritten to `GET` on a 301/302/303 redirect.
    pub method: Method,
    /// Current target URL. Replaced with the redirect's `Location` on each hop.
    pub url: Url,
    /// Current outgoing headers.
    pub headers: Vec<HeaderPair>,
    /// Current body. Cleared (with the method) on a 301/302/303 redirect;
    /// preserved on 307/308. `None` once cleared or if there was never one.
    pub body: Option<BodyState>,
    /// The configured redirect mode.
    pub redirect_mode: RedirectMode,
    /// Maximum redirects to follow before failing (default 20).
    pub max_redirects: u8,
    /// Redirects followed so far on this request.
    pub redirects_followed: u8,
    /// Cancellation signal, if the caller supplied one.
    pub signal: Option<AbortSignal>,
}

impl RequestPlan {
    /// `true` if the chain has already followed the maximum number of
    /// redirects and one more would exceed it.
    pub fn redirect_budget_exhausted(&self) -> bool {
        self.redirects_followed >= self.max_redirects
    }
}

/// The reason a request was aborted, carried from [`AbortController::abort`]
/// through to the [`FetchError::Aborted`](fetch_errors::FetchError::Aborted)
/// the in-flight operation observes.
#[derive(Debug, Clone)]
pub struct AbortReason(pub String);

impl Default for AbortReason {
    fn default() -> Self {
        AbortReason("AbortError".to_string())
    }
}

/// A cooperative, level-triggered cancellation signal.
///
/// Cloneable and wakeable: every clone observes the same underlying state,
/// and in-flight awaits can subscribe to be woken the instant `abort()` is
/// called rather than having to poll `is_aborted()`.
#[derive(Clone)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
    reason: Arc<Mutex<Option<AbortReason>>>,
    notify: Arc<Notify>,
}

impl AbortSignal {
    /// `true` if `abort()` has already been called.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    /// The abort reason, if the signal has fired.
    pub fn reason(&self) -> Option<AbortReason> {
        self.reason.lock().expect("abort reason mutex poisoned").clone()
    }

    /// Resolves once `abort()` has been called. Resolves immediately if it
    /// already has been. Intended to be raced against I/O futures with
    /// `tokio::select!` at each await point of the orchestrator.
    pub async fn aborted(&self) {
        if self.is_aborted() {
            return;
        }
        loop {
            let notified = self.notify.notified();
            if self.is_aborted() {
                return;
            }
            notified.await;
            if self.is_aborted() {
                return;
            }
        }
    }
}

impl fmt::Debug for AbortSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortSignal")
            .field("aborted", &self.is_aborted())
            .finish()
    }
}

/// The owning half of an [`AbortSignal`]: callers hold this and call
/// `abort()`; the fetch call is given a clone of `signal()`.
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    /// Create a fresh, not-yet-aborted controller.
    pub fn new() -> Self {
        Self {
            signal: AbortSignal {
                aborted: Arc::new(AtomicBool::new(false)),
                reason: Arc::new(Mutex::new(None)),
                notify: Arc::new(Notify::new()),
            },
        }
    }

    /// Obtain a signal handle to hand to `fetch()`.
    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    /// Abort, waking anything awaiting `AbortSignal::aborted()`.
    ///
    /// A second call after the first is a no-op: the reason from the first
    /// call wins.
    pub fn abort(&self, reason: impl Into<String>) {
        let mut guard = self
            .signal
            .reason
            .lock()
            .expect("abort reason mutex poisoned");
        if guard.is_some() {
            return;
        }
        *guard = Some(AbortReason(reason.into()));
        drop(guard);
        self.signal.aborted.store(true, Ordering::SeqCst);
        self.signal.notify.notify_waiters();
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}
