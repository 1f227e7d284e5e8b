//! fetch component
//!
//! The public entry point: a client-side HTTP/1.1 `fetch()` executor built
//! from the body extractor/multipart encoder ([`fetch_body`]), the content
//! decoder ([`content_encoding`]), the header adapter and URL/method
//! validator (this crate's [`headers`]/[`validate`] modules), and the
//! redirect-following orchestrator ([`orchestrator`]) that ties them
//! together around an injectable [`http_engine::HttpEngine`].

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod cancel;
mod config;
mod decode;
mod headers;
mod orchestrator;
mod request;
mod validate;

pub use config::FetchConfig;
pub use fetch_errors::{FetchError, FetchResult};
pub use fetch_types::{
    AbortController, AbortReason, AbortSignal, BlobLike, FetchResponse, FormDataBody,
    FormDataFile, MultipartStreamLike, ResponseType,
};
pub use http_engine::HttpEngine;
pub use request::{FetchInput, Request, RequestInit};

use request::ReplaySource;
use std::sync::Arc;

/// Perform a fetch using the default engine (a pooled HTTP/1.1 client) and
/// default configuration (20-redirect budget, no forced `User-Agent`).
pub async fn fetch(
    input: impl Into<FetchInput>,
    init: Option<RequestInit>,
) -> FetchResult<FetchResponse> {
    fetch_with_config(FetchConfig::default(), input, init).await
}

/// Perform a fetch through a caller-supplied engine, using default
/// configuration otherwise. The ambient testability hook: production code
/// never needs this, tests substitute a mock [`HttpEngine`] here.
pub async fn fetch_with(
    engine: Arc<dyn HttpEngine>,
    input: impl Into<FetchInput>,
    init: Option<RequestInit>,
) -> FetchResult<FetchResponse> {
    fetch_with_config(
        FetchConfig {
            engine,
            ..FetchConfig::default()
        },
        input,
        init,
    )
    .await
}

/// Perform a fetch with full control over the engine and policy
/// (redirect budget, default `User-Agent`).
pub async fn fetch_with_config(
    config: FetchConfig,
    input: impl Into<FetchInput>,
    init: Option<RequestInit>,
) -> FetchResult<FetchResponse> {
    let resolved = request::resolve(input.into(), init)?;

    validate::validate_scheme(&resolved.url)?;
    let method = validate::validate_method(resolved.method.as_deref())?;
    let redirect_mode = validate::parse_redirect_mode(resolved.redirect.as_deref())?;

    let replay_source = resolved.body.as_ref().and_then(ReplaySource::from_body_input);
    let body = fetch_body::extract(resolved.body)?;

    let plan = fetch_types::RequestPlan {
        method,
        url: resolved.url,
        headers: resolved.headers,
        body,
        redirect_mode,
        max_redirects: config.max_redirects,
        redirects_followed: 0,
        signal: resolved.signal,
    };

    orchestrator::execute(config.engine.as_ref(), plan, replay_source, &config).await
}
