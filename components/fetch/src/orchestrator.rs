//! Fetch orchestrator.
//!
//! Drives a [`RequestPlan`] through the engine to completion: header
//! finalization, redirect following, cancellation, and response body
//! decoding, via a single tracing-instrumented entry point that walks the
//! INIT -> SEND -> RECEIVING_HEADERS -> DECIDE -> (REDIRECT -> SEND)* ->
//! DELIVER -> DONE state machine.

use crate::cancel::with_cancellation;
use crate::config::FetchConfig;
use crate::decode;
use crate::headers;
use crate::request::ReplaySource;
use crate::validate;
use content_encoding::Encoding;
use fetch_errors::FetchError;
use fetch_types::{EngineRequest, FetchResponse, HeaderPair, Method, RedirectMode, RequestPlan, ResponseType};
use http_engine::HttpEngine;
use tracing::debug;

const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// Drive `plan` through `engine` to a final [`FetchResponse`], following
/// redirects per `plan.redirect_mode` and honoring `plan.signal`.
pub async fn execute(
    engine: &dyn HttpEngine,
    mut plan: RequestPlan,
    mut replay_source: Option<ReplaySource>,
    config: &FetchConfig,
) -> Result<FetchResponse, FetchError> {
    loop {
        if let Some(signal) = &plan.signal {
            if signal.is_aborted() {
                debug!("fetch rejected: signal already aborted before send");
                return Err(FetchError::Aborted);
            }
        }

        finalize_request_headers(&mut plan, config);

        let body_was_present = plan.body.is_some();
        let content_length = plan.body.as_ref().and_then(|b| b.content_length);
        let outgoing_body = plan
            .body
            .take()
            .map(|state| with_cancellation(state.stream, plan.signal.clone()));

        let engine_request = EngineRequest {
            method: plan.method.clone(),
            url: plan.url.clone(),
            headers: plan.headers.clone(),
            body: outgoing_body,
            content_length,
        };

        debug!(url = %plan.url, method = %plan.method, "sending request");

        let engine_response = if let Some(signal) = plan.signal.clone() {
            tokio::select! {
                biased;
                _ = signal.aborted() => {
                    debug!("fetch rejected: signal aborted while awaiting response headers");
                    return Err(FetchError::Aborted);
                }
                result = engine.send(engine_request) => result?,
            }
        } else {
            engine.send(engine_request).await?
        };

        let status = engine_response.status;

        if REDIRECT_STATUSES.contains(&status) {
            let Some(location) = headers::get(&engine_response.headers, "location").map(str::to_string) else {
                return deliver(&plan, status, engine_response.headers, engine_response.body, ResponseType::Basic);
            };

            match plan.redirect_mode {
                RedirectMode::Error => {
                    debug!(status, "rejecting redirect: redirect mode is error");
                    return Err(FetchError::RedirectPolicy);
                }
                RedirectMode::Manual => {
                    let location_url = plan
                        .url
                        .join(&location)
                        .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
                    let mut response_headers = engine_response.headers;
                    headers::set(&mut response_headers, "location", location_url.as_str());
                    return deliver(
                        &plan,
                        status,
                        response_headers,
                        engine_response.body,
                        ResponseType::OpaqueRedirect,
                    );
                }
                RedirectMode::Follow => {
                    plan.redirects_followed += 1;
                    if plan.redirect_budget_exhausted() {
                        debug!(url = %plan.url, "rejecting: maximum redirects exceeded");
                        return Err(FetchError::MaxRedirectsExceeded(plan.url.to_string()));
                    }

                    let location_url = plan
                        .url
                        .join(&location)
                        .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
                    validate::validate_redirect_scheme(&location_url)?;

                    debug!(from = %plan.url, to = %location_url, status, "following redirect");

                    let drop_body =
                        status == 303 || ((status == 301 || status == 302) && plan.method == Method::POST);

                    if drop_body {
                        plan.method = Method::GET;
                        replay_source = None;
                        headers::remove(&mut plan.headers, "content-length");
                    } else if body_was_present {
                        match &replay_source {
                            Some(source) => plan.body = source.re_extract()?,
                            None => return Err(FetchError::StreamedBodyRedirect),
                        }
                    }

                    plan.url = location_url;
                    continue;
                }
            }
        }

        return deliver(&plan, status, engine_response.headers, engine_response.body, ResponseType::Basic);
    }
}

/// Request header finalization, just before SEND.
fn finalize_request_headers(plan: &mut RequestPlan, config: &FetchConfig) {
    if !headers::has(&plan.headers, "accept") {
        headers::set(&mut plan.headers, "Accept", "*/*");
    }

    if let Some(user_agent) = &config.user_agent {
        if !headers::has(&plan.headers, "user-agent") {
            headers::set(&mut plan.headers, "User-Agent", user_agent.clone());
        }
    }

    if let Some(body) = &plan.body {
        if let Some(content_type) = &body.content_type {
            if !headers::has(&plan.headers, "content-type") {
                headers::set(&mut plan.headers, "Content-Type", content_type.clone());
            }
        }
    }

    match (&plan.body, plan.method == Method::POST || plan.method == Method::PUT) {
        (None, true) => headers::set(&mut plan.headers, "Content-Length", "0"),
        (Some(body), _) => {
            if let Some(len) = body.content_length {
                headers::set(&mut plan.headers, "Content-Length", len.to_string());
            }
        }
        (None, false) => {}
    }
}

/// Response Assembler (C7): builds the final [`FetchResponse`], handling the
/// HEAD/204/304 null-body cases and wrapping the body through the content
/// decoder otherwise.
fn deliver(
    plan: &RequestPlan,
    status: u16,
    mut response_headers: Vec<HeaderPair>,
    body: fetch_types::BodyStream,
    response_type: ResponseType,
) -> Result<FetchResponse, FetchError> {
    let is_headless = plan.method == Method::HEAD || matches!(status, 204 | 304);

    let body = if is_headless {
        Box::pin(futures::stream::empty())
    } else {
        let body = with_cancellation(body, plan.signal.clone());
        match headers::get(&response_headers, "content-encoding").map(str::to_string) {
            Some(token) => {
                let normalized = token.to_ascii_lowercase();
                headers::set(&mut response_headers, "content-encoding", normalized.clone());
                match Encoding::from_token(&normalized) {
                    Some(encoding) => {
                        debug!(encoding = %normalized, "decoding response body");
                        decode::decode_response_body(body, encoding)
                    }
                    None => body,
                }
            }
            None => body,
        }
    };

    let status_text = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
        .to_string();

    Ok(FetchResponse {
        url: plan.url.clone(),
        status,
        status_text,
        headers: headers::pairs_to_header_map(&response_headers),
        body,
        redirected: plan.redirects_followed > 0,
        type_: response_type,
    })
}
