//! Adapts the engine's fallible response stream onto the content decoder's
//! infallible input.
//!
//! [`content_encoding::ContentEncoder::decode_stream`] takes a plain
//! `Stream<Item = Bytes>`, with no per-chunk error channel of its own. This
//! crate's engine streams lazily, so a connection can drop mid-body; that
//! error has to survive the trip through the decoder rather than being
//! silently swallowed as "stream ended".
//!
//! The fix: unwrap `Ok` chunks into the decoder's plain-`Bytes` stream,
//! stash the first `Err` in a shared slot instead of forwarding it, and
//! append it after the decoded stream ends — so a truncated body still
//! surfaces its real cause instead of the decoder's own "unexpected EOF".

use bytes::Bytes;
use content_encoding::{ContentEncoder, Encoding};
use fetch_errors::FetchError;
use fetch_types::BodyStream;
use futures::stream::{self, Stream, StreamExt};
use std::sync::{Arc, Mutex};

fn unwrap_or_capture(
    input: BodyStream,
    error_slot: Arc<Mutex<Option<FetchError>>>,
) -> impl Stream<Item = Bytes> + Send + Sync + Unpin + 'static {
    Box::pin(stream::unfold(Some(input), move |state| {
        let error_slot = error_slot.clone();
        async move {
            let mut input = state?;
            match input.next().await {
                Some(Ok(bytes)) => Some((bytes, Some(input))),
                Some(Err(e)) => {
                    *error_slot.lock().expect("error slot mutex poisoned") = Some(e);
                    None
                }
                None => None,
            }
        }
    }))
}

/// Decode a response body stream, propagating a mid-stream read failure
/// after whatever the decoder managed to produce from the bytes it saw.
pub fn decode_response_body(input: BodyStream, encoding: Encoding) -> BodyStream {
    let error_slot: Arc<Mutex<Option<FetchError>>> = Arc::new(Mutex::new(None));
    let bytes_only = unwrap_or_capture(input, error_slot.clone());
    let decoded = ContentEncoder::new().decode_stream(bytes_only, encoding);
    let trailer = stream::once(async move { error_slot.lock().expect("error slot mutex poisoned").take() })
        .filter_map(|maybe_err| async move { maybe_err.map(Err) });
    Box::pin(decoded.chain(trailer))
}
