//! Cancellation: racing a [`BodyStream`] against an [`AbortSignal`].
//!
//! Applied to both directions — the outgoing request body and the incoming
//! response body — since an abort can land while either is in flight.
//! [`AbortSignal::aborted`] is built exactly for this: raced with
//! `tokio::select!` at each await point.

use fetch_errors::FetchError;
use fetch_types::{AbortSignal, BodyStream};
use futures::stream::{self, StreamExt};

/// Wrap `stream` so that once `signal` fires, the next poll yields
/// `Err(FetchError::Aborted)` and the stream ends — the consumer sees
/// exactly one abort error, not a surprise repeat on every subsequent poll.
pub fn with_cancellation(stream: BodyStream, signal: Option<AbortSignal>) -> BodyStream {
    let Some(signal) = signal else {
        return stream;
    };

    Box::pin(stream::unfold(
        (stream, signal, false),
        |(mut inner, signal, already_aborted)| async move {
            if already_aborted {
                return None;
            }
            tokio::select! {
                biased;
                _ = signal.aborted() => Some((Err(FetchError::Aborted), (inner, signal, true))),
                chunk = inner.next() => chunk.map(|c| (c, (inner, signal, false))),
            }
        },
    ))
}
