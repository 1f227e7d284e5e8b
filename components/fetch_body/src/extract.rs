//! The Body Extractor (C1): turns a classified [`BodyInput`] into a
//! ready-to-send [`BodyState`]. Pure — no I/O beyond opening the lazy streams
//! the caller already handed in.

use crate::multipart;
use bytes::Bytes;
use fetch_errors::FetchError;
use fetch_types::{BodyInput, BodyState};
use futures::stream;
use url::form_urlencoded;

/// Extract a [`BodyState`] from a classified body, or `None` if there was no
/// body at all (`RequestPlan::body` stays `None` in that case, matching the
/// web platform's "null body" rather than modeling it as its own variant).
///
/// Classification has already happened at the `BodyInput` construction site
/// (by enum variant, not by a runtime capability probe — see DESIGN.md); this
/// function's job is purely to turn each variant into bytes-on-the-wire plus
/// metadata.
pub fn extract(input: Option<BodyInput>) -> Result<Option<BodyState>, FetchError> {
    let Some(input) = input else {
        return Ok(None);
    };

    let state = match input {
        BodyInput::Text(text) => {
            let bytes = Bytes::from(text.into_bytes());
            single_chunk(bytes, Some("text/plain;charset=UTF-8".to_string()))
        }
        BodyInput::UrlSearchParams(pairs) => {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter())
                .finish();
            single_chunk(
                Bytes::from(encoded.into_bytes()),
                Some("application/x-www-form-urlencoded;charset=UTF-8".to_string()),
            )
        }
        BodyInput::Bytes(bytes) => single_chunk(bytes, None),
        BodyInput::Blob(blob) => BodyState {
            content_length: Some(blob.size()),
            content_type: blob.content_type(),
            replayable: true,
            stream: blob.stream(),
        },
        BodyInput::FormData(form) => {
            let boundary = multipart::generate_boundary();
            let content_type = format!("multipart/form-data; boundary={}", boundary);
            let length = multipart::precompute_length(&form, &boundary);
            let encoded = multipart::encode(&form, &boundary);
            BodyState {
                stream: Box::pin(stream::once(async move { Ok(encoded) })),
                content_length: Some(length),
                content_type: Some(content_type),
                replayable: true,
            }
        }
        BodyInput::MultipartStream(multipart) => {
            let content_type = format!("multipart/form-data; boundary={}", multipart.boundary());
            let length = multipart.known_length();
            BodyState {
                stream: multipart.into_stream(),
                content_length: length,
                content_type: Some(content_type),
                replayable: false,
            }
        }
        BodyInput::ReadableStream(body_stream) => BodyState {
            stream: body_stream,
            content_length: None,
            content_type: None,
            replayable: false,
        },
        BodyInput::NativeStream(body_stream) => BodyState {
            stream: body_stream,
            content_length: None,
            content_type: None,
            replayable: false,
        },
        BodyInput::Iterable(body_stream) => BodyState {
            stream: body_stream,
            content_length: None,
            content_type: None,
            replayable: false,
        },
        BodyInput::Unknown => single_chunk(Bytes::new(), Some("text/plain;charset=UTF-8".to_string())),
    };

    Ok(Some(state))
}

fn single_chunk(bytes: Bytes, content_type: Option<String>) -> BodyState {
    let len = bytes.len() as u64;
    BodyState {
        stream: Box::pin(stream::once(async move { Ok(bytes) })),
        content_length: Some(len),
        content_type,
        replayable: true,
    }
}
