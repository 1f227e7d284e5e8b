use crate::Encoding;
use bytes::Bytes;
use fetch_errors::FetchError;
use flate2::write::{DeflateDecoder, GzDecoder, ZlibDecoder};
use futures::stream;
use futures::stream::{Stream, StreamExt};
use std::io::Write;

/// Decode a stream of encoded bytes
pub fn decode_stream(
    input: impl Stream<Item = Bytes> + Send + Sync + 'static + Unpin,
    encoding: Encoding,
) -> impl Stream<Item = Result<Bytes, FetchError>> {
    match encoding {
        Encoding::Gzip => Box::pin(decode_gzip_stream(input))
            as std::pin::Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send + Sync>>,
        Encoding::Deflate => Box::pin(decode_deflate_stream(input)),
        Encoding::Brotli => Box::pin(decode_brotli_stream(input)),
        Encoding::Identity => Box::pin(decode_identity_stream(input)),
    }
}

/// Decode a gzip stream.
///
/// Tolerates a stream that ends mid-footer: once at least one byte has been
/// decoded, a failure from `finish()` (missing/short CRC or length trailer)
/// is swallowed rather than surfaced, so a truncated-but-otherwise-valid
/// response still yields its full decoded content.
fn decode_gzip_stream(
    input: impl Stream<Item = Bytes> + Send + Sync + 'static + Unpin,
) -> impl Stream<Item = Result<Bytes, FetchError>> + Send + Sync {
    stream::unfold(
        (input, GzDecoder::new(Vec::new()), false),
        |(mut input, mut decoder, mut produced_any)| async move {
            loop {
                match input.next().await {
                    Some(chunk) => {
                        if let Err(e) = decoder.write_all(&chunk) {
                            return Some((
                                Err(FetchError::ProtocolError(format!(
                                    "Gzip stream decoding failed: {}",
                                    e
                                ))),
                                (input, decoder, produced_any),
                            ));
                        }

                        let decoded = decoder.get_mut().drain(..).collect::<Vec<u8>>();
                        if !decoded.is_empty() {
                            produced_any = true;
                            return Some((Ok(Bytes::from(decoded)), (input, decoder, produced_any)));
                        }
                    }
                    None => {
                        let finish_err = decoder.try_finish().err();
                        let tail = decoder.get_mut().drain(..).collect::<Vec<u8>>();
                        if !tail.is_empty() {
                            return Some((Ok(Bytes::from(tail)), (input, decoder, true)));
                        }
                        if let Some(e) = finish_err {
                            if !produced_any {
                                return Some((
                                    Err(FetchError::ProtocolError(format!(
                                        "Gzip stream finish failed: {}",
                                        e
                                    ))),
                                    (input, decoder, produced_any),
                                ));
                            }
                        }
                        return None;
                    }
                }
            }
        },
    )
}

enum DeflateState {
    Undetermined,
    Zlib(Box<ZlibDecoder<Vec<u8>>>),
    Raw(Box<DeflateDecoder<Vec<u8>>>),
}

impl DeflateState {
    fn write_all(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        match self {
            DeflateState::Undetermined => Ok(()),
            DeflateState::Zlib(d) => d.write_all(chunk),
            DeflateState::Raw(d) => d.write_all(chunk),
        }
    }

    fn drain(&mut self) -> Vec<u8> {
        match self {
            DeflateState::Undetermined => Vec::new(),
            DeflateState::Zlib(d) => d.get_mut().drain(..).collect(),
            DeflateState::Raw(d) => d.get_mut().drain(..).collect(),
        }
    }

    fn try_finish_and_drain(&mut self) -> (Vec<u8>, Option<std::io::Error>) {
        match self {
            DeflateState::Undetermined => (Vec::new(), None),
            DeflateState::Zlib(d) => {
                let err = d.try_finish().err();
                (d.get_mut().drain(..).collect(), err)
            }
            DeflateState::Raw(d) => {
                let err = d.try_finish().err();
                (d.get_mut().drain(..).collect(), err)
            }
        }
    }
}

/// Decode a deflate stream, auto-detecting zlib vs. raw framing from the
/// first non-empty chunk's leading byte, and tolerating a truncated footer
/// the same way the gzip path does.
fn decode_deflate_stream(
    input: impl Stream<Item = Bytes> + Send + Sync + 'static + Unpin,
) -> impl Stream<Item = Result<Bytes, FetchError>> + Send + Sync {
    stream::unfold(
        (input, DeflateState::Undetermined, false),
        |(mut input, mut state, mut produced_any)| async move {
            loop {
                match input.next().await {
                    Some(chunk) => {
                        if chunk.is_empty() {
                            continue;
                        }
                        if matches!(state, DeflateState::Undetermined) {
                            state = if (chunk[0] & 0x0F) == 0x08 {
                                DeflateState::Zlib(Box::new(ZlibDecoder::new(Vec::new())))
                            } else {
                                DeflateState::Raw(Box::new(DeflateDecoder::new(Vec::new())))
                            };
                        }

                        if let Err(e) = state.write_all(&chunk) {
                            return Some((
                                Err(FetchError::ProtocolError(format!(
                                    "Deflate stream decoding failed: {}",
                                    e
                                ))),
                                (input, state, produced_any),
                            ));
                        }

                        let decoded = state.drain();
                        if !decoded.is_empty() {
                            produced_any = true;
                            return Some((Ok(Bytes::from(decoded)), (input, state, produced_any)));
                        }
                    }
                    None => {
                        let (tail, finish_err) = state.try_finish_and_drain();
                        if !tail.is_empty() {
                            return Some((Ok(Bytes::from(tail)), (input, state, true)));
                        }
                        if let Some(e) = finish_err {
                            if !produced_any {
                                return Some((
                                    Err(FetchError::ProtocolError(format!(
                                        "Deflate stream finish failed: {}",
                                        e
                                    ))),
                                    (input, state, produced_any),
                                ));
                            }
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Decode a brotli stream incrementally.
///
/// Unlike gzip/deflate, brotli's decoder state isn't exposed through
/// `std::io::Write` in a form with a drainable internal buffer, so this uses
/// `brotli::DecompressorWriter`, which decodes as bytes are written rather
/// than requiring the whole compressed payload up front.
fn decode_brotli_stream(
    input: impl Stream<Item = Bytes> + Send + Sync + 'static + Unpin,
) -> impl Stream<Item = Result<Bytes, FetchError>> + Send + Sync {
    stream::unfold(
        (input, brotli::DecompressorWriter::new(Vec::new(), 4096)),
        |(mut input, mut writer)| async move {
            loop {
                match input.next().await {
                    Some(chunk) => {
                        if let Err(e) = writer.write_all(&chunk) {
                            return Some((
                                Err(FetchError::ProtocolError(format!(
                                    "Brotli stream decoding failed: {}",
                                    e
                                ))),
                                (input, writer),
                            ));
                        }

                        let decoded = writer.get_mut().drain(..).collect::<Vec<u8>>();
                        if !decoded.is_empty() {
                            return Some((Ok(Bytes::from(decoded)), (input, writer)));
                        }
                    }
                    None => {
                        let _ = writer.flush();
                        let tail = writer.get_mut().drain(..).collect::<Vec<u8>>();
                        if !tail.is_empty() {
                            return Some((Ok(Bytes::from(tail)), (input, writer)));
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Pass-through stream for identity encoding
fn decode_identity_stream(
    input: impl Stream<Item = Bytes> + Send + Sync + 'static + Unpin,
) -> impl Stream<Item = Result<Bytes, FetchError>> + Send + Sync {
    input.map(Ok)
}
