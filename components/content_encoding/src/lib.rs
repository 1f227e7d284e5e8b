//! content_encoding component
//!
//! Implements the Content Decoder: transparent decoding of
//! `Content-Encoding: gzip|deflate|br` response bodies, both as one-shot
//! buffers and as streams. `identity` (or an absent header) is a no-op.

mod brotli_impl;
mod deflate;
mod gzip;
mod stream;

use bytes::Bytes;
use fetch_errors::FetchError;
use futures::Stream;

/// Supported content encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Gzip compression
    Gzip,
    /// Deflate compression (zlib-wrapped or raw, auto-detected on decode)
    Deflate,
    /// Brotli compression
    Brotli,
    /// No encoding (identity)
    Identity,
}

impl Encoding {
    /// Map a single `Content-Encoding` token to an `Encoding`, or `None` if
    /// it names something this decoder doesn't handle (e.g. `compress`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => Some(Encoding::Gzip),
            "deflate" | "x-deflate" => Some(Encoding::Deflate),
            "br" => Some(Encoding::Brotli),
            "identity" => Some(Encoding::Identity),
            _ => None,
        }
    }
}

/// Content encoder/decoder for HTTP content encoding
pub struct ContentEncoder {
    supported_encodings: Vec<Encoding>,
}

impl ContentEncoder {
    /// Create a new ContentEncoder with all supported encodings
    pub fn new() -> Self {
        Self {
            supported_encodings: vec![
                Encoding::Gzip,
                Encoding::Deflate,
                Encoding::Brotli,
                Encoding::Identity,
            ],
        }
    }

    /// Encode data using the specified encoding
    pub fn encode(&self, data: &[u8], encoding: Encoding) -> Result<Vec<u8>, FetchError> {
        match encoding {
            Encoding::Gzip => gzip::encode(data),
            Encoding::Deflate => deflate::encode(data),
            Encoding::Brotli => brotli_impl::encode(data),
            Encoding::Identity => Ok(data.to_vec()),
        }
    }

    /// Decode data using the specified encoding
    pub fn decode(&self, data: &[u8], encoding: Encoding) -> Result<Vec<u8>, FetchError> {
        match encoding {
            Encoding::Gzip => gzip::decode(data),
            Encoding::Deflate => deflate::decode(data),
            Encoding::Brotli => brotli_impl::decode(data),
            Encoding::Identity => Ok(data.to_vec()),
        }
    }

    /// Decode a stream of encoded data
    pub fn decode_stream(
        &self,
        stream: impl Stream<Item = Bytes> + Send + Sync + 'static + Unpin,
        encoding: Encoding,
    ) -> impl Stream<Item = Result<Bytes, FetchError>> {
        stream::decode_stream(stream, encoding)
    }

    /// Get the Accept-Encoding header value
    pub fn get_accept_encoding(&self) -> String {
        "gzip, deflate, br".to_string()
    }
}

impl Default for ContentEncoder {
    fn default() -> Self {
        Self::new()
    }
}
