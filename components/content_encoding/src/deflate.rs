use fetch_errors::FetchError;
use flate2::write::{DeflateDecoder, DeflateEncoder, ZlibDecoder};
use flate2::Compression;
use std::io::Write;

/// Encode data using deflate compression
///
/// Always emits raw (RFC 1951) deflate, the more common `Content-Encoding:
/// deflate` wire form; `decode` accepts either that or zlib-wrapped (RFC
/// 1950) data, since real servers send both under the same header name.
pub fn encode(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| FetchError::ProtocolError(format!("Deflate encoding failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| FetchError::ProtocolError(format!("Deflate finish failed: {}", e)))
}

/// `true` if the first byte looks like a zlib (RFC 1950) header rather than
/// raw deflate: zlib's CMF byte always has compression method 8 in its low
/// nibble.
fn looks_like_zlib(first_byte: u8) -> bool {
    (first_byte & 0x0F) == 0x08
}

/// Decode deflate-compressed data, auto-detecting zlib-wrapped vs. raw
/// deflate from the first byte.
pub fn decode(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    if looks_like_zlib(data[0]) {
        let mut decoder = ZlibDecoder::new(Vec::new());
        decoder
            .write_all(data)
            .map_err(|e| FetchError::ProtocolError(format!("Deflate decoding failed: {}", e)))?;
        decoder
            .finish()
            .map_err(|e| FetchError::ProtocolError(format!("Deflate finish failed: {}", e)))
    } else {
        let mut decoder = DeflateDecoder::new(Vec::new());
        decoder
            .write_all(data)
            .map_err(|e| FetchError::ProtocolError(format!("Deflate decoding failed: {}", e)))?;
        decoder
            .finish()
            .map_err(|e| FetchError::ProtocolError(format!("Deflate finish failed: {}", e)))
    }
}
