use fetch_errors::FetchError;
use flate2::write::{GzDecoder, GzEncoder};
use flate2::Compression;
use std::io::Write;

/// Encode data using gzip compression
pub fn encode(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| FetchError::ProtocolError(format!("Gzip encoding failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| FetchError::ProtocolError(format!("Gzip finish failed: {}", e)))
}

/// Decode gzip-compressed data
pub fn decode(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut decoder = GzDecoder::new(Vec::new());
    decoder
        .write_all(data)
        .map_err(|e| FetchError::ProtocolError(format!("Gzip decoding failed: {}", e)))?;
    decoder
        .finish()
        .map_err(|e| FetchError::ProtocolError(format!("Gzip finish failed: {}", e)))
}
