use fetch_errors::FetchError;
use std::io::{Read, Write};

/// Encode data using brotli compression
pub fn encode(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut output = Vec::new();
    let mut compressor = brotli::CompressorWriter::new(
        &mut output,
        4096, // buffer size
        11,   // quality (0-11, 11 is best)
        22,   // lg_window_size
    );

    compressor
        .write_all(data)
        .map_err(|e| FetchError::ProtocolError(format!("Brotli encoding failed: {}", e)))?;

    compressor
        .flush()
        .map_err(|e| FetchError::ProtocolError(format!("Brotli flush failed: {}", e)))?;

    drop(compressor);
    Ok(output)
}

/// Decode brotli-compressed data
pub fn decode(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut decompressor = brotli::Decompressor::new(data, 4096);
    let mut output = Vec::new();

    decompressor
        .read_to_end(&mut output)
        .map_err(|e| FetchError::ProtocolError(format!("Brotli decoding failed: {}", e)))?;

    Ok(output)
}
