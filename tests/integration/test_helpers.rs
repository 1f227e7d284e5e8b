//! Shared fixtures for the integration suite: real compressed payloads so the
//! content-encoding tests exercise actual gzip/deflate/brotli bytes rather than
//! stubs.

use std::io::Write;

/// Gzip-compress `data`, the way a real origin server would before setting
/// `Content-Encoding: gzip`.
pub fn gzip_compress(data: &[u8]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip encode");
    encoder.finish().expect("gzip finish")
}

/// Zlib-wrapped deflate-compress `data` (`Content-Encoding: deflate`).
pub fn deflate_compress(data: &[u8]) -> Vec<u8> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("deflate encode");
    encoder.finish().expect("deflate finish")
}

/// Brotli-compress `data` (`Content-Encoding: br`).
pub fn brotli_compress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let params = brotli::enc::BrotliEncoderParams::default();
    brotli::BrotliCompress(&mut std::io::Cursor::new(data), &mut out, &params)
        .expect("brotli encode");
    out
}

/// Drain a `fetch` response body into a single buffer.
pub async fn collect_body(mut body: fetch_types::BodyStream) -> Vec<u8> {
    use futures::stream::StreamExt;

    let mut out = Vec::new();
    while let Some(chunk) = body.next().await {
        out.extend_from_slice(&chunk.expect("body chunk"));
    }
    out
}
