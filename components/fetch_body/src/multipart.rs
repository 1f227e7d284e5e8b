//! `multipart/form-data` encoding for [`fetch_types::FormDataBody`].

use bytes::Bytes;
use fetch_types::{FormDataBody, FormDataFile};
use rand::RngCore;

/// Generate a boundary of the form `formdata-<16 lowercase hex chars>` using
/// 8 bytes of cryptographically strong randomness.
pub fn generate_boundary() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut hex = String::with_capacity(16);
    for b in bytes {
        hex.push_str(&format!("{:02x}", b));
    }
    format!("formdata-{}", hex)
}

fn field_header(boundary: &str, name: &str) -> Vec<u8> {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n"
    )
    .into_bytes()
}

fn file_header(boundary: &str, field_name: &str, filename: &str, content_type: &str) -> Vec<u8> {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes()
}

fn footer(boundary: &str) -> Vec<u8> {
    format!("--{boundary}--\r\n\r\n").into_bytes()
}

/// Encode a [`FormDataBody`] into a single contiguous `multipart/form-data`
/// byte buffer, using `boundary` to frame each part.
///
/// Names and filenames are emitted verbatim — not quote-escaped — matching
/// the observed source behavior (see DESIGN.md open questions).
pub fn encode(form: &FormDataBody, boundary: &str) -> Bytes {
    let mut out = Vec::with_capacity(precompute_length(form, boundary) as usize);

    for (name, value) in &form.fields {
        out.extend_from_slice(&field_header(boundary, name));
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }

    for file in &form.files {
        out.extend_from_slice(&file_header(
            boundary,
            &file.field_name,
            &file.filename,
            &file.content_type,
        ));
        out.extend_from_slice(&file.data);
        out.extend_from_slice(b"\r\n");
    }

    out.extend_from_slice(&footer(boundary));
    Bytes::from(out)
}

/// Precompute the exact encoded length of `form` without actually encoding
/// it, so the caller can set `Content-Length` up front.
pub fn precompute_length(form: &FormDataBody, boundary: &str) -> u64 {
    let mut total: u64 = 0;

    for (name, value) in &form.fields {
        total += field_header(boundary, name).len() as u64;
        total += value.len() as u64;
        total += 2; // CRLF
    }

    for file in &form.files {
        total += file_part_len(file, boundary);
    }

    total += footer(boundary).len() as u64;
    total
}

fn file_part_len(file: &FormDataFile, boundary: &str) -> u64 {
    file_header(boundary, &file.field_name, &file.filename, &file.content_type).len() as u64
        + file.data.len() as u64
        + 2
}
