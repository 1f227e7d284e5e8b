//! fetch_body component
//!
//! The Body Extractor (C1) and Multipart Encoder (C2): turns a classified
//! [`fetch_types::BodyInput`] into a ready-to-send [`fetch_types::BodyState`],
//! and encodes [`fetch_types::FormDataBody`] as `multipart/form-data`.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod extract;
mod multipart;

pub use extract::extract;
pub use multipart::{encode as encode_multipart, generate_boundary, precompute_length};
