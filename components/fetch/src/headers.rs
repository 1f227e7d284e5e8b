//! Header Adapter (C4).
//!
//! Bridges the engine's flat `Vec<(String, String)>` wire format and the
//! standards-shaped `http::HeaderMap` the public [`crate::FetchResponse`]
//! exposes. Lookups and writes are case-insensitive; [`set`] replaces any
//! existing value rather than appending a second one, matching the observed
//! source rather than `HeaderMap`'s natural multi-value `append` behavior.

use fetch_types::HeaderPair;
use http::{HeaderMap, HeaderName, HeaderValue};

/// Look up a header by name, case-insensitively.
pub fn get<'a>(headers: &'a [HeaderPair], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// `true` if a header with this name (any case) is present.
pub fn has(headers: &[HeaderPair], name: &str) -> bool {
    get(headers, name).is_some()
}

/// Set a header, replacing any existing value with the same name
/// (case-insensitive). Unlike a raw push, this never produces duplicates.
pub fn set(headers: &mut Vec<HeaderPair>, name: &str, value: impl Into<String>) {
    let value = value.into();
    if let Some(existing) = headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
        existing.1 = value;
    } else {
        headers.push((name.to_string(), value));
    }
}

/// Remove every header with this name (case-insensitive).
pub fn remove(headers: &mut Vec<HeaderPair>, name: &str) {
    headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
}

/// Convert the engine's raw pair list into a `HeaderMap`, setting each pair
/// rather than appending it — a header repeated in the wire list collapses
/// to its last value instead of becoming a multi-value entry.
pub fn pairs_to_header_map(pairs: &[HeaderPair]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) else {
            continue;
        };
        map.insert(name, value);
    }
    map
}
