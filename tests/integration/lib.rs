// Integration test library
// Provides shared utilities and helpers for cross-component integration tests

pub mod test_helpers;

pub mod test_multipart;

// Re-export commonly used types
pub use fetch::FetchError;
pub use fetch_types::{BodyInput, FormDataBody};
pub use url::Url;

/// Common test setup and assertions
pub mod prelude {
    pub use super::test_helpers::*;
    pub use fetch::{
        fetch, fetch_with_config, AbortController, FetchConfig, FetchError, Request, RequestInit,
    };
    pub use fetch_types::{BodyInput, FormDataBody};
    pub use url::Url;
}
