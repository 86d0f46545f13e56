//! Error types for the `shortlink-core` crate.

use crate::http::HttpClientError;

/// Domain errors raised by the shortening flow.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The long URL could not be reached or is not a valid URL.
    #[error("provided URL \"{url}\" is invalid: {source}")]
    InvalidUrl {
        /// The URL as supplied by the caller.
        url: String,
        /// The client-level failure behind the rejection.
        #[source]
        source: HttpClientError,
    },

    /// No short URL is registered under the given code.
    #[error("no URL found for short code \"{0}\"")]
    ShortCodeNotFound(String),
}

impl CoreError {
    /// Wrap a client failure for `url`.
    pub fn invalid_url(url: impl Into<String>, source: HttpClientError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }
}
