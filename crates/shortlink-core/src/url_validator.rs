//! Live reachability check for long URLs.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::http::{HttpClient, Method, RequestOptions};
use crate::options::UrlShortenerOptions;

/// Probes long URLs before they are shortened.
#[derive(Clone)]
pub struct UrlValidator {
    client: Arc<dyn HttpClient>,
    options: UrlShortenerOptions,
}

impl UrlValidator {
    /// Create a validator issuing its probes through `client`.
    pub fn new(client: Arc<dyn HttpClient>, options: UrlShortenerOptions) -> Self {
        Self { client, options }
    }

    /// The options this validator resolves overrides against.
    pub fn options(&self) -> &UrlShortenerOptions {
        &self.options
    }

    /// Check that `url` is reachable.
    ///
    /// `do_validate` overrides the configured default for this call.  When
    /// validation resolves to disabled no request is made and no syntax
    /// check happens either.  Otherwise a single `GET` is issued, following
    /// up to 15 redirects with IDN conversion on; any client failure is
    /// reported as [`CoreError::InvalidUrl`].
    pub async fn validate_url(&self, url: &str, do_validate: Option<bool>) -> Result<(), CoreError> {
        if !self.options.resolve_validation(do_validate) {
            debug!(url, "URL validation skipped");
            return Ok(());
        }

        self.client
            .request(Method::GET, url, &RequestOptions::url_validation())
            .await
            .map_err(|source| {
                warn!(url, error = %source, "URL validation failed");
                CoreError::invalid_url(url, source)
            })
    }
}
