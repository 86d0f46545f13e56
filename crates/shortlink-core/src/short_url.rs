//! Short URL model and in-memory service.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::CoreError;
use crate::http::HttpClientError;
use crate::options::UrlShortenerOptions;
use crate::url_validator::UrlValidator;

/// A long URL registered under a short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrl {
    /// Generated code, unique within the store.
    pub short_code: String,
    /// Target of the redirect.
    pub long_url: String,
    /// Creation instant.
    pub date_created: DateTime<Utc>,
    /// Number of times the code has been resolved.
    pub visits: u64,
}

/// Creates and resolves short URLs.
pub struct ShortUrlService {
    validator: UrlValidator,
    options: UrlShortenerOptions,
    urls: RwLock<HashMap<String, ShortUrl>>,
}

impl ShortUrlService {
    /// Create an empty service.
    pub fn new(validator: UrlValidator, options: UrlShortenerOptions) -> Self {
        Self {
            validator,
            options,
            urls: RwLock::new(HashMap::new()),
        }
    }

    /// Validate `long_url` and register it under a fresh short code.
    ///
    /// `validate_url` overrides the configured validation default.  Control
    /// characters are refused even when validation is off, since the long
    /// URL ends up in a `Location` header.
    pub async fn shorten(
        &self,
        long_url: &str,
        validate_url: Option<bool>,
    ) -> Result<ShortUrl, CoreError> {
        if long_url.chars().any(char::is_control) {
            return Err(CoreError::invalid_url(
                long_url,
                HttpClientError::InvalidUrl("control character in URL".to_string()),
            ));
        }

        self.validator.validate_url(long_url, validate_url).await?;

        let mut urls = self.urls.write().await;
        let short_code = loop {
            let candidate = generate_short_code(self.options.short_code_length);
            if !urls.contains_key(&candidate) {
                break candidate;
            }
        };

        let short_url = ShortUrl {
            short_code: short_code.clone(),
            long_url: long_url.to_string(),
            date_created: Utc::now(),
            visits: 0,
        };
        urls.insert(short_code, short_url.clone());

        info!(short_code = %short_url.short_code, long_url, "short URL created");
        Ok(short_url)
    }

    /// Look up `short_code`, counting the visit.
    pub async fn resolve(&self, short_code: &str) -> Result<ShortUrl, CoreError> {
        let mut urls = self.urls.write().await;
        let short_url = urls
            .get_mut(short_code)
            .ok_or_else(|| CoreError::ShortCodeNotFound(short_code.to_string()))?;
        short_url.visits += 1;
        Ok(short_url.clone())
    }

    /// All registered short URLs, oldest first.
    pub async fn list(&self) -> Vec<ShortUrl> {
        let mut all: Vec<ShortUrl> = self.urls.read().await.values().cloned().collect();
        all.sort_by_key(|u| u.date_created);
        all
    }
}

fn generate_short_code(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length.max(1))
        .map(char::from)
        .collect()
}
