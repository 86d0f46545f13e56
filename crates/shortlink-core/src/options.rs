//! URL shortener options.

use serde::Deserialize;

/// Default length of generated short codes.
pub const DEFAULT_SHORT_CODE_LENGTH: usize = 5;

/// Behaviour switches for the shortening flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UrlShortenerOptions {
    /// Whether long URLs are probed for reachability when the caller does
    /// not say otherwise.
    pub validate_url: bool,
    /// Number of characters in generated short codes.
    pub short_code_length: usize,
}

impl Default for UrlShortenerOptions {
    fn default() -> Self {
        Self {
            validate_url: true,
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
        }
    }
}

impl UrlShortenerOptions {
    /// Resolve a per-call override against the configured default.
    ///
    /// An explicit override always wins, in both directions.
    pub fn resolve_validation(&self, do_validate: Option<bool>) -> bool {
        do_validate.unwrap_or(self.validate_url)
    }
}
