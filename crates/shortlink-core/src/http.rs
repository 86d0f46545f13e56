//! Outbound HTTP seam.
//!
//! [`HttpClient`] is the capability the URL validator depends on.  The
//! production implementation, [`ReqwestHttpClient`], sits on top of
//! `reqwest`; tests swap in recording doubles.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use url::Url;

pub use reqwest::Method;

/// Maximum number of redirects followed while probing a long URL.
pub const MAX_VALIDATION_REDIRECTS: usize = 15;

/// Default timeout of a single outbound request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// Per-request transport switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Redirect hops to follow before failing; `0` disables following.
    pub max_redirects: usize,
    /// Convert internationalized host names to their ASCII form.
    pub idn_conversion: bool,
}

impl RequestOptions {
    /// The fixed option set used to probe long URLs.
    pub const fn url_validation() -> Self {
        Self {
            max_redirects: MAX_VALIDATION_REDIRECTS,
            idn_conversion: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Client-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// The target could not be parsed or uses an unsupported scheme.
    #[error("malformed URL: {0}")]
    InvalidUrl(String),

    /// The host is internationalized and IDN conversion was disabled.
    #[error("IDN conversion required: {0}")]
    Idn(String),

    /// The final response was not a success.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The redirect chain exceeded the configured cap.
    #[error("too many redirects")]
    TooManyRedirects,

    /// Connection, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for HttpClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_redirect() {
            Self::TooManyRedirects
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else if e.is_builder() {
            Self::InvalidUrl(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Client capability
// ---------------------------------------------------------------------------

/// Something able to perform an outbound request and report whether it
/// succeeded.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform `method url` honouring `options`.
    ///
    /// Only success matters; the response body is discarded.
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
    ) -> Result<(), HttpClientError>;
}

/// Parse `raw` into an absolute `http`/`https` URL.
///
/// The `url` crate always maps internationalized hosts to punycode.  With
/// `idn_conversion` off such a host is refused instead of silently
/// rewritten.
pub fn to_ascii_url(raw: &str, idn_conversion: bool) -> Result<Url, HttpClientError> {
    let parsed = Url::parse(raw).map_err(|e| HttpClientError::InvalidUrl(format!("{raw}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(HttpClientError::InvalidUrl(format!(
            "{raw}: unsupported scheme \"{}\"",
            parsed.scheme()
        )));
    }

    if !idn_conversion {
        if let Some(host) = parsed.host_str() {
            let lowered = raw.to_ascii_lowercase();
            let converted = host
                .split('.')
                .any(|label| label.starts_with("xn--") && !lowered.contains(label));
            if converted {
                return Err(HttpClientError::Idn(raw.to_string()));
            }
        }
    }

    Ok(parsed)
}

// ---------------------------------------------------------------------------
// reqwest adapter
// ---------------------------------------------------------------------------

/// [`HttpClient`] backed by `reqwest`.
///
/// `reqwest` fixes the redirect policy per client, so a client is built for
/// each call from its [`RequestOptions`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    timeout: Duration,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl ReqwestHttpClient {
    /// Create an adapter whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client_for(&self, options: &RequestOptions) -> Result<reqwest::Client, HttpClientError> {
        let policy = if options.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(options.max_redirects)
        };

        Ok(reqwest::Client::builder()
            .redirect(policy)
            .timeout(self.timeout)
            .build()?)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
    ) -> Result<(), HttpClientError> {
        let target = to_ascii_url(url, options.idn_conversion)?;
        let client = self.client_for(options)?;

        let response = client.request(method, target).send().await?;
        response.error_for_status()?;
        Ok(())
    }
}
