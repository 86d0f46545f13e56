//! REST service configuration.
//!
//! Built from environment variables at startup and turned into the shared
//! [`crate::AppState`].

use std::str::FromStr;
use std::time::Duration;

use shortlink_core::UrlShortenerOptions;

use crate::token::AdminCredentials;

/// Global configuration of the REST service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to listen on (default `8080`).
    pub listen_port: u16,
    /// Validation default and short code length.
    pub url_shortener: UrlShortenerOptions,
    /// Base prepended to short codes in responses.
    pub short_domain: String,
    /// Account accepted by `POST /rest/authenticate`.
    pub admin: AdminCredentials,
    /// Idle lifetime of an auth token.
    pub token_ttl_minutes: u32,
    /// Timeout of the outbound URL probe.
    pub url_validation_timeout: Duration,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                      | Default                 | Description                        |
    /// |-------------------------------|-------------------------|------------------------------------|
    /// | `REST_PORT`                   | `8080`                  | HTTP listen port                   |
    /// | `VALIDATE_URL`                | `true`                  | Probe long URLs by default         |
    /// | `SHORT_CODE_LENGTH`           | `5`                     | Characters per generated code      |
    /// | `SHORT_DOMAIN`                | `http://localhost:8080` | Base of returned short URLs        |
    /// | `ADMIN_USERNAME`              | `admin`                 | REST API username                  |
    /// | `ADMIN_PASSWORD`              | `admin`                 | REST API password                  |
    /// | `TOKEN_TTL_MINUTES`           | `20`                    | Auth token idle lifetime           |
    /// | `URL_VALIDATION_TIMEOUT_SECS` | `10`                    | Timeout of the reachability probe  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = UrlShortenerOptions::default();

        let url_shortener = UrlShortenerOptions {
            validate_url: lookup("VALIDATE_URL")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.validate_url),
            short_code_length: parse_or(&lookup, "SHORT_CODE_LENGTH", defaults.short_code_length),
        };

        Self {
            listen_port: parse_or(&lookup, "REST_PORT", 8080),
            url_shortener,
            short_domain: lookup("SHORT_DOMAIN")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            admin: AdminCredentials {
                username: lookup("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
                password: lookup("ADMIN_PASSWORD").unwrap_or_else(|| "admin".to_string()),
            },
            token_ttl_minutes: parse_or(&lookup, "TOKEN_TTL_MINUTES", 20),
            url_validation_timeout: Duration::from_secs(parse_or(
                &lookup,
                "URL_VALIDATION_TIMEOUT_SECS",
                10,
            )),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
