//! Shortlink REST service.
//!
//! Exposes the URL shortener over HTTP:
//!
//! | Route | Auth | Purpose |
//! |-------|------|---------|
//! | `POST /rest/authenticate` | — | username/password → bearer token |
//! | `POST /rest/short-codes` | bearer | validate and shorten a long URL |
//! | `GET /rest/short-codes` | bearer | list short URLs |
//! | `GET /{short_code}` | — | redirect to the long URL |
//!
//! Errors are always `{error, message}` bodies; `message` follows the
//! request's `Accept-Language`.

pub mod auth;
pub mod config;
pub mod error;
pub mod i18n;
pub mod short_codes;
pub mod token;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use chrono::TimeDelta;
use shortlink_core::{ReqwestHttpClient, ShortUrlService, UrlValidator};

use crate::config::AppConfig;
use crate::error::{ApiError, RestError};
use crate::i18n::{CatalogTranslator, Locale, Translator};
use crate::token::{InMemoryTokenService, TokenService};

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
pub struct AppState {
    /// Issues and resolves bearer tokens.
    pub tokens: Arc<dyn TokenService>,
    /// Renders client-facing messages.
    pub translator: Arc<dyn Translator>,
    /// Short URL store, validating long URLs on the way in.
    pub short_urls: ShortUrlService,
    /// Base of the short URLs handed back to clients.
    pub short_domain: String,
}

impl AppState {
    /// Wire the production collaborators from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let http = Arc::new(ReqwestHttpClient::new(config.url_validation_timeout));
        let validator = UrlValidator::new(http, config.url_shortener);

        Self {
            tokens: Arc::new(InMemoryTokenService::new(
                config.admin.clone(),
                TimeDelta::minutes(i64::from(config.token_ttl_minutes)),
            )),
            translator: Arc::new(CatalogTranslator),
            short_urls: ShortUrlService::new(validator, config.url_shortener),
            short_domain: config.short_domain.clone(),
        }
    }

    /// Localize `err` for the current request.
    pub fn error(&self, err: impl Into<RestError>, locale: Locale) -> ApiError {
        err.into().localize(self.translator.as_ref(), locale)
    }

    /// Public URL of `short_code` under the configured short domain.
    pub fn short_url_for(&self, short_code: &str) -> String {
        format!("{}/{short_code}", self.short_domain.trim_end_matches('/'))
    }
}

/// Build the service router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(
            "/rest/short-codes",
            post(short_codes::create_short_url).get(short_codes::list_short_urls),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    Router::new()
        .route("/rest/authenticate", post(auth::authenticate))
        .route("/{short_code}", get(short_codes::redirect))
        .merge(protected)
        .with_state(state)
}
