//! Short URL routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use shortlink_core::ShortUrl;
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, RestError};
use crate::i18n::{Locale, Message};

/// Body of `POST /rest/short-codes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlRequest {
    pub long_url: Option<String>,
    /// Overrides the configured validation default for this call.
    pub validate_url: Option<bool>,
}

/// Response of `POST /rest/short-codes`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub long_url: String,
    pub short_code: String,
    pub short_url: String,
}

/// Response of `GET /rest/short-codes`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShortUrlsResponse {
    pub short_urls: Vec<ShortUrl>,
}

/// `POST /rest/short-codes` — validate and shorten a long URL.
pub async fn create_short_url(
    State(state): State<Arc<AppState>>,
    locale: Locale,
    body: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<Json<CreateShortUrlResponse>, ApiError> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let Some(long_url) = request.long_url.filter(|u| !u.trim().is_empty()) else {
        return Err(state.error(RestError::MissingArgument(Message::MissingLongUrl), locale));
    };

    let short_url = state
        .short_urls
        .shorten(&long_url, request.validate_url)
        .await
        .map_err(|e| state.error(e, locale))?;

    Ok(Json(CreateShortUrlResponse {
        short_url: state.short_url_for(&short_url.short_code),
        long_url: short_url.long_url,
        short_code: short_url.short_code,
    }))
}

/// `GET /rest/short-codes` — list every short URL.
pub async fn list_short_urls(State(state): State<Arc<AppState>>) -> Json<ListShortUrlsResponse> {
    Json(ListShortUrlsResponse {
        short_urls: state.short_urls.list().await,
    })
}

/// `GET /{short_code}` — redirect to the long URL.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    locale: Locale,
    Path(short_code): Path<String>,
) -> Result<Response, ApiError> {
    let short_url = state
        .short_urls
        .resolve(&short_code)
        .await
        .map_err(|e| state.error(e, locale))?;

    let location = HeaderValue::from_bytes(short_url.long_url.as_bytes()).map_err(|e| {
        state.error(
            RestError::Internal(format!("unusable redirect target for {short_code}: {e}")),
            locale,
        )
    })?;

    info!(short_code = %short_url.short_code, visits = short_url.visits, "redirecting");
    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}
