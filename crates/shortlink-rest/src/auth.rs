//! Authentication endpoint and bearer-token guard.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequest, Request, State};
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::Response;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::AppState;
use crate::error::{ApiError, RestError};
use crate::i18n::{Locale, Message};

// ---------------------------------------------------------------------------
// Request / Response DTOs
// ---------------------------------------------------------------------------

/// Raw body of `POST /rest/authenticate`, JSON or form encoded.
///
/// A body that cannot be parsed is treated as one with no fields.
#[derive(Debug, Default, Deserialize)]
pub struct AuthRequest {
    /// Account name, if sent.
    pub username: Option<String>,
    /// Account password, if sent.
    pub password: Option<String>,
}

/// A username/password pair with both halves present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCredentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl AuthRequest {
    /// `Some` only when both fields were sent.
    pub fn into_credentials(self) -> Option<AuthCredentials> {
        Some(AuthCredentials {
            username: self.username?,
            password: self.password?,
        })
    }
}

impl<S: Send + Sync> FromRequest<S> for AuthRequest {
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let parsed = if is_form {
            Form::<AuthRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .ok()
        } else {
            Json::<AuthRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .ok()
        };

        Ok(parsed.unwrap_or_default())
    }
}

/// Response of `POST /rest/authenticate`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// The issued bearer token.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /rest/authenticate` — exchange a username/password for a token.
///
/// Both fields are required; if either is missing the token service is
/// not consulted.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    locale: Locale,
    body: AuthRequest,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(credentials) = body.into_credentials() else {
        return Err(state.error(RestError::MissingArgument(Message::MissingCredentials), locale));
    };

    let token = state
        .tokens
        .create_token(&credentials.username, &credentials.password)
        .await
        .map_err(|e| state.error(e, locale))?;

    info!(username = %credentials.username, "authentication successful");
    Ok(Json(TokenResponse { token: token.token }))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware guarding routes that need a valid auth token.
///
/// Each accepted request refreshes the token's expiration.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    locale: Locale,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .map(str::to_owned)
        .ok_or_else(|| state.error(RestError::MissingAuthToken, locale))?;

    state
        .tokens
        .get_by_token(&token)
        .await
        .map_err(|e| state.error(e, locale))?;
    let refreshed = state
        .tokens
        .refresh(&token)
        .await
        .map_err(|e| state.error(e, locale))?;

    debug!(expiration = %refreshed.expiration, "auth token accepted");
    Ok(next.run(request).await)
}
