//! Error types for the REST service.
//!
//! [`RestError`] unifies every failure a handler can hit.  It is turned
//! into an [`ApiError`] once the request locale is known; [`ApiError`]
//! implements [`axum::response::IntoResponse`] and renders the
//! `{error, message}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shortlink_core::CoreError;

use crate::i18n::{Locale, Message, Translator};
use crate::token::{AuthError, TokenError};

/// Machine-readable error codes exposed in the `error` field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgument,
    InvalidCredentials,
    InvalidAuthToken,
    InvalidUrl,
    InvalidShortcode,
    UnknownError,
}

/// Errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// A required body field was absent.
    #[error("missing argument: {0:?}")]
    MissingArgument(Message),

    /// The token service rejected the credentials.
    #[error(transparent)]
    Authentication(#[from] AuthError),

    /// No bearer token was sent on a protected route.
    #[error("missing auth token")]
    MissingAuthToken,

    /// The bearer token is unknown or expired.
    #[error(transparent)]
    InvalidAuthToken(#[from] TokenError),

    /// A domain error from the shortening flow.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Anything else; the detail is logged, never sent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Error code derived from the error type.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingArgument(_) => ErrorCode::InvalidArgument,
            Self::Authentication(_) => ErrorCode::InvalidCredentials,
            Self::MissingAuthToken | Self::InvalidAuthToken(_) => ErrorCode::InvalidAuthToken,
            Self::Core(CoreError::InvalidUrl { .. }) => ErrorCode::InvalidUrl,
            Self::Core(CoreError::ShortCodeNotFound(_)) => ErrorCode::InvalidShortcode,
            Self::Internal(_) => ErrorCode::UnknownError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingArgument(_) | Self::Core(CoreError::InvalidUrl { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Authentication(_) | Self::MissingAuthToken | Self::InvalidAuthToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Core(CoreError::ShortCodeNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing message.  Never carries internal details beyond
    /// what the caller itself sent.
    pub fn message(&self) -> Message {
        match self {
            Self::MissingArgument(message) => message.clone(),
            Self::Authentication(_) => Message::InvalidCredentials,
            Self::MissingAuthToken | Self::InvalidAuthToken(_) => Message::InvalidAuthToken,
            Self::Core(CoreError::InvalidUrl { url, .. }) => Message::InvalidUrl { url: url.clone() },
            Self::Core(CoreError::ShortCodeNotFound(short_code)) => Message::ShortCodeNotFound {
                short_code: short_code.clone(),
            },
            Self::Internal(_) => Message::UnknownError,
        }
    }

    /// Render this error for `locale`.
    pub fn localize(&self, translator: &dyn Translator, locale: Locale) -> ApiError {
        let api_error = ApiError {
            status: self.status(),
            code: self.code(),
            message: translator.translate(&self.message(), locale),
        };

        tracing::warn!(
            status = %api_error.status,
            code = %api_error.code,
            locale = locale.code(),
            error = %self,
            "request failed"
        );
        api_error
    }
}

/// A localized error, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorCode,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use shortlink_core::HttpClientError;

    use super::*;
    use crate::i18n::CatalogTranslator;

    #[test]
    fn error_code_strings() {
        assert_eq!(ErrorCode::InvalidArgument.to_string(), "INVALID_ARGUMENT");
        assert_eq!(ErrorCode::InvalidCredentials.to_string(), "INVALID_CREDENTIALS");
        assert_eq!(ErrorCode::InvalidAuthToken.to_string(), "INVALID_AUTH_TOKEN");
        assert_eq!(ErrorCode::InvalidUrl.to_string(), "INVALID_URL");
        let shortcode: &'static str = ErrorCode::InvalidShortcode.into();
        assert_eq!(shortcode, "INVALID_SHORTCODE");
        assert_eq!(ErrorCode::UnknownError.to_string(), "UNKNOWN_ERROR");
    }

    #[test]
    fn error_code_serializes_like_display() {
        let json = serde_json::to_string(&ErrorCode::InvalidAuthToken).unwrap();
        assert_eq!(json, "\"INVALID_AUTH_TOKEN\"");
    }

    #[test]
    fn authentication_failure_is_generic() {
        let err = RestError::from(AuthError::InvalidCredentials {
            username: "mallory".into(),
        });
        let api = err.localize(&CatalogTranslator, Locale::En);

        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.code, ErrorCode::InvalidCredentials);
        assert_eq!(api.message, "Invalid username and/or password");
        assert!(!api.message.contains("mallory"));
    }

    #[test]
    fn invalid_url_mapping() {
        let err = RestError::from(CoreError::invalid_url(
            "http://down",
            HttpClientError::Transport("connection refused".into()),
        ));
        let api = err.localize(&CatalogTranslator, Locale::En);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, ErrorCode::InvalidUrl);
        assert!(api.message.contains("http://down"));
        assert!(!api.message.contains("refused"));
    }

    #[test]
    fn token_errors_share_a_code() {
        for err in [
            RestError::MissingAuthToken,
            RestError::from(TokenError::NotFound),
            RestError::from(TokenError::Expired(chrono::Utc::now())),
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.code(), ErrorCode::InvalidAuthToken);
        }
    }

    #[test]
    fn internal_error_hides_detail() {
        let err = RestError::Internal("invalid header value for short code abcde".into());
        let api = err.localize(&CatalogTranslator, Locale::En);

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.code, ErrorCode::UnknownError);
        assert_eq!(api.message, "Unexpected error occurred");
    }

    #[test]
    fn code_is_locale_independent() {
        let err = RestError::MissingArgument(Message::MissingCredentials);
        let en = err.localize(&CatalogTranslator, Locale::En);
        let es = err.localize(&CatalogTranslator, Locale::Es);

        assert_eq!(en.code, es.code);
        assert_ne!(en.message, es.message);
    }
}
