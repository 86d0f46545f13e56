//! User-facing message catalog.
//!
//! Every message the REST layer sends back to a client goes through a
//! [`Translator`].  The locale comes from the `Accept-Language` header via
//! the [`Locale`] extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Pick a locale from an `Accept-Language` value.
    ///
    /// Only the first language tag is considered; its primary subtag must
    /// name a supported locale, otherwise English is used.
    pub fn from_accept_language(value: &str) -> Self {
        let primary = value
            .split(',')
            .next()
            .and_then(|tag| tag.split(';').next())
            .and_then(|tag| tag.trim().split(['-', '_']).next())
            .unwrap_or_default();

        if primary.eq_ignore_ascii_case("es") {
            Locale::Es
        } else {
            Locale::En
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(Locale::from_accept_language)
            .unwrap_or_default())
    }
}

/// A message that can be shown to an API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    MissingCredentials,
    InvalidCredentials,
    InvalidAuthToken,
    MissingLongUrl,
    InvalidUrl { url: String },
    ShortCodeNotFound { short_code: String },
    UnknownError,
}

/// Renders [`Message`]s for a locale.
pub trait Translator: Send + Sync {
    fn translate(&self, message: &Message, locale: Locale) -> String;
}

/// [`Translator`] backed by the built-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogTranslator;

impl Translator for CatalogTranslator {
    fn translate(&self, message: &Message, locale: Locale) -> String {
        let t = t(locale);
        match message {
            Message::MissingCredentials => t.missing_credentials.to_string(),
            Message::InvalidCredentials => t.invalid_credentials.to_string(),
            Message::InvalidAuthToken => t.invalid_auth_token.to_string(),
            Message::MissingLongUrl => t.missing_long_url.to_string(),
            Message::InvalidUrl { url } => t.invalid_url.replace("{url}", url),
            Message::ShortCodeNotFound { short_code } => {
                t.short_code_not_found.replace("{short_code}", short_code)
            }
            Message::UnknownError => t.unknown_error.to_string(),
        }
    }
}

/// All translatable strings.
/// Call `t(locale)` to get the struct for a given locale.
pub struct T {
    // ── Authentication ──
    pub missing_credentials: &'static str,
    pub invalid_credentials: &'static str,
    pub invalid_auth_token: &'static str,

    // ── Short URLs ──
    pub missing_long_url: &'static str,
    pub invalid_url: &'static str,
    pub short_code_not_found: &'static str,

    // ── Generic ──
    pub unknown_error: &'static str,
}

pub fn t(locale: Locale) -> T {
    match locale {
        Locale::En => T {
            missing_credentials: "You have to provide both \"username\" and \"password\"",
            invalid_credentials: "Invalid username and/or password",
            invalid_auth_token: "Missing or invalid auth token provided. Perform a new \
                authentication request and send provided token on every new request on the \
                \"Authorization\" header",

            missing_long_url: "A URL was not provided",
            invalid_url: "Provided URL \"{url}\" is invalid. Try with a different one.",
            short_code_not_found: "No URL found for short code \"{short_code}\"",

            unknown_error: "Unexpected error occurred",
        },
        Locale::Es => T {
            missing_credentials: "Debes proporcionar tanto \"username\" como \"password\"",
            invalid_credentials: "Nombre de usuario y/o contraseña no válidos",
            invalid_auth_token: "No se ha proporcionado token de autenticación o este no es \
                válido. Realiza una nueva petición de autenticación y envía el token \
                proporcionado en cada nueva petición en la cabecera \"Authorization\"",

            missing_long_url: "No se ha proporcionado una URL",
            invalid_url: "La URL proporcionada \"{url}\" no es válida. Prueba con una diferente.",
            short_code_not_found: "No se ha encontrado ninguna URL para el código corto \
                \"{short_code}\"",

            unknown_error: "Ocurrió un error inesperado",
        },
    }
}
