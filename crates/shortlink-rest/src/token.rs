//! REST API tokens.
//!
//! A [`TokenService`] turns a username/password pair into an opaque bearer
//! token and later resolves that token on protected routes.  Tokens expire
//! after a fixed idle period; every successful use pushes the expiration
//! forward.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestToken {
    /// Opaque value sent back as `Authorization: Bearer <token>`.
    pub token: String,
    /// Instant after which the token is refused.
    pub expiration: DateTime<Utc>,
}

impl RestToken {
    fn issue(ttl: TimeDelta) -> Self {
        Self {
            token: uuid::Uuid::new_v4().to_string(),
            expiration: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expiration <= Utc::now()
    }
}

/// Credentials rejected by [`TokenService::create_token`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials for user \"{username}\"")]
    InvalidCredentials { username: String },
}

/// A presented token could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("auth token not found")]
    NotFound,

    #[error("auth token expired at {0}")]
    Expired(DateTime<Utc>),
}

#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issue a token for `username` if `password` matches.
    async fn create_token(&self, username: &str, password: &str) -> Result<RestToken, AuthError>;

    /// Resolve a previously issued, unexpired token.
    async fn get_by_token(&self, token: &str) -> Result<RestToken, TokenError>;

    /// Push the expiration of `token` one full lifetime into the future.
    async fn refresh(&self, token: &str) -> Result<RestToken, TokenError>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// The single account allowed to use the REST API.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct InMemoryTokenService {
    credentials: AdminCredentials,
    ttl: TimeDelta,
    tokens: RwLock<HashMap<String, RestToken>>,
}

impl InMemoryTokenService {
    pub fn new(credentials: AdminCredentials, ttl: TimeDelta) -> Self {
        Self {
            credentials,
            ttl,
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Look `token` up, evicting it if it has expired.
    fn live_token<'a>(
        tokens: &'a mut HashMap<String, RestToken>,
        token: &str,
    ) -> Result<&'a mut RestToken, TokenError> {
        let expired = tokens
            .get(token)
            .ok_or(TokenError::NotFound)?
            .is_expired();

        if expired {
            if let Some(evicted) = tokens.remove(token) {
                debug!(expiration = %evicted.expiration, "expired auth token evicted");
                return Err(TokenError::Expired(evicted.expiration));
            }
        }

        tokens.get_mut(token).ok_or(TokenError::NotFound)
    }
}

#[async_trait]
impl TokenService for InMemoryTokenService {
    async fn create_token(&self, username: &str, password: &str) -> Result<RestToken, AuthError> {
        if username != self.credentials.username || password != self.credentials.password {
            return Err(AuthError::InvalidCredentials {
                username: username.to_string(),
            });
        }

        let token = RestToken::issue(self.ttl);
        self.tokens
            .write()
            .await
            .insert(token.token.clone(), token.clone());

        info!(username, expiration = %token.expiration, "auth token created");
        Ok(token)
    }

    async fn get_by_token(&self, token: &str) -> Result<RestToken, TokenError> {
        let mut tokens = self.tokens.write().await;
        Self::live_token(&mut tokens, token).map(|t| t.clone())
    }

    async fn refresh(&self, token: &str) -> Result<RestToken, TokenError> {
        let mut tokens = self.tokens.write().await;
        let live = Self::live_token(&mut tokens, token)?;
        live.expiration = Utc::now() + self.ttl;
        Ok(live.clone())
    }
}
