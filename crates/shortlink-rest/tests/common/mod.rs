//! Test doubles shared by the router tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{TimeDelta, Utc};
use shortlink_core::{
    HttpClient, HttpClientError, Method, RequestOptions, ShortUrlService, UrlShortenerOptions,
    UrlValidator,
};
use shortlink_rest::i18n::CatalogTranslator;
use shortlink_rest::token::{AuthError, RestToken, TokenError, TokenService};
use shortlink_rest::{AppState, build_router};

pub const STUB_TOKEN: &str = "stub-token";

/// Accepts `admin` / `secret` and records every `create_token` call.
#[derive(Default)]
pub struct StubTokenService {
    pub created: Mutex<Vec<(String, String)>>,
    pub refreshed: AtomicUsize,
}

impl StubTokenService {
    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    fn token() -> RestToken {
        RestToken {
            token: STUB_TOKEN.to_string(),
            expiration: Utc::now() + TimeDelta::minutes(20),
        }
    }
}

#[async_trait]
impl TokenService for StubTokenService {
    async fn create_token(&self, username: &str, password: &str) -> Result<RestToken, AuthError> {
        self.created
            .lock()
            .unwrap()
            .push((username.to_string(), password.to_string()));
        if username == "admin" && password == "secret" {
            Ok(Self::token())
        } else {
            Err(AuthError::InvalidCredentials {
                username: username.to_string(),
            })
        }
    }

    async fn get_by_token(&self, token: &str) -> Result<RestToken, TokenError> {
        if token == STUB_TOKEN {
            Ok(Self::token())
        } else {
            Err(TokenError::NotFound)
        }
    }

    async fn refresh(&self, token: &str) -> Result<RestToken, TokenError> {
        self.refreshed.fetch_add(1, Ordering::SeqCst);
        self.get_by_token(token).await
    }
}

/// Counts outbound probes and answers with a canned outcome.
pub struct StubHttpClient {
    pub calls: AtomicUsize,
    outcome: Result<(), HttpClientError>,
}

impl StubHttpClient {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Err(HttpClientError::Transport("connection refused".into())),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn request(
        &self,
        _method: Method,
        _url: &str,
        _options: &RequestOptions,
    ) -> Result<(), HttpClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

pub struct Harness {
    pub server: TestServer,
    pub tokens: Arc<StubTokenService>,
    pub http: Arc<StubHttpClient>,
}

pub fn harness(http: Arc<StubHttpClient>) -> Harness {
    let tokens = Arc::new(StubTokenService::default());
    let options = UrlShortenerOptions::default();

    let state = Arc::new(AppState {
        tokens: tokens.clone(),
        translator: Arc::new(CatalogTranslator),
        short_urls: ShortUrlService::new(UrlValidator::new(http.clone(), options), options),
        short_domain: "https://s.test".to_string(),
    });

    Harness {
        server: TestServer::new(build_router(state)).unwrap(),
        tokens,
        http,
    }
}
