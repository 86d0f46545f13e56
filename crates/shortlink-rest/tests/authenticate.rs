//! `POST /rest/authenticate` end to end.

mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::HeaderValue;
use common::{STUB_TOKEN, StubHttpClient, harness};
use serde_json::{Value, json};

#[tokio::test]
async fn missing_password_is_rejected_before_token_service() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .json(&json!({ "username": "admin" }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "INVALID_ARGUMENT");
    assert_eq!(
        body["message"],
        "You have to provide both \"username\" and \"password\""
    );
    assert_eq!(h.tokens.create_calls(), 0);
}

#[tokio::test]
async fn missing_username_in_form_is_rejected() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .form(&[("password", "secret")])
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(h.tokens.create_calls(), 0);
}

#[tokio::test]
async fn unparsable_body_counts_as_missing_fields() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "INVALID_ARGUMENT");
    assert_eq!(h.tokens.create_calls(), 0);
}

#[tokio::test]
async fn non_string_username_counts_as_missing() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .json(&json!({ "username": 5, "password": "secret" }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "INVALID_ARGUMENT");
    assert_eq!(h.tokens.create_calls(), 0);
}

#[tokio::test]
async fn valid_json_credentials_return_token() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .json(&json!({ "username": "admin", "password": "secret" }))
        .await;

    res.assert_status_ok();
    assert_eq!(res.json::<Value>(), json!({ "token": STUB_TOKEN }));
    assert_eq!(
        *h.tokens.created.lock().unwrap(),
        vec![("admin".to_string(), "secret".to_string())]
    );
}

#[tokio::test]
async fn valid_form_credentials_return_token() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .form(&[("username", "admin"), ("password", "secret")])
        .await;

    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["token"], STUB_TOKEN);
}

#[tokio::test]
async fn rejected_credentials_yield_generic_401() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .json(&json!({ "username": "mallory", "password": "guess" }))
        .await;

    res.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = res.json();
    assert_eq!(body["error"], "INVALID_CREDENTIALS");
    assert_eq!(body["message"], "Invalid username and/or password");
    assert!(!res.text().contains("mallory"));
    assert_eq!(h.tokens.create_calls(), 1);
}

#[tokio::test]
async fn messages_follow_accept_language() {
    let h = harness(StubHttpClient::succeeding());

    let res = h
        .server
        .post("/rest/authenticate")
        .add_header(ACCEPT_LANGUAGE, HeaderValue::from_static("es-ES,es;q=0.9"))
        .json(&json!({ "username": "mallory", "password": "guess" }))
        .await;

    res.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = res.json();
    assert_eq!(body["error"], "INVALID_CREDENTIALS");
    assert_eq!(body["message"], "Nombre de usuario y/o contraseña no válidos");
}
