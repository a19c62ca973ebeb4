//! Client tests against an `httpmock` backend.
//!
//! Mocks only answer requests that match their `when` clause, so header and
//! body expectations are checked by the mock and confirmed with `assert`.

use std::sync::Arc;

use engage_api::model::{LoginRequest, RegisterRequest};
use engage_api::{ApiClient, ApiConfig, ApiError, AuthService, Error, Feedback, MemoryTokenStore, TokenStore};
use httpmock::prelude::*;
use serde_json::json;

/// Nothing listens on the discard port.
const DEAD_URL: &str = "http://127.0.0.1:9/api";

const USER: &str = r#"{"id":7,"name":"Ada Agent","email":"ada@example.com","email_verified_at":null}"#;
const LOGIN_OK: &str =
    r#"{"token":"tok-123","user":{"id":7,"name":"Ada Agent","email":"ada@example.com","email_verified_at":"2024-03-01T09:30:00.000000Z"}}"#;

fn auth(server: &MockServer, tokens: MemoryTokenStore) -> AuthService {
    let config = ApiConfig::new(&server.url("/api")).unwrap();
    AuthService::new(ApiClient::new(config, Arc::new(tokens)))
}

// =============================================================================
// Headers
// =============================================================================

#[tokio::test]
async fn test_json_headers_without_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/user")
                .header("accept", "application/json")
                .header("content-type", "application/json")
                .header_missing("authorization");
            then.status(200).header("content-type", "application/json").body(USER);
        })
        .await;

    let user = auth(&server, MemoryTokenStore::new()).current_user().await.unwrap();

    mock.assert_async().await;
    assert_eq!(user.email, "ada@example.com");
    assert!(!user.is_verified());
}

#[tokio::test]
async fn test_stored_token_is_sent_as_bearer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/user")
                .header("authorization", "Bearer abc")
                .header("accept", "application/json");
            then.status(200).header("content-type", "application/json").body(USER);
        })
        .await;

    auth(&server, MemoryTokenStore::with_token("abc"))
        .current_user()
        .await
        .unwrap();

    mock.assert_async().await;
}

// =============================================================================
// Login / logout
// =============================================================================

#[tokio::test]
async fn test_login_persists_token_for_later_requests() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/login")
                .header_missing("authorization")
                .json_body(json!({"email": "ada@example.com", "password": "secret"}));
            then.status(200).header("content-type", "application/json").body(LOGIN_OK);
        })
        .await;
    let user = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user").header("authorization", "Bearer tok-123");
            then.status(200).header("content-type", "application/json").body(USER);
        })
        .await;
    let tokens = MemoryTokenStore::new();
    let auth = auth(&server, tokens.clone());

    let response = auth
        .login(&LoginRequest::new("ada@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(response.token, "tok-123");
    assert!(response.user.is_verified());
    assert_eq!(tokens.get().await.unwrap().as_deref(), Some("tok-123"));
    assert!(auth.is_authenticated().await.unwrap());

    auth.current_user().await.unwrap();

    login.assert_async().await;
    user.assert_async().await;
}

#[tokio::test]
async fn test_failed_login_does_not_store_token() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/login");
            then.status(401)
                .header("content-type", "application/json")
                .body(r#"{"message":"Invalid credentials."}"#);
        })
        .await;
    let tokens = MemoryTokenStore::new();

    let err = auth(&server, tokens.clone())
        .login(&LoginRequest::new("ada@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.as_api().and_then(ApiError::status_code), Some(401));
    assert_eq!(err.user_message("Login failed."), "Invalid credentials.");
    assert_eq!(tokens.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/logout").header("authorization", "Bearer tok-123");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"message":"Logged out"}"#);
        })
        .await;
    let tokens = MemoryTokenStore::with_token("tok-123");

    auth(&server, tokens.clone()).logout().await.unwrap();

    mock.assert_async().await;
    assert_eq!(tokens.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_token_even_when_request_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/logout");
            then.status(500).body("oops");
        })
        .await;
    let tokens = MemoryTokenStore::with_token("tok-123");

    let result = auth(&server, tokens.clone()).logout().await;

    assert!(matches!(result, Err(Error::Api(ApiError::Http { status: 500, .. }))));
    assert_eq!(tokens.get().await.unwrap(), None);
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_422_maps_to_field_feedback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/register").json_body(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "secret123",
                "password_confirmation": "secret321",
            }));
            then.status(422).header("content-type", "application/json").json_body(json!({
                "message": "The given data was invalid.",
                "errors": {
                    "email": ["The email has already been taken."],
                    "password": ["The password confirmation does not match."],
                },
            }));
        })
        .await;

    let err = auth(&server, MemoryTokenStore::new())
        .register(&RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret123".into(),
            password_confirmation: "secret321".into(),
        })
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert!(matches!(api, ApiError::Validation { .. }));
    let Feedback::Fields(fields) = api.feedback(&["name", "email", "password"], "Registration failed.") else {
        panic!("expected field feedback");
    };
    assert_eq!(fields["email"], "The email has already been taken.");
    assert_eq!(fields["password"], "The password confirmation does not match.");
}

#[tokio::test]
async fn test_unexpected_error_shape_gives_generic_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/login");
            then.status(500)
                .header("content-type", "text/html")
                .body("<html>Server Error</html>");
        })
        .await;

    let err = auth(&server, MemoryTokenStore::new())
        .login(&LoginRequest::new("ada@example.com", "secret"))
        .await
        .unwrap_err();

    let fallback = "Login failed. Please check your credentials.";
    assert_eq!(err.user_message(fallback), fallback);
    assert_eq!(
        err.as_api().unwrap().feedback(&["email", "password"], fallback),
        Feedback::General(fallback.into())
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"not-a-number"}"#);
        })
        .await;

    let err = auth(&server, MemoryTokenStore::new()).current_user().await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Parse { body: Some(_), .. })));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = ApiConfig::new(DEAD_URL).unwrap();
    let auth = AuthService::new(ApiClient::new(config, Arc::new(MemoryTokenStore::new())));

    let err = auth
        .login(&LoginRequest::new("ada@example.com", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Network(_))));
    assert_eq!(err.user_message("Login failed."), "Login failed.");
}

// =============================================================================
// Email verification
// =============================================================================

#[tokio::test]
async fn test_verification_endpoints() {
    let server = MockServer::start_async().await;
    let notify = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/email/verification-notification")
                .header("authorization", "Bearer t")
                .json_body(json!({}));
            then.status(202)
                .header("content-type", "application/json")
                .body(r#"{"message":"Verification link sent"}"#);
        })
        .await;
    let verify = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/email/verify/7/a1b2c3");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"message":"Email verified"}"#);
        })
        .await;
    let auth = auth(&server, MemoryTokenStore::with_token("t"));

    let sent = auth.send_verification_email().await.unwrap();
    assert_eq!(sent.message, "Verification link sent");
    let verified = auth.verify_email(7, "a1b2c3").await.unwrap();
    assert_eq!(verified.message, "Email verified");

    notify.assert_async().await;
    verify.assert_async().await;
}
