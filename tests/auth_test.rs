// ABOUTME: Tests for JWT bearer token issuance and validation
// ABOUTME: Covers round trips, expiry, foreign secrets, and the HTTP status of each failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use chrono::Duration;
use helpers::axum_test::AxumTestRequest;
use liftlog::auth::{AuthManager, JwtValidationError};
use liftlog::errors::ErrorCode;
use serde_json::Value;
use uuid::Uuid;

#[test]
fn test_token_round_trip() {
    let manager = AuthManager::new(common::TEST_JWT_SECRET, 24);
    let user_id = Uuid::new_v4();

    let token = manager.generate_token(user_id).unwrap();
    assert_eq!(manager.user_id_from_token(&token).unwrap(), user_id);

    let claims = manager.validate_token(&token).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_expired_token() {
    let manager = AuthManager::new(common::TEST_JWT_SECRET, 24);
    let token = manager
        .generate_token_with_expiry(Uuid::new_v4(), Duration::hours(-1))
        .unwrap();

    assert!(matches!(
        manager.validate_token(&token),
        Err(JwtValidationError::TokenExpired { .. })
    ));
    let error = manager.user_id_from_token(&token).unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthExpired);
}

#[test]
fn test_foreign_secret_rejected() {
    let issuer = AuthManager::new(b"some-other-secret", 24);
    let verifier = AuthManager::new(common::TEST_JWT_SECRET, 24);
    let token = issuer.generate_token(Uuid::new_v4()).unwrap();

    assert!(matches!(
        verifier.validate_token(&token),
        Err(JwtValidationError::TokenInvalid { .. })
    ));
    let error = verifier.user_id_from_token(&token).unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthInvalid);
}

#[tokio::test]
async fn test_expired_token_is_forbidden_over_http() {
    let (resources, app, _, _) = common::setup_app().await;
    let token = resources
        .auth_manager
        .generate_token_with_expiry(Uuid::new_v4(), Duration::hours(-2))
        .unwrap();

    let response = AxumTestRequest::get("/api/recovery")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 403);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_EXPIRED");
}

#[tokio::test]
async fn test_malformed_header_requires_auth() {
    let (_, app, _, token) = common::setup_app().await;

    let response = AxumTestRequest::get("/api/recovery")
        .header("authorization", &format!("Token {token}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}
