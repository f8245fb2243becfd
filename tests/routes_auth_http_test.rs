// ABOUTME: HTTP integration tests for registration, login, and the account profile routes
// ABOUTME: Covers token issuance, duplicate accounts, field validation, and profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn registration() -> Value {
    json!({
        "username": "testuser",
        "email": "test@example.com",
        "password": "password123",
        "profile": {
            "age": 25,
            "weight": 70,
            "height": 175,
            "fitnessLevel": "beginner"
        }
    })
}

async fn register(app: &axum::Router, body: &Value) -> Value {
    let response = AxumTestRequest::post("/api/auth/register")
        .json(body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    response.json()
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let (_, app, _, _) = common::setup_app().await;

    let body = register(&app, &registration()).await;

    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "testuser");
    assert_eq!(body["user"]["email"], "test@example.com");
    assert_eq!(body["user"]["profile"]["fitnessLevel"], "beginner");
    assert_eq!(body["user"]["preferences"]["units"], "metric");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_registered_token_authenticates() {
    let (_, app, _, _) = common::setup_app().await;
    let body = register(&app, &registration()).await;
    let token = body["token"].as_str().unwrap();

    let response = AxumTestRequest::get("/api/auth/me")
        .bearer(token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let me: Value = response.json();
    assert_eq!(me["user"]["id"], body["user"]["id"]);

    let response = AxumTestRequest::get("/api/workouts")
        .bearer(token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (_, app, _, _) = common::setup_app().await;
    register(&app, &registration()).await;

    let mut again = registration();
    again["username"] = json!("otheruser");
    again["email"] = json!("TEST@example.com");
    let response = AxumTestRequest::post("/api/auth/register")
        .json(&again)
        .send(app)
        .await;
    assert_eq!(response.status(), 409);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_duplicate_username_ignores_case() {
    let (_, app, _, _) = common::setup_app().await;
    register(&app, &registration()).await;

    let mut again = registration();
    again["username"] = json!("TestUser");
    again["email"] = json!("other@example.com");
    let response = AxumTestRequest::post("/api/auth/register")
        .json(&again)
        .send(app)
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let (_, app, _, _) = common::setup_app().await;

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "ab",
            "email": "invalid-email",
            "password": "123"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    let fields: Vec<&str> = body["error"]["details"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "email", "password"]);
}

#[tokio::test]
async fn test_register_rejects_out_of_range_profile() {
    let (_, app, _, _) = common::setup_app().await;
    let mut body = registration();
    body["profile"]["age"] = json!(12);
    body["profile"]["height"] = json!(300);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&body)
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["errors"][0]["field"], "profile.age");
    assert_eq!(body["error"]["details"]["errors"][1]["field"], "profile.height");
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let (_, app, _, _) = common::setup_app().await;
    let registered = register(&app, &registration()).await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": " Test@Example.com ", "password": "password123" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["id"], registered["user"]["id"]);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let (_, app, _, _) = common::setup_app().await;
    register(&app, &registration()).await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "test@example.com", "password": "wrongpassword" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_INVALID");
    assert_eq!(body["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let (_, app, _, _) = common::setup_app().await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let (_, app, _, _) = common::setup_app().await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "test@example.com" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_requires_token() {
    let (_, app, _, _) = common::setup_app().await;

    let response = AxumTestRequest::get("/api/users/profile").send(app).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_profile_for_token_without_account() {
    let (_, app, _, token) = common::setup_app().await;

    let response = AxumTestRequest::get("/api/users/profile")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_update_profile_merges_fields() {
    let (_, app, _, _) = common::setup_app().await;
    let registered = register(&app, &registration()).await;
    let token = registered["token"].as_str().unwrap();

    let response = AxumTestRequest::put("/api/users/profile")
        .bearer(token)
        .json(&json!({
            "profile": { "weight": 72.5, "fitnessLevel": "intermediate", "goals": ["strength", " "] },
            "preferences": { "units": "imperial", "notifications": { "workoutReminders": false } }
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get("/api/users/profile")
        .bearer(token)
        .send(app)
        .await;
    let body: Value = response.json();
    let user = &body["user"];
    assert_eq!(user["username"], "testuser");
    assert_eq!(user["profile"]["weight"], 72.5);
    assert_eq!(user["profile"]["fitnessLevel"], "intermediate");
    assert_eq!(user["profile"]["goals"], json!(["strength"]));
    assert!(user["profile"].get("age").is_none());
    assert_eq!(user["preferences"]["units"], "imperial");
    assert_eq!(user["preferences"]["notifications"]["recoveryReminders"], true);
    assert_eq!(user["preferences"]["notifications"]["workoutReminders"], false);
}

#[tokio::test]
async fn test_update_profile_validates() {
    let (_, app, _, _) = common::setup_app().await;
    let registered = register(&app, &registration()).await;
    let token = registered["token"].as_str().unwrap();

    let response = AxumTestRequest::put("/api/users/profile")
        .bearer(token)
        .json(&json!({ "email": "not-an-email", "profile": { "weight": 10 } }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_update_profile_to_taken_email() {
    let (_, app, _, _) = common::setup_app().await;
    register(&app, &registration()).await;

    let mut second = registration();
    second["username"] = json!("second");
    second["email"] = json!("second@example.com");
    let second = register(&app, &second).await;
    let token = second["token"].as_str().unwrap();

    let response = AxumTestRequest::put("/api/users/profile")
        .bearer(token)
        .json(&json!({ "email": "test@example.com" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 409);

    let response = AxumTestRequest::put("/api/users/profile")
        .bearer(token)
        .json(&json!({ "email": "second@example.com", "username": "second" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
}
