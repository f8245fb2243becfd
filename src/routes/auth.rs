// ABOUTME: Account registration and login route handlers issuing JWT bearer tokens
// ABOUTME: Passwords are bcrypt-hashed on a blocking thread and never returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Authentication routes
//!
//! Registration and login both answer with `{ token, user }`. A failed
//! login reports the same message whether the email is unknown or the
//! password is wrong.

use super::users::{
    check_email, check_profile, check_username, normalize_email, FieldErrors, UserResponse,
};
use crate::constants::{error_messages, limits};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use liftlog_core::models::{User, UserProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Unique display handle
    #[serde(default)]
    pub username: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
    /// Optional body profile
    pub profile: Option<UserProfile>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Successful registration or login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The account
    pub user: User,
}

async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))
}

async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
}

fn invalid_credentials() -> AppError {
    AppError::auth_invalid(error_messages::INVALID_CREDENTIALS)
}

/// Account registration and login routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register - Create an account and sign it in
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let username = body.username.trim().to_owned();
        let email = normalize_email(&body.email);

        let mut errors = FieldErrors::default();
        check_username(&username, &mut errors);
        check_email(&email, &mut errors);
        if body.password.chars().count() < limits::MIN_PASSWORD_LENGTH {
            errors.push(
                "password",
                format!(
                    "Password must be at least {} characters",
                    limits::MIN_PASSWORD_LENGTH
                ),
            );
        }
        let profile = check_profile(body.profile.unwrap_or_default(), &mut errors);
        errors.into_result()?;

        if resources.database.user_exists(&email, &username, None).await? {
            warn!(email = %email, "Registration rejected for existing account");
            return Err(AppError::already_exists(error_messages::USER_ALREADY_EXISTS));
        }

        let password_hash = hash_password(body.password, resources.config.auth.bcrypt_cost).await?;
        let user = User::new(username, email, profile);
        resources.database.create_user(&user, &password_hash).await?;

        let token = resources.auth_manager.generate_token(user.id)?;
        AppLogger::log_auth_event(Some(user.id), "register", true);
        info!(user.id = %user.id, "User registered");

        Ok((StatusCode::CREATED, Json(AuthResponse { token, user })).into_response())
    }

    /// Handle POST /api/auth/login - Exchange credentials for a token
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let email = normalize_email(&body.email);
        if email.is_empty() || body.password.is_empty() {
            return Err(AppError::invalid_input("Email and password are required"));
        }

        let Some((user, password_hash)) = resources.database.get_user_credentials(&email).await?
        else {
            AppLogger::log_auth_event(None, "login", false);
            return Err(invalid_credentials());
        };

        if !verify_password(body.password, password_hash).await? {
            AppLogger::log_auth_event(Some(user.id), "login", false);
            return Err(invalid_credentials());
        }

        let token = resources.auth_manager.generate_token(user.id)?;
        AppLogger::log_auth_event(Some(user.id), "login", true);

        Ok((StatusCode::OK, Json(AuthResponse { token, user })).into_response())
    }

    /// Handle GET /api/auth/me - The account behind the bearer token
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let user = resources
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User").with_resource_id(user_id.to_string()))?;

        Ok((StatusCode::OK, Json(UserResponse { user })).into_response())
    }
}
