// ABOUTME: Route handlers for the caller's own account profile
// ABOUTME: Also owns the account field validation shared with registration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use crate::constants::{error_messages, limits};
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use liftlog_core::models::{User, UserPreferences, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Wrapper for endpoints returning a single account
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// The account
    pub user: User,
}

/// Body of a profile update; omitted fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    /// New username
    pub username: Option<String>,
    /// New login email
    pub email: Option<String>,
    /// Replacement body profile
    pub profile: Option<UserProfile>,
    /// Replacement preferences
    pub preferences: Option<UserPreferences>,
}

/// Per-field validation failures reported together
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<serde_json::Value>);

impl FieldErrors {
    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(json!({ "field": field, "message": message.into() }));
    }

    pub(crate) fn into_result(self) -> AppResult<()> {
        if self.0.is_empty() {
            return Ok(());
        }
        Err(AppError::invalid_input("Validation failed")
            .with_details(json!({ "errors": self.0 })))
    }
}

/// Lowercased, trimmed email
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    if email.len() <= 5 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.contains('@') && domain.contains('.') && !domain.ends_with('.')
}

pub(crate) fn check_username(username: &str, errors: &mut FieldErrors) {
    let length = username.chars().count();
    if !(limits::MIN_USERNAME_LENGTH..=limits::MAX_USERNAME_LENGTH).contains(&length) {
        errors.push(
            "username",
            format!(
                "Username must be between {} and {} characters",
                limits::MIN_USERNAME_LENGTH,
                limits::MAX_USERNAME_LENGTH
            ),
        );
    } else if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        errors.push(
            "username",
            "Username may only contain letters, digits, underscores, and hyphens",
        );
    }
}

pub(crate) fn check_email(email: &str, errors: &mut FieldErrors) {
    if !is_valid_email(email) {
        errors.push("email", "Please provide a valid email");
    }
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && (min..=max).contains(&value)
}

/// Validate the body profile and drop blank goals
pub(crate) fn check_profile(mut profile: UserProfile, errors: &mut FieldErrors) -> UserProfile {
    if let Some(age) = profile.age {
        if !(limits::MIN_AGE..=limits::MAX_AGE).contains(&age) {
            errors.push(
                "profile.age",
                format!("Age must be between {} and {}", limits::MIN_AGE, limits::MAX_AGE),
            );
        }
    }
    if let Some(weight) = profile.weight {
        if !in_range(weight, limits::MIN_BODY_WEIGHT_KG, limits::MAX_BODY_WEIGHT_KG) {
            errors.push(
                "profile.weight",
                format!(
                    "Weight must be between {} and {} kg",
                    limits::MIN_BODY_WEIGHT_KG,
                    limits::MAX_BODY_WEIGHT_KG
                ),
            );
        }
    }
    if let Some(height) = profile.height {
        if !in_range(height, limits::MIN_HEIGHT_CM, limits::MAX_HEIGHT_CM) {
            errors.push(
                "profile.height",
                format!(
                    "Height must be between {} and {} cm",
                    limits::MIN_HEIGHT_CM,
                    limits::MAX_HEIGHT_CM
                ),
            );
        }
    }

    profile.goals = profile
        .goals
        .into_iter()
        .map(|goal| goal.trim().to_owned())
        .filter(|goal| !goal.is_empty())
        .collect();
    profile
}

/// User profile routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .with_state(resources)
    }

    /// Handle GET /api/users/profile - The caller's account
    async fn handle_get_profile(
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

    /// Handle PUT /api/users/profile - Update the caller's account
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let mut user = resources
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User").with_resource_id(user_id.to_string()))?;

        let mut errors = FieldErrors::default();
        if let Some(username) = body.username {
            let username = username.trim().to_owned();
            check_username(&username, &mut errors);
            user.username = username;
        }
        if let Some(email) = body.email {
            let email = normalize_email(&email);
            check_email(&email, &mut errors);
            user.email = email;
        }
        if let Some(profile) = body.profile {
            user.profile = check_profile(profile, &mut errors);
        }
        errors.into_result()?;

        if let Some(preferences) = body.preferences {
            user.preferences = preferences;
        }

        if resources
            .database
            .user_exists(&user.email, &user.username, Some(user_id))
            .await?
        {
            return Err(AppError::already_exists(error_messages::USER_ALREADY_EXISTS));
        }

        user.updated_at = Utc::now();
        if !resources.database.update_user(&user).await? {
            return Err(AppError::not_found("User").with_resource_id(user_id.to_string()));
        }

        info!(user.id = %user_id, "Profile updated");
        Ok((StatusCode::OK, Json(UserResponse { user })).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("test@example.com"));
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@example."));
    }

    #[test]
    fn test_errors_collected_per_field() {
        let mut errors = FieldErrors::default();
        check_username("ab", &mut errors);
        check_email("invalid-email", &mut errors);
        let profile = check_profile(
            UserProfile {
                age: Some(12),
                goals: vec!["  strength ".into(), " ".into()],
                ..UserProfile::default()
            },
            &mut errors,
        );

        assert_eq!(profile.goals, vec!["strength".to_owned()]);
        let error = errors.into_result().err();
        let details = error.map(|e| e.context.details).unwrap_or_default();
        assert_eq!(details["errors"].as_array().map(Vec::len), Some(3));
        assert_eq!(details["errors"][0]["field"], "username");
    }
}
