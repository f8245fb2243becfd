// ABOUTME: Route module organization for the LiftLog REST API
// ABOUTME: Domain route groups plus shared request parsing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! HTTP routes
//!
//! Each domain module exposes a `*Routes` type whose `routes` function
//! builds an axum router over the shared [`ServerResources`](crate::resources::ServerResources).
//! Handlers authenticate, validate, delegate to the database and the
//! intelligence crate, and serialize the result.

/// Registration, login, and token introspection routes
pub mod auth;
/// Health check routes
pub mod health;
/// Recovery tracking and recommendation routes
pub mod recovery;
/// Account profile routes
pub mod users;
/// Workout CRUD, statistics, and progress routes
pub mod workouts;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use recovery::RecoveryRoutes;
pub use users::UserRoutes;
pub use workouts::WorkoutRoutes;

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
///
/// # Errors
///
/// Returns `INVALID_INPUT` naming `field` when neither format matches
pub fn parse_date(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::invalid_input(format!("{field} must be a valid date")))
}

/// Parse a path id; ids that are not UUIDs cannot exist, so they are reported as missing
pub(crate) fn parse_id(resource: &str, id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id)
        .map_err(|_| AppError::not_found(resource).with_resource_id(id))
}
