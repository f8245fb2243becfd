// ABOUTME: SQLite persistence for user accounts, workouts, and recovery records
// ABOUTME: Connection setup, idempotent schema migration, and shared row decoding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! # Database Management
//!
//! Accounts, workouts, and recovery records are stored in SQLite. Nested
//! documents (profile, preferences, exercises, tags, factors,
//! recommendations, feedback) are JSON text columns; workout metrics are
//! also kept as scalar columns so period statistics can be aggregated in
//! SQL. Timestamps are stored as
//! milliseconds since the Unix epoch.
//!
//! Every workout and recovery query is scoped by user id.

mod recovery;
mod users;
mod workouts;

pub use recovery::{RecoveryListQuery, RecoveryWithWorkout, WorkoutSummary};
pub use workouts::{SortOrder, WorkoutListQuery, WorkoutSortField};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Database manager for account, workout, and recovery storage
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns a database error if the directory cannot be created, the
    /// connection fails, or migrations fail
    pub async fn new(database_url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match database_url {
            // One connection that never expires, otherwise each pooled
            // connection would see its own empty in-memory database
            DatabaseUrl::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await,
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                SqlitePoolOptions::new()
                    .connect(&format!("{}?mode=rwc", database_url.to_connection_string()))
                    .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %database_url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns a database error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        let started = Instant::now();
        let result = async {
            self.migrate_users().await?;
            self.migrate_workouts().await?;
            self.migrate_recoveries().await
        }
        .await;

        AppLogger::log_database_operation(
            "migrate",
            "users,workouts,recoveries",
            result.is_ok(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        result
    }
}

/// Read a typed column, mapping decode failures to database errors
pub(crate) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| AppError::database(format!("Failed to read column {name}: {e}")))
}

/// Read a UUID stored as text
pub(crate) fn uuid_column(row: &SqliteRow, name: &str) -> AppResult<Uuid> {
    let value: String = column(row, name)?;
    Uuid::parse_str(&value)
        .map_err(|e| AppError::database(format!("Invalid UUID in column {name}: {e}")))
}

/// Read a timestamp stored as epoch milliseconds
pub(crate) fn timestamp_column(row: &SqliteRow, name: &str) -> AppResult<DateTime<Utc>> {
    let millis: i64 = column(row, name)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::database(format!("Invalid timestamp in column {name}")))
}

/// Read a JSON document stored as text
pub(crate) fn json_column<T: DeserializeOwned>(row: &SqliteRow, name: &str) -> AppResult<T> {
    let value: String = column(row, name)?;
    Ok(serde_json::from_str(&value)?)
}

/// Read an optional JSON document stored as nullable text
pub(crate) fn optional_json_column<T: DeserializeOwned>(
    row: &SqliteRow,
    name: &str,
) -> AppResult<Option<T>> {
    let value: Option<String> = column(row, name)?;
    Ok(value.map(|v| serde_json::from_str(&v)).transpose()?)
}

/// Read a 0-100 score stored as an integer
pub(crate) fn score_column(row: &SqliteRow, name: &str) -> AppResult<u8> {
    let value: i64 = column(row, name)?;
    u8::try_from(value)
        .map_err(|_| AppError::database(format!("Score out of range in column {name}: {value}")))
}

pub(crate) fn count_column(row: &SqliteRow, name: &str) -> AppResult<u64> {
    let value: i64 = column(row, name)?;
    u64::try_from(value)
        .map_err(|_| AppError::database(format!("Negative count in column {name}: {value}")))
}

pub(crate) fn count_param(name: &str, value: u64) -> AppResult<i64> {
    i64::try_from(value)
        .map_err(|_| AppError::database(format!("Count too large for column {name}: {value}")))
}
