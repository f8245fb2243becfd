// ABOUTME: User account database operations: registration, credential lookup, profile updates
// ABOUTME: Email and username are unique; the bcrypt hash never leaves this module inside a User
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use super::{column, json_column, timestamp_column, uuid_column, Database};
use crate::constants::error_messages;
use crate::errors::{AppError, AppResult};
use liftlog_core::models::User;
use sqlx::sqlite::SqliteRow;
use tracing::debug;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, profile, preferences, created_at, updated_at";

fn user_from_row(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: uuid_column(row, "id")?,
        username: column(row, "username")?,
        email: column(row, "email")?,
        profile: json_column(row, "profile")?,
        preferences: json_column(row, "preferences")?,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}

/// Unique index collisions become `RESOURCE_ALREADY_EXISTS`
fn write_error(action: &str, error: &sqlx::Error) -> AppError {
    match error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::already_exists(error_messages::USER_ALREADY_EXISTS)
        }
        _ => AppError::database(format!("Failed to {action}: {error}")),
    }
}

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE COLLATE NOCASE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                profile TEXT NOT NULL,
                preferences TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        Ok(())
    }

    /// Insert a new account with its password hash
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` when the email or username is taken,
    /// or a database error if the insert fails
    pub async fn create_user(&self, user: &User, password_hash: &str) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, username, email, password_hash, profile, preferences, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(serde_json::to_string(&user.profile)?)
        .bind(serde_json::to_string(&user.preferences)?)
        .bind(user.created_at.timestamp_millis())
        .bind(user.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create user", &e))?;

        debug!(user.id = %user.id, "User stored");
        Ok(())
    }

    /// Fetch an account by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Fetch an account and its password hash by (lowercased) email
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user_credentials(&self, email: &str) -> AppResult<Option<(User, String)>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.as_ref()
            .map(|row| Ok((user_from_row(row)?, column(row, "password_hash")?)))
            .transpose()
    }

    /// Whether another account already uses `email` or `username`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn user_exists(
        &self,
        email: &str,
        username: &str,
        excluding: Option<Uuid>,
    ) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM users
            WHERE (email = $1 OR username = $2 COLLATE NOCASE) AND id != COALESCE($3, '')
            ",
        )
        .bind(email)
        .bind(username)
        .bind(excluding.map(|id| id.to_string()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check existing users: {e}")))?;

        Ok(count > 0)
    }

    /// Replace the editable fields of an account; returns `false` when it does not exist
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` when the new email or username is taken,
    /// or a database error if the update fails
    pub async fn update_user(&self, user: &User) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                username = $2, email = $3, profile = $4, preferences = $5, updated_at = $6
            WHERE id = $1
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(serde_json::to_string(&user.profile)?)
        .bind(serde_json::to_string(&user.preferences)?)
        .bind(user.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update user", &e))?;

        Ok(result.rows_affected() > 0)
    }
}
