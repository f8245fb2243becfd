// ABOUTME: Recovery record database operations: create, list with linked workout, update, feedback
// ABOUTME: Factors, recommendations, and feedback are JSON documents; scores are integer columns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use super::{
    column, json_column, optional_json_column, score_column, timestamp_column, uuid_column,
    Database,
};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use liftlog_core::models::{Feedback, RecoveryRecord};
use liftlog_core::pagination::PageRequest;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use tracing::debug;
use uuid::Uuid;

const RECOVERY_COLUMNS: &str = "r.id, r.user_id, r.workout_id, r.date, r.factors, \
     r.recovery_score, r.readiness_score, r.recommendations, r.feedback, r.created_at";

/// Name and date of the workout a recovery record follows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    /// Workout ID
    pub id: Uuid,
    /// Workout name
    pub name: String,
    /// Workout date
    pub date: DateTime<Utc>,
}

/// A recovery record with its linked workout, as shown in lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryWithWorkout {
    /// The record itself
    #[serde(flatten)]
    pub record: RecoveryRecord,
    /// The linked workout, absent if it has since been deleted
    pub workout: Option<WorkoutSummary>,
}

/// Paging and date filtering of a recovery list
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryListQuery {
    /// Page to return
    pub page: PageRequest,
    /// Inclusive lower bound on the record date
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the record date
    pub end_date: Option<DateTime<Utc>>,
}

fn recovery_from_row(row: &SqliteRow) -> AppResult<RecoveryRecord> {
    Ok(RecoveryRecord {
        id: uuid_column(row, "id")?,
        user_id: uuid_column(row, "user_id")?,
        workout_id: uuid_column(row, "workout_id")?,
        date: timestamp_column(row, "date")?,
        factors: json_column(row, "factors")?,
        recovery_score: score_column(row, "recovery_score")?,
        readiness_score: score_column(row, "readiness_score")?,
        recommendations: optional_json_column(row, "recommendations")?,
        feedback: optional_json_column(row, "feedback")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

fn recovery_with_workout_from_row(row: &SqliteRow) -> AppResult<RecoveryWithWorkout> {
    let record = recovery_from_row(row)?;
    let name: Option<String> = column(row, "workout_name")?;
    let date: Option<i64> = column(row, "workout_date")?;

    let workout = match (name, date.and_then(DateTime::from_timestamp_millis)) {
        (Some(name), Some(date)) => Some(WorkoutSummary {
            id: record.workout_id,
            name,
            date,
        }),
        _ => None,
    };

    Ok(RecoveryWithWorkout { record, workout })
}

impl Database {
    /// Create recoveries table and indexes
    pub(super) async fn migrate_recoveries(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recoveries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                workout_id TEXT NOT NULL,
                date INTEGER NOT NULL,
                factors TEXT NOT NULL,
                recovery_score INTEGER NOT NULL,
                readiness_score INTEGER NOT NULL,
                recommendations TEXT,
                feedback TEXT,
                created_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recoveries table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recoveries_user_date ON recoveries(user_id, date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recoveries index: {e}")))?;

        Ok(())
    }

    /// Insert a scored recovery record
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn create_recovery(&self, record: &RecoveryRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO recoveries (
                id, user_id, workout_id, date, factors, recovery_score, readiness_score,
                recommendations, feedback, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.workout_id.to_string())
        .bind(record.date.timestamp_millis())
        .bind(serde_json::to_string(&record.factors)?)
        .bind(i64::from(record.recovery_score))
        .bind(i64::from(record.readiness_score))
        .bind(record.recommendations.as_ref().map(serde_json::to_string).transpose()?)
        .bind(record.feedback.as_ref().map(serde_json::to_string).transpose()?)
        .bind(record.created_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recovery record: {e}")))?;

        debug!(
            recovery.id = %record.id,
            user.id = %record.user_id,
            recovery_score = record.recovery_score,
            "Recovery record stored"
        );
        Ok(())
    }

    /// Get one of the user's recovery records
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_recovery(
        &self,
        user_id: Uuid,
        recovery_id: Uuid,
    ) -> AppResult<Option<RecoveryRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {RECOVERY_COLUMNS} FROM recoveries r WHERE r.id = $1 AND r.user_id = $2"
        ))
        .bind(recovery_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recovery record: {e}")))?;

        row.as_ref().map(recovery_from_row).transpose()
    }

    /// List a page of the user's recovery records, newest first, with the total count
    ///
    /// # Errors
    ///
    /// Returns an error if a query or row decoding fails
    pub async fn list_recoveries(
        &self,
        user_id: Uuid,
        query: &RecoveryListQuery,
    ) -> AppResult<(Vec<RecoveryWithWorkout>, u64)> {
        let start = query.start_date.map_or(i64::MIN, |d| d.timestamp_millis());
        let end = query.end_date.map_or(i64::MAX, |d| d.timestamp_millis());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM recoveries WHERE user_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(user_id.to_string())
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count recovery records: {e}")))?;

        let rows = sqlx::query(&format!(
            "SELECT {RECOVERY_COLUMNS}, w.name AS workout_name, w.date AS workout_date \
             FROM recoveries r \
             LEFT JOIN workouts w ON w.id = r.workout_id AND w.user_id = r.user_id \
             WHERE r.user_id = $1 AND r.date >= $2 AND r.date <= $3 \
             ORDER BY r.date DESC, r.created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(user_id.to_string())
        .bind(start)
        .bind(end)
        .bind(i64::from(query.page.limit))
        .bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recovery records: {e}")))?;

        let records = rows
            .iter()
            .map(recovery_with_workout_from_row)
            .collect::<AppResult<Vec<_>>>()?;
        Ok((records, u64::try_from(total).unwrap_or_default()))
    }

    /// Replace a stored recovery record; returns `false` when it does not exist for the user
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the update fails
    pub async fn update_recovery(&self, record: &RecoveryRecord) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE recoveries SET
                workout_id = $3, date = $4, factors = $5, recovery_score = $6,
                readiness_score = $7, recommendations = $8, feedback = $9
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.workout_id.to_string())
        .bind(record.date.timestamp_millis())
        .bind(serde_json::to_string(&record.factors)?)
        .bind(i64::from(record.recovery_score))
        .bind(i64::from(record.readiness_score))
        .bind(record.recommendations.as_ref().map(serde_json::to_string).transpose()?)
        .bind(record.feedback.as_ref().map(serde_json::to_string).transpose()?)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recovery record: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the feedback of one of the user's records, leaving everything else untouched
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the update, or the reload fails
    pub async fn set_recovery_feedback(
        &self,
        user_id: Uuid,
        recovery_id: Uuid,
        feedback: &Feedback,
    ) -> AppResult<Option<RecoveryRecord>> {
        let result = sqlx::query("UPDATE recoveries SET feedback = $3 WHERE id = $1 AND user_id = $2")
            .bind(recovery_id.to_string())
            .bind(user_id.to_string())
            .bind(serde_json::to_string(feedback)?)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to store feedback: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_recovery(user_id, recovery_id).await
    }

    /// The user's most recent recovery records, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn recent_recoveries(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> AppResult<Vec<RecoveryRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECOVERY_COLUMNS} FROM recoveries r WHERE r.user_id = $1 \
             ORDER BY r.date DESC, r.created_at DESC LIMIT $2"
        ))
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recent recovery records: {e}")))?;

        rows.iter().map(recovery_from_row).collect()
    }
}
