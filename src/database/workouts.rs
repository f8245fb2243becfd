// ABOUTME: Workout database operations: CRUD, sorted pagination, recent history, and period stats
// ABOUTME: Stores exercises as JSON with metrics mirrored into scalar columns for SQL aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use super::{
    column, count_column, count_param, json_column, timestamp_column, uuid_column, Database,
};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use liftlog_core::models::{Workout, WorkoutMetrics};
use liftlog_core::pagination::PageRequest;
use liftlog_intelligence::WorkoutStats;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

const WORKOUT_COLUMNS: &str = "id, user_id, date, name, exercises, duration, notes, tags, \
     total_volume, total_sets, total_reps, average_rpe, max_weight, created_at, updated_at";

/// Column a workout list may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkoutSortField {
    /// Workout date
    #[default]
    Date,
    /// Workout name
    Name,
    /// Duration in minutes
    Duration,
    /// Creation time
    CreatedAt,
    /// Total volume
    TotalVolume,
}

impl WorkoutSortField {
    const fn column(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Name => "name",
            Self::Duration => "duration",
            Self::CreatedAt => "created_at",
            Self::TotalVolume => "total_volume",
        }
    }
}

impl FromStr for WorkoutSortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "duration" => Ok(Self::Duration),
            "createdAt" => Ok(Self::CreatedAt),
            "totalVolume" | "metrics.totalVolume" => Ok(Self::TotalVolume),
            other => Err(AppError::invalid_input(format!(
                "Unsupported sortBy value: {other}"
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortOrder {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AppError::invalid_input(format!(
                "Unsupported sortOrder value: {other}"
            ))),
        }
    }
}

/// Paging and ordering of a workout list
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutListQuery {
    /// Page to return
    pub page: PageRequest,
    /// Sort column
    pub sort_by: WorkoutSortField,
    /// Sort direction
    pub sort_order: SortOrder,
}

fn workout_from_row(row: &SqliteRow) -> AppResult<Workout> {
    Ok(Workout {
        id: uuid_column(row, "id")?,
        user_id: uuid_column(row, "user_id")?,
        date: timestamp_column(row, "date")?,
        name: column(row, "name")?,
        exercises: json_column(row, "exercises")?,
        duration: column(row, "duration")?,
        notes: column(row, "notes")?,
        tags: json_column(row, "tags")?,
        metrics: WorkoutMetrics {
            total_volume: column(row, "total_volume")?,
            total_sets: count_column(row, "total_sets")?,
            total_reps: count_column(row, "total_reps")?,
            average_rpe: column(row, "average_rpe")?,
            max_weight: column(row, "max_weight")?,
        },
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}

/// Escape `LIKE` wildcards so the pattern matches literally
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl Database {
    /// Create workouts table and indexes
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                date INTEGER NOT NULL,
                name TEXT NOT NULL,
                exercises TEXT NOT NULL,
                duration REAL,
                notes TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                total_volume REAL NOT NULL DEFAULT 0,
                total_sets INTEGER NOT NULL DEFAULT 0,
                total_reps INTEGER NOT NULL DEFAULT 0,
                average_rpe REAL,
                max_weight REAL NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workouts table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create workouts index: {e}")))?;

        Ok(())
    }

    /// Insert a workout whose metrics are already computed
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn create_workout(&self, workout: &Workout) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO workouts (
                id, user_id, date, name, exercises, duration, notes, tags,
                total_volume, total_sets, total_reps, average_rpe, max_weight,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(workout.date.timestamp_millis())
        .bind(&workout.name)
        .bind(serde_json::to_string(&workout.exercises)?)
        .bind(workout.duration)
        .bind(&workout.notes)
        .bind(serde_json::to_string(&workout.tags)?)
        .bind(workout.metrics.total_volume)
        .bind(count_param("total_sets", workout.metrics.total_sets)?)
        .bind(count_param("total_reps", workout.metrics.total_reps)?)
        .bind(workout.metrics.average_rpe)
        .bind(workout.metrics.max_weight)
        .bind(workout.created_at.timestamp_millis())
        .bind(workout.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        debug!(workout.id = %workout.id, user.id = %workout.user_id, "Workout stored");
        Ok(())
    }

    /// Get one of the user's workouts
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_workout(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1 AND user_id = $2"
        ))
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        row.as_ref().map(workout_from_row).transpose()
    }

    /// List a page of the user's workouts with the total count
    ///
    /// # Errors
    ///
    /// Returns an error if a query or row decoding fails
    pub async fn list_workouts(
        &self,
        user_id: Uuid,
        query: &WorkoutListQuery,
    ) -> AppResult<(Vec<Workout>, u64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count workouts: {e}")))?;

        let rows = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 \
             ORDER BY {} {}, id ASC LIMIT $2 OFFSET $3",
            query.sort_by.column(),
            query.sort_order.keyword()
        ))
        .bind(user_id.to_string())
        .bind(i64::from(query.page.limit))
        .bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        let workouts = rows.iter().map(workout_from_row).collect::<AppResult<Vec<_>>>()?;
        Ok((workouts, u64::try_from(total).unwrap_or_default()))
    }

    /// Replace a stored workout; returns `false` when it does not exist for the user
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the update fails
    pub async fn update_workout(&self, workout: &Workout) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE workouts SET
                date = $3, name = $4, exercises = $5, duration = $6, notes = $7, tags = $8,
                total_volume = $9, total_sets = $10, total_reps = $11, average_rpe = $12,
                max_weight = $13, updated_at = $14
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(workout.date.timestamp_millis())
        .bind(&workout.name)
        .bind(serde_json::to_string(&workout.exercises)?)
        .bind(workout.duration)
        .bind(&workout.notes)
        .bind(serde_json::to_string(&workout.tags)?)
        .bind(workout.metrics.total_volume)
        .bind(count_param("total_sets", workout.metrics.total_sets)?)
        .bind(count_param("total_reps", workout.metrics.total_reps)?)
        .bind(workout.metrics.average_rpe)
        .bind(workout.metrics.max_weight)
        .bind(workout.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete one of the user's workouts; returns `false` when nothing was deleted
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// The user's most recent workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn recent_workouts(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 \
             ORDER BY date DESC, created_at DESC LIMIT $2"
        ))
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recent workouts: {e}")))?;

        rows.iter().map(workout_from_row).collect()
    }

    /// Aggregate statistics over the user's workouts dated at or after `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn workout_stats(&self, user_id: Uuid, since: DateTime<Utc>) -> AppResult<WorkoutStats> {
        let row = sqlx::query(
            r"
            SELECT
                COUNT(*) AS total_workouts,
                COALESCE(SUM(total_volume), 0.0) AS total_volume,
                COALESCE(SUM(total_sets), 0) AS total_sets,
                COALESCE(SUM(total_reps), 0) AS total_reps,
                COALESCE(AVG(duration), 0.0) AS avg_duration,
                COALESCE(AVG(average_rpe), 0.0) AS avg_rpe,
                COALESCE(MAX(max_weight), 0.0) AS max_weight
            FROM workouts
            WHERE user_id = $1 AND date >= $2
            ",
        )
        .bind(user_id.to_string())
        .bind(since.timestamp_millis())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to aggregate workout stats: {e}")))?;

        Ok(WorkoutStats {
            total_workouts: count_column(&row, "total_workouts")?,
            total_volume: column(&row, "total_volume")?,
            total_sets: count_column(&row, "total_sets")?,
            total_reps: count_column(&row, "total_reps")?,
            avg_duration: column(&row, "avg_duration")?,
            avg_rpe: column(&row, "avg_rpe")?,
            max_weight: column(&row, "max_weight")?,
        })
    }

    /// The user's workouts since `since` whose exercise documents mention `exercise_name`
    ///
    /// Matching is a case-insensitive substring test on the stored document;
    /// callers narrow the result to exercise names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn workouts_with_exercise(
        &self,
        user_id: Uuid,
        exercise_name: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts \
             WHERE user_id = $1 AND date >= $2 AND exercises LIKE $3 ESCAPE '\\' \
             ORDER BY date ASC"
        ))
        .bind(user_id.to_string())
        .bind(since.timestamp_millis())
        .bind(format!("%{}%", escape_like(exercise_name)))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query exercise history: {e}")))?;

        rows.iter().map(workout_from_row).collect()
    }
}
