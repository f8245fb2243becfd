// ABOUTME: Route handlers for the workouts REST API
// ABOUTME: CRUD with validation and metric computation, period statistics, and exercise progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Workout routes
//!
//! Metrics are computed from the submitted sets on every create and update;
//! client-supplied derived values are never read.

use super::{parse_date, parse_id};
use crate::constants::{defaults, limits};
use crate::database::{SortOrder, WorkoutListQuery, WorkoutSortField};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use liftlog_core::models::{Exercise, ExerciseCategory, ExerciseSet, Workout};
use liftlog_core::pagination::{PageRequest, PaginationInfo};
use liftlog_intelligence::{compute_workout_metrics, exercise_progress, StatsPeriod};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// A set as submitted by the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInput {
    /// Repetitions (at least 1)
    pub reps: i64,
    /// Load (non-negative)
    pub weight: f64,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Rest after the set in seconds
    pub rest_time: Option<f64>,
    /// Rate of perceived exertion (1-10)
    pub rpe: Option<i64>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// An exercise as submitted by the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    /// Exercise name
    #[serde(default)]
    pub name: String,
    /// Category name, e.g. `chest`
    #[serde(default)]
    pub category: String,
    /// Ordered sets
    #[serde(default)]
    pub sets: Vec<SetInput>,
}

/// Body of workout create and update requests
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutBody {
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now on create
    pub date: Option<String>,
    /// Display name; defaults to "Workout"
    pub name: Option<String>,
    /// Exercises; required on create
    pub exercises: Option<Vec<ExerciseInput>>,
    /// Duration in minutes
    pub duration: Option<f64>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Tags
    pub tags: Option<Vec<String>>,
}

/// Query parameters for listing workouts
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkoutsQuery {
    /// 1-based page
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Sort column
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    pub sort_order: Option<String>,
}

/// Query parameters for statistics and progress
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// `7d`, `30d`, or anything else for 90 days
    pub period: Option<String>,
}

/// A page of workouts
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutListResponse {
    /// Workouts on this page
    pub workouts: Vec<Workout>,
    /// Pagination metadata
    pub pagination: PaginationInfo,
}

/// Confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

fn normalize_name(name: Option<String>) -> AppResult<String> {
    let name = name.map(|n| n.trim().to_owned()).unwrap_or_default();
    if name.chars().count() > limits::MAX_WORKOUT_NAME_LENGTH {
        return Err(AppError::out_of_range(
            "name",
            format!(
                "Workout name must be at most {} characters",
                limits::MAX_WORKOUT_NAME_LENGTH
            ),
        ));
    }
    Ok(if name.is_empty() {
        defaults::WORKOUT_NAME.to_owned()
    } else {
        name
    })
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !unique.iter().any(|t| t == tag) {
            unique.push(tag.to_owned());
        }
    }
    unique
}

fn validate_duration(duration: Option<f64>) -> AppResult<Option<f64>> {
    match duration {
        Some(d) if !d.is_finite() || d < 0.0 => Err(AppError::out_of_range(
            "duration",
            "Duration must be non-negative",
        )),
        other => Ok(other),
    }
}

fn parse_category(value: &str) -> AppResult<ExerciseCategory> {
    ExerciseCategory::ALL
        .into_iter()
        .find(|category| category.as_str() == value)
        .ok_or_else(|| {
            AppError::invalid_input("Invalid exercise category")
                .with_details(serde_json::json!({ "field": "category", "value": value }))
        })
}

fn validate_set(input: SetInput) -> AppResult<ExerciseSet> {
    let reps = u32::try_from(input.reps)
        .ok()
        .filter(|reps| *reps >= limits::MIN_REPS)
        .ok_or_else(|| AppError::out_of_range("reps", "Reps must be at least 1"))?;

    if !input.weight.is_finite() || input.weight < 0.0 {
        return Err(AppError::out_of_range("weight", "Weight must be non-negative"));
    }

    let rpe = input
        .rpe
        .map(|rpe| {
            u8::try_from(rpe)
                .ok()
                .filter(|rpe| (limits::SCALE_MIN..=limits::SCALE_MAX).contains(rpe))
                .ok_or_else(|| AppError::out_of_range("rpe", "RPE must be between 1 and 10"))
        })
        .transpose()?;

    Ok(ExerciseSet {
        reps,
        weight: input.weight,
        duration: input.duration,
        rest_time: input.rest_time,
        rpe,
        notes: input.notes,
    })
}

fn validate_exercises(inputs: Vec<ExerciseInput>) -> AppResult<Vec<Exercise>> {
    inputs
        .into_iter()
        .map(|input| {
            let name = input.name.trim();
            if name.is_empty() {
                return Err(AppError::new(
                    ErrorCode::MissingRequiredField,
                    "Exercise name is required",
                ));
            }
            let category = parse_category(&input.category)?;
            let sets = input
                .sets
                .into_iter()
                .map(validate_set)
                .collect::<AppResult<Vec<_>>>()?;
            Ok(Exercise::new(name, category, sets))
        })
        .collect()
}

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/workouts/stats/overview", get(Self::handle_stats))
            .route(
                "/api/workouts/progress/:exercise_name",
                get(Self::handle_progress),
            )
            .route(
                "/api/workouts/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/workouts - List the caller's workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListWorkoutsQuery>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;

        let list_query = WorkoutListQuery {
            page: PageRequest::new(query.page, query.limit),
            sort_by: query
                .sort_by
                .as_deref()
                .map(str::parse::<WorkoutSortField>)
                .transpose()?
                .unwrap_or_default(),
            sort_order: query
                .sort_order
                .as_deref()
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
        };

        let (workouts, total) = resources
            .database
            .list_workouts(user_id, &list_query)
            .await?;

        let response = WorkoutListResponse {
            workouts,
            pagination: PaginationInfo::new(list_query.page, total),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/:id - Get one workout
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let workout_id = parse_id("Workout", &id)?;

        let workout = resources
            .database
            .get_workout(user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout").with_resource_id(id))?;

        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle POST /api/workouts - Create a workout
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<WorkoutBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;

        let exercises = body.exercises.ok_or_else(|| {
            AppError::new(ErrorCode::MissingRequiredField, "Exercises must be an array")
        })?;
        let mut exercises = validate_exercises(exercises)?;
        let metrics = compute_workout_metrics(&mut exercises);

        let now = Utc::now();
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id,
            date: body
                .date
                .as_deref()
                .map(|date| parse_date("date", date))
                .transpose()?
                .unwrap_or(now),
            name: normalize_name(body.name)?,
            exercises,
            duration: validate_duration(body.duration)?,
            notes: body.notes,
            tags: normalize_tags(body.tags.unwrap_or_default()),
            metrics,
            created_at: now,
            updated_at: now,
        };

        resources.database.create_workout(&workout).await?;

        info!(
            user.id = %user_id,
            workout.id = %workout.id,
            total_volume = workout.metrics.total_volume,
            total_sets = workout.metrics.total_sets,
            "Workout created"
        );
        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// Handle PUT /api/workouts/:id - Merge changes and recompute metrics
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<WorkoutBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let workout_id = parse_id("Workout", &id)?;

        let mut workout = resources
            .database
            .get_workout(user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout").with_resource_id(id.clone()))?;

        if let Some(date) = body.date.as_deref() {
            workout.date = parse_date("date", date)?;
        }
        if body.name.is_some() {
            workout.name = normalize_name(body.name)?;
        }
        if let Some(exercises) = body.exercises {
            workout.exercises = validate_exercises(exercises)?;
        }
        if body.duration.is_some() {
            workout.duration = validate_duration(body.duration)?;
        }
        if body.notes.is_some() {
            workout.notes = body.notes;
        }
        if let Some(tags) = body.tags {
            workout.tags = normalize_tags(tags);
        }
        workout.metrics = compute_workout_metrics(&mut workout.exercises);
        workout.updated_at = Utc::now();

        if !resources.database.update_workout(&workout).await? {
            return Err(AppError::not_found("Workout").with_resource_id(id));
        }

        info!(user.id = %user_id, workout.id = %workout.id, "Workout updated");
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle DELETE /api/workouts/:id - Delete a workout
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let workout_id = parse_id("Workout", &id)?;

        if !resources.database.delete_workout(user_id, workout_id).await? {
            return Err(AppError::not_found("Workout").with_resource_id(id));
        }

        info!(user.id = %user_id, workout.id = %workout_id, "Workout deleted");
        let response = MessageResponse {
            message: "Workout deleted successfully".to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/stats/overview - Aggregate stats over a period
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PeriodQuery>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let period = StatsPeriod::parse(query.period.as_deref());

        let stats = resources
            .database
            .workout_stats(user_id, period.start(Utc::now()))
            .await?;

        Ok((StatusCode::OK, Json(stats)).into_response())
    }

    /// Handle GET /api/workouts/progress/:exercise_name - Per-exercise progress series
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(exercise_name): Path<String>,
        Query(query): Query<PeriodQuery>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let period = StatsPeriod::parse(query.period.as_deref());

        let workouts = resources
            .database
            .workouts_with_exercise(user_id, &exercise_name, period.start(Utc::now()))
            .await?;
        let progress = exercise_progress(&workouts, &exercise_name);

        Ok((StatusCode::OK, Json(progress)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_defaults() {
        assert_eq!(normalize_name(Some("   ".into())).ok().as_deref(), Some("Workout"));
        assert_eq!(normalize_name(None).ok().as_deref(), Some("Workout"));
        assert!(normalize_name(Some("x".repeat(101))).is_err());
    }

    #[test]
    fn test_tags_deduplicated_in_order() {
        let tags = normalize_tags(vec!["push".into(), " heavy ".into(), "push".into(), String::new()]);
        assert_eq!(tags, vec!["push".to_owned(), "heavy".to_owned()]);
    }
}
