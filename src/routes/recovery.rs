// ABOUTME: Route handlers for recovery tracking: records, scoring, recommendations, feedback
// ABOUTME: Scores are recomputed from the submitted factors on every create and update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use super::{parse_date, parse_id};
use crate::constants::limits;
use crate::database::RecoveryListQuery;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use liftlog_core::models::{Feedback, Recommendation, RecoveryFactors, RecoveryRecord};
use liftlog_core::pagination::{PageRequest, PaginationInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Body of recovery create and update requests
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryBody {
    /// Workout the entry follows; required on create
    pub workout_id: Option<String>,
    /// Day the factors describe; defaults to now on create
    pub date: Option<String>,
    /// Reported factors; replaces the stored factors on update
    pub factors: Option<RecoveryFactors>,
    /// Client-attached recommendations
    pub recommendations: Option<Recommendation>,
}

/// Body of a feedback submission
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackBody {
    /// Accuracy rating (1-5)
    pub accuracy: Option<i64>,
    /// Helpfulness rating (1-5)
    pub helpfulness: Option<i64>,
    /// Optional comment
    pub comments: Option<String>,
}

/// Query parameters for listing recovery records
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecoveryQuery {
    /// 1-based page
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Inclusive lower date bound
    pub start_date: Option<String>,
    /// Inclusive upper date bound
    pub end_date: Option<String>,
}

/// A page of recovery records
#[derive(Debug, Serialize, Deserialize)]
pub struct RecoveryListResponse {
    /// Records on this page, each with its linked workout
    pub recoveries: Vec<crate::database::RecoveryWithWorkout>,
    /// Pagination metadata
    pub pagination: PaginationInfo,
}

/// Feedback confirmation with the updated record
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// Human-readable message
    pub message: String,
    /// Record after the feedback was stored
    pub recovery: RecoveryRecord,
}

fn check_scale(field: &str, value: Option<u8>) -> AppResult<()> {
    match value {
        Some(v) if !(limits::SCALE_MIN..=limits::SCALE_MAX).contains(&v) => Err(
            AppError::out_of_range(field, format!("{field} must be between 1 and 10")),
        ),
        _ => Ok(()),
    }
}

fn validate_factors(factors: &RecoveryFactors) -> AppResult<()> {
    if let Some(hours) = factors.sleep.hours {
        if !hours.is_finite() || !(0.0..=limits::MAX_SLEEP_HOURS).contains(&hours) {
            return Err(AppError::out_of_range(
                "sleep.hours",
                "sleep.hours must be between 0 and 24",
            ));
        }
    }
    check_scale("sleep.quality", factors.sleep.quality)?;
    check_scale("nutrition.quality", factors.nutrition.quality)?;
    check_scale("nutrition.hydration", factors.nutrition.hydration)?;
    check_scale("stress.level", factors.stress.level)?;
    check_scale("stress.workStress", factors.stress.work_stress)
}

fn check_rating(field: &str, value: Option<i64>) -> AppResult<u8> {
    let value = value.ok_or_else(|| {
        AppError::new(ErrorCode::MissingRequiredField, format!("{field} is required"))
    })?;
    u8::try_from(value)
        .ok()
        .filter(|v| (limits::RATING_MIN..=limits::RATING_MAX).contains(v))
        .ok_or_else(|| AppError::out_of_range(field, format!("{field} must be between 1 and 5")))
}

fn validate_feedback(body: FeedbackBody) -> AppResult<Feedback> {
    let accuracy = check_rating("accuracy", body.accuracy)?;
    let helpfulness = check_rating("helpfulness", body.helpfulness)?;
    let comments = body.comments.map(|c| c.trim().to_owned());
    if comments
        .as_ref()
        .is_some_and(|c| c.chars().count() > limits::MAX_FEEDBACK_COMMENT_LENGTH)
    {
        return Err(AppError::out_of_range(
            "comments",
            format!(
                "Comments must be at most {} characters",
                limits::MAX_FEEDBACK_COMMENT_LENGTH
            ),
        ));
    }
    Ok(Feedback {
        accuracy,
        helpfulness,
        comments,
    })
}

/// Recovery routes implementation
pub struct RecoveryRoutes;

impl RecoveryRoutes {
    /// Create all recovery routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recovery",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recovery/recommendations",
                get(Self::handle_recommendations),
            )
            .route("/api/recovery/:id", put(Self::handle_update))
            .route("/api/recovery/:id/feedback", post(Self::handle_feedback))
            .with_state(resources)
    }

    /// Resolve a workout id from a request body, requiring that the caller owns it
    async fn owned_workout_id(
        resources: &ServerResources,
        user_id: Uuid,
        workout_id: &str,
    ) -> AppResult<Uuid> {
        let id = parse_id("Workout", workout_id)?;
        resources
            .database
            .get_workout(user_id, id)
            .await?
            .map(|workout| workout.id)
            .ok_or_else(|| AppError::not_found("Workout").with_resource_id(workout_id))
    }

    /// Handle GET /api/recovery - List records, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListRecoveryQuery>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;

        let list_query = RecoveryListQuery {
            page: PageRequest::new(query.page, query.limit),
            start_date: query
                .start_date
                .as_deref()
                .map(|d| parse_date("startDate", d))
                .transpose()?,
            end_date: query
                .end_date
                .as_deref()
                .map(|d| parse_date("endDate", d))
                .transpose()?,
        };

        let (recoveries, total) = resources
            .database
            .list_recoveries(user_id, &list_query)
            .await?;

        let response = RecoveryListResponse {
            recoveries,
            pagination: PaginationInfo::new(list_query.page, total),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recovery - Create a scored record
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RecoveryBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;

        let workout_id = body.workout_id.as_deref().ok_or_else(|| {
            AppError::new(ErrorCode::MissingRequiredField, "workoutId is required")
        })?;
        let factors = body.factors.unwrap_or_default();
        validate_factors(&factors)?;
        let workout_id = Self::owned_workout_id(&resources, user_id, workout_id).await?;

        let now = Utc::now();
        let scores = resources.recovery_scorer.score(&factors);
        let record = RecoveryRecord {
            id: Uuid::new_v4(),
            user_id,
            workout_id,
            date: body
                .date
                .as_deref()
                .map(|d| parse_date("date", d))
                .transpose()?
                .unwrap_or(now),
            factors,
            recovery_score: scores.recovery_score,
            readiness_score: scores.readiness_score,
            recommendations: body.recommendations,
            feedback: None,
            created_at: now,
        };

        resources.database.create_recovery(&record).await?;

        info!(
            user.id = %user_id,
            recovery.id = %record.id,
            recovery_score = record.recovery_score,
            "Recovery record created"
        );
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// Handle PUT /api/recovery/:id - Merge changes and rescore
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<RecoveryBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let recovery_id = parse_id("Recovery entry", &id)?;

        let mut record = resources
            .database
            .get_recovery(user_id, recovery_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recovery entry").with_resource_id(id.clone()))?;

        if let Some(workout_id) = body.workout_id.as_deref() {
            record.workout_id = Self::owned_workout_id(&resources, user_id, workout_id).await?;
        }
        if let Some(date) = body.date.as_deref() {
            record.date = parse_date("date", date)?;
        }
        if let Some(factors) = body.factors {
            validate_factors(&factors)?;
            record.factors = factors;
        }
        if body.recommendations.is_some() {
            record.recommendations = body.recommendations;
        }

        let scores = resources.recovery_scorer.score(&record.factors);
        record.recovery_score = scores.recovery_score;
        record.readiness_score = scores.readiness_score;

        if !resources.database.update_recovery(&record).await? {
            return Err(AppError::not_found("Recovery entry").with_resource_id(id));
        }

        info!(user.id = %user_id, recovery.id = %record.id, "Recovery record updated");
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle GET /api/recovery/recommendations - Guidance from recent history
    async fn handle_recommendations(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let limit = resources.config.recommendation_history_limit;

        let recoveries = resources.database.recent_recoveries(user_id, limit).await?;
        let workouts = resources.database.recent_workouts(user_id, limit).await?;
        let report = resources
            .recommendation_engine
            .recommend(&recoveries, &workouts);

        Ok((StatusCode::OK, Json(report)).into_response())
    }

    /// Handle POST /api/recovery/:id/feedback - Rate a record's recommendations
    async fn handle_feedback(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<FeedbackBody>,
    ) -> Result<Response, AppError> {
        let user_id = resources.authenticate(&headers)?;
        let recovery_id = parse_id("Recovery entry", &id)?;
        let feedback = validate_feedback(body)?;

        let recovery = resources
            .database
            .set_recovery_feedback(user_id, recovery_id, &feedback)
            .await?
            .ok_or_else(|| AppError::not_found("Recovery entry").with_resource_id(id))?;

        info!(
            user.id = %user_id,
            recovery.id = %recovery.id,
            accuracy = feedback.accuracy,
            helpfulness = feedback.helpfulness,
            "Recovery feedback submitted"
        );
        let response = FeedbackResponse {
            message: "Feedback submitted successfully".to_owned(),
            recovery,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
