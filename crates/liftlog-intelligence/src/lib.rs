// ABOUTME: Training and recovery intelligence for LiftLog
// ABOUTME: Pure calculators for workout metrics, recovery scores, and recovery recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

#![deny(unsafe_code)]

//! # LiftLog Intelligence
//!
//! Deterministic, synchronous computations invoked by the request layer:
//!
//! - [`compute_workout_metrics`] before a workout is persisted
//! - [`compute_recovery_score`] before a recovery record is persisted
//! - [`compute_recommendations`] on every recommendations read
//!
//! Nothing here performs I/O or returns errors. Inputs are expected to be
//! validated by the caller.

/// Weights, thresholds and messages
pub mod config;
/// Period statistics and exercise progress
pub mod progress;
/// Recovery recommendation rules
pub mod recommendation_engine;
/// Recovery and readiness scores
pub mod recovery_score;
/// Workout and exercise aggregates
pub mod workout_metrics;

pub use config::{ConfigError, IntelligenceConfig};
pub use progress::{
    exercise_progress, summarize_workouts, ExerciseProgressPoint, StatsPeriod, WorkoutStats,
};
pub use recommendation_engine::{
    compute_recommendations, AverageRecoveryFactors, FocusArea, RecommendationReport,
    RecoveryRecommendationEngine,
};
pub use recovery_score::{compute_recovery_score, RecoveryScoreCalculator, RecoveryScores};
pub use workout_metrics::{compute_workout_metrics, ExerciseMetrics, WorkoutMetricsCalculator};
