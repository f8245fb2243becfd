// ABOUTME: Core data models for workouts, exercises, sets, recovery records, and users
// ABOUTME: Serialized with camelCase field names to match the JSON API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

/// Workout, exercise, and set models
pub mod workout;

/// Recovery factors, recovery records, feedback, and recommendations
pub mod recovery;

/// User accounts, body profile, and preferences
pub mod user;

pub use recovery::{
    ActivityFactors, Feedback, NutritionFactors, Recommendation, RecoveryFactors, RecoveryRecord,
    SleepFactors, StressFactors,
};
pub use workout::{Exercise, ExerciseCategory, ExerciseSet, Workout, WorkoutMetrics};
pub use user::{FitnessLevel, NotificationPreferences, Units, User, UserPreferences, UserProfile};
