// ABOUTME: Strength training models: sets, exercises, workouts, and aggregate metrics
// ABOUTME: Derived fields are computed by the metrics calculator, never trusted from clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Muscle group / modality an exercise belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    /// Chest
    Chest,
    /// Back
    Back,
    /// Shoulders
    Shoulders,
    /// Arms
    Arms,
    /// Legs
    Legs,
    /// Core
    Core,
    /// Cardio
    Cardio,
    /// Anything else
    Other,
}

impl ExerciseCategory {
    /// All categories in display order
    pub const ALL: [Self; 8] = [
        Self::Chest,
        Self::Back,
        Self::Shoulders,
        Self::Arms,
        Self::Legs,
        Self::Core,
        Self::Cardio,
        Self::Other,
    ];

    /// Lowercase name as used on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Arms => "arms",
            Self::Legs => "legs",
            Self::Core => "core",
            Self::Cardio => "cardio",
            Self::Other => "other",
        }
    }
}

impl Display for ExerciseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    /// Repetitions performed (at least 1)
    pub reps: u32,
    /// Load used (non-negative)
    pub weight: f64,
    /// Duration in seconds for time-based sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Rest after this set in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<f64>,
    /// Rate of perceived exertion (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExerciseSet {
    /// Volume contributed by this set (`reps * weight`)
    #[must_use]
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

/// An exercise within a workout with its ordered sets.
///
/// `total_volume`, `max_weight` and `average_rpe` are derived from `sets`
/// and recomputed on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Exercise category
    pub category: ExerciseCategory,
    /// Ordered sets
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
    /// Sum of `reps * weight` over the sets
    #[serde(default)]
    pub total_volume: f64,
    /// Heaviest set, 0 when there are no sets
    #[serde(default)]
    pub max_weight: f64,
    /// Mean RPE of the sets that recorded one
    #[serde(default, rename = "averageRPE")]
    pub average_rpe: Option<f64>,
}

impl Exercise {
    /// Create an exercise with no derived values yet
    pub fn new(name: impl Into<String>, category: ExerciseCategory, sets: Vec<ExerciseSet>) -> Self {
        Self {
            name: name.into(),
            category,
            sets,
            total_volume: 0.0,
            max_weight: 0.0,
            average_rpe: None,
        }
    }
}

/// Aggregate metrics across every exercise of a workout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutMetrics {
    /// Sum of `reps * weight` over all sets
    pub total_volume: f64,
    /// Number of sets
    pub total_sets: u64,
    /// Number of reps
    pub total_reps: u64,
    /// Mean RPE of the sets that recorded one
    #[serde(rename = "averageRPE")]
    pub average_rpe: Option<f64>,
    /// Heaviest set, 0 when there are no sets
    pub max_weight: f64,
}

/// A persisted workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Workout ID
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// When the workout took place
    pub date: DateTime<Utc>,
    /// Display name
    pub name: String,
    /// Ordered exercises
    pub exercises: Vec<Exercise>,
    /// Total duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags such as "push" or "heavy", without duplicates
    #[serde(default)]
    pub tags: Vec<String>,
    /// Aggregation of `exercises` at last save
    pub metrics: WorkoutMetrics,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Number of sets recorded across all exercises
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|exercise| exercise.sets.len()).sum()
    }
}
