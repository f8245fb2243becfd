// ABOUTME: Workout metrics aggregation: volume, set and rep counts, max weight, average RPE
// ABOUTME: Derives per-exercise and per-workout values from recorded sets before persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Workout metrics calculation
//!
//! Every derived number on a workout comes from here. The calculator is a
//! pure function of the sets: running it twice on the same exercises gives
//! identical results.

use liftlog_core::models::{Exercise, ExerciseSet, WorkoutMetrics};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Derived values for a single exercise
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMetrics {
    /// Sum of `reps * weight`
    pub total_volume: f64,
    /// Heaviest set, 0 when there are no sets
    pub max_weight: f64,
    /// Mean RPE over sets that recorded one
    #[serde(rename = "averageRPE")]
    pub average_rpe: Option<f64>,
}

/// Metrics calculator for workouts
pub struct WorkoutMetricsCalculator;

impl WorkoutMetricsCalculator {
    /// Recompute every exercise's derived fields and return the workout totals
    pub fn calculate(exercises: &mut [Exercise]) -> WorkoutMetrics {
        for exercise in exercises.iter_mut() {
            let metrics = Self::exercise_metrics(&exercise.sets);
            exercise.total_volume = metrics.total_volume;
            exercise.max_weight = metrics.max_weight;
            exercise.average_rpe = metrics.average_rpe;
        }

        let metrics = Self::aggregate(exercises);
        debug!(
            exercises = exercises.len(),
            total_sets = metrics.total_sets,
            total_volume = metrics.total_volume,
            "Computed workout metrics"
        );
        metrics
    }

    /// Workout totals without touching the exercises
    #[must_use]
    pub fn aggregate(exercises: &[Exercise]) -> WorkoutMetrics {
        let all_sets = || exercises.iter().flat_map(|exercise| exercise.sets.iter());

        WorkoutMetrics {
            total_volume: all_sets().map(ExerciseSet::volume).sum(),
            total_sets: all_sets().map(|_| 1_u64).sum(),
            total_reps: all_sets().map(|set| u64::from(set.reps)).sum(),
            average_rpe: Self::average_rpe(all_sets()),
            max_weight: Self::max_weight(all_sets()),
        }
    }

    /// Derived values scoped to one exercise's sets
    #[must_use]
    pub fn exercise_metrics(sets: &[ExerciseSet]) -> ExerciseMetrics {
        ExerciseMetrics {
            total_volume: sets.iter().map(ExerciseSet::volume).sum(),
            max_weight: Self::max_weight(sets.iter()),
            average_rpe: Self::average_rpe(sets.iter()),
        }
    }

    /// Heaviest weight among `sets`; 0 for an empty collection
    pub fn max_weight<'a>(sets: impl Iterator<Item = &'a ExerciseSet>) -> f64 {
        let mut sets = sets.peekable();
        if sets.peek().is_none() {
            return 0.0;
        }
        sets.map(|set| set.weight).fold(f64::MIN, f64::max)
    }

    /// Arithmetic mean of the RPE values present; `None` when no set has one
    pub fn average_rpe<'a>(sets: impl Iterator<Item = &'a ExerciseSet>) -> Option<f64> {
        let (sum, count) = sets
            .filter_map(|set| set.rpe)
            .fold((0.0_f64, 0_u32), |(sum, count), rpe| {
                (sum + f64::from(rpe), count + 1)
            });

        (count > 0).then(|| sum / f64::from(count))
    }
}

/// Compute workout metrics, filling each exercise's derived fields
pub fn compute_workout_metrics(exercises: &mut [Exercise]) -> WorkoutMetrics {
    WorkoutMetricsCalculator::calculate(exercises)
}
