// ABOUTME: Period statistics and per-exercise progress series over stored workouts
// ABOUTME: Pure aggregations of already-computed workout metrics for the stats endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use crate::workout_metrics::WorkoutMetricsCalculator;
use chrono::{DateTime, Duration, Utc};
use liftlog_core::models::Workout;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Look-back window for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsPeriod {
    /// Last 7 days
    Week,
    /// Last 30 days
    #[default]
    Month,
    /// Last 90 days
    Quarter,
}

impl StatsPeriod {
    /// Parse a query value; anything other than `7d` or `30d` is 90 days
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("30d") => Self::Month,
            Some("7d") => Self::Week,
            Some(_) => Self::Quarter,
        }
    }

    /// Length of the window in days
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }

    /// Earliest instant inside the window ending at `now`
    #[must_use]
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

/// Aggregate statistics over a set of workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    /// Number of workouts
    pub total_workouts: u64,
    /// Summed volume
    pub total_volume: f64,
    /// Summed sets
    pub total_sets: u64,
    /// Summed reps
    pub total_reps: u64,
    /// Mean duration over workouts that recorded one
    pub avg_duration: f64,
    /// Mean of per-workout average RPE where present
    #[serde(rename = "avgRPE")]
    pub avg_rpe: f64,
    /// Heaviest set across all workouts
    pub max_weight: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Summarize the stored metrics of `workouts`
///
/// In-memory counterpart of the server's SQL stats aggregation. The stats
/// endpoint aggregates in the database; this function is the reference the
/// database tests compare that query against, and it serves callers that
/// already hold the workouts in memory.
#[must_use]
pub fn summarize_workouts(workouts: &[Workout]) -> WorkoutStats {
    WorkoutStats {
        total_workouts: workouts.len() as u64,
        total_volume: workouts.iter().map(|w| w.metrics.total_volume).sum(),
        total_sets: workouts.iter().map(|w| w.metrics.total_sets).sum(),
        total_reps: workouts.iter().map(|w| w.metrics.total_reps).sum(),
        avg_duration: mean(workouts.iter().filter_map(|w| w.duration)),
        avg_rpe: mean(workouts.iter().filter_map(|w| w.metrics.average_rpe)),
        max_weight: workouts
            .iter()
            .map(|w| w.metrics.max_weight)
            .fold(0.0, f64::max),
    }
}

/// One exercise occurrence on a progress chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgressPoint {
    /// Workout containing the exercise
    pub workout_id: Uuid,
    /// Workout date
    pub date: DateTime<Utc>,
    /// Exercise name as recorded
    pub exercise: String,
    /// Volume of the exercise's sets
    pub volume: f64,
    /// Heaviest set, 0 when there are no sets
    pub max_weight: f64,
}

/// Progress series for exercises whose name contains `name`, case-insensitively.
///
/// Points are ordered by workout date, oldest first.
#[must_use]
pub fn exercise_progress(workouts: &[Workout], name: &str) -> Vec<ExerciseProgressPoint> {
    let needle = name.to_lowercase();
    let mut points: Vec<ExerciseProgressPoint> = workouts
        .iter()
        .flat_map(|workout| {
            workout
                .exercises
                .iter()
                .filter(|exercise| exercise.name.to_lowercase().contains(&needle))
                .map(|exercise| {
                    let metrics = WorkoutMetricsCalculator::exercise_metrics(&exercise.sets);
                    ExerciseProgressPoint {
                        workout_id: workout.id,
                        date: workout.date,
                        exercise: exercise.name.clone(),
                        volume: metrics.total_volume,
                        max_weight: metrics.max_weight,
                    }
                })
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parsing() {
        assert_eq!(StatsPeriod::parse(None), StatsPeriod::Month);
        assert_eq!(StatsPeriod::parse(Some("7d")), StatsPeriod::Week);
        assert_eq!(StatsPeriod::parse(Some("30d")), StatsPeriod::Month);
        assert_eq!(StatsPeriod::parse(Some("1y")).days(), 90);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        assert_eq!(summarize_workouts(&[]), WorkoutStats::default());
    }
}
