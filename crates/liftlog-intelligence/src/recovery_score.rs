// ABOUTME: Recovery score calculation from sleep, nutrition, and stress factors
// ABOUTME: Normalized weighted average over the factors actually reported
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Recovery Score Calculator
//!
//! | Factor              | Transform                          | Default weight |
//! |---------------------|------------------------------------|----------------|
//! | sleep quality       | identity                           | 30             |
//! | sleep hours         | `clamp(0, 10, (hours - 4) * 2)`    | 20             |
//! | nutrition quality   | identity                           | 20             |
//! | hydration           | identity                           | 10             |
//! | stress level        | `11 - level`                       | 20             |
//!
//! Missing factors drop out of both the weighted sum and the weight total.
//! With nothing reported the score is the configured neutral value.

use crate::config::{IntelligenceConfig, RecoveryScoringConfig};
use liftlog_core::models::RecoveryFactors;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scores stored on a recovery record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryScores {
    /// Weighted recovery score
    pub recovery_score: u8,
    /// Readiness score
    pub readiness_score: u8,
}

/// Recovery score calculator with configurable weights
#[derive(Debug, Clone)]
pub struct RecoveryScoreCalculator {
    config: RecoveryScoringConfig,
}

impl Default for RecoveryScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryScoreCalculator {
    /// Create a calculator with the default weights
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IntelligenceConfig::default().recovery_scoring)
    }

    /// Create a calculator with custom weights
    #[must_use]
    pub const fn with_config(config: RecoveryScoringConfig) -> Self {
        Self { config }
    }

    /// Compute both stored scores for a set of factors
    #[must_use]
    pub fn score(&self, factors: &RecoveryFactors) -> RecoveryScores {
        let recovery_score = self.recovery_score(factors);
        let scores = RecoveryScores {
            recovery_score,
            readiness_score: Self::readiness_score(recovery_score),
        };
        debug!(
            recovery_score = scores.recovery_score,
            readiness_score = scores.readiness_score,
            "Computed recovery scores"
        );
        scores
    }

    /// Weighted recovery score, rounded and clamped to 0-100
    #[must_use]
    pub fn recovery_score(&self, factors: &RecoveryFactors) -> u8 {
        let weights = &self.config.weights;
        let contributions = [
            factors
                .sleep
                .quality
                .map(|quality| (f64::from(quality), weights.sleep_quality)),
            factors
                .sleep
                .hours
                .filter(|hours| *hours > 0.0)
                .map(|hours| (self.sleep_hours_points(hours), weights.sleep_hours)),
            factors
                .nutrition
                .quality
                .map(|quality| (f64::from(quality), weights.nutrition_quality)),
            factors
                .nutrition
                .hydration
                .map(|hydration| (f64::from(hydration), weights.hydration)),
            factors.stress.level.map(|level| {
                (
                    self.config.stress_inversion_base - f64::from(level),
                    weights.stress_level,
                )
            }),
        ];

        let (weighted_sum, total_weight) = contributions
            .iter()
            .flatten()
            .fold((0.0, 0.0), |(sum, total), (value, weight)| {
                (sum + value * weight, total + weight)
            });

        if total_weight <= 0.0 {
            return self.config.neutral_score;
        }

        (weighted_sum / total_weight).round().clamp(0.0, 100.0) as u8
    }

    /// Readiness score.
    ///
    /// Not yet differentiated from the recovery score: it returns the
    /// recovery score unchanged until readiness gets its own weighting.
    #[must_use]
    pub const fn readiness_score(recovery_score: u8) -> u8 {
        recovery_score
    }

    /// Sleep duration mapped onto the 0-10 factor scale
    fn sleep_hours_points(&self, hours: f64) -> f64 {
        ((hours - self.config.sleep_hours_baseline) * self.config.sleep_points_per_hour)
            .clamp(0.0, self.config.max_sleep_points)
    }
}

/// Compute recovery and readiness scores with the default weights
#[must_use]
pub fn compute_recovery_score(factors: &RecoveryFactors) -> RecoveryScores {
    RecoveryScoreCalculator::new().score(factors)
}
