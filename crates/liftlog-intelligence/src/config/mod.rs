// ABOUTME: Intelligence configuration: recovery score weights and recommendation rule parameters
// ABOUTME: Defaults reproduce the production scoring and recommendation behavior exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Intelligence Configuration
//!
//! Weights for the recovery score, thresholds that trigger recovery
//! recommendations, the numeric adjustments those rules apply, and the
//! warning messages they emit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Weights must be finite and strictly positive
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// Root configuration for every algorithm in this crate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Recovery score calculation
    pub recovery_scoring: RecoveryScoringConfig,
    /// Recovery recommendation rules
    pub recommendation_engine: RecommendationEngineConfig,
}

impl IntelligenceConfig {
    /// Check that every section is internally consistent
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.recovery_scoring.validate()?;
        self.recommendation_engine.validate()
    }
}

/// Recovery score calculation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScoringConfig {
    /// Relative weight of each factor
    pub weights: RecoveryWeights,
    /// Score reported when no factor is present
    pub neutral_score: u8,
    /// Hours of sleep mapping to zero sleep-duration points
    pub sleep_hours_baseline: f64,
    /// Points gained per hour of sleep above the baseline
    pub sleep_points_per_hour: f64,
    /// Ceiling for sleep-duration points
    pub max_sleep_points: f64,
    /// Stress is inverted as `stress_inversion_base - level`
    pub stress_inversion_base: f64,
}

impl Default for RecoveryScoringConfig {
    fn default() -> Self {
        Self {
            weights: RecoveryWeights::default(),
            neutral_score: 50,
            sleep_hours_baseline: 4.0,
            sleep_points_per_hour: 2.0,
            max_sleep_points: 10.0,
            stress_inversion_base: 11.0,
        }
    }
}

impl RecoveryScoringConfig {
    /// Validate weights and score bounds
    ///
    /// # Errors
    ///
    /// Returns an error when a weight is non-positive or the neutral score exceeds 100
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let all_positive = [
            w.sleep_quality,
            w.sleep_hours,
            w.nutrition_quality,
            w.hydration,
            w.stress_level,
        ]
        .iter()
        .all(|weight| weight.is_finite() && *weight > 0.0);

        if !all_positive {
            return Err(ConfigError::InvalidWeights(
                "recovery weights must be finite and greater than zero",
            ));
        }
        if self.neutral_score > 100 {
            return Err(ConfigError::ValueOutOfRange(
                "neutral_score must be between 0 and 100",
            ));
        }
        if self.max_sleep_points <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_sleep_points must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Relative weight of each recovery factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryWeights {
    /// Sleep quality weight
    pub sleep_quality: f64,
    /// Sleep duration weight
    pub sleep_hours: f64,
    /// Nutrition quality weight
    pub nutrition_quality: f64,
    /// Hydration weight
    pub hydration: f64,
    /// Inverted stress weight
    pub stress_level: f64,
}

impl Default for RecoveryWeights {
    fn default() -> Self {
        Self {
            sleep_quality: 30.0,
            sleep_hours: 20.0,
            nutrition_quality: 20.0,
            hydration: 10.0,
            stress_level: 20.0,
        }
    }
}

/// Recovery recommendation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEngineConfig {
    /// Threshold values for triggering recommendations
    pub thresholds: RecommendationThresholds,
    /// Numeric effects of triggered rules
    pub adjustments: RecoveryAdjustments,
    /// Warning messages emitted by triggered rules
    pub messages: RecommendationMessages,
}

impl RecommendationEngineConfig {
    /// Validate adjustment ranges
    ///
    /// # Errors
    ///
    /// Returns an error when the intensity bounds are inverted or the stress
    /// multiplier is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let adj = &self.adjustments;
        if adj.min_intensity_modifier > adj.max_intensity_modifier {
            return Err(ConfigError::ValueOutOfRange(
                "min_intensity_modifier must not exceed max_intensity_modifier",
            ));
        }
        if adj.high_stress_intensity_multiplier <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "high_stress_intensity_multiplier must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Averages below (or, for stress, above) these values trigger a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    /// Average hours of sleep below which sleep is flagged
    pub min_sleep_hours: f64,
    /// Average sleep quality below which sleep quality is flagged
    pub min_sleep_quality: f64,
    /// Average stress level above which stress is flagged
    pub max_stress_level: f64,
    /// Average nutrition quality below which nutrition is flagged
    pub min_nutrition_quality: f64,
    /// Average hydration below which hydration is flagged
    pub min_hydration: f64,
    /// Average daily steps below which activity is flagged
    pub min_step_count: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            min_sleep_hours: 7.0,
            min_sleep_quality: 6.0,
            max_stress_level: 7.0,
            min_nutrition_quality: 6.0,
            min_hydration: 6.0,
            min_step_count: 5000.0,
        }
    }
}

/// Numeric starting points and effects applied by the rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryAdjustments {
    /// Suggested recovery before any rule fires (hours)
    pub base_recovery_hours: u32,
    /// Hours added when sleep is insufficient
    pub insufficient_sleep_extra_hours: u32,
    /// Intensity multiplier applied under high stress
    pub high_stress_intensity_multiplier: f64,
    /// Lower bound of the intensity modifier
    pub min_intensity_modifier: f64,
    /// Upper bound of the intensity modifier
    pub max_intensity_modifier: f64,
}

impl Default for RecoveryAdjustments {
    fn default() -> Self {
        Self {
            base_recovery_hours: 48,
            insufficient_sleep_extra_hours: 12,
            high_stress_intensity_multiplier: 0.8,
            min_intensity_modifier: 0.5,
            max_intensity_modifier: 1.5,
        }
    }
}

/// Warning text for each rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationMessages {
    /// Emitted when average sleep is too short
    pub insufficient_sleep: String,
    /// Emitted when average sleep quality is poor
    pub poor_sleep_quality: String,
    /// Emitted when average stress is high
    pub high_stress: String,
    /// Emitted when average nutrition quality is poor
    pub poor_nutrition: String,
    /// Emitted when average hydration is poor
    pub poor_hydration: String,
    /// Emitted when average daily steps are low
    pub low_activity: String,
}

impl Default for RecommendationMessages {
    fn default() -> Self {
        Self {
            insufficient_sleep: "Insufficient sleep detected".into(),
            poor_sleep_quality: "Poor sleep quality detected".into(),
            high_stress: "High stress levels detected".into(),
            poor_nutrition: "Poor nutrition quality detected".into(),
            poor_hydration: "Poor hydration detected".into(),
            low_activity: "Low daily activity detected".into(),
        }
    }
}
