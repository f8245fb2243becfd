// ABOUTME: Recovery recommendation engine driven by recent recovery history
// ABOUTME: Averages recent factors and applies an ordered rule list to build guidance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Recovery recommendations
//!
//! The engine averages each leaf factor across the most recent recovery
//! records, then walks [`RECOMMENDATION_RULES`] in order. Each rule is an
//! independent guarded effect over the accumulating [`Recommendation`]; the
//! order only decides the order of focus areas and warnings.
//!
//! Recommendations are recomputed on every call and never cached.

use crate::config::{
    IntelligenceConfig, RecommendationEngineConfig, RecommendationMessages,
    RecommendationThresholds,
};
use liftlog_core::models::{Recommendation, RecoveryRecord, Workout};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// Averaged sleep factors
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageSleep {
    /// Mean hours slept
    pub hours: f64,
    /// Mean sleep quality
    pub quality: f64,
}

/// Averaged nutrition factors
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageNutrition {
    /// Mean nutrition quality
    pub quality: f64,
    /// Mean hydration
    pub hydration: f64,
}

/// Averaged stress factors
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageStress {
    /// Mean stress level
    pub level: f64,
}

/// Averaged activity factors
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageActivity {
    /// Mean daily steps
    pub step_count: f64,
    /// Mean cardio minutes
    pub cardio_minutes: f64,
}

/// Per-leaf means across recent recovery records.
///
/// A record missing a leaf contributes zero to that leaf and every mean is
/// divided by the record count. With no records every mean is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageRecoveryFactors {
    /// Sleep means
    pub sleep: AverageSleep,
    /// Nutrition means
    pub nutrition: AverageNutrition,
    /// Stress means
    pub stress: AverageStress,
    /// Activity means
    pub activity: AverageActivity,
}

impl AverageRecoveryFactors {
    /// Average the factors of `records`
    #[must_use]
    pub fn from_records(records: &[RecoveryRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut totals = Self::default();
        for record in records {
            let factors = &record.factors;
            totals.sleep.hours += factors.sleep.hours.unwrap_or(0.0);
            totals.sleep.quality += factors.sleep.quality.map_or(0.0, f64::from);
            totals.nutrition.quality += factors.nutrition.quality.map_or(0.0, f64::from);
            totals.nutrition.hydration += factors.nutrition.hydration.map_or(0.0, f64::from);
            totals.stress.level += factors.stress.level.map_or(0.0, f64::from);
            totals.activity.step_count += factors.activity.step_count.map_or(0.0, f64::from);
            totals.activity.cardio_minutes +=
                factors.activity.cardio_minutes.map_or(0.0, f64::from);
        }

        let count = records.len() as f64;
        Self {
            sleep: AverageSleep {
                hours: totals.sleep.hours / count,
                quality: totals.sleep.quality / count,
            },
            nutrition: AverageNutrition {
                quality: totals.nutrition.quality / count,
                hydration: totals.nutrition.hydration / count,
            },
            stress: AverageStress {
                level: totals.stress.level / count,
            },
            activity: AverageActivity {
                step_count: totals.activity.step_count / count,
                cardio_minutes: totals.activity.cardio_minutes / count,
            },
        }
    }
}

/// Recovery factor a recommendation flags for attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    /// Sleep duration
    Sleep,
    /// Sleep quality
    SleepQuality,
    /// Stress
    Stress,
    /// Nutrition quality
    Nutrition,
    /// Hydration
    Hydration,
    /// Daily activity
    Activity,
}

impl FocusArea {
    /// Identifier used in API responses
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::SleepQuality => "sleep_quality",
            Self::Stress => "stress",
            Self::Nutrition => "nutrition",
            Self::Hydration => "hydration",
            Self::Activity => "activity",
        }
    }

    /// Warning emitted when this area is flagged
    #[must_use]
    pub fn warning(self, messages: &RecommendationMessages) -> &str {
        match self {
            Self::Sleep => &messages.insufficient_sleep,
            Self::SleepQuality => &messages.poor_sleep_quality,
            Self::Stress => &messages.high_stress,
            Self::Nutrition => &messages.poor_nutrition,
            Self::Hydration => &messages.poor_hydration,
            Self::Activity => &messages.low_activity,
        }
    }
}

impl Display for FocusArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric side effect of a triggered rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEffect {
    /// Only adds a focus area and warning
    None,
    /// Adds the configured extra hours to the suggested recovery time
    ExtendRecovery,
    /// Multiplies the intensity modifier by the configured stress multiplier
    ScaleIntensity,
}

/// A guarded effect applied to the recommendation accumulator
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRule {
    /// Area flagged when the rule fires
    pub focus_area: FocusArea,
    /// Whether the averaged factors trigger the rule
    pub predicate: fn(&AverageRecoveryFactors, &RecommendationThresholds) -> bool,
    /// Numeric effect when the rule fires
    pub effect: RuleEffect,
}

fn insufficient_sleep(avg: &AverageRecoveryFactors, t: &RecommendationThresholds) -> bool {
    avg.sleep.hours < t.min_sleep_hours
}

fn poor_sleep_quality(avg: &AverageRecoveryFactors, t: &RecommendationThresholds) -> bool {
    avg.sleep.quality < t.min_sleep_quality
}

fn high_stress(avg: &AverageRecoveryFactors, t: &RecommendationThresholds) -> bool {
    avg.stress.level > t.max_stress_level
}

fn poor_nutrition(avg: &AverageRecoveryFactors, t: &RecommendationThresholds) -> bool {
    avg.nutrition.quality < t.min_nutrition_quality
}

fn poor_hydration(avg: &AverageRecoveryFactors, t: &RecommendationThresholds) -> bool {
    avg.nutrition.hydration < t.min_hydration
}

fn low_activity(avg: &AverageRecoveryFactors, t: &RecommendationThresholds) -> bool {
    avg.activity.step_count < t.min_step_count
}

/// Rules in evaluation order
pub const RECOMMENDATION_RULES: [RecommendationRule; 6] = [
    RecommendationRule {
        focus_area: FocusArea::Sleep,
        predicate: insufficient_sleep,
        effect: RuleEffect::ExtendRecovery,
    },
    RecommendationRule {
        focus_area: FocusArea::SleepQuality,
        predicate: poor_sleep_quality,
        effect: RuleEffect::None,
    },
    RecommendationRule {
        focus_area: FocusArea::Stress,
        predicate: high_stress,
        effect: RuleEffect::ScaleIntensity,
    },
    RecommendationRule {
        focus_area: FocusArea::Nutrition,
        predicate: poor_nutrition,
        effect: RuleEffect::None,
    },
    RecommendationRule {
        focus_area: FocusArea::Hydration,
        predicate: poor_hydration,
        effect: RuleEffect::None,
    },
    RecommendationRule {
        focus_area: FocusArea::Activity,
        predicate: low_activity,
        effect: RuleEffect::None,
    },
];

/// Everything returned to the caller of the recommendations endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    /// Generated guidance
    pub recommendations: Recommendation,
    /// The averages the guidance was derived from
    pub average_factors: AverageRecoveryFactors,
    /// Number of workouts considered
    pub recent_workouts: usize,
    /// Number of recovery records considered
    pub recent_recoveries: usize,
}

/// Recovery recommendation engine
#[derive(Debug, Clone)]
pub struct RecoveryRecommendationEngine {
    config: RecommendationEngineConfig,
}

impl Default for RecoveryRecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryRecommendationEngine {
    /// Create an engine with the default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IntelligenceConfig::default().recommendation_engine)
    }

    /// Create an engine with custom thresholds
    #[must_use]
    pub const fn with_config(config: RecommendationEngineConfig) -> Self {
        Self { config }
    }

    /// Build recommendations from the most recent records of one user
    #[must_use]
    pub fn recommend(
        &self,
        recent_recoveries: &[RecoveryRecord],
        recent_workouts: &[Workout],
    ) -> RecommendationReport {
        let average_factors = AverageRecoveryFactors::from_records(recent_recoveries);
        let recommendations = self.evaluate(&average_factors);

        debug!(
            recent_recoveries = recent_recoveries.len(),
            recent_workouts = recent_workouts.len(),
            focus_areas = ?recommendations.focus_areas,
            "Generated recovery recommendations"
        );

        RecommendationReport {
            recommendations,
            average_factors,
            recent_workouts: recent_workouts.len(),
            recent_recoveries: recent_recoveries.len(),
        }
    }

    /// Apply the rule list to averaged factors
    #[must_use]
    pub fn evaluate(&self, averages: &AverageRecoveryFactors) -> Recommendation {
        let adjustments = &self.config.adjustments;
        let mut recommendation = Recommendation {
            suggested_recovery_time: adjustments.base_recovery_hours,
            intensity_modifier: 1.0,
            focus_areas: Vec::new(),
            warnings: Vec::new(),
        };

        for rule in &RECOMMENDATION_RULES {
            if !(rule.predicate)(averages, &self.config.thresholds) {
                continue;
            }

            recommendation
                .focus_areas
                .push(rule.focus_area.as_str().to_owned());
            recommendation
                .warnings
                .push(rule.focus_area.warning(&self.config.messages).to_owned());

            match rule.effect {
                RuleEffect::None => {}
                RuleEffect::ExtendRecovery => {
                    recommendation.suggested_recovery_time = recommendation
                        .suggested_recovery_time
                        .saturating_add(adjustments.insufficient_sleep_extra_hours);
                }
                RuleEffect::ScaleIntensity => {
                    recommendation.intensity_modifier *=
                        adjustments.high_stress_intensity_multiplier;
                }
            }
        }

        recommendation.intensity_modifier = recommendation
            .intensity_modifier
            .clamp(adjustments.min_intensity_modifier, adjustments.max_intensity_modifier);

        recommendation
    }
}

/// Compute recommendations with the default thresholds
#[must_use]
pub fn compute_recommendations(
    recent_recoveries: &[RecoveryRecord],
    recent_workouts: &[Workout],
) -> RecommendationReport {
    RecoveryRecommendationEngine::new().recommend(recent_recoveries, recent_workouts)
}
