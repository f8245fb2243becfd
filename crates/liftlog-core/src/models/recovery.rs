// ABOUTME: Recovery tracking models: daily factors, scored records, feedback, recommendations
// ABOUTME: All factor fields are optional and absent values are distinct from zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sleep inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepFactors {
    /// Hours slept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    /// Self-reported quality (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

/// Nutrition inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFactors {
    /// Self-reported diet quality (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    /// Self-reported hydration (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydration: Option<u8>,
}

/// Stress inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressFactors {
    /// Overall stress (1-10, higher is worse)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Work-related stress (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_stress: Option<u8>,
}

/// Daily activity outside of training
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFactors {
    /// Step count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<u32>,
    /// Minutes of cardio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio_minutes: Option<u32>,
    /// Minutes of general activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_minutes: Option<u32>,
}

/// Everything a user reports about a recovery day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryFactors {
    /// Sleep inputs
    #[serde(default)]
    pub sleep: SleepFactors,
    /// Nutrition inputs
    #[serde(default)]
    pub nutrition: NutritionFactors,
    /// Stress inputs
    #[serde(default)]
    pub stress: StressFactors,
    /// Activity inputs
    #[serde(default)]
    pub activity: ActivityFactors,
}

/// User feedback on the recommendations attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// How accurate the recommendation felt (1-5)
    pub accuracy: u8,
    /// How helpful the recommendation was (1-5)
    pub helpfulness: u8,
    /// Optional comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Recovery guidance derived from recent history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Suggested rest before the next hard session, in hours
    pub suggested_recovery_time: u32,
    /// Multiplier for planned training intensity (0.5-1.5)
    pub intensity_modifier: f64,
    /// Factors needing attention, e.g. "sleep" or "hydration"
    pub focus_areas: Vec<String>,
    /// Human-readable warnings in rule order
    pub warnings: Vec<String>,
}

/// A scored recovery entry tied to one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRecord {
    /// Record ID
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Workout this entry follows
    pub workout_id: Uuid,
    /// Day the factors describe
    pub date: DateTime<Utc>,
    /// Reported factors
    pub factors: RecoveryFactors,
    /// Weighted recovery score (0-100), computed at save time
    pub recovery_score: u8,
    /// Readiness score (0-100), computed at save time
    pub readiness_score: u8,
    /// Recommendations attached by the client, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendation>,
    /// Feedback on the recommendations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
