// ABOUTME: User account models: identity, optional body profile, and display preferences
// ABOUTME: The password hash is kept out of this type so it can never be serialized
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-assessed training experience
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    /// New to training
    Beginner,
    /// Some training history
    Intermediate,
    /// Long training history
    Advanced,
}

/// Unit system the client displays weights in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kilograms and centimetres
    #[default]
    Metric,
    /// Pounds and inches
    Imperial,
}

/// Body profile; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Body weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Training experience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<FitnessLevel>,
    /// Free-form training goals
    #[serde(default)]
    pub goals: Vec<String>,
}

/// Reminder toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    /// Remind the user to log recovery
    #[serde(default = "enabled")]
    pub recovery_reminders: bool,
    /// Remind the user to train
    #[serde(default = "enabled")]
    pub workout_reminders: bool,
}

const fn enabled() -> bool {
    true
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            recovery_reminders: true,
            workout_reminders: true,
        }
    }
}

/// Client display preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Unit system
    #[serde(default)]
    pub units: Units,
    /// Reminder toggles
    #[serde(default)]
    pub notifications: NotificationPreferences,
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID, also the JWT subject
    pub id: Uuid,
    /// Unique display handle
    pub username: String,
    /// Unique login email, stored lowercased
    pub email: String,
    /// Body profile
    pub profile: UserProfile,
    /// Display preferences
    pub preferences: UserPreferences,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh account with default preferences
    #[must_use]
    pub fn new(username: String, email: String, profile: UserProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            profile,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
