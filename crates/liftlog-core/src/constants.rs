// ABOUTME: Application constants organized by domain for LiftLog
// ABOUTME: Service names, validation limits, pagination defaults, and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Application-wide constants grouped by concern.

/// Service identification
pub mod service_names {
    /// Name used in logs and JWT audience
    pub const LIFTLOG_SERVER: &str = "liftlog-server";
}

/// Validation limits enforced by the request layer
pub mod limits {
    /// Maximum length of a workout name
    pub const MAX_WORKOUT_NAME_LENGTH: usize = 100;
    /// Maximum length of feedback comments
    pub const MAX_FEEDBACK_COMMENT_LENGTH: usize = 500;
    /// Inclusive bounds for 1-10 self-reported scales (RPE, sleep quality, stress...)
    pub const SCALE_MIN: u8 = 1;
    /// Upper bound for 1-10 self-reported scales
    pub const SCALE_MAX: u8 = 10;
    /// Inclusive bounds for 1-5 feedback ratings
    pub const RATING_MIN: u8 = 1;
    /// Upper bound for 1-5 feedback ratings
    pub const RATING_MAX: u8 = 5;
    /// Maximum plausible hours of sleep in a day
    pub const MAX_SLEEP_HOURS: f64 = 24.0;
    /// Minimum reps in a recorded set
    pub const MIN_REPS: u32 = 1;
    /// Shortest accepted username
    pub const MIN_USERNAME_LENGTH: usize = 3;
    /// Longest accepted username
    pub const MAX_USERNAME_LENGTH: usize = 30;
    /// Shortest accepted password
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Youngest age a profile may record
    pub const MIN_AGE: u32 = 13;
    /// Oldest age a profile may record
    pub const MAX_AGE: u32 = 120;
    /// Lowest body weight a profile may record, in kg
    pub const MIN_BODY_WEIGHT_KG: f64 = 20.0;
    /// Highest body weight a profile may record, in kg
    pub const MAX_BODY_WEIGHT_KG: f64 = 300.0;
    /// Lowest height a profile may record, in cm
    pub const MIN_HEIGHT_CM: f64 = 100.0;
    /// Highest height a profile may record, in cm
    pub const MAX_HEIGHT_CM: f64 = 250.0;
}

/// User-facing error messages shared by the account routes
pub mod error_messages {
    /// Login failed; deliberately identical for unknown email and wrong password
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
    /// Registration or profile update collided with an existing account
    pub const USER_ALREADY_EXISTS: &str = "User already exists with this email or username";
}

/// Defaults shared by list endpoints
pub mod pagination {
    /// Page number used when the client omits one
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the client omits one
    pub const DEFAULT_LIMIT: u32 = 10;
    /// Largest page size a client may request
    pub const MAX_LIMIT: u32 = 100;
}

/// Defaults for domain objects
pub mod defaults {
    /// Name assigned to a workout submitted without one
    pub const WORKOUT_NAME: &str = "Workout";
    /// Number of recent records the recommendation engine looks at
    pub const RECOMMENDATION_HISTORY_LIMIT: u32 = 5;
    /// Default window for statistics and progress queries
    pub const STATS_PERIOD: &str = "30d";
}

/// Environment variable names
pub mod env_config {
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Legacy HTTP port variable
    pub const PORT: &str = "PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// JWT signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// JWT lifetime in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// bcrypt work factor for password hashes
    pub const BCRYPT_COST: &str = "BCRYPT_COST";
    /// CORS allowed origin
    pub const CLIENT_URL: &str = "CLIENT_URL";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Request body limit in bytes
    pub const MAX_REQUEST_BODY_BYTES: &str = "MAX_REQUEST_BODY_BYTES";
    /// Number of records feeding the recommendation engine
    pub const RECOMMENDATION_HISTORY_LIMIT: &str = "RECOMMENDATION_HISTORY_LIMIT";
}
