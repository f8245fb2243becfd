// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed ServerConfig with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Environment-based configuration

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 5000;
/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/liftlog.db";
/// Default allowed CORS origin
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";
/// Default JWT lifetime
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
/// Default request body limit (10 MiB)
pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL; a bare path is treated as a SQLite file
    ///
    /// # Errors
    ///
    /// Returns a config error for non-SQLite schemes or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let path = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:"));
        match path {
            Some(":memory:") => Ok(Self::Memory),
            Some("") => Err(AppError::config_invalid("DATABASE_URL has an empty path")),
            Some(path) => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
            None if s.contains("://") => Err(AppError::config_invalid(format!(
                "Unsupported database URL scheme: {s}"
            ))),
            None if s.is_empty() => Err(AppError::config_invalid("DATABASE_URL is empty")),
            None => Ok(Self::SQLite {
                path: PathBuf::from(s),
            }),
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Authentication settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret; generated at startup outside production when absent
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Allowed CORS origin
    pub client_url: String,
    /// Deployment environment
    pub environment: Environment,
    /// Request body limit in bytes
    pub max_request_body_bytes: usize,
    /// Number of recent records feeding the recommendation engine
    pub recommendation_history_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: DEFAULT_HOST.to_owned(),
            database_url: DatabaseUrl::SQLite {
                path: PathBuf::from("./data/liftlog.db"),
            },
            auth: AuthConfig {
                jwt_secret: None,
                jwt_expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
                bcrypt_cost: DEFAULT_BCRYPT_COST,
            },
            client_url: DEFAULT_CLIENT_URL.to_owned(),
            environment: Environment::Development,
            max_request_body_bytes: DEFAULT_MAX_REQUEST_BODY_BYTES,
            recommendation_history_limit: defaults::RECOMMENDATION_HISTORY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error when a value cannot be parsed or fails validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let http_port = match env::var(env_config::HTTP_PORT).or_else(|_| env::var(env_config::PORT)) {
            Ok(value) => parse_value(env_config::HTTP_PORT, &value)?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let config = Self {
            http_port,
            host: env_var_or(env_config::HOST, DEFAULT_HOST),
            database_url: DatabaseUrl::parse_url(&env_var_or(
                env_config::DATABASE_URL,
                DEFAULT_DATABASE_URL,
            ))?,
            auth: AuthConfig {
                jwt_secret: env::var(env_config::JWT_SECRET)
                    .ok()
                    .filter(|secret| !secret.is_empty()),
                jwt_expiry_hours: env_parse_or(
                    env_config::JWT_EXPIRY_HOURS,
                    DEFAULT_JWT_EXPIRY_HOURS,
                )?,
                bcrypt_cost: env_parse_or(env_config::BCRYPT_COST, DEFAULT_BCRYPT_COST)?,
            },
            client_url: env_var_or(env_config::CLIENT_URL, DEFAULT_CLIENT_URL),
            environment: Environment::from_str_or_default(&env_var_or(
                env_config::ENVIRONMENT,
                "development",
            )),
            max_request_body_bytes: env_parse_or(
                env_config::MAX_REQUEST_BODY_BYTES,
                DEFAULT_MAX_REQUEST_BODY_BYTES,
            )?,
            recommendation_history_limit: env_parse_or(
                env_config::RECOMMENDATION_HISTORY_LIMIT,
                defaults::RECOMMENDATION_HISTORY_LIMIT,
            )?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a config error describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(AppError::config_invalid(
                "JWT_EXPIRY_HOURS must be greater than zero",
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(AppError::config_invalid(
                "BCRYPT_COST must be between 4 and 31",
            ));
        }
        if self.recommendation_history_limit == 0 {
            return Err(AppError::config_invalid(
                "RECOMMENDATION_HISTORY_LIMIT must be greater than zero",
            ));
        }
        if self.max_request_body_bytes == 0 {
            return Err(AppError::config_invalid(
                "MAX_REQUEST_BODY_BYTES must be greater than zero",
            ));
        }
        if self.auth.jwt_secret.is_none() {
            if self.environment.is_production() {
                return Err(AppError::config("JWT_SECRET is required in production"));
            }
            warn!("JWT_SECRET not set; a random development secret will be generated");
        }
        Ok(())
    }

    /// Summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "LiftLog Server Configuration:\n\
             - HTTP: {}:{}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Client URL: {}\n\
             - JWT expiry: {}h\n\
             - Recommendation history: {}",
            self.host,
            self.http_port,
            self.environment,
            self.database_url,
            self.client_url,
            self.auth.jwt_expiry_hours,
            self.recommendation_history_limit,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` when it is unset
fn env_parse_or<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    env::var(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::config_invalid(format!("Invalid {key} value: {value}")))
}
