// ABOUTME: Logging configuration and structured logging setup for the LiftLog server
// ABOUTME: Configures log levels, output format, and noise filtering for tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Structured logging configuration

use crate::constants::service_names;
use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to pretty output
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            service_name: service_names::LIFTLOG_SERVER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT").map_or(LogFormat::Pretty, |v| LogFormat::parse(&v));
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // Production always gets location and thread info
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::LIFTLOG_SERVER.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Build the filter, always applying noise reduction on top of the base level
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").unwrap_or_else(|_| self.level.clone());
        [
            "hyper=warn".to_owned(),
            "hyper::proto=warn".to_owned(),
            "sqlx=warn".to_owned(),
            "sqlx::query=warn".to_owned(),
            "tower_http=info".to_owned(),
            format!("liftlog={}", self.level),
        ]
        .iter()
        .fold(EnvFilter::new(base), |filter, directive| {
            filter.add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            )
        })
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "LiftLog server starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "thread": self.include_thread
            }
        });

        info!("Logging configured: {}", config_summary);
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Application-specific logging helpers
pub struct AppLogger;

impl AppLogger {
    /// Log an authentication outcome
    pub fn log_auth_event(user_id: Option<Uuid>, event: &str, success: bool) {
        let user = user_id.map_or_else(|| "anonymous".to_owned(), |id| id.to_string());
        info!(
            user.id = %user,
            auth.event = %event,
            auth.success = %success,
            "Authentication event"
        );
    }

    /// Log a database operation
    pub fn log_database_operation(operation: &str, table: &str, success: bool, duration_ms: u64) {
        info!(
            db.operation = %operation,
            db.table = %table,
            db.success = %success,
            db.duration_ms = %duration_ms,
            "Database operation"
        );
    }
}
