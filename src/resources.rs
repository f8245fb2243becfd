// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Bundles database, auth manager, configuration, and the intelligence calculators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use http::HeaderMap;
use liftlog_intelligence::{
    IntelligenceConfig, RecoveryRecommendationEngine, RecoveryScoreCalculator,
};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Everything a request handler needs, created once at startup
#[derive(Debug)]
pub struct ServerResources {
    /// Workout and recovery storage
    pub database: Database,
    /// Bearer token validation
    pub auth_manager: AuthManager,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Recovery score calculator
    pub recovery_scorer: RecoveryScoreCalculator,
    /// Recovery recommendation engine
    pub recommendation_engine: RecoveryRecommendationEngine,
    /// Process start, for the health endpoint uptime
    pub started_at: Instant,
}

impl ServerResources {
    /// Assemble resources from their parts
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        config: Arc<ServerConfig>,
        intelligence: IntelligenceConfig,
    ) -> Self {
        Self {
            database,
            auth_manager,
            config,
            recovery_scorer: RecoveryScoreCalculator::with_config(intelligence.recovery_scoring),
            recommendation_engine: RecoveryRecommendationEngine::with_config(
                intelligence.recommendation_engine,
            ),
            started_at: Instant::now(),
        }
    }

    /// Authenticate a request and return the caller's user id
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the bearer token is missing, invalid, or expired
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<Uuid> {
        let result = self.auth_manager.authenticate(headers);
        if let Err(error) = &result {
            AppLogger::log_auth_event(None, error.code.description(), false);
        }
        result
    }
}
