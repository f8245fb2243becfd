// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, server resources, bearer tokens, and sample payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `liftlog`

use liftlog::{
    auth::AuthManager,
    config::{DatabaseUrl, IntelligenceConfig, ServerConfig},
    database::Database,
    resources::ServerResources,
    server::build_router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

pub const TEST_JWT_SECRET: &[u8] = b"liftlog-test-secret-do-not-use-in-production";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database with migrations applied
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new(&DatabaseUrl::Memory)
        .await
        .expect("Failed to create in-memory database")
}

/// Server configuration suitable for tests
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig {
        database_url: DatabaseUrl::Memory,
        ..ServerConfig::default()
    };
    // Lowest cost bcrypt accepts, keeps account tests fast
    config.auth.bcrypt_cost = 4;
    config
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources() -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(
        database,
        AuthManager::new(TEST_JWT_SECRET, 24),
        Arc::new(test_config()),
        IntelligenceConfig::default(),
    ))
}

/// Resources, full router, and a token for a new user
pub async fn setup_app() -> (Arc<ServerResources>, axum::Router, Uuid, String) {
    let resources = create_test_resources().await;
    let router = build_router(Arc::clone(&resources));
    let user_id = Uuid::new_v4();
    let token = token_for(&resources, user_id);
    (resources, router, user_id, token)
}

/// Bearer token for `user_id`
pub fn token_for(resources: &ServerResources, user_id: Uuid) -> String {
    resources
        .auth_manager
        .generate_token(user_id)
        .expect("Failed to generate token")
}

/// A two-exercise workout request body
pub fn sample_workout_body() -> Value {
    json!({
        "name": "Push Day",
        "date": "2025-03-10",
        "duration": 60,
        "tags": ["push"],
        "exercises": [
            {
                "name": "Bench Press",
                "category": "chest",
                "sets": [
                    { "reps": 10, "weight": 60, "rpe": 7 },
                    { "reps": 8, "weight": 70, "rpe": 9 }
                ]
            },
            {
                "name": "Overhead Press",
                "category": "shoulders",
                "sets": [
                    { "reps": 5, "weight": 40 }
                ]
            }
        ]
    })
}
