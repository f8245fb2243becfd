// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports status, current timestamp, and process uptime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `OK` while the server is serving requests
    pub status: String,
    /// Current time (RFC 3339)
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime: f64,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Handle GET /api/health
    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "OK".to_owned(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime: resources.started_at.elapsed().as_secs_f64(),
        })
    }
}
