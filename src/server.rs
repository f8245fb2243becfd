// ABOUTME: HTTP server assembly: route groups, middleware layers, fallback, and serve loop
// ABOUTME: Adds request ids, tracing, CORS for the web client, and a request body size limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, RecoveryRoutes, UserRoutes, WorkoutRoutes};
use axum::{
    http::{header, HeaderName, HeaderValue, Method, Uri},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    map_response_body::MapResponseBodyLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(&config.client_url) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            warn!(client_url = %config.client_url, "Client URL is not a valid origin, allowing any");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::not_found("Route").with_resource_id(uri.path())
}

/// Build the full application router with middleware
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let config = Arc::clone(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(RecoveryRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors_layer(&config))
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(config.max_request_body_bytes)),
        )
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "LiftLog API listening");
    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
