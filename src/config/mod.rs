// ABOUTME: Configuration module for server settings and intelligence parameters
// ABOUTME: Environment-driven server config plus re-exported intelligence configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Configuration for the LiftLog server
//!
//! - **Environment**: server configuration from environment variables
//! - **Intelligence**: recovery score weights and recommendation thresholds

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseUrl, Environment, ServerConfig};
pub use liftlog_intelligence::config::IntelligenceConfig;
