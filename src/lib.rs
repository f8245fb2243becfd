// ABOUTME: Main library entry point for the LiftLog training log server
// ABOUTME: REST API over accounts, workouts, and recovery records, backed by SQLite and JWT auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

#![deny(unsafe_code)]

//! # LiftLog
//!
//! A strength training log. Users record workouts made of exercises and
//! sets, and daily recovery factors (sleep, nutrition, stress, activity)
//! tied to a workout. The server derives workout metrics, scores recovery,
//! and recommends rest time and training intensity from recent history.
//!
//! ## Architecture
//!
//! - **`liftlog-core`**: models, errors, pagination, and constants
//! - **`liftlog-intelligence`**: metrics, scoring, recommendations, and aggregation
//! - **this crate**: configuration, logging, authentication, persistence, and HTTP
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftlog::config::ServerConfig;
//! use liftlog::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("LiftLog configured with port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuing and bearer token authentication
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// Limits and defaults shared with the core crate
pub mod constants;

/// SQLite persistence for accounts, workouts, and recovery records
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Shared resources handed to route handlers
pub mod resources;

/// REST route groups
pub mod routes;

/// Router assembly and the serve loop
pub mod server;

pub use liftlog_core::models;
