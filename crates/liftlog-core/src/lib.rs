// ABOUTME: Core types and constants for the LiftLog training log
// ABOUTME: Foundation crate with error handling, domain models, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

#![deny(unsafe_code)]

//! # LiftLog Core
//!
//! Foundation crate providing shared types and constants for the LiftLog
//! training log. This crate is designed to change infrequently so that the
//! server and the intelligence crate can compile against a stable base.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and HTTP responses
//! - **constants**: Application-wide constants organized by domain
//! - **pagination**: Page/limit pagination for list endpoints
//! - **models**: Workout, exercise, set, recovery, and user data models

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Page/limit pagination metadata for list endpoints
pub mod pagination;

/// Core data models (Workout, Exercise, RecoveryRecord, ...)
pub mod models;
