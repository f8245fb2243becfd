// ABOUTME: Re-exports the unified error types from liftlog-core for the server crate
// ABOUTME: Keeps crate::errors paths stable for routes, database, and auth modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Unified error handling, shared with `liftlog-core`

pub use liftlog_core::errors::*;
