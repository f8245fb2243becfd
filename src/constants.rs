// ABOUTME: Re-exports application constants from liftlog-core
// ABOUTME: Service names, validation limits, pagination defaults, and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

//! Application constants, shared with `liftlog-core`

pub use liftlog_core::constants::*;
