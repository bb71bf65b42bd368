// ABOUTME: Main library entry point for the Fitcast prediction API
// ABOUTME: Wires configuration, logging, and HTTP routes around the fitness intelligence crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitcast Server
//!
//! HTTP API predicting four-week body weight, a composite fitness score, a daily
//! calorie target, and short recommendations from a profile, a workout history,
//! and recent fitness metrics.
//!
//! ## Architecture
//!
//! - **`fitcast-core`**: wire models, error types, constants
//! - **`fitcast-intelligence`**: synthetic cohort, random forests, artifact store,
//!   nutrition formulas, recommendation engine
//! - **this crate**: environment configuration, logging, axum routes, binaries
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitcast_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Fitcast configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Shared handler state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serve loop
pub mod server;

pub use fitcast_core::errors::{AppError, AppResult, ErrorCode};
pub use resources::ServerResources;
