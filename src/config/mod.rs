// ABOUTME: Configuration management module for the prediction server
// ABOUTME: Server settings come from the environment; model settings live in fitcast-intelligence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Fitcast server
//!
//! - **Environment**: HTTP binding, CORS origins, and artifact location
//! - **Intelligence**: re-exported from `fitcast_intelligence::config`

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, ServerConfig};
pub use fitcast_intelligence::config::IntelligenceConfig;
