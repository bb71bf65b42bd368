// ABOUTME: Shared helpers for fitcast-cli commands
// ABOUTME: Configuration loading and terminal output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;

use crate::Result;
use fitcast_core::errors::AppError;
use fitcast_intelligence::IntelligenceConfig;

/// Intelligence configuration with environment overrides applied
pub fn intelligence_config() -> Result<IntelligenceConfig> {
    IntelligenceConfig::load().map_err(|e| AppError::config(e.to_string()))
}
