// ABOUTME: Environment-based configuration for the HTTP prediction server
// ABOUTME: Reads bind address, CORS origins, and model artifact path with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use fitcast_core::constants::defaults;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string, falling back to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub http_host: String,
    /// Port to bind
    pub http_port: u16,
    /// Allowed CORS origins; `["*"]` allows any
    pub cors_allowed_origins: Vec<String>,
    /// Location of the persisted model artifact
    pub model_path: PathBuf,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: defaults::HTTP_HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            cors_allowed_origins: parse_origins(defaults::CORS_ALLOWED_ORIGINS),
            model_path: PathBuf::from(defaults::MODEL_PATH),
            environment: Environment::Development,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `HTTP_HOST` | `0.0.0.0` |
    /// | `HTTP_PORT` | `8000` |
    /// | `CORS_ALLOWED_ORIGINS` | `http://localhost:5173,http://localhost:3000` |
    /// | `FITCAST_MODEL_PATH` | `fitness_model.json` |
    /// | `ENVIRONMENT` | `development` |
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` is not a valid port number
    pub fn from_env() -> Result<Self> {
        let config = Self {
            http_host: env_var_or("HTTP_HOST", defaults::HTTP_HOST),
            http_port: env_var_or("HTTP_PORT", &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            cors_allowed_origins: parse_origins(&env_var_or(
                "CORS_ALLOWED_ORIGINS",
                defaults::CORS_ALLOWED_ORIGINS,
            )),
            model_path: PathBuf::from(env_var_or("FITCAST_MODEL_PATH", defaults::MODEL_PATH)),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the host or model path is empty
    pub fn validate(&self) -> Result<()> {
        if self.http_host.trim().is_empty() {
            anyhow::bail!("HTTP_HOST must not be empty");
        }
        if self.model_path.as_os_str().is_empty() {
            anyhow::bail!("FITCAST_MODEL_PATH must not be empty");
        }
        Ok(())
    }

    /// Socket address string for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Fitcast Server Configuration:\n\
             - HTTP: {}\n\
             - CORS Origins: {}\n\
             - Model Artifact: {}\n\
             - Environment: {}",
            self.bind_address(),
            self.cors_allowed_origins.join(", "),
            self.model_path.display(),
            self.environment,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
