// ABOUTME: Fitness prediction engine crate root
// ABOUTME: Feature engineering, forest models, artifact lifecycle, nutrition, and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitcast Intelligence
//!
//! The prediction pipeline behind the Fitcast API:
//!
//! - [`features`] turns a profile plus history into a flat [`features::FeatureRecord`]
//! - [`synthetic`] produces the bootstrap training table
//! - [`preprocessing`] and [`forest`] hold the fitted transform and regressors
//! - [`trainer`] and [`artifact`] fit, persist, and serve the model artifact
//! - [`nutrition`] and [`body_metrics`] cover energy expenditure and body composition
//! - [`recommendation_engine`] writes the textual guidance
//! - [`predictor`] ties the above together for one request

/// Intelligence configuration
pub mod config;
/// Model lifecycle errors
pub mod errors;
/// Feature extraction from request records
pub mod features;
/// Synthetic cohort generation and rule-based labels
pub mod synthetic;
/// Z-score scaling and one-hot encoding
pub mod preprocessing;
/// Random forest regression
pub mod forest;
/// Model training
pub mod trainer;
/// Artifact persistence and the shared model provider
pub mod artifact;
/// BMR / TDEE estimation
pub mod nutrition;
/// BMI, body fat, and MET-based calorie helpers
pub mod body_metrics;
/// Rule-based recommendations and next goals
pub mod recommendation_engine;
/// End-to-end prediction
pub mod predictor;

pub use artifact::{ArtifactStatus, ArtifactStore, ModelProvider, TrainedModelArtifact};
pub use config::IntelligenceConfig;
pub use errors::ModelError;
pub use features::{FeatureBuilder, FeatureRecord};
pub use predictor::FitnessPredictor;
