// ABOUTME: One-shot prediction command for fitcast-cli
// ABOUTME: Reads a JSON request file and prints the prediction as pretty JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::intelligence_config;
use crate::Result;
use fitcast_core::errors::AppError;
use fitcast_core::models::PredictionRequest;
use fitcast_intelligence::{trainer::ModelTrainer, ArtifactStore, FitnessPredictor, ModelProvider};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Predict for the request in `input`, training the artifact at `model` if needed
pub fn run(input: &Path, model: PathBuf) -> Result<()> {
    let raw = fs::read_to_string(input).map_err(|e| {
        AppError::not_found(format!("request file {}", input.display())).with_source(e)
    })?;
    let request: PredictionRequest = serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_input(format!("Malformed request file {}: {e}", input.display()))
    })?;

    let config = intelligence_config()?;
    let provider = Arc::new(ModelProvider::new(
        ArtifactStore::new(model),
        ModelTrainer::new(config.model.clone()),
    ));
    let result = FitnessPredictor::new(provider, &config).predict_request(&request)?;

    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|e| AppError::serialization(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}
