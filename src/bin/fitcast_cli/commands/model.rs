// ABOUTME: Model lifecycle commands for fitcast-cli
// ABOUTME: Trains and persists artifacts, and reports the state of an artifact on disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::{display_status, display_trained};
use crate::helpers::intelligence_config;
use crate::Result;
use fitcast_core::errors::AppError;
use fitcast_intelligence::{trainer::ModelTrainer, ArtifactStore, ModelProvider};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Train a fresh artifact and write it to `output`
pub fn train(samples: Option<usize>, output: PathBuf, force: bool) -> Result<()> {
    let store = ArtifactStore::new(output);
    if store.path().exists() && !force {
        return Err(AppError::already_exists(format!(
            "Model artifact {}; pass --force to overwrite",
            store.path().display()
        )));
    }

    let mut config = intelligence_config()?;
    if let Some(samples) = samples {
        if samples < 2 {
            return Err(AppError::invalid_input("--samples must be at least 2"));
        }
        config.model.training_samples = samples;
    }

    info!(
        samples = config.model.training_samples,
        path = %store.path().display(),
        "Training fitness model..."
    );
    let started = Instant::now();

    let provider = ModelProvider::new(store, ModelTrainer::new(config.model));
    let artifact = provider.retrain()?;

    display_trained(provider.store().path(), &artifact, started.elapsed());
    Ok(())
}

/// Print the state of the artifact at `path`
pub fn status(path: &Path) {
    let store = ArtifactStore::new(path);
    display_status(store.path(), &store.load());
}
