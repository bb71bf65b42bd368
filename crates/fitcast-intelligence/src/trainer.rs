// ABOUTME: Model trainer fitting the shared preprocessor and both forest regressors
// ABOUTME: Rejects empty, misaligned, or non-finite training tables before fitting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::artifact::{TrainedModelArtifact, ARTIFACT_FORMAT_VERSION};
use crate::config::ModelConfig;
use crate::errors::ModelError;
use crate::features::FeatureRecord;
use crate::forest::RandomForestRegressor;
use crate::preprocessing::FeaturePreprocessor;
use crate::synthetic::SyntheticDataGenerator;
use chrono::Utc;
use fitcast_core::constants::feature_columns;
use std::time::Instant;
use tracing::info;

/// Fits [`TrainedModelArtifact`]s from labeled tables
#[derive(Debug, Clone)]
pub struct ModelTrainer {
    config: ModelConfig,
}

impl Default for ModelTrainer {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl ModelTrainer {
    /// Trainer using the forest settings in `config`
    #[must_use]
    pub const fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Model settings in use
    #[must_use]
    pub const fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Fit the preprocessor and both regressors
    ///
    /// # Errors
    ///
    /// - [`ModelError::EmptyTrainingSet`] for an empty table
    /// - [`ModelError::LengthMismatch`] when a target vector is misaligned
    /// - [`ModelError::MalformedTrainingRow`] for any non-finite numeric value or target
    pub fn train(
        &self,
        features: &[FeatureRecord],
        weight_targets: &[f64],
        fitness_targets: &[f64],
    ) -> Result<TrainedModelArtifact, ModelError> {
        validate_table(features, weight_targets, fitness_targets)?;
        let started = Instant::now();

        let preprocessor = FeaturePreprocessor::fit(features)?;
        let encoded = preprocessor.transform_all(features);

        let mut weight_change_model = RandomForestRegressor::from_config(&self.config);
        let mut fitness_score_model = RandomForestRegressor::from_config(&self.config);
        let (weight_fit, fitness_fit) = rayon::join(
            || weight_change_model.fit(&encoded, weight_targets),
            || fitness_score_model.fit(&encoded, fitness_targets),
        );
        weight_fit?;
        fitness_fit?;

        info!(
            samples = features.len(),
            encoded_width = preprocessor.output_width(),
            estimators = self.config.n_estimators,
            elapsed_ms = started.elapsed().as_millis(),
            "Trained fitness models"
        );

        Ok(TrainedModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            created_at: Utc::now(),
            n_training_samples: features.len(),
            preprocessor,
            weight_change_model,
            fitness_score_model,
        })
    }

    /// Generate a synthetic table of the configured size and train on it
    ///
    /// # Errors
    ///
    /// Propagates training errors from [`ModelTrainer::train`]
    pub fn train_from(
        &self,
        generator: &dyn SyntheticDataGenerator,
    ) -> Result<TrainedModelArtifact, ModelError> {
        let table = generator.generate(self.config.training_samples);
        self.train(&table.features, &table.weight_change, &table.fitness_score)
    }
}

fn validate_table(
    features: &[FeatureRecord],
    weight_targets: &[f64],
    fitness_targets: &[f64],
) -> Result<(), ModelError> {
    if features.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }
    for (target, values) in [
        ("weight_change", weight_targets),
        ("fitness_score", fitness_targets),
    ] {
        if values.len() != features.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                targets: values.len(),
                target,
            });
        }
    }

    for (row, record) in features.iter().enumerate() {
        let numeric = record.numeric_values();
        if let Some(column) = numeric
            .iter()
            .zip(feature_columns::NUMERIC)
            .find_map(|(value, column)| (!value.is_finite()).then_some(column))
        {
            return Err(ModelError::MalformedTrainingRow { row, column });
        }
        if !weight_targets[row].is_finite() {
            return Err(ModelError::MalformedTrainingRow {
                row,
                column: "weight_change",
            });
        }
        if !fitness_targets[row].is_finite() {
            return Err(ModelError::MalformedTrainingRow {
                row,
                column: "fitness_score",
            });
        }
    }
    Ok(())
}
