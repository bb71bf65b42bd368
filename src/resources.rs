// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Builds the model provider and predictor once from server and intelligence configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use fitcast_intelligence::{
    ArtifactStore, FitnessPredictor, IntelligenceConfig, ModelProvider,
    trainer::ModelTrainer,
};
use std::sync::Arc;

/// Long-lived state shared by all handlers
#[derive(Debug, Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: ServerConfig,
    /// Prediction pipeline over the shared model provider
    pub predictor: FitnessPredictor,
}

impl ServerResources {
    /// Wire the provider and predictor for `config.model_path`
    #[must_use]
    pub fn new(config: ServerConfig, intelligence: &IntelligenceConfig) -> Self {
        let provider = Arc::new(ModelProvider::new(
            ArtifactStore::new(config.model_path.clone()),
            ModelTrainer::new(intelligence.model.clone()),
        ));
        let predictor = FitnessPredictor::new(provider, intelligence);
        Self::with_predictor(config, predictor)
    }

    /// Use a preconfigured predictor
    #[must_use]
    pub const fn with_predictor(config: ServerConfig, predictor: FitnessPredictor) -> Self {
        Self { config, predictor }
    }

    /// The shared model provider
    #[must_use]
    pub fn provider(&self) -> &Arc<ModelProvider> {
        self.predictor.provider()
    }
}
