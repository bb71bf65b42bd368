// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides small-model configuration, predictor wiring, and request fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fitcast_server`

use fitcast_core::models::{
    ActivityLevel, FitnessGoal, FitnessMetricSnapshot, Gender, UserProfile, WorkoutSession,
};
use fitcast_intelligence::recommendation_engine::SeededSampler;
use fitcast_intelligence::{trainer::ModelTrainer, ArtifactStore, FitnessPredictor, ModelProvider};
use fitcast_server::config::{IntelligenceConfig, ServerConfig};
use fitcast_server::ServerResources;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Intelligence configuration small enough to train in well under a second
pub fn fast_intelligence_config() -> IntelligenceConfig {
    let mut config = IntelligenceConfig::default();
    config.model.training_samples = 200;
    config.model.n_estimators = 8;
    config.model.synthetic_seed = Some(17);
    config
}

/// Artifact path inside a temp dir
pub fn model_path(dir: &Path) -> PathBuf {
    dir.join("fitness_model.json")
}

/// Provider over `path` with the fast configuration
pub fn provider(path: &Path) -> Arc<ModelProvider> {
    let config = fast_intelligence_config();
    Arc::new(ModelProvider::new(
        ArtifactStore::new(path),
        ModelTrainer::new(config.model),
    ))
}

/// Predictor with deterministic recommendation sampling
pub fn predictor(path: &Path) -> FitnessPredictor {
    init_test_logging();
    let config = fast_intelligence_config();
    FitnessPredictor::new(provider(path), &config)
        .with_sampler(&config, Arc::new(SeededSampler::new(11)))
}

/// Server resources backed by a temp-dir artifact
pub fn resources(dir: &Path) -> ServerResources {
    let path = model_path(dir);
    let config = ServerConfig {
        model_path: path.clone(),
        ..ServerConfig::default()
    };
    ServerResources::with_predictor(config, predictor(&path))
}

/// Standard adult profile
pub fn profile(gender: Gender, goal: FitnessGoal) -> UserProfile {
    UserProfile {
        name: "Casey".to_owned(),
        age: 30,
        gender,
        weight: 80.0,
        height: 180.0,
        activity_level: ActivityLevel::Moderate,
        goal,
    }
}

/// One workout session
pub fn session(kind: &str, duration: u32) -> WorkoutSession {
    WorkoutSession {
        date: "2025-03-01".to_owned(),
        duration,
        workout_type: kind.to_owned(),
        calories: 300,
        intensity: "medium".to_owned(),
        notes: None,
    }
}

/// Snapshot with sleep and stress set
pub fn snapshot(sleep_hours: f64, stress_level: u32) -> FitnessMetricSnapshot {
    FitnessMetricSnapshot {
        date: "2025-03-01".to_owned(),
        weight: Some(79.0),
        body_fat: Some(21.5),
        resting_heart_rate: Some(62),
        vo2_max: None,
        sleep_hours: Some(sleep_hours),
        stress_level: Some(stress_level),
    }
}

/// JSON body for the canonical male scenario
pub fn male_request_json() -> serde_json::Value {
    serde_json::json!({
        "user": {
            "name": "Casey",
            "age": 30,
            "gender": "male",
            "weight": 80.0,
            "height": 180.0,
            "activity_level": "moderate",
            "goals": "lose_weight"
        },
        "workout_history": [],
        "fitness_metrics": []
    })
}
