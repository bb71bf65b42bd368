// ABOUTME: Prediction route handlers for the weight and fitness forecast API
// ABOUTME: Runs CPU-bound inference (and first-use training) on the blocking thread pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prediction routes
//!
//! `POST /api/predict` accepts `{user, workout_history, fitness_metrics}` and returns a
//! [`PredictionResult`].

use super::{blocking, json_body};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use fitcast_core::errors::AppError;
use fitcast_core::models::{PredictionRequest, PredictionResult};
use std::sync::Arc;
use std::time::Instant;

/// Prediction routes
pub struct PredictionRoutes;

impl PredictionRoutes {
    /// Create the welcome and prediction routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/api/predict", post(Self::handle_predict))
            .with_state(resources)
    }

    async fn handle_root() -> Json<serde_json::Value> {
        Json(serde_json::json!({ "message": "Welcome to Fitness Prediction API" }))
    }

    /// Handle a prediction request
    async fn handle_predict(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<PredictionRequest>, JsonRejection>,
    ) -> Result<Json<PredictionResult>, AppError> {
        let request = json_body(payload)?;
        let started = Instant::now();
        let goal = request.user.goal.to_string();

        let result = blocking(move || resources.predictor.predict_request(&request)).await?;

        AppLogger::log_prediction(
            &goal,
            result.fitness_score,
            result.recommended_calories,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(Json(result))
    }
}
