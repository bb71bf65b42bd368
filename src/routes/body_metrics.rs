// ABOUTME: Body composition route handlers: BMI, ideal weight, body fat, energy targets
// ABOUTME: Also exposes the MET-based calories-burned estimate; none of these touch the models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json_body;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use fitcast_core::errors::AppError;
use fitcast_core::models::{FitnessMetricSnapshot, UserProfile};
use fitcast_intelligence::body_metrics::{
    calories_burned, met_value, BodyMetricsSummary, Circumferences, Intensity, WorkoutCategory,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body metrics request
#[derive(Debug, Clone, Deserialize)]
pub struct BodyMetricsRequest {
    /// Profile to summarise
    pub user: UserProfile,
    /// Metric snapshots, latest first
    #[serde(default)]
    pub fitness_metrics: Vec<FitnessMetricSnapshot>,
    /// Optional tape measurements for a Navy body fat estimate
    #[serde(default)]
    pub measurements: Option<Circumferences>,
}

/// Calories burned request
#[derive(Debug, Clone, Deserialize)]
pub struct CaloriesBurnedRequest {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Session length (minutes)
    pub duration_min: u32,
    /// Workout family: cardio, strength, flexibility, sports, other
    pub activity_type: String,
    /// low, medium, or high
    #[serde(default = "default_intensity")]
    pub intensity: String,
}

fn default_intensity() -> String {
    "medium".to_owned()
}

/// Calories burned response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaloriesBurnedResponse {
    /// MET value applied
    pub met: f64,
    /// Estimated kcal
    pub calories: i64,
}

/// Body metrics routes
pub struct BodyMetricsRoutes;

impl BodyMetricsRoutes {
    /// Create the body metrics routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/body-metrics", post(Self::handle_body_metrics))
            .route("/api/calories-burned", post(Self::handle_calories_burned))
            .with_state(resources)
    }

    async fn handle_body_metrics(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<BodyMetricsRequest>, JsonRejection>,
    ) -> Result<Json<BodyMetricsSummary>, AppError> {
        let request = json_body(payload)?;
        let summary = resources.predictor.body_metrics(
            &request.user,
            &request.fitness_metrics,
            request.measurements.as_ref(),
        )?;
        Ok(Json(summary))
    }

    async fn handle_calories_burned(
        payload: Result<Json<CaloriesBurnedRequest>, JsonRejection>,
    ) -> Result<Json<CaloriesBurnedResponse>, AppError> {
        let request = json_body(payload)?;
        let calories = calories_burned(
            request.weight_kg,
            request.duration_min,
            &request.activity_type,
            &request.intensity,
        )?;
        Ok(Json(CaloriesBurnedResponse {
            met: met_value(
                WorkoutCategory::parse(&request.activity_type),
                Intensity::parse(&request.intensity),
            ),
            calories,
        }))
    }
}
