// ABOUTME: Prediction request envelope and prediction result records
// ABOUTME: Wire shapes for the predict operation consumed by HTTP and CLI collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{FitnessMetricSnapshot, UserProfile, WorkoutSession};
use serde::{Deserialize, Serialize};

/// Everything needed to run a prediction for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Demographics and goal
    pub user: UserProfile,
    /// Workout history, assumed to cover four weeks
    #[serde(default)]
    pub workout_history: Vec<WorkoutSession>,
    /// Metric snapshots, latest first
    #[serde(default)]
    pub fitness_metrics: Vec<FitnessMetricSnapshot>,
}

/// Outcome of a prediction, constructed fresh per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Projected body weight four weeks out (kg, one decimal)
    pub predicted_weight: f64,
    /// Daily calorie target
    pub recommended_calories: i64,
    /// Composite fitness score (0-100)
    pub fitness_score: u8,
    /// At most four recommendation strings
    pub recommendations: Vec<String>,
    /// The suggested next goal
    pub next_goal: String,
}
