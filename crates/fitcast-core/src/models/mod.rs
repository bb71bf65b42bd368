// ABOUTME: Core data models for prediction requests and results
// ABOUTME: Re-exports profile, history, and prediction records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod history;
mod prediction;
mod profile;

pub use history::{FitnessMetricSnapshot, WorkoutSession};
pub use prediction::{PredictionRequest, PredictionResult};
pub use profile::{ActivityLevel, FitnessGoal, Gender, UserProfile};
