// ABOUTME: HTTP route modules for the prediction API
// ABOUTME: Shared helpers for JSON body rejection and offloading CPU-bound work
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route handlers organised by domain

/// Body composition and calories burned endpoints
pub mod body_metrics;
/// Health and readiness endpoints
pub mod health;
/// Welcome and prediction endpoints
pub mod predict;

pub use body_metrics::BodyMetricsRoutes;
pub use health::HealthRoutes;
pub use predict::PredictionRoutes;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use fitcast_core::errors::{AppError, AppResult};

/// Unwrap a JSON body, turning axum's rejection into an invalid-input error
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

/// Run CPU-bound work on tokio's blocking pool
pub(crate) async fn blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("Blocking task failed: {e}")))?
}
