// ABOUTME: Model lifecycle error types for training, persistence, and inference
// ABOUTME: Converts into AppError so HTTP and CLI layers report them uniformly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitcast_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised while building, storing, or running the prediction models
#[derive(Debug, Error)]
pub enum ModelError {
    /// A training row carries a NaN or infinite value
    #[error("training row {row} has a non-finite value in column '{column}'")]
    MalformedTrainingRow {
        /// Zero-based row index
        row: usize,
        /// Offending column
        column: &'static str,
    },

    /// Features and targets have different lengths
    #[error("training table has {features} feature rows but {targets} '{target}' targets")]
    LengthMismatch {
        /// Number of feature rows
        features: usize,
        /// Number of target values
        targets: usize,
        /// Target name
        target: &'static str,
    },

    /// Nothing to train on
    #[error("training table is empty")]
    EmptyTrainingSet,

    /// A model was used before being fitted
    #[error("{0} has not been fitted")]
    NotFitted(&'static str),

    /// Inference received a row of the wrong width
    #[error("expected {expected} encoded features, got {actual}")]
    FeatureWidthMismatch {
        /// Width the model was fitted on
        expected: usize,
        /// Width supplied
        actual: usize,
    },

    /// The artifact could not be written or read
    #[error("artifact I/O failed for {path}: {source}")]
    ArtifactIo {
        /// Artifact location
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be encoded
    #[error("artifact serialization failed: {0}")]
    ArtifactEncoding(#[from] serde_json::Error),

    /// The single-flight lock was poisoned by a panicking trainer
    #[error("model provider lock poisoned")]
    ProviderPoisoned,
}

impl From<ModelError> for AppError {
    fn from(error: ModelError) -> Self {
        let code = match &error {
            ModelError::MalformedTrainingRow { .. }
            | ModelError::LengthMismatch { .. }
            | ModelError::EmptyTrainingSet => ErrorCode::TrainingFailed,
            ModelError::NotFitted(_) | ModelError::FeatureWidthMismatch { .. } => {
                ErrorCode::PredictionFailed
            }
            ModelError::ArtifactIo { .. } => ErrorCode::StorageError,
            ModelError::ArtifactEncoding(_) => ErrorCode::SerializationError,
            ModelError::ProviderPoisoned => ErrorCode::InternalError,
        };
        let details = match &error {
            ModelError::MalformedTrainingRow { row, column } => {
                serde_json::json!({ "row": row, "column": column })
            }
            _ => serde_json::Value::Null,
        };
        Self::new(code, error.to_string())
            .with_details(details)
            .with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_row_maps_to_training_failure_with_details() {
        let app_error = AppError::from(ModelError::MalformedTrainingRow {
            row: 7,
            column: "bmi",
        });

        assert_eq!(app_error.code, ErrorCode::TrainingFailed);
        assert_eq!(app_error.details["row"], 7);
        assert_eq!(app_error.details["column"], "bmi");
    }

    #[test]
    fn test_width_mismatch_maps_to_prediction_failure() {
        let app_error = AppError::from(ModelError::FeatureWidthMismatch {
            expected: 23,
            actual: 4,
        });
        assert_eq!(app_error.code, ErrorCode::PredictionFailed);
        assert_eq!(app_error.http_status(), 500);
    }

    #[test]
    fn test_conversion_keeps_model_error_as_source() {
        let app_error = AppError::from(ModelError::EmptyTrainingSet);

        let source = std::error::Error::source(&app_error).unwrap();
        assert_eq!(source.to_string(), "training table is empty");
        assert!(source.downcast_ref::<ModelError>().is_some());
    }
}
