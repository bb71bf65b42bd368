// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Service identity, metric fallbacks, workout vocabulary, and feature column names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants shared across the Fitcast workspace.

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the HTTP prediction service
    pub const FITCAST_SERVER: &str = "fitcast-server";
    /// Name of the management CLI
    pub const FITCAST_CLI: &str = "fitcast-cli";
}

/// Fallback values used when a metric snapshot does not carry a field
pub mod metric_defaults {
    /// Resting heart rate (bpm) assumed when not tracked
    pub const RESTING_HEART_RATE_BPM: f64 = 70.0;
    /// Nightly sleep (hours) assumed when not tracked
    pub const SLEEP_HOURS: f64 = 7.0;
    /// Stress level (1-10 scale) assumed when not tracked
    pub const STRESS_LEVEL: f64 = 5.0;
}

/// Workout type vocabulary recognised by the feature builder
pub mod workout_types {
    /// Cardiovascular session
    pub const CARDIO: &str = "cardio";
    /// Resistance / strength session
    pub const STRENGTH: &str = "strength";
}

/// Column names of the feature record, in schema order
pub mod feature_columns {
    /// Numeric columns, scaled with a z-score transform
    pub const NUMERIC: [&str; 11] = [
        "age",
        "weight",
        "height",
        "weekly_workouts",
        "avg_duration",
        "cardio_ratio",
        "strength_ratio",
        "bmi",
        "resting_heart_rate",
        "sleep_hours",
        "stress_level",
    ];

    /// Categorical columns, one-hot encoded
    pub const CATEGORICAL: [&str; 3] = ["gender", "activity_level", "goal"];
}

/// Default HTTP and storage settings
pub mod defaults {
    /// Default bind host
    pub const HTTP_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8000;
    /// Default artifact location
    pub const MODEL_PATH: &str = "fitness_model.json";
    /// Frontend development origins allowed by default
    pub const CORS_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
}
