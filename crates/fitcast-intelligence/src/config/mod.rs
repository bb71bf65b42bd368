// ABOUTME: Intelligence configuration for model training, nutrition formulas, and recommendations
// ABOUTME: Typed defaults with environment overrides and validation, loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Provides validated configuration for the prediction pipeline:
//!
//! - **model**: synthetic table size, forest size, seeds, history/projection windows
//! - **nutrition**: Mifflin-St Jeor coefficients, activity multipliers, calorie adjustments
//! - **recommendations**: list size and sleep / stress / diversity thresholds
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export FITCAST_TRAINING_SAMPLES=2000
//!    export FITCAST_N_ESTIMATORS=50
//!    export FITCAST_RANDOM_SEED=7
//!    ```
//!
//! 2. Default values (if env vars not set)

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A lower bound is not below its upper bound
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// An environment override could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is outside its accepted range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// Root configuration for the prediction pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Training and inference settings
    pub model: ModelConfig,
    /// Energy expenditure formulas
    pub nutrition: NutritionConfig,
    /// Recommendation engine thresholds
    pub recommendations: RecommendationConfig,
}

/// Training and inference settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of synthetic users generated for bootstrap training
    pub training_samples: usize,
    /// Trees per random forest
    pub n_estimators: usize,
    /// Seed for bootstrap sampling inside the forests
    pub random_seed: u64,
    /// Optional depth limit per tree (unlimited when `None`)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples required in each leaf
    pub min_samples_leaf: usize,
    /// Seed for synthetic data generation (entropy when `None`)
    pub synthetic_seed: Option<u64>,
    /// Weeks of workout history a request is assumed to cover
    pub history_weeks: f64,
    /// Weeks ahead the weight projection covers
    pub projection_weeks: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            training_samples: 1000,
            n_estimators: 100,
            random_seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            synthetic_seed: None,
            history_weeks: 4.0,
            projection_weeks: 4.0,
        }
    }
}

/// Energy expenditure configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Goal-based calorie adjustments
    pub calorie_adjustments: CalorieAdjustmentConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
    /// Lower bound applied to any BMR estimate (kcal/day)
    pub min_bmr_kcal: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            min_bmr_kcal: 1000.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Active: 1.725
    pub active: f64,
    /// Very active: 1.9
    pub very_active: f64,
    /// Used for unrecognised activity levels: 1.55
    pub fallback: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
            fallback: 1.55,
        }
    }
}

/// Goal-based daily calorie adjustments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieAdjustmentConfig {
    /// Deficit subtracted from TDEE for weight loss (kcal)
    pub weight_loss_deficit: f64,
    /// Surplus added to TDEE for muscle gain (kcal)
    pub muscle_gain_surplus: f64,
}

impl Default for CalorieAdjustmentConfig {
    fn default() -> Self {
        Self {
            weight_loss_deficit: 500.0,
            muscle_gain_surplus: 300.0,
        }
    }
}

/// Recommendation engine thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Maximum number of recommendations returned
    pub max_recommendations: usize,
    /// Sleep below this many hours triggers a sleep recommendation
    pub low_sleep_hours: f64,
    /// Stress above this level triggers a stress recommendation
    pub high_stress_level: f64,
    /// More sessions than this with a single type triggers a diversity recommendation
    pub diversity_min_sessions: usize,
    /// Weekly weight change below this counts as on-track weight loss (kg/week)
    pub on_track_weight_loss_rate: f64,
    /// Fitness score below this suggests building a routine first
    pub low_fitness_score: u8,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 4,
            low_sleep_hours: 7.0,
            high_stress_level: 7.0,
            diversity_min_sessions: 3,
            on_track_weight_loss_rate: -0.5,
            low_fitness_score: 50,
        }
    }
}

impl IntelligenceConfig {
    /// Load configuration from the environment on top of defaults
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        let model = &self.model;
        if model.training_samples < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "training_samples must be at least 2",
            ));
        }
        if model.n_estimators == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "n_estimators must be at least 1",
            ));
        }
        if model.min_samples_split < 2 || model.min_samples_leaf == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_samples_split must be >= 2 and min_samples_leaf >= 1",
            ));
        }
        if model.history_weeks <= 0.0 || model.projection_weeks <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "history and projection windows must be positive",
            ));
        }

        let factors = &self.nutrition.activity_factors;
        let ordered = [
            factors.sedentary,
            factors.light,
            factors.moderate,
            factors.active,
            factors.very_active,
        ];
        if ordered.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidRange(
                "activity factors must increase from sedentary to very_active",
            ));
        }
        if ordered[0] <= 0.0 || factors.fallback <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "activity factors must be positive",
            ));
        }
        if self.nutrition.bmr.min_bmr_kcal < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_bmr_kcal must not be negative",
            ));
        }

        let recs = &self.recommendations;
        if recs.max_recommendations == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_recommendations must be at least 1",
            ));
        }
        if recs.low_fitness_score > 100 {
            return Err(ConfigError::ValueOutOfRange(
                "low_fitness_score must be within 0-100",
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(val) = env_override("FITCAST_TRAINING_SAMPLES")? {
            self.model.training_samples = val;
        }
        if let Some(val) = env_override("FITCAST_N_ESTIMATORS")? {
            self.model.n_estimators = val;
        }
        if let Some(val) = env_override("FITCAST_RANDOM_SEED")? {
            self.model.random_seed = val;
        }
        if let Some(val) = env_override("FITCAST_MAX_DEPTH")? {
            self.model.max_depth = Some(val);
        }
        if let Some(val) = env_override("FITCAST_SYNTHETIC_SEED")? {
            self.model.synthetic_seed = Some(val);
        }
        if let Some(val) = env_override("FITCAST_MAX_RECOMMENDATIONS")? {
            self.recommendations.max_recommendations = val;
        }
        Ok(self)
    }
}

/// Parse an optional environment override
fn env_override<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("Invalid {name}: '{raw}'"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_are_valid() {
        let config = IntelligenceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model.n_estimators, 100);
        assert_eq!(config.model.random_seed, 42);
        assert!((config.nutrition.activity_factors.fallback - 1.55).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_unordered_activity_factors() {
        let mut config = IntelligenceConfig::default();
        config.nutrition.activity_factors.light = 1.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_forest() {
        let mut config = IntelligenceConfig::default();
        config.model.n_estimators = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_are_applied() {
        std::env::set_var("FITCAST_N_ESTIMATORS", "12");
        std::env::set_var("FITCAST_SYNTHETIC_SEED", "9");
        let config = IntelligenceConfig::load();
        std::env::remove_var("FITCAST_N_ESTIMATORS");
        std::env::remove_var("FITCAST_SYNTHETIC_SEED");

        let config = config.unwrap();
        assert_eq!(config.model.n_estimators, 12);
        assert_eq!(config.model.synthetic_seed, Some(9));
    }

    #[test]
    #[serial]
    fn test_invalid_env_override_is_a_parse_error() {
        std::env::set_var("FITCAST_TRAINING_SAMPLES", "lots");
        let result = IntelligenceConfig::load();
        std::env::remove_var("FITCAST_TRAINING_SAMPLES");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
