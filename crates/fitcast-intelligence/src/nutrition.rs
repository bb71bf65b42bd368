// ABOUTME: Energy expenditure estimation: Mifflin-St Jeor BMR, activity-scaled TDEE, goal calorie targets
// ABOUTME: BMR is a pluggable strategy; sexes without a formula are rejected, never defaulted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Module
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology.

use crate::config::{ActivityFactorsConfig, BmrConfig, CalorieAdjustmentConfig};
use fitcast_core::errors::{AppError, AppResult};
use fitcast_core::models::{ActivityLevel, FitnessGoal, Gender};

/// Strategy estimating basal metabolic rate
pub trait EnergyEstimator: Send + Sync + std::fmt::Debug {
    /// BMR in kcal/day
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for non-positive inputs or a sex the
    /// formula does not cover
    fn basal_metabolic_rate(
        &self,
        weight_kg: f64,
        height_cm: f64,
        age: u32,
        gender: &Gender,
    ) -> AppResult<f64>;
}

/// Mifflin-St Jeor equation
///
/// Formula:
/// - Men: BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age + 5
/// - Women: BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age - 161
#[derive(Debug, Clone, Default)]
pub struct MifflinStJeor {
    config: BmrConfig,
}

impl MifflinStJeor {
    /// Estimator with the given coefficients
    #[must_use]
    pub const fn new(config: BmrConfig) -> Self {
        Self { config }
    }
}

impl EnergyEstimator for MifflinStJeor {
    fn basal_metabolic_rate(
        &self,
        weight_kg: f64,
        height_cm: f64,
        age: u32,
        gender: &Gender,
    ) -> AppResult<f64> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(AppError::invalid_input("Weight must be positive"));
        }
        if !(height_cm.is_finite() && height_cm > 0.0) {
            return Err(AppError::invalid_input("Height must be positive"));
        }
        if age == 0 {
            return Err(AppError::invalid_input("Age must be positive"));
        }

        let sex_constant = match gender {
            Gender::Male => self.config.msj_male_constant,
            Gender::Female => self.config.msj_female_constant,
            Gender::Other(value) => {
                return Err(AppError::invalid_input(format!(
                    "No BMR formula for gender '{value}'; expected 'male' or 'female'"
                ))
                .with_details(serde_json::json!({ "field": "gender", "value": value })));
            }
        };

        let bmr = self.config.msj_weight_coef * weight_kg
            + self.config.msj_height_coef * height_cm
            + self.config.msj_age_coef * f64::from(age)
            + sex_constant;

        Ok(bmr.max(self.config.min_bmr_kcal))
    }
}

/// Activity multiplier for a level; unrecognised levels use the fallback
#[must_use]
pub fn activity_factor(level: &ActivityLevel, factors: &ActivityFactorsConfig) -> f64 {
    match level {
        ActivityLevel::Sedentary => factors.sedentary,
        ActivityLevel::Light => factors.light,
        ActivityLevel::Moderate => factors.moderate,
        ActivityLevel::Active => factors.active,
        ActivityLevel::VeryActive => factors.very_active,
        ActivityLevel::Other(_) => factors.fallback,
    }
}

/// Total Daily Energy Expenditure: BMR x activity factor
///
/// # Errors
///
/// Returns an error if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    level: &ActivityLevel,
    factors: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if bmr <= 0.0 {
        return Err(AppError::invalid_input("BMR must be positive"));
    }
    Ok(bmr * activity_factor(level, factors))
}

/// Daily calorie target for a goal, truncated toward zero
#[must_use]
pub fn calorie_target(tdee: f64, goal: &FitnessGoal, adjustments: &CalorieAdjustmentConfig) -> i64 {
    let target = match goal {
        FitnessGoal::LoseWeight => tdee - adjustments.weight_loss_deficit,
        FitnessGoal::GainMuscle => tdee + adjustments.muscle_gain_surplus,
        _ => tdee,
    };
    target.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcast_core::errors::ErrorCode;

    #[test]
    fn test_mifflin_male_and_female() {
        let estimator = MifflinStJeor::default();

        let male = estimator
            .basal_metabolic_rate(80.0, 180.0, 30, &Gender::Male)
            .unwrap();
        assert!((male - 1780.0).abs() < 1e-9);

        let female = estimator
            .basal_metabolic_rate(80.0, 180.0, 30, &Gender::Female)
            .unwrap();
        assert!((female - 1614.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_gender_is_invalid_input() {
        let err = MifflinStJeor::default()
            .basal_metabolic_rate(80.0, 180.0, 30, &Gender::Other("x".to_owned()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.details["field"], "gender");
    }

    #[test]
    fn test_bmr_floor_and_input_validation() {
        let estimator = MifflinStJeor::default();
        let tiny = estimator
            .basal_metabolic_rate(20.0, 100.0, 90, &Gender::Female)
            .unwrap();
        assert!((tiny - 1000.0).abs() < f64::EPSILON);

        assert!(estimator
            .basal_metabolic_rate(0.0, 180.0, 30, &Gender::Male)
            .is_err());
        assert!(estimator
            .basal_metabolic_rate(80.0, -1.0, 30, &Gender::Male)
            .is_err());
        assert!(estimator
            .basal_metabolic_rate(80.0, 180.0, 0, &Gender::Male)
            .is_err());
    }

    #[test]
    fn test_tdee_uses_fallback_for_unknown_level() {
        let factors = ActivityFactorsConfig::default();
        let moderate = calculate_tdee(1614.0, &ActivityLevel::Moderate, &factors).unwrap();
        assert!((moderate - 2501.7).abs() < 1e-9);

        let unknown =
            calculate_tdee(1000.0, &ActivityLevel::Other("gym_rat".to_owned()), &factors).unwrap();
        assert!((unknown - 1550.0).abs() < 1e-9);

        assert!(calculate_tdee(0.0, &ActivityLevel::Light, &factors).is_err());
    }

    #[test]
    fn test_calorie_targets_truncate() {
        let adjustments = CalorieAdjustmentConfig::default();
        assert_eq!(calorie_target(2501.7, &FitnessGoal::LoseWeight, &adjustments), 2001);
        assert_eq!(calorie_target(2759.0, &FitnessGoal::LoseWeight, &adjustments), 2259);
        assert_eq!(calorie_target(2501.7, &FitnessGoal::GainMuscle, &adjustments), 2801);
        assert_eq!(calorie_target(2501.7, &FitnessGoal::Maintain, &adjustments), 2501);
    }
}
