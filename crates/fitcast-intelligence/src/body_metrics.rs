// ABOUTME: Body composition helpers: rounded BMI and category, ideal weight range, Navy body fat, MET calories
// ABOUTME: Builds the body metrics summary served next to predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Body Metrics Module
//!
//! # Scientific References
//!
//! - Hodgdon, J.A., & Beckett, M.B. (1984). Prediction of percent body fat for U.S. Navy men
//!   and women from body circumferences and height. Naval Health Research Center Report 84-11.
//!
//! - Ainsworth, B.E., et al. (2011). Compendium of Physical Activities.
//!   *Medicine & Science in Sports & Exercise*, 43(8), 1575-1581.
//!   <https://doi.org/10.1249/MSS.0b013e31821ece12>

use crate::config::NutritionConfig;
use crate::features::{body_mass_index, FeatureBuilder};
use crate::nutrition::{calculate_tdee, calorie_target, EnergyEstimator};
use fitcast_core::errors::{AppError, AppResult};
use fitcast_core::models::{FitnessMetricSnapshot, Gender, UserProfile};
use serde::{Deserialize, Serialize};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// WHO adult BMI bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// 18.5 up to 25
    Healthy,
    /// 25 up to 30
    Overweight,
    /// 30 and above
    Obese,
}

impl BmiCategory {
    /// Band for a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Healthy
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// BMI rounded to one decimal
///
/// # Errors
///
/// Returns an error if weight or height is not positive
pub fn rounded_bmi(weight_kg: f64, height_cm: f64) -> AppResult<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return Err(AppError::invalid_input(
            "Weight and height must be positive to compute BMI",
        ));
    }
    Ok(round1(body_mass_index(weight_kg, height_cm)))
}

/// Weight range (kg, whole numbers) that keeps BMI within 18.5-25
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealWeightRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

/// Ideal weight range for a height
#[must_use]
pub fn ideal_weight_range(height_cm: f64) -> IdealWeightRange {
    let height_m = height_cm / 100.0;
    let squared = height_m * height_m;
    IdealWeightRange {
        min: (18.5 * squared).round(),
        max: (25.0 * squared).round(),
    }
}

/// Tape measurements for the Navy body fat estimate (cm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circumferences {
    /// Waist at the navel
    pub waist_cm: f64,
    /// Neck below the larynx
    pub neck_cm: f64,
    /// Hip at the widest point; required for women
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_cm: Option<f64>,
}

/// U.S. Navy body fat percentage, rounded to one decimal
///
/// - Men: 495 / (1.0324 - 0.19077 log10(waist - neck) + 0.15456 log10(height)) - 450
/// - Women: 495 / (1.29579 - 0.35004 log10(waist + hip - neck) + 0.22100 log10(height)) - 450
///
/// # Errors
///
/// Returns an invalid-input error for an unsupported sex, a missing hip measurement
/// for women, or circumferences whose log term is undefined
pub fn navy_body_fat(
    measurements: &Circumferences,
    height_cm: f64,
    gender: &Gender,
) -> AppResult<f64> {
    if height_cm <= 0.0 {
        return Err(AppError::invalid_input("Height must be positive"));
    }
    let Circumferences {
        waist_cm,
        neck_cm,
        hip_cm,
    } = *measurements;

    let density = match gender {
        Gender::Male => {
            let girth = waist_cm - neck_cm;
            if girth <= 0.0 {
                return Err(AppError::invalid_input(
                    "Waist circumference must exceed neck circumference",
                ));
            }
            0.19077f64.mul_add(-girth.log10(), 1.0324) + 0.15456 * height_cm.log10()
        }
        Gender::Female => {
            let hip = hip_cm.ok_or_else(|| {
                AppError::invalid_input("Hip circumference is required for women")
            })?;
            let girth = waist_cm + hip - neck_cm;
            if girth <= 0.0 {
                return Err(AppError::invalid_input(
                    "Waist plus hip must exceed neck circumference",
                ));
            }
            0.35004f64.mul_add(-girth.log10(), 1.29579) + 0.22100 * height_cm.log10()
        }
        Gender::Other(value) => {
            return Err(AppError::invalid_input(format!(
                "No body fat formula for gender '{value}'"
            )));
        }
    };

    if density <= 0.0 {
        return Err(AppError::invalid_input(
            "Circumferences are out of range for the Navy formula",
        ));
    }
    Ok(round1(495.0 / density - 450.0))
}

/// Workout families in the MET table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutCategory {
    /// Running, cycling, rowing
    Cardio,
    /// Resistance training
    Strength,
    /// Yoga, stretching
    Flexibility,
    /// Team and racket sports
    Sports,
    /// Anything else
    Other,
}

impl WorkoutCategory {
    /// Parse a workout type; unknown types map to `Other`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "cardio" => Self::Cardio,
            "strength" => Self::Strength,
            "flexibility" => Self::Flexibility,
            "sports" => Self::Sports,
            _ => Self::Other,
        }
    }
}

/// Effort level in the MET table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    /// Easy effort
    Low,
    /// Moderate effort
    Medium,
    /// Hard effort
    High,
}

impl Intensity {
    /// Parse an intensity; unknown values map to `Medium`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

/// Metabolic equivalent for a workout family and intensity
#[must_use]
pub const fn met_value(category: WorkoutCategory, intensity: Intensity) -> f64 {
    match (category, intensity) {
        (WorkoutCategory::Cardio, Intensity::Low) => 5.0,
        (WorkoutCategory::Cardio, Intensity::Medium) => 7.5,
        (WorkoutCategory::Cardio, Intensity::High) => 10.0,
        (WorkoutCategory::Strength, Intensity::Low)
        | (WorkoutCategory::Other, Intensity::Low) => 3.0,
        (WorkoutCategory::Strength, Intensity::Medium)
        | (WorkoutCategory::Other, Intensity::Medium) => 5.0,
        (WorkoutCategory::Strength, Intensity::High) => 6.0,
        (WorkoutCategory::Flexibility, Intensity::Low) => 2.5,
        (WorkoutCategory::Flexibility, Intensity::Medium) => 3.0,
        (WorkoutCategory::Flexibility, Intensity::High) => 4.0,
        (WorkoutCategory::Sports, Intensity::Low) => 4.0,
        (WorkoutCategory::Sports, Intensity::Medium) => 6.0,
        (WorkoutCategory::Sports, Intensity::High) => 8.0,
        (WorkoutCategory::Other, Intensity::High) => 7.0,
    }
}

/// Calories burned: MET x weight (kg) x hours, rounded
///
/// # Errors
///
/// Returns an error if weight is not positive
pub fn calories_burned(
    weight_kg: f64,
    duration_min: u32,
    workout_type: &str,
    intensity: &str,
) -> AppResult<i64> {
    if weight_kg <= 0.0 {
        return Err(AppError::invalid_input("Weight must be positive"));
    }
    let met = met_value(WorkoutCategory::parse(workout_type), Intensity::parse(intensity));
    Ok((met * weight_kg * f64::from(duration_min) / 60.0).round() as i64)
}

/// Body composition and energy summary for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMetricsSummary {
    /// Latest weight (kg)
    pub current_weight: f64,
    /// BMI, one decimal
    pub bmi: f64,
    /// BMI band
    pub bmi_category: BmiCategory,
    /// Healthy weight range for the profile's height
    pub ideal_weight_range: IdealWeightRange,
    /// Body fat percentage: Navy estimate when measurements are given, else the latest tracked value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    /// Basal metabolic rate (kcal/day, rounded)
    pub bmr: i64,
    /// Total daily energy expenditure (kcal/day, rounded)
    pub tdee: i64,
    /// Goal-adjusted daily calorie target
    pub calorie_target: i64,
}

impl BodyMetricsSummary {
    /// Summarise a profile and its latest metric snapshot
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for non-positive measurements or a sex
    /// without an energy formula
    pub fn for_profile(
        profile: &UserProfile,
        metrics: &[FitnessMetricSnapshot],
        measurements: Option<&Circumferences>,
        estimator: &dyn EnergyEstimator,
        nutrition: &NutritionConfig,
    ) -> AppResult<Self> {
        let current_weight = FeatureBuilder::current_weight(profile, metrics);
        let bmi = rounded_bmi(current_weight, profile.height)?;

        let body_fat = match measurements {
            Some(m) => Some(navy_body_fat(m, profile.height, &profile.gender)?),
            None => metrics
                .first()
                .and_then(|latest| latest.body_fat)
                .filter(|v| v.is_finite() && *v > 0.0),
        };

        let bmr = estimator.basal_metabolic_rate(
            current_weight,
            profile.height,
            profile.age,
            &profile.gender,
        )?;
        let tdee = calculate_tdee(bmr, &profile.activity_level, &nutrition.activity_factors)?;

        Ok(Self {
            current_weight,
            bmi,
            bmi_category: BmiCategory::from_bmi(bmi),
            ideal_weight_range: ideal_weight_range(profile.height),
            body_fat,
            bmr: bmr.round() as i64,
            tdee: tdee.round() as i64,
            calorie_target: calorie_target(tdee, &profile.goal, &nutrition.calorie_adjustments),
        })
    }
}
