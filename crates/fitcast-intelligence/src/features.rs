// ABOUTME: Feature builder turning a profile, workout history, and metric snapshots into one record
// ABOUTME: Applies metric fallbacks and computes workout frequency, type ratios, and BMI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitcast_core::constants::{feature_columns, metric_defaults, workout_types};
use fitcast_core::models::{
    ActivityLevel, FitnessGoal, FitnessMetricSnapshot, Gender, UserProfile, WorkoutSession,
};
use serde::{Deserialize, Serialize};

/// One row of model input, in schema order
///
/// Numeric fields follow [`feature_columns::NUMERIC`]; categorical fields follow
/// [`feature_columns::CATEGORICAL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Age in years
    pub age: f64,
    /// Current body weight (kg)
    pub weight: f64,
    /// Height (cm)
    pub height: f64,
    /// Biological sex
    pub gender: Gender,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Goal
    pub goal: FitnessGoal,
    /// Sessions per week
    pub weekly_workouts: f64,
    /// Mean session duration (minutes)
    pub avg_duration: f64,
    /// Share of cardio sessions
    pub cardio_ratio: f64,
    /// Share of strength sessions
    pub strength_ratio: f64,
    /// Body mass index from the current weight
    pub bmi: f64,
    /// Resting heart rate (bpm)
    pub resting_heart_rate: f64,
    /// Nightly sleep (hours)
    pub sleep_hours: f64,
    /// Stress level (1-10)
    pub stress_level: f64,
}

impl FeatureRecord {
    /// Numeric values in [`feature_columns::NUMERIC`] order
    #[must_use]
    pub const fn numeric_values(&self) -> [f64; feature_columns::NUMERIC.len()] {
        [
            self.age,
            self.weight,
            self.height,
            self.weekly_workouts,
            self.avg_duration,
            self.cardio_ratio,
            self.strength_ratio,
            self.bmi,
            self.resting_heart_rate,
            self.sleep_hours,
            self.stress_level,
        ]
    }

    /// Categorical values in [`feature_columns::CATEGORICAL`] order
    #[must_use]
    pub fn categorical_values(&self) -> [&str; feature_columns::CATEGORICAL.len()] {
        [
            self.gender.as_str(),
            self.activity_level.as_str(),
            self.goal.as_str(),
        ]
    }
}

/// Body mass index for a weight (kg) and height (cm)
#[must_use]
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Treats zero, negative, and non-finite measurements as missing
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Builds [`FeatureRecord`]s from request records
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder {
    history_weeks: f64,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self { history_weeks: 4.0 }
    }
}

impl FeatureBuilder {
    /// Builder assuming the workout history spans `history_weeks`
    #[must_use]
    pub const fn new(history_weeks: f64) -> Self {
        Self { history_weeks }
    }

    /// Current weight: latest snapshot if it carries one, otherwise the profile weight
    #[must_use]
    pub fn current_weight(profile: &UserProfile, metrics: &[FitnessMetricSnapshot]) -> f64 {
        metrics
            .first()
            .and_then(|latest| present(latest.weight))
            .unwrap_or(profile.weight)
    }

    /// Convert a profile and its history into a feature record
    ///
    /// `metrics[0]` is taken as the latest snapshot. Missing values fall back to
    /// defaults and never fail.
    #[must_use]
    pub fn build(
        &self,
        profile: &UserProfile,
        workouts: &[WorkoutSession],
        metrics: &[FitnessMetricSnapshot],
    ) -> FeatureRecord {
        let total = workouts.len();
        let (weekly_workouts, avg_duration, cardio_ratio, strength_ratio) = if total == 0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let count = total as f64;
            let minutes: f64 = workouts.iter().map(|w| f64::from(w.duration)).sum();
            let of_type = |kind: &str| {
                workouts.iter().filter(|w| w.workout_type == kind).count() as f64 / count
            };
            (
                count / self.history_weeks,
                minutes / count,
                of_type(workout_types::CARDIO),
                of_type(workout_types::STRENGTH),
            )
        };

        let latest = metrics.first();
        let weight = Self::current_weight(profile, metrics);
        let resting_heart_rate = latest
            .and_then(|m| present(m.resting_heart_rate.map(f64::from)))
            .unwrap_or(metric_defaults::RESTING_HEART_RATE_BPM);
        let sleep_hours = latest
            .and_then(|m| present(m.sleep_hours))
            .unwrap_or(metric_defaults::SLEEP_HOURS);
        let stress_level = latest
            .and_then(|m| present(m.stress_level.map(f64::from)))
            .unwrap_or(metric_defaults::STRESS_LEVEL);

        FeatureRecord {
            age: f64::from(profile.age),
            weight,
            height: profile.height,
            gender: profile.gender.clone(),
            activity_level: profile.activity_level.clone(),
            goal: profile.goal.clone(),
            weekly_workouts,
            avg_duration,
            cardio_ratio,
            strength_ratio,
            bmi: body_mass_index(weight, profile.height),
            resting_heart_rate,
            sleep_hours,
            stress_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Alex".to_owned(),
            age: 30,
            gender: Gender::Male,
            weight: 80.0,
            height: 180.0,
            activity_level: ActivityLevel::Moderate,
            goal: FitnessGoal::LoseWeight,
        }
    }

    fn session(kind: &str, duration: u32) -> WorkoutSession {
        WorkoutSession {
            date: "2025-03-01".to_owned(),
            duration,
            workout_type: kind.to_owned(),
            calories: 300,
            intensity: "medium".to_owned(),
            notes: None,
        }
    }

    #[test]
    fn test_empty_history_uses_defaults() {
        let record = FeatureBuilder::default().build(&profile(), &[], &[]);

        assert!((record.weekly_workouts).abs() < f64::EPSILON);
        assert!((record.avg_duration).abs() < f64::EPSILON);
        assert!((record.cardio_ratio).abs() < f64::EPSILON);
        assert!((record.strength_ratio).abs() < f64::EPSILON);
        assert!((record.resting_heart_rate - 70.0).abs() < f64::EPSILON);
        assert!((record.sleep_hours - 7.0).abs() < f64::EPSILON);
        assert!((record.stress_level - 5.0).abs() < f64::EPSILON);
        assert!((record.weight - 80.0).abs() < f64::EPSILON);
        assert!((record.bmi - 80.0 / 3.24).abs() < 1e-9);
    }

    #[test]
    fn test_workout_ratios_and_frequency() {
        let workouts = vec![
            session("cardio", 30),
            session("cardio", 40),
            session("cardio", 50),
            session("strength", 60),
        ];
        let record = FeatureBuilder::default().build(&profile(), &workouts, &[]);

        assert!((record.weekly_workouts - 1.0).abs() < f64::EPSILON);
        assert!((record.avg_duration - 45.0).abs() < f64::EPSILON);
        assert!((record.cardio_ratio - 0.75).abs() < f64::EPSILON);
        assert!((record.strength_ratio - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_other_workout_types_keep_ratio_sum_below_one() {
        let workouts = vec![session("yoga", 30), session("cardio", 30)];
        let record = FeatureBuilder::default().build(&profile(), &workouts, &[]);

        assert!(record.cardio_ratio + record.strength_ratio <= 1.0);
        assert!((record.cardio_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_latest_snapshot_weight_drives_bmi() {
        let metrics = vec![
            FitnessMetricSnapshot {
                date: "2025-03-08".to_owned(),
                weight: Some(72.9),
                resting_heart_rate: Some(62),
                sleep_hours: Some(6.0),
                stress_level: Some(8),
                ..FitnessMetricSnapshot::default()
            },
            FitnessMetricSnapshot {
                date: "2025-03-01".to_owned(),
                weight: Some(90.0),
                ..FitnessMetricSnapshot::default()
            },
        ];
        let record = FeatureBuilder::default().build(&profile(), &[], &metrics);

        assert!((record.weight - 72.9).abs() < f64::EPSILON);
        assert!((record.bmi - 72.9 / 3.24).abs() < 1e-9);
        assert!((record.resting_heart_rate - 62.0).abs() < f64::EPSILON);
        assert!((record.sleep_hours - 6.0).abs() < f64::EPSILON);
        assert!((record.stress_level - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_metric_values_count_as_missing() {
        let metrics = vec![FitnessMetricSnapshot {
            date: "2025-03-08".to_owned(),
            weight: Some(0.0),
            sleep_hours: Some(f64::NAN),
            stress_level: Some(0),
            ..FitnessMetricSnapshot::default()
        }];
        let record = FeatureBuilder::default().build(&profile(), &[], &metrics);

        assert!((record.weight - 80.0).abs() < f64::EPSILON);
        assert!((record.sleep_hours - 7.0).abs() < f64::EPSILON);
        assert!((record.stress_level - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_metric_values_count_as_missing() {
        let metrics = vec![FitnessMetricSnapshot {
            date: "2025-03-08".to_owned(),
            weight: Some(-5.0),
            sleep_hours: Some(-2.0),
            ..FitnessMetricSnapshot::default()
        }];
        let record = FeatureBuilder::default().build(&profile(), &[], &metrics);

        assert!((record.weight - 80.0).abs() < f64::EPSILON);
        assert!((record.sleep_hours - 7.0).abs() < f64::EPSILON);
        assert!(record.bmi > 0.0);
        assert!(
            (FeatureBuilder::current_weight(&profile(), &metrics) - 80.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn test_column_order_matches_schema() {
        let record = FeatureBuilder::default().build(&profile(), &[], &[]);
        let numeric = record.numeric_values();

        assert!((numeric[0] - 30.0).abs() < f64::EPSILON);
        assert!((numeric[7] - record.bmi).abs() < f64::EPSILON);
        assert_eq!(record.categorical_values(), ["male", "moderate", "lose_weight"]);
    }
}
