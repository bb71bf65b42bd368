// ABOUTME: End-to-end prediction: features, both regressors, energy targets, and guidance
// ABOUTME: Obtains the artifact from the shared model provider, training it on first use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::artifact::ModelProvider;
use crate::body_metrics::{BodyMetricsSummary, Circumferences};
use crate::config::{IntelligenceConfig, NutritionConfig};
use crate::features::FeatureBuilder;
use crate::nutrition::{calculate_tdee, calorie_target, EnergyEstimator, MifflinStJeor};
use crate::recommendation_engine::{
    PredictedOutlook, RecommendationEngine, RecommendationSampler, ThreadRngSampler,
};
use fitcast_core::errors::{AppError, AppResult};
use fitcast_core::models::{
    FitnessMetricSnapshot, PredictionRequest, PredictionResult, UserProfile, WorkoutSession,
};
use std::sync::Arc;
use tracing::debug;

/// Runs predictions against the provider's artifact
#[derive(Debug, Clone)]
pub struct FitnessPredictor {
    provider: Arc<ModelProvider>,
    features: FeatureBuilder,
    estimator: Arc<dyn EnergyEstimator>,
    nutrition: NutritionConfig,
    engine: RecommendationEngine,
    projection_weeks: f64,
}

impl FitnessPredictor {
    /// Predictor using Mifflin-St Jeor and thread-RNG recommendation sampling
    #[must_use]
    pub fn new(provider: Arc<ModelProvider>, config: &IntelligenceConfig) -> Self {
        Self {
            provider,
            features: FeatureBuilder::new(config.model.history_weeks),
            estimator: Arc::new(MifflinStJeor::new(config.nutrition.bmr.clone())),
            nutrition: config.nutrition.clone(),
            engine: RecommendationEngine::new(
                config.recommendations.clone(),
                Arc::new(ThreadRngSampler),
            ),
            projection_weeks: config.model.projection_weeks,
        }
    }

    /// Replace the recommendation sampler
    #[must_use]
    pub fn with_sampler(
        mut self,
        config: &IntelligenceConfig,
        sampler: Arc<dyn RecommendationSampler>,
    ) -> Self {
        self.engine = RecommendationEngine::new(config.recommendations.clone(), sampler);
        self
    }

    /// Replace the BMR strategy
    #[must_use]
    pub fn with_estimator(mut self, estimator: Arc<dyn EnergyEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// The shared model provider
    #[must_use]
    pub const fn provider(&self) -> &Arc<ModelProvider> {
        &self.provider
    }

    /// Predict for a request envelope
    ///
    /// # Errors
    ///
    /// See [`FitnessPredictor::predict`]
    pub fn predict_request(&self, request: &PredictionRequest) -> AppResult<PredictionResult> {
        self.predict(
            &request.user,
            &request.workout_history,
            &request.fitness_metrics,
        )
    }

    /// Predict weight, calories, fitness score, and guidance for one user
    ///
    /// `metrics[0]` is taken as the latest snapshot.
    ///
    /// # Errors
    ///
    /// - invalid input for a non-positive age, weight, or height, or a sex without a BMR formula
    /// - training, storage, or inference failures from the model provider
    pub fn predict(
        &self,
        profile: &UserProfile,
        workouts: &[WorkoutSession],
        metrics: &[FitnessMetricSnapshot],
    ) -> AppResult<PredictionResult> {
        validate_profile(profile)?;
        let record = self.features.build(profile, workouts, metrics);

        // Energy targets come first so unsupported inputs fail before any training
        let bmr = self.estimator.basal_metabolic_rate(
            record.weight,
            profile.height,
            profile.age,
            &profile.gender,
        )?;
        let tdee = calculate_tdee(bmr, &profile.activity_level, &self.nutrition.activity_factors)?;
        let recommended_calories =
            calorie_target(tdee, &profile.goal, &self.nutrition.calorie_adjustments);

        let artifact = self.provider.artifact()?;
        let raw = artifact.predict(&record)?;

        let predicted_weight =
            round1(raw.weekly_weight_change.mul_add(self.projection_weeks, record.weight));
        let fitness_score = raw.fitness_score.trunc().clamp(0.0, 100.0) as u8;

        let guidance = self.engine.recommend(
            profile,
            workouts,
            metrics,
            PredictedOutlook {
                weekly_weight_change: raw.weekly_weight_change,
                fitness_score,
            },
        );

        debug!(
            goal = %profile.goal,
            workouts = workouts.len(),
            weekly_weight_change = raw.weekly_weight_change,
            fitness_score,
            recommended_calories,
            "Prediction complete"
        );

        Ok(PredictionResult {
            predicted_weight,
            recommended_calories,
            fitness_score,
            recommendations: guidance.recommendations,
            next_goal: guidance.next_goal,
        })
    }

    /// Body composition and energy summary; does not touch the models
    ///
    /// # Errors
    ///
    /// Returns invalid input for bad measurements or an unsupported sex
    pub fn body_metrics(
        &self,
        profile: &UserProfile,
        metrics: &[FitnessMetricSnapshot],
        measurements: Option<&Circumferences>,
    ) -> AppResult<BodyMetricsSummary> {
        validate_profile(profile)?;
        BodyMetricsSummary::for_profile(
            profile,
            metrics,
            measurements,
            self.estimator.as_ref(),
            &self.nutrition,
        )
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn validate_profile(profile: &UserProfile) -> AppResult<()> {
    let invalid = |field: &str, message: &str| {
        AppError::invalid_input(message).with_details(serde_json::json!({ "field": field }))
    };
    if profile.age == 0 {
        return Err(invalid("age", "Age must be positive"));
    }
    if !(profile.weight.is_finite() && profile.weight > 0.0) {
        return Err(invalid("weight", "Weight must be positive"));
    }
    if !(profile.height.is_finite() && profile.height > 0.0) {
        return Err(invalid("height", "Height must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactStore;
    use crate::recommendation_engine::{messages, SeededSampler};
    use crate::trainer::ModelTrainer;
    use fitcast_core::errors::ErrorCode;
    use fitcast_core::models::{ActivityLevel, FitnessGoal, Gender};

    fn config() -> IntelligenceConfig {
        let mut config = IntelligenceConfig::default();
        config.model.training_samples = 150;
        config.model.n_estimators = 6;
        config.model.synthetic_seed = Some(17);
        config
    }

    fn predictor(dir: &tempfile::TempDir) -> FitnessPredictor {
        let config = config();
        let provider = Arc::new(ModelProvider::new(
            ArtifactStore::new(dir.path().join("fitness_model.json")),
            ModelTrainer::new(config.model.clone()),
        ));
        FitnessPredictor::new(provider, &config).with_sampler(&config, Arc::new(SeededSampler::new(3)))
    }

    fn profile(gender: Gender) -> UserProfile {
        UserProfile {
            name: "Casey".to_owned(),
            age: 30,
            gender,
            weight: 80.0,
            height: 180.0,
            activity_level: ActivityLevel::Moderate,
            goal: FitnessGoal::LoseWeight,
        }
    }

    #[test]
    fn test_male_scenario_calories() {
        let dir = tempfile::tempdir().unwrap();
        let result = predictor(&dir).predict(&profile(Gender::Male), &[], &[]).unwrap();

        assert_eq!(result.recommended_calories, 2259);
        assert!(result.fitness_score <= 100);
        assert!(result.recommendations.len() <= 4);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r == messages::START_ROUTINE));
        assert!(!result.next_goal.is_empty());
    }

    #[test]
    fn test_female_scenario_calories() {
        let dir = tempfile::tempdir().unwrap();
        let result = predictor(&dir)
            .predict(&profile(Gender::Female), &[], &[])
            .unwrap();
        assert_eq!(result.recommended_calories, 2001);
    }

    #[test]
    fn test_predicted_weight_has_one_decimal() {
        let dir = tempfile::tempdir().unwrap();
        let result = predictor(&dir).predict(&profile(Gender::Male), &[], &[]).unwrap();

        let scaled = result.predicted_weight * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
        assert!((result.predicted_weight - 80.0).abs() < 20.0);
    }

    #[test]
    fn test_invalid_profiles_are_rejected_before_training() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = predictor(&dir);

        let mut zero_height = profile(Gender::Male);
        zero_height.height = 0.0;
        let err = predictor.predict(&zero_height, &[], &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.details["field"], "height");
        assert!(!dir.path().join("fitness_model.json").exists());
    }

    #[test]
    fn test_unsupported_gender_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = predictor(&dir)
            .predict(&profile(Gender::Other("unspecified".to_owned())), &[], &[])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.details["field"], "gender");
        assert!(!dir.path().join("fitness_model.json").exists());
    }

    #[derive(Debug)]
    struct FlatEstimator(f64);

    impl EnergyEstimator for FlatEstimator {
        fn basal_metabolic_rate(
            &self,
            _weight_kg: f64,
            _height_cm: f64,
            _age: u32,
            _gender: &Gender,
        ) -> AppResult<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_custom_estimator_drives_calorie_target() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = predictor(&dir).with_estimator(Arc::new(FlatEstimator(2000.0)));

        // 2000 x 1.55 - 500
        let result = predictor.predict(&profile(Gender::Male), &[], &[]).unwrap();
        assert_eq!(result.recommended_calories, 2600);

        // Estimators may cover sexes Mifflin-St Jeor does not
        let other = predictor
            .predict(&profile(Gender::Other("unspecified".to_owned())), &[], &[])
            .unwrap();
        assert_eq!(other.recommended_calories, 2600);
    }

    #[test]
    fn test_negative_latest_weight_falls_back_to_profile() {
        let dir = tempfile::tempdir().unwrap();
        let metrics = vec![FitnessMetricSnapshot {
            date: "2025-03-08".to_owned(),
            weight: Some(-5.0),
            sleep_hours: Some(-2.0),
            ..FitnessMetricSnapshot::default()
        }];
        let result = predictor(&dir)
            .predict(&profile(Gender::Male), &[], &metrics)
            .unwrap();
        assert_eq!(result.recommended_calories, 2259);
    }

    #[test]
    fn test_body_metrics_does_not_train() {
        let dir = tempfile::tempdir().unwrap();
        let summary = predictor(&dir)
            .body_metrics(&profile(Gender::Female), &[], None)
            .unwrap();

        assert_eq!(summary.calorie_target, 2001);
        assert!(!dir.path().join("fitness_model.json").exists());
    }
}
