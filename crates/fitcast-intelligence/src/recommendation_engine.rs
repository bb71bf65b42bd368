// ABOUTME: Rule-based recommendation text and next-goal selection
// ABOUTME: Oversized recommendation pools are reduced through an injected sampler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::RecommendationConfig;
use fitcast_core::constants::workout_types;
use fitcast_core::models::{FitnessGoal, FitnessMetricSnapshot, UserProfile, WorkoutSession};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::sync::Arc;

/// Recommendation and goal wording
pub mod messages {
    /// Weight-loss pool
    pub const LOSE_WEIGHT: [&str; 4] = [
        "Try incorporating HIIT workouts 2-3 times per week",
        "Focus on a balanced diet with a slight calorie deficit",
        "Prioritize protein intake to preserve muscle mass",
        "Include strength training to boost metabolism",
    ];
    /// Muscle-gain pool
    pub const GAIN_MUSCLE: [&str; 4] = [
        "Increase your protein intake to at least 1.6g per kg of bodyweight",
        "Focus on progressive overload in your strength training",
        "Ensure adequate recovery between intense workouts",
        "Consider adding creatine supplementation",
    ];
    /// Endurance pool
    pub const IMPROVE_ENDURANCE: [&str; 4] = [
        "Gradually increase your cardio session durations",
        "Incorporate interval training to improve VO2 max",
        "Focus on proper hydration before, during, and after workouts",
        "Consider cross-training to prevent overuse injuries",
    ];
    /// Pool for every other goal
    pub const GENERAL: [&str; 4] = [
        "Focus on consistency in your workout routine",
        "Ensure you're getting adequate sleep (7-9 hours)",
        "Stay hydrated throughout the day",
        "Consider periodization to continue making progress",
    ];

    /// Single workout type across many sessions
    pub const DIVERSIFY: &str = "Try diversifying your workout types for more balanced fitness gains";
    /// No cardio logged
    pub const ADD_CARDIO: &str =
        "Consider adding some cardiovascular exercise to improve heart health";
    /// No strength work logged
    pub const ADD_STRENGTH: &str =
        "Adding resistance training can benefit metabolism and bone health";
    /// No workouts logged
    pub const START_ROUTINE: &str = "Start with 2-3 workouts per week to build consistency";
    /// Short sleep
    pub const MORE_SLEEP: &str =
        "Aim to increase your sleep to at least 7 hours for better recovery";
    /// High stress
    pub const REDUCE_STRESS: &str =
        "Consider adding stress-reduction techniques like meditation or yoga";

    /// Weight loss already on track
    pub const GOAL_KEEP_LOSING: &str =
        "Maintain your current weight loss progress and focus on body composition";
    /// Weight loss behind
    pub const GOAL_LOSE_MORE: &str =
        "Aim to lose 1-2% of body weight in the next 4 weeks through increased activity";
    /// Muscle gain
    pub const GOAL_STRENGTH: &str =
        "Increase your strength in compound lifts by 5% in the next 6 weeks";
    /// Endurance
    pub const GOAL_CARDIO: &str =
        "Increase your sustained cardio duration by 10% in the next month";
    /// Low fitness score
    pub const GOAL_ROUTINE: &str = "Build a consistent routine of at least 3 workouts per week";
    /// Otherwise
    pub const GOAL_RECOVERY: &str =
        "Focus on improving sleep quality and stress management for better recovery";
}

/// Picks a subset of an oversized recommendation pool
pub trait RecommendationSampler: Send + Sync {
    /// Return exactly `amount` distinct entries of `pool` (order unspecified)
    fn sample(&self, pool: &[String], amount: usize) -> Vec<String>;
}

/// Samples with the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl RecommendationSampler for ThreadRngSampler {
    fn sample(&self, pool: &[String], amount: usize) -> Vec<String> {
        pool.choose_multiple(&mut rand::thread_rng(), amount)
            .cloned()
            .collect()
    }
}

/// Samples with a fixed seed; the same pool always yields the same subset
#[derive(Debug, Clone, Copy)]
pub struct SeededSampler {
    seed: u64,
}

impl SeededSampler {
    /// Sampler seeded with `seed`
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RecommendationSampler for SeededSampler {
    fn sample(&self, pool: &[String], amount: usize) -> Vec<String> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        pool.choose_multiple(&mut rng, amount).cloned().collect()
    }
}

/// Model outputs the recommendation rules depend on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedOutlook {
    /// Predicted weekly weight change (kg/week)
    pub weekly_weight_change: f64,
    /// Fitness score (0-100)
    pub fitness_score: u8,
}

/// Recommendation list plus next goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    /// At most `max_recommendations` strings
    pub recommendations: Vec<String>,
    /// The suggested next goal
    pub next_goal: String,
}

/// Rule-based recommendation engine
#[derive(Clone)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
    sampler: Arc<dyn RecommendationSampler>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(RecommendationConfig::default(), Arc::new(ThreadRngSampler))
    }
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RecommendationEngine {
    /// Engine with the given thresholds and sampler
    #[must_use]
    pub fn new(config: RecommendationConfig, sampler: Arc<dyn RecommendationSampler>) -> Self {
        Self { config, sampler }
    }

    /// Build the recommendation list and next goal
    #[must_use]
    pub fn recommend(
        &self,
        profile: &UserProfile,
        workouts: &[WorkoutSession],
        metrics: &[FitnessMetricSnapshot],
        outlook: PredictedOutlook,
    ) -> Guidance {
        let pool = self.build_pool(profile, workouts, metrics);
        let limit = self.config.max_recommendations;
        let recommendations = if pool.len() > limit {
            self.sampler.sample(&pool, limit)
        } else {
            pool
        };

        Guidance {
            recommendations,
            next_goal: self.next_goal(&profile.goal, outlook).to_owned(),
        }
    }

    /// Every applicable recommendation, before sampling
    #[must_use]
    pub fn build_pool(
        &self,
        profile: &UserProfile,
        workouts: &[WorkoutSession],
        metrics: &[FitnessMetricSnapshot],
    ) -> Vec<String> {
        let goal_pool = match profile.goal {
            FitnessGoal::LoseWeight => messages::LOSE_WEIGHT,
            FitnessGoal::GainMuscle => messages::GAIN_MUSCLE,
            FitnessGoal::ImproveEndurance => messages::IMPROVE_ENDURANCE,
            _ => messages::GENERAL,
        };
        let mut pool: Vec<String> = goal_pool.iter().map(|s| (*s).to_owned()).collect();

        if workouts.is_empty() {
            pool.push(messages::START_ROUTINE.to_owned());
        } else {
            let distinct: HashSet<&str> =
                workouts.iter().map(|w| w.workout_type.as_str()).collect();
            if distinct.len() <= 1 && workouts.len() > self.config.diversity_min_sessions {
                pool.push(messages::DIVERSIFY.to_owned());
            }
            let has = |kind: &str| workouts.iter().any(|w| w.workout_type == kind);
            if !has(workout_types::CARDIO) && profile.goal != FitnessGoal::GainMuscle {
                pool.push(messages::ADD_CARDIO.to_owned());
            }
            if !has(workout_types::STRENGTH) && profile.goal != FitnessGoal::ImproveEndurance {
                pool.push(messages::ADD_STRENGTH.to_owned());
            }
        }

        if let Some(latest) = metrics.first() {
            let sleep = latest.sleep_hours.filter(|h| h.is_finite() && *h > 0.0);
            if sleep.is_some_and(|h| h < self.config.low_sleep_hours) {
                pool.push(messages::MORE_SLEEP.to_owned());
            }
            if latest
                .stress_level
                .is_some_and(|s| f64::from(s) > self.config.high_stress_level)
            {
                pool.push(messages::REDUCE_STRESS.to_owned());
            }
        }

        pool
    }

    /// Next goal for the profile's goal and predicted outlook
    #[must_use]
    pub fn next_goal(&self, goal: &FitnessGoal, outlook: PredictedOutlook) -> &'static str {
        match goal {
            FitnessGoal::LoseWeight => {
                if outlook.weekly_weight_change < self.config.on_track_weight_loss_rate {
                    messages::GOAL_KEEP_LOSING
                } else {
                    messages::GOAL_LOSE_MORE
                }
            }
            FitnessGoal::GainMuscle => messages::GOAL_STRENGTH,
            FitnessGoal::ImproveEndurance => messages::GOAL_CARDIO,
            _ if outlook.fitness_score < self.config.low_fitness_score => messages::GOAL_ROUTINE,
            _ => messages::GOAL_RECOVERY,
        }
    }
}
