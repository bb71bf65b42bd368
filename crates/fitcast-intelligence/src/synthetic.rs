// ABOUTME: Synthetic training cohort generator and rule-based label formulas
// ABOUTME: Bootstrap stand-in for real data; both the sampler and the labels are swappable traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::features::{body_mass_index, FeatureRecord};
use fitcast_core::models::{ActivityLevel, FitnessGoal, Gender};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// A labeled training table: feature rows plus one target vector per model
#[derive(Debug, Clone, Default)]
pub struct TrainingTable {
    /// Feature rows
    pub features: Vec<FeatureRecord>,
    /// Weekly weight change targets (kg/week)
    pub weight_change: Vec<f64>,
    /// Fitness score targets (0-100)
    pub fitness_score: Vec<f64>,
}

impl TrainingTable {
    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Deterministic target formulas applied to a feature row
pub trait LabelFormulas: Send + Sync {
    /// Expected weekly weight change before noise (kg/week)
    fn weight_change(&self, record: &FeatureRecord) -> f64;

    /// Fitness score (0-100)
    fn fitness_score(&self, record: &FeatureRecord) -> f64;
}

/// Source of a labeled training table
pub trait SyntheticDataGenerator: Send + Sync {
    /// Generate `n` labeled rows
    fn generate(&self, n: usize) -> TrainingTable;
}

/// Hand-written labeling rules for the bootstrap cohort
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedLabels;

impl RuleBasedLabels {
    fn goal_delta(goal: &FitnessGoal) -> f64 {
        match goal {
            FitnessGoal::LoseWeight => -0.5,
            FitnessGoal::GainMuscle => 0.3,
            _ => 0.0,
        }
    }

    fn activity_factor(level: &ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => 0.5,
            ActivityLevel::Light => 0.8,
            ActivityLevel::Active => 1.2,
            ActivityLevel::VeryActive => 1.5,
            ActivityLevel::Moderate | ActivityLevel::Other(_) => 1.0,
        }
    }

    fn base_score(level: &ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => 30.0,
            ActivityLevel::Light => 45.0,
            ActivityLevel::Moderate => 60.0,
            ActivityLevel::Active => 75.0,
            ActivityLevel::VeryActive | ActivityLevel::Other(_) => 85.0,
        }
    }
}

impl LabelFormulas for RuleBasedLabels {
    fn weight_change(&self, record: &FeatureRecord) -> f64 {
        let workout_factor = record.weekly_workouts * record.avg_duration / 200.0;
        Self::goal_delta(&record.goal)
            * Self::activity_factor(&record.activity_level)
            * (1.0 + workout_factor)
    }

    fn fitness_score(&self, record: &FeatureRecord) -> f64 {
        let workout_bonus = (record.weekly_workouts * 3.0).min(15.0);

        let mut health = 0.0;
        if (18.5..=24.9).contains(&record.bmi) {
            health += 5.0;
        }
        if record.resting_heart_rate < 70.0 {
            health += 5.0;
        }
        if record.sleep_hours >= 7.0 {
            health += 3.0;
        }
        if record.stress_level <= 5.0 {
            health += 2.0;
        }

        (Self::base_score(&record.activity_level) + workout_bonus + health).min(100.0)
    }
}

/// Standard normal draw (Box-Muller)
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - U keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    std_dev.mul_add(standard_normal(rng), mean)
}

/// Beta(2, 2) draw as X / (X + Y) with X, Y ~ Gamma(2, 1)
fn beta_2_2<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut gamma_2 = || -> f64 {
        let a: f64 = 1.0 - rng.gen::<f64>();
        let b: f64 = 1.0 - rng.gen::<f64>();
        -(a.ln() + b.ln())
    };
    let x = gamma_2();
    let y = gamma_2();
    if x + y > 0.0 {
        x / (x + y)
    } else {
        0.5
    }
}

fn pick<T: Clone, R: Rng + ?Sized>(rng: &mut R, choices: &[T]) -> T {
    choices[rng.gen_range(0..choices.len())].clone()
}

/// Random cohort of synthetic users labeled by a [`LabelFormulas`] implementation
#[derive(Debug, Clone)]
pub struct CohortGenerator<L = RuleBasedLabels> {
    labels: L,
    seed: Option<u64>,
    weight_noise_std: f64,
}

impl Default for CohortGenerator<RuleBasedLabels> {
    fn default() -> Self {
        Self::new(RuleBasedLabels, None)
    }
}

impl<L: LabelFormulas> CohortGenerator<L> {
    /// Generator using `labels`; `seed` makes the cohort reproducible
    #[must_use]
    pub const fn new(labels: L, seed: Option<u64>) -> Self {
        Self {
            labels,
            seed,
            weight_noise_std: 0.2,
        }
    }

    /// Override the standard deviation of the weight-change noise
    #[must_use]
    pub const fn with_weight_noise(mut self, std_dev: f64) -> Self {
        self.weight_noise_std = std_dev;
        self
    }

    fn sample_record<R: Rng + ?Sized>(rng: &mut R) -> FeatureRecord {
        let age = f64::from(rng.gen_range(18_u32..70));
        let weight = normal(rng, 75.0, 15.0);
        let height = normal(rng, 170.0, 15.0);
        let gender = pick(rng, &[Gender::Male, Gender::Female]);
        let activity_level = pick(rng, &ActivityLevel::KNOWN);
        let goal = pick(rng, &FitnessGoal::KNOWN);
        let weekly_workouts = f64::from(rng.gen_range(0_u32..7));
        let avg_duration = normal(rng, 45.0, 15.0);
        let cardio_ratio = beta_2_2(rng);
        let strength_ratio = beta_2_2(rng);
        let resting_heart_rate = normal(rng, 70.0, 10.0);
        let sleep_hours = normal(rng, 7.0, 1.0);
        let stress_level = f64::from(rng.gen_range(1_u32..=10));

        FeatureRecord {
            age,
            weight,
            height,
            gender,
            activity_level,
            goal,
            weekly_workouts,
            avg_duration,
            cardio_ratio,
            strength_ratio,
            bmi: body_mass_index(weight, height),
            resting_heart_rate,
            sleep_hours,
            stress_level,
        }
    }
}

impl<L: LabelFormulas> SyntheticDataGenerator for CohortGenerator<L> {
    fn generate(&self, n: usize) -> TrainingTable {
        let mut rng = self
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

        let mut table = TrainingTable {
            features: Vec::with_capacity(n),
            weight_change: Vec::with_capacity(n),
            fitness_score: Vec::with_capacity(n),
        };
        for _ in 0..n {
            let record = Self::sample_record(&mut rng);
            let noise = normal(&mut rng, 0.0, self.weight_noise_std);
            table
                .weight_change
                .push(self.labels.weight_change(&record) + noise);
            table.fitness_score.push(self.labels.fitness_score(&record));
            table.features.push(record);
        }

        debug!(rows = n, seeded = self.seed.is_some(), "Generated synthetic cohort");
        table
    }
}
