// ABOUTME: Random forest regressor averaging bootstrap-trained CART trees
// ABOUTME: Trees fit in parallel with rayon; each tree's bootstrap RNG is seeded from the forest seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod tree;

pub use tree::{RegressionTree, TreeNode, TreeParams};

use crate::config::ModelConfig;
use crate::errors::ModelError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bagged ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_estimators: usize,
    random_seed: u64,
    params: TreeParams,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    /// Unfitted forest
    #[must_use]
    pub const fn new(n_estimators: usize, random_seed: u64, params: TreeParams) -> Self {
        Self {
            n_estimators,
            random_seed,
            params,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    /// Unfitted forest sized and seeded from the model configuration
    #[must_use]
    pub const fn from_config(config: &ModelConfig) -> Self {
        Self::new(
            config.n_estimators,
            config.random_seed,
            TreeParams {
                max_depth: config.max_depth,
                min_samples_split: config.min_samples_split,
                min_samples_leaf: config.min_samples_leaf,
            },
        )
    }

    /// Fit every tree on its own bootstrap sample
    ///
    /// Tree `i` draws its sample with seed `random_seed + i`, so a forest is
    /// reproducible regardless of thread scheduling.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is empty, rows differ in width, or `y` has a
    /// different length than `x`
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), ModelError> {
        let n_samples = x.len();
        if n_samples == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if y.len() != n_samples {
            return Err(ModelError::LengthMismatch {
                features: n_samples,
                targets: y.len(),
                target: "forest",
            });
        }
        let n_features = x[0].len();
        if let Some(bad) = x.iter().find(|row| row.len() != n_features) {
            return Err(ModelError::FeatureWidthMismatch {
                expected: n_features,
                actual: bad.len(),
            });
        }

        let params = self.params;
        let seed = self.random_seed;
        self.trees = (0..self.n_estimators)
            .into_par_iter()
            .map(|i| {
                let samples = bootstrap_sample(n_samples, seed.wrapping_add(i as u64));
                RegressionTree::fit(x, y, samples, params)
            })
            .collect();
        self.n_features = n_features;

        debug!(
            trees = self.trees.len(),
            samples = n_samples,
            features = n_features,
            "Fitted random forest"
        );
        Ok(())
    }

    /// Mean prediction of all trees for one encoded row
    ///
    /// # Errors
    ///
    /// Returns an error if the forest is unfitted or `row` has the wrong width
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted("random forest"));
        }
        if row.len() != self.n_features {
            return Err(ModelError::FeatureWidthMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
        Ok(total / self.trees.len() as f64)
    }

    /// Number of fitted trees
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Width of the rows the forest was fitted on
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Whether the forest is fitted and every tree is structurally sound
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.trees.is_empty() && self.trees.iter().all(RegressionTree::is_well_formed)
    }
}

/// Draw `n_samples` indices uniformly with replacement
fn bootstrap_sample(n_samples: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_data(n: u32) -> (Vec<Vec<f64>>, Vec<f64>) {
        let x = (0..n).map(|i| vec![f64::from(i), f64::from(i % 3)]).collect();
        let y = (0..n).map(|i| 2.0 * f64::from(i)).collect();
        (x, y)
    }

    #[test]
    fn test_forest_tracks_a_linear_target() {
        let (x, y) = linear_data(60);
        let mut forest = RandomForestRegressor::new(10, 42, TreeParams::default());
        forest.fit(&x, &y).unwrap();

        assert_eq!(forest.tree_count(), 10);
        let prediction = forest.predict_row(&[30.0, 0.0]).unwrap();
        assert!((prediction - 60.0).abs() < 10.0, "prediction {prediction}");
    }

    #[test]
    fn test_same_seed_gives_identical_forests() {
        let (x, y) = linear_data(40);
        let mut first = RandomForestRegressor::new(5, 7, TreeParams::default());
        let mut second = RandomForestRegressor::new(5, 7, TreeParams::default());
        first.fit(&x, &y).unwrap();
        second.fit(&x, &y).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_bootstrap_sample_is_in_bounds_and_seeded() {
        let sample = bootstrap_sample(50, 3);
        assert_eq!(sample.len(), 50);
        assert!(sample.iter().all(|&i| i < 50));
        assert_eq!(sample, bootstrap_sample(50, 3));
        assert_ne!(sample, bootstrap_sample(50, 4));
    }

    #[test]
    fn test_unfitted_and_mismatched_inputs_are_errors() {
        let forest = RandomForestRegressor::new(3, 1, TreeParams::default());
        assert!(matches!(
            forest.predict_row(&[1.0]),
            Err(ModelError::NotFitted(_))
        ));

        let (x, y) = linear_data(10);
        let mut forest = RandomForestRegressor::new(3, 1, TreeParams::default());
        assert!(matches!(
            forest.fit(&x, &y[..5]),
            Err(ModelError::LengthMismatch { .. })
        ));
        forest.fit(&x, &y).unwrap();
        assert!(matches!(
            forest.predict_row(&[1.0]),
            Err(ModelError::FeatureWidthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_forest_survives_json_round_trip() {
        let (x, y) = linear_data(20);
        let mut forest = RandomForestRegressor::new(4, 9, TreeParams::default());
        forest.fit(&x, &y).unwrap();

        let json = serde_json::to_string(&forest).unwrap();
        let restored: RandomForestRegressor = serde_json::from_str(&json).unwrap();
        assert!(restored.is_well_formed());
        assert!(
            (restored.predict_row(&[5.0, 2.0]).unwrap() - forest.predict_row(&[5.0, 2.0]).unwrap())
                .abs()
                < 1e-12
        );
    }
}
