// ABOUTME: Shared preprocessing transform: z-score scaling for numeric columns, one-hot for categories
// ABOUTME: Fitted once on the training table and serialized inside the model artifact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ModelError;
use crate::features::FeatureRecord;
use fitcast_core::constants::feature_columns;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Z-score scaler fitted on column means and population standard deviations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit on row-major numeric data
    ///
    /// Constant columns get a unit scale so they transform to zero.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyTrainingSet`] when `rows` is empty
    pub fn fit(rows: &[[f64; feature_columns::NUMERIC.len()]]) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        let n = rows.len() as f64;
        let width = feature_columns::NUMERIC.len();

        let mut means = vec![0.0; width];
        for row in rows {
            for (mean, value) in means.iter_mut().zip(row) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= n;
        }

        let mut scales = vec![0.0; width];
        for row in rows {
            for ((acc, value), mean) in scales.iter_mut().zip(row).zip(&means) {
                let diff = value - mean;
                *acc += diff * diff;
            }
        }
        for scale in &mut scales {
            let std_dev = (*scale / n).sqrt();
            *scale = if std_dev > f64::EPSILON { std_dev } else { 1.0 };
        }

        Ok(Self { means, scales })
    }

    /// Append the scaled values of `values` to `out`
    pub fn transform_into(&self, values: &[f64], out: &mut Vec<f64>) {
        out.extend(
            values
                .iter()
                .zip(self.means.iter().zip(&self.scales))
                .map(|(value, (mean, scale))| (value - mean) / scale),
        );
    }

    /// Fitted column means
    #[must_use]
    pub fn means(&self) -> &[f64] {
        &self.means
    }
}

/// One-hot encoder over a sorted per-column vocabulary
///
/// Values absent from the fitted vocabulary encode as all-zero indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    vocabularies: Vec<Vec<String>>,
}

impl OneHotEncoder {
    /// Fit the vocabulary of every categorical column
    #[must_use]
    pub fn fit(rows: &[[&str; feature_columns::CATEGORICAL.len()]]) -> Self {
        let vocabularies = (0..feature_columns::CATEGORICAL.len())
            .map(|column| {
                rows.iter()
                    .map(|row| row[column])
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(str::to_owned)
                    .collect()
            })
            .collect();
        Self { vocabularies }
    }

    /// Total number of indicator columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.vocabularies.iter().map(Vec::len).sum()
    }

    /// Fitted categories of column `index`
    #[must_use]
    pub fn categories(&self, index: usize) -> &[String] {
        self.vocabularies.get(index).map_or(&[][..], Vec::as_slice)
    }

    /// Append the indicator columns for `values` to `out`
    pub fn transform_into(&self, values: &[&str], out: &mut Vec<f64>) {
        for (vocabulary, value) in self.vocabularies.iter().zip(values) {
            let hit = vocabulary
                .binary_search_by(|category| category.as_str().cmp(value))
                .ok();
            out.extend((0..vocabulary.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }
    }
}

/// Scaler and encoder applied together, numeric columns first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePreprocessor {
    scaler: StandardScaler,
    encoder: OneHotEncoder,
}

impl FeaturePreprocessor {
    /// Fit both transforms on the training rows
    ///
    /// # Errors
    ///
    /// Returns an error when `records` is empty
    pub fn fit(records: &[FeatureRecord]) -> Result<Self, ModelError> {
        let numeric: Vec<_> = records.iter().map(FeatureRecord::numeric_values).collect();
        let categorical: Vec<_> = records
            .iter()
            .map(FeatureRecord::categorical_values)
            .collect();
        Ok(Self {
            scaler: StandardScaler::fit(&numeric)?,
            encoder: OneHotEncoder::fit(&categorical),
        })
    }

    /// Width of an encoded row
    #[must_use]
    pub fn output_width(&self) -> usize {
        feature_columns::NUMERIC.len() + self.encoder.width()
    }

    /// Encode one record
    #[must_use]
    pub fn transform(&self, record: &FeatureRecord) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.output_width());
        self.scaler.transform_into(&record.numeric_values(), &mut out);
        self.encoder
            .transform_into(&record.categorical_values(), &mut out);
        out
    }

    /// Encode many records
    #[must_use]
    pub fn transform_all(&self, records: &[FeatureRecord]) -> Vec<Vec<f64>> {
        records.iter().map(|record| self.transform(record)).collect()
    }

    /// The fitted one-hot encoder
    #[must_use]
    pub const fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{CohortGenerator, RuleBasedLabels, SyntheticDataGenerator};
    use fitcast_core::models::{ActivityLevel, FitnessGoal, Gender};

    #[test]
    fn test_scaler_centres_and_scales() {
        let mut rows = vec![[0.0; 11]; 2];
        rows[0][0] = 1.0;
        rows[1][0] = 3.0;
        let scaler = StandardScaler::fit(&rows).unwrap();

        let mut out = Vec::new();
        scaler.transform_into(&rows[1], &mut out);
        assert!((scaler.means()[0] - 2.0).abs() < f64::EPSILON);
        assert!((out[0] - 1.0).abs() < f64::EPSILON);
        // constant column
        assert!(out[1].abs() < f64::EPSILON);
    }

    #[test]
    fn test_scaler_rejects_empty_input() {
        assert!(matches!(
            StandardScaler::fit(&[]),
            Err(ModelError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn test_encoder_vocabulary_is_sorted_and_unknowns_are_zero() {
        let encoder = OneHotEncoder::fit(&[
            ["male", "light", "maintain"],
            ["female", "active", "maintain"],
        ]);
        assert_eq!(encoder.categories(0), ["female", "male"]);
        assert_eq!(encoder.width(), 5);

        let mut out = Vec::new();
        encoder.transform_into(&["male", "couch", "maintain"], &mut out);
        assert_eq!(out, vec![0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_full_cohort_encodes_to_23_columns() {
        let table = CohortGenerator::new(RuleBasedLabels, Some(1)).generate(400);
        let preprocessor = FeaturePreprocessor::fit(&table.features).unwrap();
        assert_eq!(preprocessor.output_width(), 23);

        let mut unknown = table.features[0].clone();
        unknown.gender = Gender::Other("nonbinary".to_owned());
        unknown.activity_level = ActivityLevel::Other("extreme".to_owned());
        unknown.goal = FitnessGoal::Other("flexibility".to_owned());
        let encoded = preprocessor.transform(&unknown);

        assert_eq!(encoded.len(), 23);
        assert!(encoded[11..].iter().all(|v| v.abs() < f64::EPSILON));
    }
}
