// ABOUTME: Workout session and health metric snapshot records supplied with each request
// ABOUTME: Metric snapshots are ordered latest-first by caller contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A single logged workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Calendar date of the session (free-form date string)
    pub date: String,
    /// Duration in minutes
    pub duration: u32,
    /// Session type; `cardio` and `strength` are recognised by the feature builder
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Calories burned as logged by the user
    pub calories: i32,
    /// Free-form intensity label
    pub intensity: String,
    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A tracked health metric snapshot
///
/// Every measurement is optional. Consumers treat index 0 of a snapshot list as
/// the most recent one; the list is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessMetricSnapshot {
    /// Calendar date of the snapshot
    pub date: String,
    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Body fat percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    /// Resting heart rate in bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<u32>,
    /// Estimated VO2 max (ml/kg/min)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vo2_max: Option<f64>,
    /// Sleep duration in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Stress on a 1-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_uses_wire_name() {
        let session: WorkoutSession = serde_json::from_value(serde_json::json!({
            "date": "2025-03-01", "duration": 45, "type": "cardio",
            "calories": 400, "intensity": "high"
        }))
        .unwrap();

        assert_eq!(session.workout_type, "cardio");
        assert!(session.notes.is_none());
    }

    #[test]
    fn test_metric_snapshot_fields_are_optional() {
        let snapshot: FitnessMetricSnapshot =
            serde_json::from_value(serde_json::json!({ "date": "2025-03-01", "sleep_hours": 6.5 }))
                .unwrap();

        assert_eq!(snapshot.sleep_hours, Some(6.5));
        assert!(snapshot.weight.is_none());
        assert!(snapshot.resting_heart_rate.is_none());
    }
}
