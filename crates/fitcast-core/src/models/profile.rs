// ABOUTME: User profile model with sex, activity level, and goal vocabularies
// ABOUTME: Unrecognised wire values are preserved in `Other` variants instead of being coerced
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex used by energy-expenditure formulas
///
/// Only `Male` and `Female` have a BMR strategy. Any other wire value is kept
/// verbatim in `Other` so downstream code can reject it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Value outside the supported vocabulary
    Other(String),
}

impl Gender {
    /// Canonical wire / categorical name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported daily activity level
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
    /// Value outside the supported vocabulary
    Other(String),
}

impl ActivityLevel {
    /// All supported levels, in ascending order of activity
    pub const KNOWN: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    /// Canonical wire / categorical name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "sedentary" => Self::Sedentary,
            "light" => Self::Light,
            "moderate" => Self::Moderate,
            "active" => Self::Active,
            "very_active" => Self::VeryActive,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ActivityLevel> for String {
    fn from(value: ActivityLevel) -> Self {
        match value {
            ActivityLevel::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary fitness goal declared by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FitnessGoal {
    /// Reduce body weight
    LoseWeight,
    /// Build muscle mass
    GainMuscle,
    /// Improve cardiovascular endurance
    ImproveEndurance,
    /// Keep current weight
    Maintain,
    /// Overall fitness without a specific target
    GeneralFitness,
    /// Value outside the supported vocabulary
    Other(String),
}

impl FitnessGoal {
    /// All supported goals
    pub const KNOWN: [Self; 5] = [
        Self::LoseWeight,
        Self::Maintain,
        Self::GainMuscle,
        Self::ImproveEndurance,
        Self::GeneralFitness,
    ];

    /// Canonical wire / categorical name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::LoseWeight => "lose_weight",
            Self::GainMuscle => "gain_muscle",
            Self::ImproveEndurance => "improve_endurance",
            Self::Maintain => "maintain",
            Self::GeneralFitness => "general_fitness",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for FitnessGoal {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "lose_weight" => Self::LoseWeight,
            "gain_muscle" => Self::GainMuscle,
            "improve_endurance" => Self::ImproveEndurance,
            "maintain" => Self::Maintain,
            "general_fitness" => Self::GeneralFitness,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for FitnessGoal {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<FitnessGoal> for String {
    fn from(value: FitnessGoal) -> Self {
        match value {
            FitnessGoal::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demographic and goal information for a single prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, never used in computation
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub gender: Gender,
    /// Body weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Self-reported activity level
    pub activity_level: ActivityLevel,
    /// Primary goal; the wire field is `goals`
    #[serde(rename = "goals", alias = "goal")]
    pub goal: FitnessGoal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_round_trip_through_wire_names() {
        for level in ActivityLevel::KNOWN {
            assert_eq!(ActivityLevel::from(level.as_str()), level);
        }
        for goal in FitnessGoal::KNOWN {
            assert_eq!(FitnessGoal::from(goal.as_str()), goal);
        }
    }

    #[test]
    fn test_unknown_values_are_preserved() {
        let level = ActivityLevel::from("couch_potato");
        assert_eq!(level, ActivityLevel::Other("couch_potato".to_owned()));
        assert_eq!(String::from(level), "couch_potato");

        let gender = Gender::from("nonbinary");
        assert_eq!(gender.as_str(), "nonbinary");
    }

    #[test]
    fn test_profile_accepts_goals_and_goal_field_names() {
        let with_goals = serde_json::json!({
            "name": "Sam", "age": 30, "gender": "male", "weight": 80.0,
            "height": 180.0, "activity_level": "moderate", "goals": "lose_weight"
        });
        let with_goal = serde_json::json!({
            "name": "Sam", "age": 30, "gender": "female", "weight": 80.0,
            "height": 180.0, "activity_level": "very_active", "goal": "gain_muscle"
        });

        let first: UserProfile = serde_json::from_value(with_goals).unwrap();
        let second: UserProfile = serde_json::from_value(with_goal).unwrap();

        assert_eq!(first.goal, FitnessGoal::LoseWeight);
        assert_eq!(second.goal, FitnessGoal::GainMuscle);
        assert_eq!(second.activity_level, ActivityLevel::VeryActive);
        assert_eq!(second.gender, Gender::Female);
    }

    #[test]
    fn test_profile_serializes_goal_as_goals() {
        let profile = UserProfile {
            name: "Sam".to_owned(),
            age: 30,
            gender: Gender::Male,
            weight: 80.0,
            height: 180.0,
            activity_level: ActivityLevel::Moderate,
            goal: FitnessGoal::Maintain,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["goals"], "maintain");
        assert_eq!(json["activity_level"], "moderate");
    }
}
