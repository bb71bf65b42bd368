// ABOUTME: End-to-end prediction scenarios through the library API
// ABOUTME: Checks calorie targets, goal guidance, and recommendation limits for typical users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use fitcast_core::models::{ActivityLevel, FitnessGoal, Gender, PredictionRequest};
use fitcast_intelligence::recommendation_engine::messages;
use std::collections::HashSet;

#[test]
fn test_female_lose_weight_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = common::predictor(&common::model_path(dir.path()));

    let result = predictor
        .predict(
            &common::profile(Gender::Female, FitnessGoal::LoseWeight),
            &[],
            &[],
        )
        .unwrap();

    assert_eq!(result.recommended_calories, 2001);
    assert!(
        result.next_goal == messages::GOAL_KEEP_LOSING
            || result.next_goal == messages::GOAL_LOSE_MORE
    );
}

#[test]
fn test_goal_specific_next_goals() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = common::predictor(&common::model_path(dir.path()));
    let workouts = vec![
        common::session("cardio", 45),
        common::session("strength", 40),
        common::session("cardio", 30),
    ];

    let muscle = predictor
        .predict(
            &common::profile(Gender::Male, FitnessGoal::GainMuscle),
            &workouts,
            &[],
        )
        .unwrap();
    assert_eq!(muscle.next_goal, messages::GOAL_STRENGTH);
    assert_eq!(muscle.recommended_calories, 3059);

    let endurance = predictor
        .predict(
            &common::profile(Gender::Male, FitnessGoal::ImproveEndurance),
            &workouts,
            &[],
        )
        .unwrap();
    assert_eq!(endurance.next_goal, messages::GOAL_CARDIO);
    assert_eq!(endurance.recommended_calories, 2759);
}

#[test]
fn test_recommendations_are_distinct_and_capped() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = common::predictor(&common::model_path(dir.path()));
    let workouts: Vec<_> = (0..6).map(|_| common::session("yoga", 30)).collect();
    let metrics = vec![common::snapshot(5.5, 9)];

    let result = predictor
        .predict(
            &common::profile(Gender::Female, FitnessGoal::Maintain),
            &workouts,
            &metrics,
        )
        .unwrap();

    assert_eq!(result.recommendations.len(), 4);
    let unique: HashSet<&String> = result.recommendations.iter().collect();
    assert_eq!(unique.len(), 4);

    let allowed: HashSet<&str> = messages::GENERAL
        .iter()
        .copied()
        .chain([
            messages::DIVERSIFY,
            messages::ADD_CARDIO,
            messages::ADD_STRENGTH,
            messages::MORE_SLEEP,
            messages::REDUCE_STRESS,
        ])
        .collect();
    for recommendation in &result.recommendations {
        assert!(allowed.contains(recommendation.as_str()));
    }
}

#[test]
fn test_unknown_activity_level_uses_fallback_factor() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = common::predictor(&common::model_path(dir.path()));
    let mut profile = common::profile(Gender::Male, FitnessGoal::Maintain);
    profile.activity_level = ActivityLevel::Other("weekend_warrior".to_owned());

    let result = predictor.predict(&profile, &[], &[]).unwrap();

    // 1780 kcal BMR x 1.55 fallback
    assert_eq!(result.recommended_calories, 2759);
    assert!(result.fitness_score <= 100);
}

#[test]
fn test_request_envelope_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = common::predictor(&common::model_path(dir.path()));
    let mut body = common::male_request_json();
    body["fitness_metrics"] = serde_json::json!([
        { "date": "2025-03-08", "weight": 78.4, "sleep_hours": 6.0, "stress_level": 8 },
        { "date": "2025-03-01", "weight": 79.1 }
    ]);
    let request: PredictionRequest = serde_json::from_value(body).unwrap();

    let result = predictor.predict_request(&request).unwrap();

    // Latest snapshot weight drives BMR: 10 x 78.4 + 6.25 x 180 - 150 + 5
    assert_eq!(result.recommended_calories, 2234);
    let scaled = result.predicted_weight * 10.0;
    assert!((scaled - scaled.round()).abs() < 1e-6);
}
