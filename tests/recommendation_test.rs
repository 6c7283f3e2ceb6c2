// ABOUTME: Integration tests for macro-aware meal ranking over a trained model
// ABOUTME: Cluster-narrowed picks, dessert penalty, request filters and count limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{synthetic_corpus, test_intelligence_config};
use nutriplan_server::errors::ErrorCode;
use nutriplan_server::intelligence::config::RankingConfig;
use nutriplan_server::intelligence::recommendation::{recommend, DietaryRestriction};
use nutriplan_server::intelligence::{
    ClusterTrainer, MatchStrategy, MealFilters, RecommendationRanker, RecommendationRequest,
    TrainedModel,
};
use nutriplan_server::models::MacroTarget;
use std::collections::{HashMap, HashSet};

fn trained() -> TrainedModel {
    ClusterTrainer::new(test_intelligence_config().clustering)
        .train(synthetic_corpus())
        .unwrap()
}

fn ranking(strategy: MatchStrategy) -> RankingConfig {
    RankingConfig {
        strategy,
        ..test_intelligence_config().ranking
    }
}

fn steak_target() -> MacroTarget {
    MacroTarget::new(660.0, 56.0, 10.0, 40.0).unwrap()
}

fn request(target: MacroTarget, count: usize, filters: MealFilters) -> RecommendationRequest {
    RecommendationRequest {
        target,
        count: Some(count),
        filters,
    }
}

#[test]
fn test_clustered_ranking_starts_with_nearest_group() {
    let trained = trained();
    let ranker = RecommendationRanker::new(ranking(MatchStrategy::Clustered));

    let set = ranker
        .recommend(&trained, &request(steak_target(), 4, MealFilters::default()))
        .unwrap();

    assert_eq!(set.strategy, MatchStrategy::Clustered);
    assert_eq!(set.model_id, trained.model.model_id);
    assert_eq!(set.requested, 4);
    assert_eq!(set.candidates, 18);
    assert_eq!(set.recommendations.len(), 4);

    let ids: HashSet<&str> = set.recommendations.iter().map(|r| r.meal_id.as_str()).collect();
    assert_eq!(ids.len(), 4);

    // two clusters with two slots each; the steak cluster comes first
    assert_eq!(set.recommendations[0].category, "Beef");
    assert_eq!(set.recommendations[1].category, "Beef");
    assert_ne!(set.recommendations[2].category, "Beef");
    assert!(set.recommendations[0].distance <= set.recommendations[1].distance);
    assert!(set.recommendations[0].cluster_description.is_some());
}

#[test]
fn test_similarity_derived_from_distance() {
    let trained = trained();
    let ranker = RecommendationRanker::new(ranking(MatchStrategy::FullScan));

    let set = ranker
        .recommend(&trained, &request(steak_target(), 18, MealFilters::default()))
        .unwrap();

    assert_eq!(set.recommendations.len(), 18);
    for pair in set.recommendations.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
    for recommendation in &set.recommendations {
        let expected = 1.0 / (1.0 + recommendation.distance);
        assert!((recommendation.similarity - expected).abs() < 1e-12);
        assert!(recommendation.similarity > 0.0 && recommendation.similarity <= 1.0);
    }
}

#[test]
fn test_dessert_distance_is_penalized() {
    let trained = trained();
    let cake_target = MacroTarget::new(460.0, 6.0, 66.0, 20.0).unwrap();

    let penalized = RecommendationRanker::new(ranking(MatchStrategy::FullScan))
        .recommend(&trained, &request(cake_target, 18, MealFilters::default()))
        .unwrap();
    let neutral = RecommendationRanker::new(RankingConfig {
        penalty_factor: 1.0,
        ..ranking(MatchStrategy::FullScan)
    })
    .recommend(&trained, &request(cake_target, 18, MealFilters::default()))
    .unwrap();

    let neutral_distance: HashMap<&str, f64> = neutral
        .recommendations
        .iter()
        .map(|r| (r.meal_id.as_str(), r.distance))
        .collect();
    for recommendation in &penalized.recommendations {
        let base = neutral_distance[recommendation.meal_id.as_str()];
        let factor = if recommendation.category == "Dessert" { 1.3 } else { 1.0 };
        assert!((recommendation.distance - base * factor).abs() < 1e-9);
    }
}

#[test]
fn test_filters_restrict_candidates() {
    let trained = trained();
    let ranker = RecommendationRanker::new(ranking(MatchStrategy::FullScan));

    let vegetarian = MealFilters {
        dietary_restrictions: vec![DietaryRestriction::Vegetarian],
        exclude_ingredients: vec!["sugar".to_owned()],
        ..MealFilters::default()
    };
    let set = ranker
        .recommend(&trained, &request(steak_target(), 10, vegetarian))
        .unwrap();
    assert_eq!(set.candidates, 6);
    assert!(set.recommendations.iter().all(|r| r.category == "Vegetarian"));

    let light = MealFilters {
        max_calories: Some(160.0),
        exclude_meals: vec!["Garden Salad 0".to_owned()],
        ..MealFilters::default()
    };
    let set = ranker
        .recommend(&trained, &request(steak_target(), 10, light))
        .unwrap();
    assert_eq!(set.candidates, 2);
    assert_eq!(set.recommendations.len(), 2);
    assert!(set.recommendations.iter().all(|r| r.meal_id != "salad-0"));

    let protein = MealFilters {
        min_protein: Some(1000.0),
        ..MealFilters::default()
    };
    let set = ranker
        .recommend(&trained, &request(steak_target(), 10, protein))
        .unwrap();
    assert_eq!(set.candidates, 0);
    assert!(set.recommendations.is_empty());
}

#[test]
fn test_default_count_and_limits() {
    let trained = trained();
    let ranker = RecommendationRanker::new(ranking(MatchStrategy::Clustered));

    let defaulted = RecommendationRequest {
        target: steak_target(),
        count: None,
        filters: MealFilters::default(),
    };
    let set = ranker.recommend(&trained, &defaulted).unwrap();
    assert_eq!(set.requested, 4);

    let zero = ranker
        .recommend(&trained, &request(steak_target(), 0, MealFilters::default()))
        .unwrap();
    assert!(zero.recommendations.is_empty());

    let error = ranker
        .recommend(&trained, &request(steak_target(), 101, MealFilters::default()))
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_invalid_target_rejected() {
    let trained = trained();
    let ranker = RecommendationRanker::new(ranking(MatchStrategy::Clustered));
    let target = MacroTarget {
        calories: f64::NAN,
        protein: 30.0,
        carbohydrates: 50.0,
        fat: 20.0,
    };

    let error = ranker
        .recommend(&trained, &request(target, 4, MealFilters::default()))
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidTarget);
}

#[test]
fn test_recommend_shortcut_returns_corpus_meals() {
    let trained = trained();
    let meals = recommend(&steak_target(), &trained.model, &trained.meals, 3).unwrap();

    assert_eq!(meals.len(), 3);
    assert!(meals.iter().all(|meal| meal.nutrition.calories > 0.0));
    assert_eq!(meals[0].category, "Beef");
}

#[test]
fn test_daily_target_split_over_three_meals() {
    let trained = trained();
    let daily = MacroTarget::new(2200.0, 180.0, 200.0, 75.0).unwrap();
    let per_meal = daily.per_meal(3).unwrap();
    assert!((per_meal.calories - 733.33).abs() < 0.01);
    assert!((per_meal.protein - 60.0).abs() < 1e-9);
    assert!((per_meal.carbohydrates - 66.67).abs() < 0.01);
    assert!((per_meal.fat - 25.0).abs() < 1e-9);

    let ranker = RecommendationRanker::default();
    let defaulted = RecommendationRequest {
        target: per_meal,
        count: None,
        filters: MealFilters::default(),
    };
    let first = ranker.recommend(&trained, &defaulted).unwrap();
    let second = ranker.recommend(&trained, &defaulted).unwrap();

    assert_eq!(first.requested, 16);
    assert!(!first.recommendations.is_empty());
    assert!(first.recommendations.len() <= 16);
    let ids: Vec<&str> = first.recommendations.iter().map(|r| r.meal_id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());

    let repeated: Vec<&str> = second.recommendations.iter().map(|r| r.meal_id.as_str()).collect();
    assert_eq!(ids, repeated);

    let meals = recommend(&per_meal, &trained.model, &trained.meals, 16).unwrap();
    assert!(!meals.is_empty() && meals.len() <= 16);
    let shortcut: Vec<&str> = meals.iter().map(|meal| meal.id.as_str()).collect();
    assert_eq!(shortcut, ids);
}

#[test]
fn test_recommend_shortcut_with_unbounded_count_returns_whole_corpus() {
    let trained = trained();
    let meals = recommend(&steak_target(), &trained.model, &trained.meals, usize::MAX).unwrap();

    assert_eq!(meals.len(), 18);
    let ids: HashSet<&str> = meals.iter().map(|meal| meal.id.as_str()).collect();
    assert_eq!(ids.len(), 18);
}
