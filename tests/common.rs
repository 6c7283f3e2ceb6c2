// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, meal builders and a small well-separated synthetic corpus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_arguments
)]
//! Shared test utilities for `nutriplan_server`

use nutriplan_server::intelligence::{IntelligenceConfig, NutrientReference};
use nutriplan_server::models::{Meal, NutrientProfile, ParsedIngredient};
use nutriplan_server::services::RecommendationService;
use std::env;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Ingredient with a fixed gram weight
pub fn ingredient(name: &str, grams: f64) -> ParsedIngredient {
    ParsedIngredient {
        name: name.to_owned(),
        quantity: 1.0,
        unit: None,
        quantity_g: grams,
    }
}

/// Meal with explicit nutrient totals
pub fn meal(
    id: &str,
    name: &str,
    category: &str,
    nutrition: NutrientProfile,
    ingredients: &[&str],
) -> Meal {
    Meal {
        id: id.to_owned(),
        name: name.to_owned(),
        category: category.to_owned(),
        area: "Testland".to_owned(),
        instructions: String::new(),
        ingredients: ingredients.iter().map(|n| ingredient(n, 100.0)).collect(),
        nutrition,
        cluster: None,
        source: None,
        tags: Vec::new(),
    }
}

/// Three nutritionally distinct groups of six meals each
///
/// - `salad-*`: light, fibre-rich, vegetarian
/// - `steak-*`: high protein and fat, contains beef
/// - `cake-*`: carbohydrate-heavy desserts
pub fn synthetic_corpus() -> Vec<Meal> {
    let mut meals = Vec::new();
    for i in 0..6 {
        let step = f64::from(i);
        meals.push(meal(
            &format!("salad-{i}"),
            &format!("Garden Salad {i}"),
            "Vegetarian",
            NutrientProfile::new(150.0 + step * 4.0, 5.0 + step * 0.2, 8.0, 15.0, 6.0, 200.0),
            &["lettuce", "tomato", "olive oil"],
        ));
        meals.push(meal(
            &format!("steak-{i}"),
            &format!("Pepper Steak {i}"),
            "Beef",
            NutrientProfile::new(650.0 + step * 5.0, 55.0 + step * 0.5, 40.0, 10.0, 1.0, 700.0),
            &["beef", "pepper", "butter"],
        ));
        meals.push(meal(
            &format!("cake-{i}"),
            &format!("Sponge Cake {i}"),
            "Dessert",
            NutrientProfile::new(450.0 + step * 5.0, 6.0, 20.0, 65.0 + step * 0.5, 2.0, 250.0),
            &["flour", "sugar", "egg", "butter"],
        ));
    }
    meals
}

/// Intelligence settings sized for the synthetic corpus
pub fn test_intelligence_config() -> IntelligenceConfig {
    let mut config = IntelligenceConfig::default();
    config.clustering.k = 3;
    config.clustering.n_init = 4;
    config.ranking.nearest_clusters = 2;
    config.ranking.default_recommendations = 4;
    config
}

/// Service loaded with the synthetic corpus and a freshly trained model
pub async fn trained_service() -> Arc<RecommendationService> {
    init_test_logging();
    let service = Arc::new(RecommendationService::new(
        test_intelligence_config(),
        NutrientReference::default(),
    ));
    service.replace_corpus(synthetic_corpus()).await;
    service.train().await.expect("training the synthetic corpus");
    service
}
