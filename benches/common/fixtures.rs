// ABOUTME: Benchmark fixtures generating deterministic meal corpora and ingredient lines
// ABOUTME: Corpora mix several nutrient profiles so clustering has real structure to find
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for reproducible performance measurements.

#![allow(dead_code)]

use nutriplan_server::models::{Meal, NutrientProfile, ParsedIngredient};

/// Predefined corpus sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum MealBatchSize {
    /// Small corpus (200 meals) - quick benchmarks
    Small,
    /// Medium corpus (1000 meals) - typical recipe dump
    Medium,
}

impl MealBatchSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 200,
            Self::Medium => 1000,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }
}

/// (category, calories, protein, fat, carbohydrates, fiber, sodium)
const ARCHETYPES: [(&str, f64, f64, f64, f64, f64, f64); 5] = [
    ("Vegetarian", 180.0, 6.0, 8.0, 20.0, 6.0, 220.0),
    ("Beef", 650.0, 55.0, 40.0, 10.0, 1.0, 700.0),
    ("Dessert", 450.0, 6.0, 20.0, 65.0, 2.0, 250.0),
    ("Pasta", 550.0, 18.0, 15.0, 85.0, 5.0, 600.0),
    ("Seafood", 380.0, 35.0, 14.0, 12.0, 1.5, 900.0),
];

const INGREDIENT_LINES: [&str; 12] = [
    "2 cups milk",
    "1 1/2 cups sugar",
    "200g flour",
    "3 cloves garlic, minced",
    "1 tbsp Extra Virgin Olive Oil",
    "pinch of salt",
    "500g lean ground beef",
    "2 large eggs, beaten",
    "½ tsp ground cinnamon",
    "1 lb chicken breast, diced",
    "4 garlic",
    "1 cup Unsalted Butter (softened)",
];

/// Generate a meal whose nutrients vary around one of the archetypes
#[allow(clippy::cast_precision_loss)]
fn generate_meal(index: usize) -> Meal {
    let (category, calories, protein, fat, carbohydrates, fiber, sodium) =
        ARCHETYPES[index % ARCHETYPES.len()];
    let jitter = ((index * 37) % 21) as f64 / 100.0 - 0.1;
    let scale = 1.0 + jitter;

    Meal {
        id: format!("bench-{index}"),
        name: format!("Benchmark {category} {index}"),
        category: category.to_owned(),
        area: "Benchland".to_owned(),
        instructions: String::new(),
        ingredients: vec![
            ParsedIngredient {
                name: "flour".to_owned(),
                quantity: 1.0,
                unit: None,
                quantity_g: 100.0,
            },
            ParsedIngredient {
                name: "milk".to_owned(),
                quantity: 1.0,
                unit: None,
                quantity_g: 240.0,
            },
        ],
        nutrition: NutrientProfile::new(
            calories * scale,
            protein * scale,
            fat * scale,
            carbohydrates * scale,
            fiber * scale,
            sodium * scale,
        ),
        cluster: None,
        source: None,
        tags: Vec::new(),
    }
}

/// Generate a corpus of the given size
#[must_use]
pub fn generate_meals(size: MealBatchSize) -> Vec<Meal> {
    (0..size.count()).map(generate_meal).collect()
}

/// Ingredient lines cycling through typical recipe notation
#[must_use]
pub fn ingredient_lines(count: usize) -> Vec<&'static str> {
    INGREDIENT_LINES.iter().copied().cycle().take(count).collect()
}
