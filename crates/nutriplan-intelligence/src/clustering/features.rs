// ABOUTME: Nutrient feature vectors for clustering: six totals plus energy ratios and density
// ABOUTME: Builds vectors for meals and for per-meal macro targets with the same layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::constants::nutrition::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN, PROFILE_BASIS_GRAMS,
};
use nutriplan_core::models::{MacroTarget, NutrientProfile};

/// Number of features per meal
pub const FEATURE_COUNT: usize = 10;

/// Feature vector in `FEATURE_NAMES` order
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Feature names, persisted with trained models
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "calories",
    "protein",
    "fat",
    "carbohydrates",
    "fiber",
    "sodium",
    "protein_ratio",
    "fat_ratio",
    "carb_ratio",
    "calorie_density",
];

/// Feature vector of a nutrient profile
///
/// Ratios use `calories + 1` as denominator so zero-energy input stays finite.
#[must_use]
pub fn meal_features(profile: &NutrientProfile) -> FeatureVector {
    let energy = profile.calories + 1.0;
    [
        profile.calories,
        profile.protein,
        profile.fat,
        profile.carbohydrates,
        profile.fiber,
        profile.sodium,
        profile.protein * KCAL_PER_GRAM_PROTEIN / energy,
        profile.fat * KCAL_PER_GRAM_FAT / energy,
        profile.carbohydrates * KCAL_PER_GRAM_CARBS / energy,
        profile.calories / PROFILE_BASIS_GRAMS,
    ]
}

/// Feature vector of a per-meal target, completed with fiber and sodium goals
#[must_use]
pub fn target_features(target: &MacroTarget, fiber: f64, sodium: f64) -> FeatureVector {
    meal_features(&NutrientProfile::new(
        target.calories,
        target.protein,
        target.fat,
        target.carbohydrates,
        fiber,
        sodium,
    ))
}

/// Euclidean distance
#[must_use]
pub fn euclidean_distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Squared Euclidean distance
#[must_use]
pub fn squared_distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
