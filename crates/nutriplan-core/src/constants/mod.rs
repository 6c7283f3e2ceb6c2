// ABOUTME: Application constants for unit weights, energy density, and service limits
// ABOUTME: Centralizes magic numbers shared by the parser, aggregator, ranker and server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded reference values. Values that operators may tune live in the
//! intelligence configuration instead and only take their defaults from here.

/// Gram weight of one unit of each recognised measure
pub mod unit_weights {
    /// Grams per gram
    pub const GRAMS_PER_GRAM: f64 = 1.0;
    /// Grams per kilogram
    pub const GRAMS_PER_KG: f64 = 1000.0;
    /// Grams per ounce
    pub const GRAMS_PER_OZ: f64 = 28.35;
    /// Grams per pound
    pub const GRAMS_PER_LB: f64 = 453.6;
    /// Grams per cup (water-equivalent)
    pub const GRAMS_PER_CUP: f64 = 240.0;
    /// Grams per tablespoon
    pub const GRAMS_PER_TBSP: f64 = 15.0;
    /// Grams per teaspoon
    pub const GRAMS_PER_TSP: f64 = 5.0;
    /// Grams per millilitre (water-equivalent)
    pub const GRAMS_PER_ML: f64 = 1.0;
    /// Grams per dash
    pub const GRAMS_PER_DASH: f64 = 0.5;
    /// Grams per pinch
    pub const GRAMS_PER_PINCH: f64 = 0.5;
    /// Grams per garlic clove
    pub const GRAMS_PER_CLOVE: f64 = 5.0;
    /// Grams per whole item
    pub const GRAMS_PER_WHOLE: f64 = 100.0;
    /// Grams per bulb
    pub const GRAMS_PER_BULB: f64 = 50.0;
}

/// Parser defaults
pub mod parsing {
    /// Grams assigned per quantity when no unit is recognised
    pub const DEFAULT_UNIT_GRAMS: f64 = 100.0;
    /// Per-ingredient gram estimate above which the value is treated as an anomaly
    pub const GRAM_CEILING: f64 = 500.0;
    /// Replacement gram weight for anomalous estimates
    pub const CLAMPED_GRAMS: f64 = 100.0;
    /// Names shorter than this after normalization are dropped
    pub const MIN_NAME_LENGTH: usize = 3;
}

/// Energy and nutrient reference values
pub mod nutrition {
    /// Kilocalories per gram of protein
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Kilocalories per gram of carbohydrate
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Kilocalories per gram of fat
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
    /// Per-meal fiber target used when the caller does not supply one (grams)
    pub const FIBER_PER_MEAL_G: f64 = 8.0;
    /// Per-meal sodium target used when the caller does not supply one (milligrams)
    pub const SODIUM_PER_MEAL_MG: f64 = 800.0;
    /// Nutrient profiles are expressed per this many grams
    pub const PROFILE_BASIS_GRAMS: f64 = 100.0;
}

/// Clustering and ranking defaults
pub mod clustering {
    /// Number of clusters
    pub const DEFAULT_K: usize = 20;
    /// Independent k-means initialisations
    pub const DEFAULT_N_INIT: usize = 10;
    /// Lloyd iteration cap
    pub const DEFAULT_MAX_ITERATIONS: usize = 300;
    /// Convergence threshold on summed squared centroid shift
    pub const DEFAULT_TOLERANCE: f64 = 1e-4;
    /// Seed for reproducible partitions
    pub const DEFAULT_SEED: u64 = 42;
    /// Clusters sampled per recommendation request
    pub const DEFAULT_NEAREST_CLUSTERS: usize = 4;
    /// Distance multiplier for the penalized category
    pub const DEFAULT_CATEGORY_PENALTY: f64 = 1.3;
    /// Category biased against during ranking
    pub const DEFAULT_PENALIZED_CATEGORY: &str = "Dessert";
}

/// Request limits
pub mod limits {
    /// Recommendations returned when the caller does not ask for a count
    pub const DEFAULT_RECOMMENDATIONS: usize = 16;
    /// Upper bound on recommendations per request
    pub const MAX_RECOMMENDATIONS: usize = 100;
    /// Meals per day assumed when the caller does not specify one
    pub const DEFAULT_MEALS_PER_DAY: u32 = 3;
    /// Upper bound on meals per day
    pub const MAX_MEALS_PER_DAY: u32 = 10;
}

/// Service identifiers used in logs
pub mod service_names {
    /// HTTP server
    pub const NUTRIPLAN_SERVER: &str = "nutriplan-server";
    /// Command-line tool
    pub const NUTRIPLAN_CLI: &str = "nutriplan-cli";
}
