// ABOUTME: Meal intelligence engine: ingredient parsing, nutrient resolution, clustering, ranking
// ABOUTME: Pure computation crate; file and network I/O live in the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriPlan` Intelligence
//!
//! Data flows through the modules in this order:
//!
//! raw ingredient text → `ingredients` (parser, normalizer) → `nutrients`
//! (resolver) → `aggregator` (meal totals) → `clustering` (offline training)
//! → `recommendation` (per-request ranking).
//!
//! `nutrition_calculator` derives the daily macro target that requests carry.

/// Tunable algorithm settings with environment overrides
pub mod config;

/// Ingredient line parsing and name normalization
pub mod ingredients;

/// Tiered per-100 g nutrient lookup
pub mod nutrients;

/// Meal nutrient totals
pub mod aggregator;

/// K-means clustering of meals in nutrient space
pub mod clustering;

/// Macro-aware meal ranking
pub mod recommendation;

/// BMR, TDEE and macro target calculation
pub mod nutrition_calculator;

pub use aggregator::{Aggregation, IngredientContribution, MealAggregator, MealDraft};
pub use clustering::{ClusterModel, ClusterSummary, ClusterTrainer, TrainedModel};
pub use config::{IntelligenceConfig, MatchStrategy};
pub use ingredients::{IngredientParser, NameNormalizer, ParseAnomaly, ParseOutcome};
pub use nutrients::{NutrientLookup, NutrientReference, NutrientResolver, NutrientSource, Resolution, SourceCounts};
pub use recommendation::{
    MealFilters, NutrientMatcher, Recommendation, RecommendationRanker, RecommendationRequest,
    RecommendationSet,
};
