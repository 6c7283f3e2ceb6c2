// ABOUTME: Macro-aware meal recommendation: filters, matching strategies and the ranker
// ABOUTME: Request-scoped and read-only over a published TrainedModel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod filters;
mod matcher;
mod ranker;

pub use filters::{DietaryRestriction, MealFilters};
pub use matcher::{CategoryPenalty, ClusteredMatcher, FullScanMatcher, NutrientMatcher, RankedMeal};
pub use ranker::{
    recommend, Recommendation, RecommendationRanker, RecommendationRequest, RecommendationSet,
};
