// ABOUTME: Recommendation ranker turning a per-meal macro target into ordered meal picks
// ABOUTME: Applies request filters, selects the configured matcher and shapes the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::filters::MealFilters;
use super::matcher::{CategoryPenalty, ClusteredMatcher, FullScanMatcher, NutrientMatcher, RankedMeal};
use crate::clustering::{target_features, ClusterModel, FeatureVector, TrainedModel};
use crate::config::{MatchStrategy, RankingConfig};
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{MacroTarget, Meal, NutrientProfile};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// What a caller asks the ranker for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Per-meal macro target
    pub target: MacroTarget,
    /// Number of meals wanted; the configured default when absent
    #[serde(default)]
    pub count: Option<usize>,
    /// Hard filters
    #[serde(default)]
    pub filters: MealFilters,
}

/// One recommended meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Meal id
    pub meal_id: String,
    /// Meal name
    pub name: String,
    /// Category
    pub category: String,
    /// Cuisine area
    pub area: String,
    /// Meal nutrient totals
    pub nutrition: NutrientProfile,
    /// Cluster the meal belongs to
    pub cluster: Option<usize>,
    /// Label of that cluster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_description: Option<String>,
    /// Penalized distance to the target in standardized space
    pub distance: f64,
    /// `1 / (1 + distance)`
    pub similarity: f64,
}

/// Ordered recommendations plus request bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Best match first
    pub recommendations: Vec<Recommendation>,
    /// Meals asked for
    pub requested: usize,
    /// Meals left after filtering
    pub candidates: usize,
    /// Matcher used
    pub strategy: MatchStrategy,
    /// Model that produced the ranking
    pub model_id: Uuid,
}

/// Ranks meals for per-meal macro targets
#[derive(Debug, Clone, Default)]
pub struct RecommendationRanker {
    config: RankingConfig,
}

impl RecommendationRanker {
    /// Ranker using `config`
    #[must_use]
    pub const fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Ranking settings in use
    #[must_use]
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Raw target feature vector, completed with the configured fiber and sodium goals
    #[must_use]
    pub fn target_features(&self, target: &MacroTarget) -> FeatureVector {
        target_features(target, self.config.fiber_per_meal, self.config.sodium_per_meal)
    }

    /// Matcher for the configured strategy over `model`
    #[must_use]
    pub fn matcher<'m>(&self, model: &'m ClusterModel) -> Box<dyn NutrientMatcher + 'm> {
        let penalty = CategoryPenalty::new(&self.config.penalized_category, self.config.penalty_factor);
        match self.config.strategy {
            MatchStrategy::Clustered => Box::new(ClusteredMatcher::new(
                model,
                self.config.nearest_clusters,
                penalty,
            )),
            MatchStrategy::FullScan => Box::new(FullScanMatcher::new(&model.scaler, penalty)),
        }
    }

    /// Rank the corpus of `trained` for `request`
    ///
    /// Fewer meals than requested may come back; a shortfall is logged but
    /// never filled with meals outside the matcher's choice.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTarget` for a target with negative or non-finite
    /// macros and `InvalidInput` when more than the maximum count is requested
    pub fn recommend(
        &self,
        trained: &TrainedModel,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationSet> {
        let target = validated(&request.target)?;
        let requested = request.count.unwrap_or(self.config.default_recommendations);
        if requested > self.config.max_recommendations {
            return Err(AppError::invalid_input(format!(
                "at most {} recommendations may be requested (got {requested})",
                self.config.max_recommendations
            )));
        }

        let candidates = request.filters.apply(&trained.meals);
        if candidates.len() < requested {
            warn!(
                requested,
                available = candidates.len(),
                "Fewer meals than requested remain after filtering"
            );
        }

        let matcher = self.matcher(&trained.model);
        let ranked = matcher.rank(&self.target_features(&target), &candidates, requested);
        debug!(
            strategy = %matcher.strategy(),
            returned = ranked.len(),
            requested,
            "Ranked recommendation candidates"
        );

        let recommendations = ranked
            .into_iter()
            .map(|ranked| to_recommendation(&ranked, trained))
            .collect();

        Ok(RecommendationSet {
            recommendations,
            requested,
            candidates: candidates.len(),
            strategy: matcher.strategy(),
            model_id: trained.model.model_id,
        })
    }
}

fn validated(target: &MacroTarget) -> AppResult<MacroTarget> {
    MacroTarget::new(target.calories, target.protein, target.carbohydrates, target.fat)
}

fn to_recommendation(ranked: &RankedMeal<'_>, trained: &TrainedModel) -> Recommendation {
    let meal = ranked.meal;
    Recommendation {
        meal_id: meal.id.clone(),
        name: meal.name.clone(),
        category: meal.category.clone(),
        area: meal.area.clone(),
        nutrition: meal.nutrition,
        cluster: ranked.cluster,
        cluster_description: ranked
            .cluster
            .and_then(|cluster| trained.summary(cluster))
            .map(|summary| summary.description.clone()),
        distance: ranked.distance,
        similarity: 1.0 / (1.0 + ranked.distance),
    }
}

/// Best meals of `corpus` for a per-meal `target`, using the clustered matcher
/// with default ranking settings
///
/// Zero-calorie meals are never returned.
///
/// # Errors
///
/// Returns `InvalidTarget` for a target with negative or non-finite macros
pub fn recommend(
    target: &MacroTarget,
    model: &ClusterModel,
    corpus: &[Meal],
    num_recommendations: usize,
) -> AppResult<Vec<Meal>> {
    let target = validated(target)?;
    let ranker = RecommendationRanker::default();
    let candidates: Vec<&Meal> = corpus.iter().filter(|meal| meal.is_eligible()).collect();
    let ranked = ranker
        .matcher(model)
        .rank(&ranker.target_features(&target), &candidates, num_recommendations);
    Ok(ranked.into_iter().map(|ranked| ranked.meal.clone()).collect())
}
