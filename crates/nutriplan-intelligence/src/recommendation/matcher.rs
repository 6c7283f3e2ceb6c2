// ABOUTME: Candidate matching strategies scoring meals against a per-meal target
// ABOUTME: Cluster-narrowed ranking with per-cluster slots, or a full corpus distance scan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::clustering::features::euclidean_distance;
use crate::clustering::{meal_features, ClusterModel, FeatureVector, StandardScaler};
use crate::config::MatchStrategy;
use nutriplan_core::models::Meal;
use std::cmp::Ordering;

/// A candidate meal with its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMeal<'a> {
    /// Candidate
    pub meal: &'a Meal,
    /// Cluster of the meal
    pub cluster: Option<usize>,
    /// Distance after the category penalty; lower is better
    pub distance: f64,
    /// Distance before the category penalty
    pub raw_distance: f64,
}

impl RankedMeal<'_> {
    fn best_first(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.meal.id.cmp(&other.meal.id))
    }
}

/// Distance multiplier applied to one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPenalty {
    category: String,
    factor: f64,
}

impl CategoryPenalty {
    /// Penalize meals whose category equals `category`, ignoring case
    #[must_use]
    pub fn new(category: impl Into<String>, factor: f64) -> Self {
        Self {
            category: category.into(),
            factor,
        }
    }

    /// Penalized distance of `meal`
    #[must_use]
    pub fn apply(&self, meal: &Meal, distance: f64) -> f64 {
        if meal.category.trim().eq_ignore_ascii_case(self.category.trim()) {
            distance * self.factor
        } else {
            distance
        }
    }
}

/// Scores candidate meals against a target in standardized feature space
pub trait NutrientMatcher: Send + Sync {
    /// Strategy implemented
    fn strategy(&self) -> MatchStrategy;

    /// Best `count` candidates for the raw target feature vector, best first
    ///
    /// Every returned meal comes from `candidates` and appears at most once.
    fn rank<'a>(
        &self,
        target: &FeatureVector,
        candidates: &[&'a Meal],
        count: usize,
    ) -> Vec<RankedMeal<'a>>;
}

/// Narrows candidates to the clusters nearest the target
///
/// Each of the nearest clusters contributes at most `ceil(count / clusters)`
/// meals; a short cluster's shortfall is not made up from the others.
#[derive(Debug, Clone)]
pub struct ClusteredMatcher<'m> {
    model: &'m ClusterModel,
    nearest_clusters: usize,
    penalty: CategoryPenalty,
}

impl<'m> ClusteredMatcher<'m> {
    /// Matcher sampling the `nearest_clusters` clusters of `model`
    #[must_use]
    pub fn new(model: &'m ClusterModel, nearest_clusters: usize, penalty: CategoryPenalty) -> Self {
        Self {
            model,
            nearest_clusters: nearest_clusters.max(1),
            penalty,
        }
    }
}

impl NutrientMatcher for ClusteredMatcher<'_> {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Clustered
    }

    fn rank<'a>(
        &self,
        target: &FeatureVector,
        candidates: &[&'a Meal],
        count: usize,
    ) -> Vec<RankedMeal<'a>> {
        if count == 0 || candidates.is_empty() {
            return Vec::new();
        }
        let scaled_target = self.model.standardize(target);
        let selected: Vec<usize> = self
            .model
            .clusters_by_distance(&scaled_target)
            .into_iter()
            .take(self.nearest_clusters)
            .map(|(cluster, _)| cluster)
            .collect();
        let slots = count.div_ceil(self.nearest_clusters).max(1);

        let scored: Vec<RankedMeal<'a>> = candidates
            .iter()
            .map(|&meal| {
                let scaled = self.model.standardize(&meal_features(&meal.nutrition));
                let cluster = meal
                    .cluster
                    .unwrap_or_else(|| self.model.nearest_cluster(&scaled));
                let raw_distance = euclidean_distance(&scaled, &scaled_target);
                RankedMeal {
                    meal,
                    cluster: Some(cluster),
                    distance: self.penalty.apply(meal, raw_distance),
                    raw_distance,
                }
            })
            .collect();

        let mut ranked = Vec::with_capacity(count.min(candidates.len()));
        for cluster in selected {
            let mut members: Vec<RankedMeal<'a>> = scored
                .iter()
                .filter(|candidate| candidate.cluster == Some(cluster))
                .copied()
                .collect();
            members.sort_by(|a, b| a.best_first(b));
            ranked.extend(members.into_iter().take(slots));
        }
        ranked.truncate(count);
        ranked
    }
}

/// Ranks every candidate by distance, ignoring clusters
#[derive(Debug, Clone)]
pub struct FullScanMatcher<'m> {
    scaler: &'m StandardScaler,
    penalty: CategoryPenalty,
}

impl<'m> FullScanMatcher<'m> {
    /// Matcher using corpus statistics from `scaler`
    #[must_use]
    pub const fn new(scaler: &'m StandardScaler, penalty: CategoryPenalty) -> Self {
        Self { scaler, penalty }
    }
}

impl NutrientMatcher for FullScanMatcher<'_> {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::FullScan
    }

    fn rank<'a>(
        &self,
        target: &FeatureVector,
        candidates: &[&'a Meal],
        count: usize,
    ) -> Vec<RankedMeal<'a>> {
        let scaled_target = self.scaler.transform(target);
        let mut ranked: Vec<RankedMeal<'a>> = candidates
            .iter()
            .map(|&meal| {
                let scaled = self.scaler.transform(&meal_features(&meal.nutrition));
                let raw_distance = euclidean_distance(&scaled, &scaled_target);
                RankedMeal {
                    meal,
                    cluster: meal.cluster,
                    distance: self.penalty.apply(meal, raw_distance),
                    raw_distance,
                }
            })
            .collect();
        ranked.sort_by(|a, b| a.best_first(b));
        ranked.truncate(count);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::FEATURE_COUNT;
    use chrono::Utc;
    use nutriplan_core::models::NutrientProfile;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn profile(calories: f64) -> NutrientProfile {
        NutrientProfile::new(calories, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    fn meal(id: &str, category: &str, calories: f64, cluster: usize) -> Meal {
        Meal {
            id: id.to_owned(),
            name: id.to_owned(),
            category: category.to_owned(),
            area: String::new(),
            instructions: String::new(),
            ingredients: Vec::new(),
            nutrition: profile(calories),
            cluster: Some(cluster),
            source: None,
            tags: Vec::new(),
        }
    }

    /// Identity scaling with centroids at 200, 500 and 900 kcal
    fn model() -> ClusterModel {
        ClusterModel {
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            k: 3,
            feature_names: Vec::new(),
            scaler: StandardScaler {
                mean: [0.0; FEATURE_COUNT],
                scale: [1.0; FEATURE_COUNT],
            },
            centers: [200.0, 500.0, 900.0]
                .iter()
                .map(|calories| meal_features(&profile(*calories)))
                .collect(),
            inertia: 0.0,
            iterations: 1,
            seed: 0,
            assignments: BTreeMap::new(),
        }
    }

    /// Three meals near 200 kcal, one near 500 and three near 900
    fn corpus() -> Vec<Meal> {
        vec![
            meal("a-190", "Main", 190.0, 0),
            meal("a-200", "Main", 200.0, 0),
            meal("a-210", "Main", 210.0, 0),
            meal("b-500", "Main", 500.0, 1),
            meal("c-880", "Main", 880.0, 2),
            meal("c-900", "Main", 900.0, 2),
            meal("c-920", "Main", 920.0, 2),
        ]
    }

    fn ids(ranked: &[RankedMeal<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.meal.id.clone()).collect()
    }

    fn target() -> FeatureVector {
        meal_features(&profile(210.0))
    }

    fn no_penalty() -> CategoryPenalty {
        CategoryPenalty::new("Dessert", 1.0)
    }

    #[test]
    fn test_short_cluster_is_not_backfilled() {
        let model = model();
        let meals = corpus();
        let candidates: Vec<&Meal> = meals.iter().collect();
        let matcher = ClusteredMatcher::new(&model, 2, no_penalty());

        // two slots per cluster; the 500 kcal cluster only has one meal
        let ranked = matcher.rank(&target(), &candidates, 4);

        assert_eq!(ids(&ranked), ["a-210", "a-200", "b-500"]);
        assert!(ranked.iter().all(|r| r.cluster != Some(2)));
    }

    #[test]
    fn test_slots_round_up_then_truncate_in_cluster_order() {
        let model = model();
        let meals = corpus();
        let candidates: Vec<&Meal> = meals.iter().collect();
        let matcher = ClusteredMatcher::new(&model, 3, no_penalty());

        // ceil(4 / 3) = 2 slots: 2 + 1 + 2 meals, cut back to 4
        let ranked = matcher.rank(&target(), &candidates, 4);

        assert_eq!(ids(&ranked), ["a-210", "a-200", "b-500", "c-880"]);
        let clusters: Vec<Option<usize>> = ranked.iter().map(|r| r.cluster).collect();
        assert_eq!(clusters, [Some(0), Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let model = model();
        let meals = corpus();
        let candidates: Vec<&Meal> = meals.iter().collect();
        let matcher = ClusteredMatcher::new(&model, 3, CategoryPenalty::new("Dessert", 1.3));

        let first = matcher.rank(&target(), &candidates, 6);
        let second = matcher.rank(&target(), &candidates, 6);

        assert_eq!(first, second);
    }

    #[test]
    fn test_dessert_ranks_below_equal_distance_meal_when_clustered() {
        let model = model();
        // identical nutrients; the dessert id sorts first on an exact tie
        let meals = vec![
            meal("a-dessert", "Dessert", 190.0, 0),
            meal("b-plain", "Main", 190.0, 0),
        ];
        let candidates: Vec<&Meal> = meals.iter().collect();

        let unpenalized = ClusteredMatcher::new(&model, 1, no_penalty());
        assert_eq!(ids(&unpenalized.rank(&target(), &candidates, 2)), ["a-dessert", "b-plain"]);

        let penalized = ClusteredMatcher::new(&model, 1, CategoryPenalty::new("dessert", 1.3));
        let ranked = penalized.rank(&target(), &candidates, 2);
        assert_eq!(ids(&ranked), ["b-plain", "a-dessert"]);
        assert!(ranked[1].distance > ranked[0].distance);
        assert!((ranked[1].raw_distance - ranked[0].raw_distance).abs() < f64::EPSILON);
        assert!((ranked[1].distance - ranked[1].raw_distance * 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_huge_count_returns_every_selected_meal() {
        let model = model();
        let meals = corpus();
        let candidates: Vec<&Meal> = meals.iter().collect();

        let clustered = ClusteredMatcher::new(&model, 4, no_penalty());
        assert_eq!(clustered.rank(&target(), &candidates, usize::MAX).len(), 7);

        let full_scan = FullScanMatcher::new(&model.scaler, no_penalty());
        assert_eq!(full_scan.rank(&target(), &candidates, usize::MAX).len(), 7);
    }
}
