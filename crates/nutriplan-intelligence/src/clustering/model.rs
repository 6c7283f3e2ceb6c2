// ABOUTME: Trained cluster model: scaler, centroids and meal assignments, plus the trainer
// ABOUTME: Models are immutable once built and serialize to JSON for reuse across restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::features::{
    euclidean_distance, meal_features, FeatureVector, FEATURE_COUNT, FEATURE_NAMES,
};
use super::kmeans::{nearest_centroid, KMeans};
use super::scaler::StandardScaler;
use super::summary::{summarize, ClusterSummary};
use crate::config::ClusteringConfig;
use chrono::{DateTime, Utc};
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::Meal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Fitted partition of the meal feature space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterModel {
    /// Unique id of this training run
    pub model_id: Uuid,
    /// When training finished
    pub trained_at: DateTime<Utc>,
    /// Number of clusters
    pub k: usize,
    /// Feature layout the model was trained on
    pub feature_names: Vec<String>,
    /// Corpus statistics for standardization
    pub scaler: StandardScaler,
    /// Centroids in standardized space
    pub centers: Vec<FeatureVector>,
    /// Sum of squared distances of meals to their centroids
    pub inertia: f64,
    /// Lloyd iterations of the winning restart
    pub iterations: usize,
    /// Seed of the winning restart
    pub seed: u64,
    /// Cluster of every training meal whose id is non-blank and unique
    pub assignments: BTreeMap<String, usize>,
}

impl ClusterModel {
    /// Standardize a raw feature vector with the corpus statistics
    #[must_use]
    pub fn standardize(&self, features: &FeatureVector) -> FeatureVector {
        self.scaler.transform(features)
    }

    /// Nearest cluster of a raw feature vector
    #[must_use]
    pub fn predict_cluster(&self, features: &FeatureVector) -> usize {
        self.nearest_cluster(&self.standardize(features))
    }

    /// Nearest cluster of an already standardized vector
    #[must_use]
    pub fn nearest_cluster(&self, scaled: &FeatureVector) -> usize {
        nearest_centroid(scaled, &self.centers).0
    }

    /// Clusters ordered by distance from a standardized vector, nearest first
    ///
    /// Equal distances keep the lower cluster id first.
    #[must_use]
    pub fn clusters_by_distance(&self, scaled: &FeatureVector) -> Vec<(usize, f64)> {
        let mut order: Vec<(usize, f64)> = self
            .centers
            .iter()
            .enumerate()
            .map(|(cluster, center)| (cluster, euclidean_distance(scaled, center)))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        order
    }

    /// Centroids in standardized space, as used by [`Self::predict_cluster`]
    #[must_use]
    pub fn cluster_centers(&self) -> Vec<FeatureVector> {
        self.centers.clone()
    }

    /// Centroids mapped back to raw feature units
    #[must_use]
    pub fn raw_cluster_centers(&self) -> Vec<FeatureVector> {
        self.centers
            .iter()
            .map(|center| self.scaler.inverse_transform(center))
            .collect()
    }

    /// Check internal consistency of a model loaded from disk
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the feature layout differs from this build,
    /// the scaler holds a non-finite mean or a scale that is not finite and
    /// positive, the centroid count differs from `k`, or an assignment is out
    /// of range
    pub fn validate(&self) -> AppResult<()> {
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(AppError::invalid_input(
                "model feature layout does not match this build",
            ));
        }
        if let Some(feature) = (0..FEATURE_COUNT).find(|&index| {
            let scale = self.scaler.scale[index];
            !self.scaler.mean[index].is_finite() || !scale.is_finite() || scale <= 0.0
        }) {
            return Err(AppError::invalid_input(format!(
                "model scaler for feature '{}' must have a finite mean and a finite positive scale",
                FEATURE_NAMES[feature]
            )));
        }
        if self.centers.iter().flatten().any(|value| !value.is_finite()) {
            return Err(AppError::invalid_input("model centroids must be finite"));
        }
        if self.k == 0 || self.centers.len() != self.k {
            return Err(AppError::invalid_input(format!(
                "model declares k={} but holds {} centroids",
                self.k,
                self.centers.len()
            )));
        }
        if let Some((meal, cluster)) = self.assignments.iter().find(|(_, c)| **c >= self.k) {
            return Err(AppError::invalid_input(format!(
                "meal '{meal}' assigned to cluster {cluster} outside 0..{}",
                self.k
            )));
        }
        Ok(())
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a model from JSON
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON and `InvalidInput`
    /// for an inconsistent model
    pub fn from_json(json: &str) -> AppResult<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }
}

/// A model together with the assigned corpus it ranks
///
/// Built once, then shared read-only behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// Fitted partition
    pub model: ClusterModel,
    /// Eligible meals, each with its cluster set
    pub meals: Vec<Meal>,
    /// One summary per cluster
    pub summaries: Vec<ClusterSummary>,
}

impl TrainedModel {
    /// Attach a persisted model to a corpus
    ///
    /// Meals seen during training keep their recorded cluster; meals added
    /// since are placed in their nearest cluster. Ineligible meals are dropped.
    /// A cluster a corpus meal carried from an earlier model is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is inconsistent
    pub fn restore(model: ClusterModel, corpus: Vec<Meal>) -> AppResult<Self> {
        model.validate()?;
        let mut meals = Vec::with_capacity(corpus.len());
        let mut unseen = 0_usize;
        for meal in corpus.into_iter().filter(Meal::is_eligible) {
            let meal = Meal {
                cluster: None,
                ..meal
            };
            let cluster = if let Some(cluster) = model.assignments.get(&meal.id) {
                *cluster
            } else {
                unseen += 1;
                model.predict_cluster(&meal_features(&meal.nutrition))
            };
            meals.push(meal.with_cluster(cluster)?);
        }
        if unseen > 0 {
            warn!(unseen, "Meals missing from model assignments were placed by nearest centroid");
        }

        let summaries = summarize(&meals, model.k);
        Ok(Self {
            model,
            meals,
            summaries,
        })
    }

    /// Summary of one cluster
    #[must_use]
    pub fn summary(&self, cluster: usize) -> Option<&ClusterSummary> {
        self.summaries.get(cluster)
    }
}

/// Fits cluster models with fixed parameters
#[derive(Debug, Clone, Default)]
pub struct ClusterTrainer {
    config: ClusteringConfig,
}

impl ClusterTrainer {
    /// Trainer using `config`
    #[must_use]
    pub const fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    /// Clustering parameters in use
    #[must_use]
    pub const fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Fit a model on the eligible meals of `corpus`
    ///
    /// Meals without energy are left out of training and of the result.
    /// Any cluster a meal carried from an earlier model is discarded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when fewer eligible meals than clusters remain
    pub fn train(&self, corpus: Vec<Meal>) -> AppResult<TrainedModel> {
        let started = Instant::now();
        let total = corpus.len();
        let meals: Vec<Meal> = corpus
            .into_iter()
            .filter(Meal::is_eligible)
            .map(|meal| Meal {
                cluster: None,
                ..meal
            })
            .collect();
        if meals.len() < total {
            warn!(
                excluded = total - meals.len(),
                "Excluded meals without energy from training"
            );
        }

        let raw: Vec<FeatureVector> = meals
            .iter()
            .map(|meal| meal_features(&meal.nutrition))
            .collect();
        let scaler = StandardScaler::fit(&raw)?;
        let scaled: Vec<FeatureVector> = raw.iter().map(|row| scaler.transform(row)).collect();

        let fit = KMeans::from_config(&self.config).fit(&scaled)?;

        let meals = meals
            .into_iter()
            .zip(&fit.labels)
            .map(|(meal, &cluster)| meal.with_cluster(cluster))
            .collect::<AppResult<Vec<_>>>()?;
        let assignments = recorded_assignments(&meals);
        if assignments.len() < meals.len() {
            warn!(
                meals = meals.len(),
                recorded = assignments.len(),
                "Blank or repeated meal ids left out of model assignments"
            );
        }

        let model = ClusterModel {
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            k: self.config.k,
            feature_names: FEATURE_NAMES.iter().map(|name| (*name).to_owned()).collect(),
            scaler,
            centers: fit.centroids,
            inertia: fit.inertia,
            iterations: fit.iterations,
            seed: fit.seed,
            assignments,
        };
        let summaries = summarize(&meals, model.k);

        info!(
            model_id = %model.model_id,
            k = model.k,
            meals = meals.len(),
            inertia = model.inertia,
            iterations = model.iterations,
            elapsed_ms = started.elapsed().as_millis(),
            "Cluster model trained"
        );

        Ok(TrainedModel {
            model,
            meals,
            summaries,
        })
    }
}

/// Cluster by meal id, for ids that are non-blank and unique in `meals`
fn recorded_assignments(meals: &[Meal]) -> BTreeMap<String, usize> {
    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for meal in meals {
        *occurrences.entry(meal.id.as_str()).or_default() += 1;
    }
    meals
        .iter()
        .filter(|meal| !meal.id.trim().is_empty() && occurrences.get(meal.id.as_str()) == Some(&1))
        .filter_map(|meal| meal.cluster.map(|cluster| (meal.id.clone(), cluster)))
        .collect()
}

/// Train a model with `k` clusters and default parameters otherwise
///
/// # Errors
///
/// Returns `InvalidInput` for an empty corpus or fewer eligible meals than `k`
pub fn train(meals: Vec<Meal>, k: usize) -> AppResult<TrainedModel> {
    ClusterTrainer::new(ClusteringConfig {
        k,
        ..ClusteringConfig::default()
    })
    .train(meals)
}
