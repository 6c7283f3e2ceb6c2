// ABOUTME: Nutrient-space clustering engine: features, standardization, k-means, summaries
// ABOUTME: Produces immutable TrainedModel values for the recommendation ranker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Clustering
//!
//! Training is an offline batch step:
//!
//! 1. Each eligible meal becomes a 10-feature vector (`features`)
//! 2. Features are standardized with corpus statistics (`scaler`)
//! 3. k-means with k-means++ seeding partitions the standardized space (`kmeans`)
//! 4. Every cluster gets a summary for display (`summary`)
//!
//! The result is a [`TrainedModel`] that is never mutated afterwards.

pub mod features;
pub mod kmeans;
mod model;
pub mod scaler;
pub mod summary;

pub use features::{meal_features, target_features, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use kmeans::{KMeans, KMeansFit};
pub use model::{train, ClusterModel, ClusterTrainer, TrainedModel};
pub use scaler::StandardScaler;
pub use summary::{ClusterSummary, GroupCount};
