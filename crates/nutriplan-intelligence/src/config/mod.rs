// ABOUTME: Intelligence configuration for parsing, normalization, clustering and ranking
// ABOUTME: Typed defaults with environment overrides and unified validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Every tunable constant used by the meal intelligence pipeline lives here:
//! - `parser` - gram defaults, anomaly ceiling, missing-quantity policy
//! - `normalizer` - optional repair heuristics
//! - `clustering` - k-means parameters and seed
//! - `ranking` - cluster sampling, category penalty, per-meal micronutrient targets
//!
//! Configuration is loaded once by the binaries and passed by value to the
//! components that need it. There is no process-wide singleton.

pub mod error;

pub use error::ConfigError;

use nutriplan_core::constants::{clustering, limits, nutrition, parsing, unit_weights};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Quantity assumed when an ingredient line has no leading number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingQuantityPolicy {
    /// Assume a single unit ("salt" is one portion)
    #[default]
    One,
    /// Assume nothing (strict mixed-number reading)
    Zero,
}

impl MissingQuantityPolicy {
    /// Quantity substituted under this policy
    #[must_use]
    pub const fn quantity(self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Zero => 0.0,
        }
    }
}

impl FromStr for MissingQuantityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one" | "1" => Ok(Self::One),
            "zero" | "0" => Ok(Self::Zero),
            other => Err(format!("unknown missing-quantity policy: {other}")),
        }
    }
}

/// Candidate selection strategy for the ranker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Narrow candidates to the nearest clusters, then rank within each
    #[default]
    Clustered,
    /// Rank the whole eligible corpus by distance
    FullScan,
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "clustered" => Ok(Self::Clustered),
            "full_scan" | "fullscan" => Ok(Self::FullScan),
            other => Err(format!("unknown match strategy: {other}")),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clustered => f.write_str("clustered"),
            Self::FullScan => f.write_str("full_scan"),
        }
    }
}

/// Ingredient line parser settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Grams per quantity when no unit is recognised
    pub default_grams: f64,
    /// Estimates above this are anomalies
    pub gram_ceiling: f64,
    /// Replacement for anomalous estimates
    pub clamped_grams: f64,
    /// Quantity used when the line has no leading number
    pub missing_quantity_policy: MissingQuantityPolicy,
    /// Weight of a pinch or dash
    pub small_measure_grams: f64,
    /// Minimum canonical name length kept by callers
    pub min_name_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_grams: parsing::DEFAULT_UNIT_GRAMS,
            gram_ceiling: parsing::GRAM_CEILING,
            clamped_grams: parsing::CLAMPED_GRAMS,
            missing_quantity_policy: MissingQuantityPolicy::One,
            small_measure_grams: unit_weights::GRAMS_PER_PINCH,
            min_name_length: parsing::MIN_NAME_LENGTH,
        }
    }
}

/// Ingredient name normalizer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Rewrite a bare "chicken" to "chicken breast"
    pub chicken_breast_default: bool,
}

/// K-means training settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Number of clusters
    pub k: usize,
    /// Independent initialisations; the lowest-inertia run wins
    pub n_init: usize,
    /// Lloyd iteration cap per run
    pub max_iterations: usize,
    /// Convergence threshold on summed squared centroid movement
    pub tolerance: f64,
    /// Base seed; run `i` uses `seed + i`
    pub seed: u64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: clustering::DEFAULT_K,
            n_init: clustering::DEFAULT_N_INIT,
            max_iterations: clustering::DEFAULT_MAX_ITERATIONS,
            tolerance: clustering::DEFAULT_TOLERANCE,
            seed: clustering::DEFAULT_SEED,
        }
    }
}

/// Recommendation ranking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Clusters sampled per request
    pub nearest_clusters: usize,
    /// Distance multiplier for the penalized category
    pub penalty_factor: f64,
    /// Category matched case-insensitively
    pub penalized_category: String,
    /// Fiber component of the per-meal target (g)
    pub fiber_per_meal: f64,
    /// Sodium component of the per-meal target (mg)
    pub sodium_per_meal: f64,
    /// Results when the caller does not specify a count
    pub default_recommendations: usize,
    /// Upper bound on requested results
    pub max_recommendations: usize,
    /// Candidate selection strategy
    pub strategy: MatchStrategy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            nearest_clusters: clustering::DEFAULT_NEAREST_CLUSTERS,
            penalty_factor: clustering::DEFAULT_CATEGORY_PENALTY,
            penalized_category: clustering::DEFAULT_PENALIZED_CATEGORY.to_owned(),
            fiber_per_meal: nutrition::FIBER_PER_MEAL_G,
            sodium_per_meal: nutrition::SODIUM_PER_MEAL_MG,
            default_recommendations: limits::DEFAULT_RECOMMENDATIONS,
            max_recommendations: limits::MAX_RECOMMENDATIONS,
            strategy: MatchStrategy::Clustered,
        }
    }
}

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Ingredient line parser
    pub parser: ParserConfig,
    /// Ingredient name normalizer
    pub normalizer: NormalizerConfig,
    /// K-means training
    pub clustering: ClusteringConfig,
    /// Recommendation ranking
    pub ranking: RankingConfig,
}

impl IntelligenceConfig {
    /// Load configuration from defaults plus `NUTRIPLAN_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first rule the configuration violates
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_parser()?;
        self.validate_clustering()?;
        self.validate_ranking()
    }

    fn validate_parser(&self) -> Result<(), ConfigError> {
        let parser = &self.parser;
        if parser.default_grams <= 0.0 || parser.clamped_grams <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "parser default and clamped grams must be positive",
            ));
        }
        if parser.gram_ceiling <= parser.default_grams {
            return Err(ConfigError::InvalidRange(
                "gram_ceiling must be > default_grams",
            ));
        }
        if parser.clamped_grams > parser.gram_ceiling {
            return Err(ConfigError::InvalidRange(
                "clamped_grams must be <= gram_ceiling",
            ));
        }
        if parser.small_measure_grams <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "small_measure_grams must be positive",
            ));
        }
        Ok(())
    }

    fn validate_clustering(&self) -> Result<(), ConfigError> {
        let clustering = &self.clustering;
        if clustering.k == 0 {
            return Err(ConfigError::ValueOutOfRange("k must be at least 1"));
        }
        if clustering.n_init == 0 || clustering.max_iterations == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "n_init and max_iterations must be at least 1",
            ));
        }
        if !(clustering.tolerance > 0.0 && clustering.tolerance.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "clustering tolerance must be positive",
            ));
        }
        Ok(())
    }

    fn validate_ranking(&self) -> Result<(), ConfigError> {
        let ranking = &self.ranking;
        if ranking.nearest_clusters == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "nearest_clusters must be at least 1",
            ));
        }
        if !(ranking.penalty_factor >= 1.0 && ranking.penalty_factor.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "penalty_factor must be >= 1.0",
            ));
        }
        if ranking.fiber_per_meal < 0.0 || ranking.sodium_per_meal < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "per-meal fiber and sodium targets must be non-negative",
            ));
        }
        if ranking.default_recommendations == 0
            || ranking.default_recommendations > ranking.max_recommendations
        {
            return Err(ConfigError::InvalidRange(
                "default_recommendations must be in 1..=max_recommendations",
            ));
        }
        if ranking.penalized_category.trim().is_empty() {
            return Err(ConfigError::MissingField("penalized_category"));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Parser overrides
        Self::apply_env_var("NUTRIPLAN_DEFAULT_GRAMS", &mut self.parser.default_grams)?;
        Self::apply_env_var("NUTRIPLAN_GRAM_CEILING", &mut self.parser.gram_ceiling)?;
        Self::apply_env_var("NUTRIPLAN_CLAMPED_GRAMS", &mut self.parser.clamped_grams)?;
        Self::apply_env_var(
            "NUTRIPLAN_MISSING_QUANTITY",
            &mut self.parser.missing_quantity_policy,
        )?;
        Self::apply_env_var(
            "NUTRIPLAN_SMALL_MEASURE_GRAMS",
            &mut self.parser.small_measure_grams,
        )?;

        // Normalizer overrides
        Self::apply_env_var(
            "NUTRIPLAN_CHICKEN_BREAST_DEFAULT",
            &mut self.normalizer.chicken_breast_default,
        )?;

        // Clustering overrides
        Self::apply_env_var("NUTRIPLAN_CLUSTERS", &mut self.clustering.k)?;
        Self::apply_env_var("NUTRIPLAN_N_INIT", &mut self.clustering.n_init)?;
        Self::apply_env_var("NUTRIPLAN_MAX_ITERATIONS", &mut self.clustering.max_iterations)?;
        Self::apply_env_var("NUTRIPLAN_TOLERANCE", &mut self.clustering.tolerance)?;
        Self::apply_env_var("NUTRIPLAN_SEED", &mut self.clustering.seed)?;

        // Ranking overrides
        Self::apply_env_var(
            "NUTRIPLAN_NEAREST_CLUSTERS",
            &mut self.ranking.nearest_clusters,
        )?;
        Self::apply_env_var("NUTRIPLAN_PENALTY_FACTOR", &mut self.ranking.penalty_factor)?;
        Self::apply_env_var(
            "NUTRIPLAN_PENALIZED_CATEGORY",
            &mut self.ranking.penalized_category,
        )?;
        Self::apply_env_var("NUTRIPLAN_FIBER_PER_MEAL", &mut self.ranking.fiber_per_meal)?;
        Self::apply_env_var("NUTRIPLAN_SODIUM_PER_MEAL", &mut self.ranking.sodium_per_meal)?;
        Self::apply_env_var(
            "NUTRIPLAN_DEFAULT_RECOMMENDATIONS",
            &mut self.ranking.default_recommendations,
        )?;
        Self::apply_env_var(
            "NUTRIPLAN_MAX_RECOMMENDATIONS",
            &mut self.ranking.max_recommendations,
        )?;
        Self::apply_env_var("NUTRIPLAN_MATCH_STRATEGY", &mut self.ranking.strategy)?;

        Ok(self)
    }
}
