// ABOUTME: Recommendation service owning the meal corpus, nutrient resolver and published model
// ABOUTME: Trains off the async runtime and swaps the serving model atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! The service is built once at startup and shared by every handler through
//! an `Arc`. Requests take a snapshot of the published model (an
//! `Arc<TrainedModel>`) and rank against it without holding any lock, so a
//! concurrent retrain never exposes a partially built model.

use crate::config::ServerConfig;
use crate::external::load_foundation_foods;
use crate::ingest::{load_corpus, CorpusBuilder};
use crate::logging::AppLogger;
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::Meal;
use nutriplan_intelligence::clustering::ClusterSummary;
use nutriplan_intelligence::{
    ClusterModel, ClusterTrainer, IngredientParser, IntelligenceConfig, NameNormalizer,
    NutrientLookup, NutrientReference, NutrientResolver, ParseOutcome, RecommendationRanker,
    RecommendationRequest, RecommendationSet, Resolution, TrainedModel,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task;
use tracing::{debug, info, warn};

/// One ingredient line parsed and resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientAnalysis {
    /// Parsed ingredient and anomalies
    #[serde(flatten)]
    pub outcome: ParseOutcome,
    /// Nutrient tier and per-100 g profile of the canonical name
    pub resolution: Resolution,
}

/// Read and validate a persisted cluster model
///
/// # Errors
///
/// Returns a storage error when the file cannot be read and
/// `InvalidInput`/serialization errors for an unusable model
pub fn read_model(path: &Path) -> AppResult<ClusterModel> {
    let json = fs::read_to_string(path).map_err(|e| {
        AppError::storage(format!("failed to read model {}: {e}", path.display())).with_source(e)
    })?;
    ClusterModel::from_json(&json)
}

/// Write a cluster model as pretty JSON
///
/// # Errors
///
/// Returns a storage error when the file cannot be written
pub fn write_model(path: &Path, model: &ClusterModel) -> AppResult<()> {
    fs::write(path, model.to_json()?).map_err(|e| {
        AppError::storage(format!("failed to write model {}: {e}", path.display())).with_source(e)
    })?;
    info!(path = %path.display(), model_id = %model.model_id, "Saved cluster model");
    Ok(())
}

/// Owns everything a recommendation request needs
pub struct RecommendationService {
    config: IntelligenceConfig,
    parser: IngredientParser,
    resolver: NutrientResolver,
    ranker: RecommendationRanker,
    corpus: RwLock<Arc<Vec<Meal>>>,
    published: RwLock<Option<Arc<TrainedModel>>>,
}

impl RecommendationService {
    /// Service with an empty corpus and no published model
    #[must_use]
    pub fn new(config: IntelligenceConfig, reference: NutrientReference) -> Self {
        let parser = IngredientParser::new(
            config.parser.clone(),
            NameNormalizer::new(config.normalizer.clone()),
        );
        let ranker = RecommendationRanker::new(config.ranking.clone());
        Self {
            config,
            parser,
            resolver: NutrientResolver::new(reference),
            ranker,
            corpus: RwLock::new(Arc::new(Vec::new())),
            published: RwLock::new(None),
        }
    }

    /// Build the service from server configuration
    ///
    /// Loads the nutrient reference and corpus when configured. A persisted
    /// model is restored when its file exists; otherwise a model is trained
    /// from the corpus and, if a model path is set, saved there.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured file cannot be loaded or training fails
    pub async fn bootstrap(config: &ServerConfig) -> AppResult<Arc<Self>> {
        let reference = match config.data.reference_path.clone() {
            Some(path) => blocking(move || load_foundation_foods(&path)).await?,
            None => {
                info!("No nutrient reference configured; using staples table only");
                NutrientReference::default()
            }
        };
        let service = Arc::new(Self::new(config.intelligence.clone(), reference));

        let Some(corpus_path) = config.data.corpus_path.clone() else {
            warn!("No corpus configured; recommendations unavailable until a model is trained");
            return Ok(service);
        };
        let meals = blocking(move || load_corpus(&corpus_path)).await?;
        service.replace_corpus(meals).await;

        match config.data.model_path.clone() {
            Some(path) if path.is_file() => {
                let model = blocking(move || read_model(&path)).await?;
                service.restore(model).await?;
            }
            Some(path) => {
                let trained = service.train().await?;
                let model = trained.model.clone();
                blocking(move || write_model(&path, &model)).await?;
            }
            None => {
                service.train().await?;
            }
        }
        Ok(service)
    }

    /// Algorithm settings in use
    #[must_use]
    pub const fn config(&self) -> &IntelligenceConfig {
        &self.config
    }

    /// Ingredient parser in use
    #[must_use]
    pub const fn parser(&self) -> &IngredientParser {
        &self.parser
    }

    /// Nutrient resolver in use
    #[must_use]
    pub const fn resolver(&self) -> &NutrientResolver {
        &self.resolver
    }

    /// Corpus builder sharing this service's parser and resolver
    #[must_use]
    pub fn corpus_builder(&self) -> CorpusBuilder<'_> {
        CorpusBuilder::new(&self.parser, &self.resolver)
    }

    /// Replace the corpus used by the next training run
    pub async fn replace_corpus(&self, meals: Vec<Meal>) {
        let count = meals.len();
        *self.corpus.write().await = Arc::new(meals);
        debug!(meals = count, "Corpus replaced");
    }

    /// Meals in the current corpus
    pub async fn corpus_len(&self) -> usize {
        self.corpus.read().await.len()
    }

    /// Train on the current corpus and publish the result
    ///
    /// Training runs on the blocking pool; the previous model keeps serving
    /// until the new one is published.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the corpus has fewer eligible meals than
    /// clusters, or an internal error if the training task fails
    pub async fn train(&self) -> AppResult<Arc<TrainedModel>> {
        let meals = Vec::clone(&**self.corpus.read().await);
        let trainer = ClusterTrainer::new(self.config.clustering.clone());
        let trained = blocking(move || trainer.train(meals)).await?;
        Ok(self.publish(trained, "trained").await)
    }

    /// Attach a persisted model to the current corpus and publish it
    ///
    /// # Errors
    ///
    /// Returns an error if the model is inconsistent
    pub async fn restore(&self, model: ClusterModel) -> AppResult<Arc<TrainedModel>> {
        let meals = Vec::clone(&**self.corpus.read().await);
        let trained = blocking(move || TrainedModel::restore(model, meals)).await?;
        Ok(self.publish(trained, "restored").await)
    }

    async fn publish(&self, trained: TrainedModel, origin: &str) -> Arc<TrainedModel> {
        let trained = Arc::new(trained);
        AppLogger::log_model_published(&trained.model, trained.meals.len(), origin);
        *self.published.write().await = Some(Arc::clone(&trained));
        trained
    }

    /// Snapshot of the serving model
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` before the first model is published
    pub async fn current_model(&self) -> AppResult<Arc<TrainedModel>> {
        self.published
            .read()
            .await
            .clone()
            .ok_or_else(AppError::model_unavailable)
    }

    /// Whether a model is serving
    pub async fn is_ready(&self) -> bool {
        self.published.read().await.is_some()
    }

    /// Rank meals for a request against the serving model
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` before a model is published, and the
    /// ranker's validation errors for bad targets or counts
    pub async fn recommend(&self, request: &RecommendationRequest) -> AppResult<RecommendationSet> {
        let model = self.current_model().await?;
        let started = Instant::now();
        let set = self.ranker.recommend(&model, request)?;
        AppLogger::log_recommendation(
            set.requested,
            set.recommendations.len(),
            set.candidates,
            started.elapsed().as_millis(),
        );
        Ok(set)
    }

    /// Summaries of the serving model's clusters
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` before a model is published
    pub async fn cluster_summaries(&self) -> AppResult<Vec<ClusterSummary>> {
        Ok(self.current_model().await?.summaries.clone())
    }

    /// Parse one ingredient line and resolve its canonical name
    #[must_use]
    pub fn analyze_ingredient(&self, line: &str) -> IngredientAnalysis {
        let outcome = self.parser.parse_detailed(line);
        let resolution = self.resolver.resolve(&outcome.ingredient.name);
        IngredientAnalysis {
            outcome,
            resolution,
        }
    }
}

/// Run CPU-bound or blocking file work off the async runtime
async fn blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("background task failed: {e}")))?
}
