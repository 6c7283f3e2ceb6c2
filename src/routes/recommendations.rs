// ABOUTME: Meal recommendation and cluster summary route handlers
// ABOUTME: Converts daily targets or user profiles into per-meal targets and ranks the corpus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recommendation routes
//!
//! `POST /api/recommendations` takes a daily macro target, either given
//! directly as `targets` or derived from a `user_profile`, splits it across
//! `meals_per_day` meals and returns the best-matching meals for one meal.

use crate::middleware::RequestContext;
use crate::services::RecommendationService;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use nutriplan_core::constants::limits::{DEFAULT_MEALS_PER_DAY, MAX_MEALS_PER_DAY};
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{MacroTarget, MacroTargetInput};
use nutriplan_intelligence::nutrition_calculator::{calculate_nutritional_targets, UserProfile};
use nutriplan_intelligence::{MealFilters, RecommendationRequest};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Body of `POST /api/recommendations`
#[derive(Debug, Deserialize)]
pub struct RecommendationBody {
    /// Daily macro target
    #[serde(default, alias = "user_targets")]
    pub targets: Option<MacroTargetInput>,
    /// Body metrics to derive the daily target from when `targets` is absent
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    /// Meals the daily target is split across
    #[serde(default)]
    pub meals_per_day: Option<u32>,
    /// Number of meals wanted
    #[serde(default)]
    pub count: Option<usize>,
    /// Hard filters
    #[serde(flatten)]
    pub filters: MealFilters,
}

impl RecommendationBody {
    /// Daily target from `targets`, or from `user_profile` when no target is given
    ///
    /// # Errors
    ///
    /// Returns `InvalidTarget` when neither is present or the target is
    /// incomplete, and `InvalidInput` for an out-of-range profile
    pub fn daily_target(&self) -> AppResult<MacroTarget> {
        match (self.targets, self.user_profile) {
            (Some(targets), _) => MacroTarget::try_from(targets),
            (None, Some(profile)) => calculate_nutritional_targets(&profile)?.macro_target(),
            (None, None) => Err(AppError::invalid_target(
                "either 'targets' or 'user_profile' is required",
            )),
        }
    }

    /// Meals per day, checked against the supported range
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` outside `1..=MAX_MEALS_PER_DAY`
    pub fn meals_per_day(&self) -> AppResult<u32> {
        let meals = self.meals_per_day.unwrap_or(DEFAULT_MEALS_PER_DAY);
        if (1..=MAX_MEALS_PER_DAY).contains(&meals) {
            Ok(meals)
        } else {
            Err(AppError::invalid_input(format!(
                "meals_per_day must be between 1 and {MAX_MEALS_PER_DAY} (got {meals})"
            )))
        }
    }
}

/// Recommendation routes
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(service: Arc<RecommendationService>) -> Router {
        Router::new()
            .route("/api/recommendations", post(Self::handle_recommend))
            .route("/api/clusters", get(Self::handle_clusters))
            .with_state(service)
    }

    async fn handle_recommend(
        State(service): State<Arc<RecommendationService>>,
        headers: HeaderMap,
        Json(body): Json<RecommendationBody>,
    ) -> Result<Response, AppError> {
        let context = RequestContext::from_headers(&headers);
        context.record_in_span();
        Self::recommend(&service, body)
            .await
            .map_err(|e| e.with_request_id(&context.request_id))
    }

    async fn recommend(
        service: &RecommendationService,
        body: RecommendationBody,
    ) -> AppResult<Response> {
        let daily = body.daily_target()?;
        let meals_per_day = body.meals_per_day()?;
        let per_meal = daily.per_meal(meals_per_day)?;

        let request = RecommendationRequest {
            target: per_meal,
            count: body.count,
            filters: body.filters,
        };
        let set = service.recommend(&request).await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "daily_target": daily,
                "meals_per_day": meals_per_day,
                "per_meal_target": per_meal,
                "model_id": set.model_id,
                "strategy": set.strategy,
                "requested": set.requested,
                "candidates": set.candidates,
                "recommendations": set.recommendations,
            })),
        )
            .into_response())
    }

    async fn handle_clusters(
        State(service): State<Arc<RecommendationService>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let context = RequestContext::from_headers(&headers);
        let model = service
            .current_model()
            .await
            .map_err(|e| e.with_request_id(&context.request_id))?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "model_id": model.model.model_id,
                "trained_at": model.model.trained_at,
                "k": model.model.k,
                "inertia": model.model.inertia,
                "clusters": model.summaries,
            })),
        )
            .into_response())
    }
}
