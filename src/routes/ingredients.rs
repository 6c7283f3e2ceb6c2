// ABOUTME: Ingredient parsing route handler for inspecting one ingredient line
// ABOUTME: Returns the parsed ingredient, parse anomalies and the nutrient tier that resolved it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::services::{IngredientAnalysis, RecommendationService};
use axum::{extract::State, routing::post, Json, Router};
use nutriplan_core::errors::AppError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ParseBody {
    line: String,
}

/// Ingredient routes
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(service: Arc<RecommendationService>) -> Router {
        Router::new()
            .route("/api/ingredients/parse", post(Self::handle_parse))
            .with_state(service)
    }

    async fn handle_parse(
        State(service): State<Arc<RecommendationService>>,
        Json(body): Json<ParseBody>,
    ) -> Result<Json<IngredientAnalysis>, AppError> {
        if body.line.trim().is_empty() {
            return Err(AppError::missing_field("line"));
        }
        Ok(Json(service.analyze_ingredient(&body.line)))
    }
}
