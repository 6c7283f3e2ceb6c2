// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness always answers; readiness reports whether a cluster model is serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` answers as long as the process is up. `/ready` answers 503 until
//! the first model is published, so load balancers hold traffic during
//! startup training.

use crate::services::RecommendationService;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(service: Arc<RecommendationService>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(service)
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(
        State(service): State<Arc<RecommendationService>>,
    ) -> (StatusCode, Json<Value>) {
        let corpus_meals = service.corpus_len().await;
        match service.current_model().await {
            Ok(model) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "model_id": model.model.model_id,
                    "clusters": model.model.k,
                    "meals": model.meals.len(),
                    "corpus_meals": corpus_meals,
                    "timestamp": Utc::now().to_rfc3339()
                })),
            ),
            Err(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "corpus_meals": corpus_meals,
                    "timestamp": Utc::now().to_rfc3339()
                })),
            ),
        }
    }
}
