// ABOUTME: Route module organization for the NutriPlan HTTP API
// ABOUTME: Builds the application router with tracing, request-id, CORS and timeout layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the `NutriPlan` server
//!
//! Each domain module holds only route definitions and thin handlers that
//! delegate to [`RecommendationService`] or the nutrition calculator.

/// Health check and readiness routes
pub mod health;
/// Ingredient line inspection routes
pub mod ingredients;
/// Nutrition target calculator routes
pub mod nutrition;
/// Recommendation and cluster routes
pub mod recommendations;

pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use nutrition::NutritionRoutes;
pub use recommendations::{RecommendationBody, RecommendationRoutes};

use crate::config::ServerConfig;
use crate::middleware::{
    create_request_span, record_response, setup_cors, RequestIdGenerator, REQUEST_ID_HEADER,
};
use crate::services::RecommendationService;
use axum::Router;
use http::header::HeaderName;
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Full application router
///
/// Layers, outermost first: request id assignment, request tracing,
/// request id propagation to the response, CORS, timeout.
pub fn router(service: Arc<RecommendationService>, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&service)))
        .merge(RecommendationRoutes::routes(Arc::clone(&service)))
        .merge(NutritionRoutes::routes())
        .merge(IngredientRoutes::routes(service))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(setup_cors(config))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(create_request_span)
                .on_response(record_response),
        )
        .layer(SetRequestIdLayer::new(request_id_header, RequestIdGenerator))
}
