// ABOUTME: HTTP route tests driving the full router with tower oneshot requests
// ABOUTME: Health, readiness, recommendations, clusters, targets, ingredient parsing and request ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{Method, Request, StatusCode};
use nutriplan_server::config::ServerConfig;
use nutriplan_server::intelligence::NutrientReference;
use nutriplan_server::routes;
use nutriplan_server::services::RecommendationService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn app() -> Router {
    routes::router(common::trained_service().await, &ServerConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .map(|value| value.to_str().unwrap().to_owned());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, request_id, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_and_generated_request_id() {
    let (status, request_id, body) = send(app().await, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(request_id.unwrap().starts_with("req_"));
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-42")
        .body(Body::empty())
        .unwrap();
    let (_, request_id, _) = send(app().await, request).await;

    assert_eq!(request_id.as_deref(), Some("trace-me-42"));
}

#[tokio::test]
async fn test_ready_reflects_model_state() {
    let (status, _, body) = send(app().await, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["clusters"], 3);
    assert_eq!(body["meals"], 18);

    let untrained = Arc::new(RecommendationService::new(
        common::test_intelligence_config(),
        NutrientReference::default(),
    ));
    let router = routes::router(untrained, &ServerConfig::default());
    let (status, _, body) = send(router, get("/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_recommendations_from_daily_targets() {
    let body = json!({
        "targets": {"calories": 1980.0, "protein": 168.0, "carbs": 30.0, "fat": 120.0},
        "meals_per_day": 3,
        "count": 2
    });
    let (status, _, body) = send(app().await, post_json("/api/recommendations", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meals_per_day"], 3);
    assert_eq!(body["per_meal_target"]["calories"], 660.0);
    assert_eq!(body["strategy"], "clustered");
    assert_eq!(body["requested"], 2);
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["category"], "Beef");
    assert!(recommendations[0]["similarity"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_recommendations_from_profile_with_filters() {
    let body = json!({
        "user_profile": {
            "age": 30,
            "weight_kg": 70.0,
            "height_cm": 175.0,
            "gender": "male",
            "activity_level": "moderately_active",
            "goal": "maintain"
        },
        "count": 6,
        "dietary_restrictions": ["vegetarian"],
        "exclude_ingredients": ["sugar"]
    });
    let (status, _, body) = send(app().await, post_json("/api/recommendations", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidates"], 6);
    assert_eq!(body["daily_target"]["calories"], 2555.56);
    for recommendation in body["recommendations"].as_array().unwrap() {
        assert_eq!(recommendation["category"], "Vegetarian");
    }
}

#[tokio::test]
async fn test_recommendation_errors_carry_request_id() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/recommendations")
        .header("content-type", "application/json")
        .header("x-request-id", "bad-target-1")
        .body(Body::from(json!({"meals_per_day": 3}).to_string()))
        .unwrap();
    let (status, _, body) = send(app().await, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_TARGET");
    assert_eq!(body["error"]["request_id"], "bad-target-1");

    let incomplete = json!({"targets": {"calories": 600.0, "protein": 40.0}});
    let (status, _, body) =
        send(app().await, post_json("/api/recommendations", &incomplete)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_TARGET");

    let too_many_meals = json!({
        "targets": {"calories": 2000.0, "protein": 150.0, "carbohydrates": 200.0, "fat": 70.0},
        "meals_per_day": 11
    });
    let (status, _, body) =
        send(app().await, post_json("/api/recommendations", &too_many_meals)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let too_many_results = json!({
        "targets": {"calories": 2000.0, "protein": 150.0, "carbohydrates": 200.0, "fat": 70.0},
        "count": 500
    });
    let (status, _, _) =
        send(app().await, post_json("/api/recommendations", &too_many_results)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_before_training_unavailable() {
    let untrained = Arc::new(RecommendationService::new(
        common::test_intelligence_config(),
        NutrientReference::default(),
    ));
    let router = routes::router(untrained, &ServerConfig::default());
    let body = json!({
        "targets": {"calories": 2000.0, "protein": 150.0, "carbohydrates": 200.0, "fat": 70.0}
    });
    let (status, _, body) = send(router, post_json("/api/recommendations", &body)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");
}

#[tokio::test]
async fn test_cluster_summaries() {
    let (status, _, body) = send(app().await, get("/api/clusters")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["k"], 3);
    let clusters = body["clusters"].as_array().unwrap();
    assert_eq!(clusters.len(), 3);
    let sizes: u64 = clusters.iter().map(|c| c["size"].as_u64().unwrap()).sum();
    assert_eq!(sizes, 18);
}

#[tokio::test]
async fn test_nutrition_targets_endpoint() {
    let body = json!({
        "age": 30,
        "weight_kg": 70.0,
        "height_cm": 175.0,
        "gender": "male",
        "activity_level": "moderately_active",
        "goal": "maintain",
        "meals_per_day": 4
    });
    let (status, _, body) = send(app().await, post_json("/api/nutrition/targets", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculations"]["bmr"], 1648.75);
    assert_eq!(body["calculations"]["target_calories"], 2555.56);
    assert_eq!(body["macronutrients"]["protein"]["grams"], 191.67);
    assert_eq!(body["daily_breakdown"]["meals_per_day"], 4);

    let invalid = json!({
        "age": 30,
        "weight_kg": 2.0,
        "height_cm": 175.0,
        "gender": "male",
        "activity_level": "moderately_active",
        "goal": "maintain"
    });
    let (status, _, body) =
        send(app().await, post_json("/api/nutrition/targets", &invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_ingredient_parse_endpoint() {
    let (status, _, body) = send(
        app().await,
        post_json("/api/ingredients/parse", &json!({"line": "2 cups milk"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ingredient"]["name"], "milk");
    assert_eq!(body["ingredient"]["quantity_g"], 480.0);
    assert_eq!(body["resolution"]["source"], "fallback");
    assert!(body["anomalies"].as_array().unwrap().is_empty());

    let (status, _, body) = send(
        app().await,
        post_json("/api/ingredients/parse", &json!({"line": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}
