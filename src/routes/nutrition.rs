// ABOUTME: Nutrition target calculator route handlers
// ABOUTME: BMR, TDEE and macro targets with a per-meal breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use nutriplan_core::constants::limits::DEFAULT_MEALS_PER_DAY;
use nutriplan_core::constants::nutrition::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use nutriplan_core::errors::AppError;
use nutriplan_intelligence::nutrition_calculator::{calculate_nutritional_targets, UserProfile};
use serde::Deserialize;
use serde_json::json;

/// Body of `POST /api/nutrition/targets`
#[derive(Debug, Deserialize)]
struct TargetsBody {
    #[serde(flatten)]
    profile: UserProfile,
    #[serde(default)]
    meals_per_day: Option<u32>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Nutrition calculator routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition calculator routes
    pub fn routes() -> Router {
        Router::new().route("/api/nutrition/targets", post(Self::handle_targets))
    }

    async fn handle_targets(Json(body): Json<TargetsBody>) -> Result<impl IntoResponse, AppError> {
        let targets = calculate_nutritional_targets(&body.profile)?;
        let daily = targets.macro_target()?;
        let meals_per_day = body.meals_per_day.unwrap_or(DEFAULT_MEALS_PER_DAY);
        let per_meal = daily.per_meal(meals_per_day)?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "user_profile": body.profile,
                "calculations": {
                    "bmr": targets.bmr,
                    "tdee": targets.tdee,
                    "target_calories": targets.target_calories,
                },
                "macronutrients": {
                    "protein": {
                        "grams": targets.protein_grams,
                        "percentage": targets.protein_percentage,
                        "calories": round2(targets.protein_grams * KCAL_PER_GRAM_PROTEIN),
                    },
                    "carbohydrates": {
                        "grams": targets.carbs_grams,
                        "percentage": targets.carbs_percentage,
                        "calories": round2(targets.carbs_grams * KCAL_PER_GRAM_CARBS),
                    },
                    "fat": {
                        "grams": targets.fat_grams,
                        "percentage": targets.fat_percentage,
                        "calories": round2(targets.fat_grams * KCAL_PER_GRAM_FAT),
                    },
                },
                "daily_breakdown": {
                    "meals_per_day": meals_per_day,
                    "calories_per_meal": round1(per_meal.calories),
                    "protein_per_meal": round1(per_meal.protein),
                    "carbs_per_meal": round1(per_meal.carbohydrates),
                    "fat_per_meal": round1(per_meal.fat),
                },
            })),
        ))
    }
}
