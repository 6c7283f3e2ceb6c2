// ABOUTME: Query commands for nutriplan-cli
// ABOUTME: Meal recommendations, daily nutrition targets and ingredient line inspection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_server::errors::AppResult;
use nutriplan_server::ingest::load_corpus;
use nutriplan_server::intelligence::nutrition_calculator::{
    calculate_nutritional_targets, ActivityLevel, DietPlan, Gender, Goal, UserProfile,
};
use nutriplan_server::intelligence::recommendation::DietaryRestriction;
use nutriplan_server::intelligence::{IntelligenceConfig, MealFilters, RecommendationRequest};
use nutriplan_server::models::MacroTarget;
use nutriplan_server::services::read_model;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use super::build_service;
use crate::helpers::display::print_json;

type Result<T> = AppResult<T>;

pub struct RecommendArgs {
    pub corpus: PathBuf,
    pub model: Option<PathBuf>,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub meals_per_day: u32,
    pub count: Option<usize>,
    pub exclude: Vec<String>,
    pub diet: Vec<DietaryRestriction>,
    pub max_calories: Option<f64>,
}

pub struct ProfileArgs {
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_plan: DietPlan,
    pub meals_per_day: u32,
}

/// Rank corpus meals against one meal's share of a daily target
pub async fn recommend(args: RecommendArgs) -> Result<()> {
    let daily = MacroTarget::new(args.calories, args.protein, args.carbohydrates, args.fat)?;
    let per_meal = daily.per_meal(args.meals_per_day)?;

    let service = build_service(IntelligenceConfig::load()?, None)?;
    service.replace_corpus(load_corpus(&args.corpus)?).await;
    match args.model.as_deref() {
        Some(path) => {
            info!(path = %path.display(), "Restoring saved model");
            service.restore(read_model(path)?).await?;
        }
        None => {
            service.train().await?;
        }
    }

    let request = RecommendationRequest {
        target: per_meal,
        count: args.count,
        filters: MealFilters {
            max_calories: args.max_calories,
            dietary_restrictions: args.diet,
            exclude_ingredients: args.exclude,
            ..MealFilters::default()
        },
    };
    let set = service.recommend(&request).await?;

    print_json(&json!({
        "daily_target": daily,
        "meals_per_day": args.meals_per_day,
        "per_meal_target": per_meal,
        "recommendations": set,
    }))
}

/// Daily targets for a profile with the per-meal split
pub fn targets(args: &ProfileArgs) -> Result<()> {
    let profile = UserProfile {
        age: args.age,
        weight_kg: args.weight_kg,
        height_cm: args.height_cm,
        gender: args.gender,
        activity_level: args.activity_level,
        goal: args.goal,
        diet_plan: args.diet_plan,
    };
    let targets = calculate_nutritional_targets(&profile)?;
    let per_meal = targets.macro_target()?.per_meal(args.meals_per_day)?;

    print_json(&json!({
        "user_profile": profile,
        "targets": targets,
        "meals_per_day": args.meals_per_day,
        "per_meal_target": per_meal,
    }))
}

/// Parse each line and report quantity, grams, anomalies and resolution tier
pub fn parse(lines: &[String], reference: Option<&Path>) -> Result<()> {
    let service = build_service(IntelligenceConfig::load()?, reference)?;
    let analyses: Vec<_> = lines
        .iter()
        .map(|line| service.analyze_ingredient(line))
        .collect();
    print_json(&analyses)
}
