// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for nutriplan-cli
// ABOUTME: Corpus building and training, recommendation and calculator commands

pub mod corpus;
pub mod recommend;

use nutriplan_server::errors::AppResult;
use nutriplan_server::external::load_foundation_foods;
use nutriplan_server::intelligence::{IntelligenceConfig, NutrientReference};
use nutriplan_server::services::RecommendationService;
use std::path::Path;
use tracing::info;

/// Service with environment-derived settings and an optional reference file
pub fn build_service(
    config: IntelligenceConfig,
    reference: Option<&Path>,
) -> AppResult<RecommendationService> {
    let reference = match reference {
        Some(path) => load_foundation_foods(path)?,
        None => {
            info!("No nutrient reference given; resolving against the staples table only");
            NutrientReference::default()
        }
    };
    Ok(RecommendationService::new(config, reference))
}
