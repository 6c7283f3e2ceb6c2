// ABOUTME: Meal record shared by ingestion, clustering and ranking
// ABOUTME: Doubles as the persisted corpus record (one JSON object per line)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ingredient::ParsedIngredient;
use super::nutrition::NutrientProfile;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A meal with aggregated nutrient totals
///
/// `nutrition` holds meal totals (not per 100 g). `cluster` stays `None` until a
/// trained model assigns it; a trained model never reassigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Stable identifier (source id when available)
    #[serde(default)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Category, e.g. "Dessert", "Seafood"
    #[serde(default)]
    pub category: String,
    /// Cuisine area, e.g. "Italian"
    #[serde(default)]
    pub area: String,
    /// Preparation instructions
    #[serde(default)]
    pub instructions: String,
    /// Ordered ingredient list
    #[serde(default)]
    pub ingredients: Vec<ParsedIngredient>,
    /// Meal-total nutrients
    pub nutrition: NutrientProfile,
    /// Cluster assigned by the trained model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<usize>,
    /// Source URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Meal {
    /// Whether the meal may be used for training and recommendation
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.nutrition.has_energy() && self.nutrition.is_valid()
    }

    /// Return a copy assigned to `cluster`
    ///
    /// # Errors
    ///
    /// Returns an error if the meal already belongs to a different cluster
    pub fn with_cluster(&self, cluster: usize) -> AppResult<Self> {
        match self.cluster {
            Some(existing) if existing != cluster => Err(AppError::internal(format!(
                "Meal '{}' already assigned to cluster {existing}",
                self.id
            ))),
            _ => Ok(Self {
                cluster: Some(cluster),
                ..self.clone()
            }),
        }
    }

    /// Lowercased ingredient names joined with spaces, used for keyword filters
    #[must_use]
    pub fn ingredient_text(&self) -> String {
        self.ingredients
            .iter()
            .map(|ingredient| ingredient.name.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check required fields of a record loaded from disk
    ///
    /// # Errors
    ///
    /// Returns an `InvalidMeal` error when the name is blank or nutrients are invalid
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_meal(&self.id, "missing name"));
        }
        if !self.nutrition.is_valid() {
            return Err(AppError::invalid_meal(
                &self.name,
                "nutrients must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
