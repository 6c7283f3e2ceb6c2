// ABOUTME: Meal aggregation summing per-ingredient nutrients into meal totals
// ABOUTME: Applies the gram ceiling again and rejects meals with no resolved energy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ParserConfig;
use crate::nutrients::{NutrientLookup, NutrientSource, SourceCounts};
use nutriplan_core::constants::nutrition::PROFILE_BASIS_GRAMS;
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{Meal, NutrientProfile, ParsedIngredient};
use serde::{Deserialize, Serialize};

/// Decimal places kept in meal totals
const TOTAL_DECIMALS: i32 = 2;

/// Meal fields known before nutrients are aggregated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealDraft {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: String,
    /// Cuisine area
    pub area: String,
    /// Preparation instructions
    pub instructions: String,
    /// Parsed ingredients
    pub ingredients: Vec<ParsedIngredient>,
    /// Source URL
    pub source: Option<String>,
    /// Free-form tags
    pub tags: Vec<String>,
}

/// One ingredient's share of a meal total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientContribution {
    /// Canonical name
    pub name: String,
    /// Grams counted after the ceiling was applied
    pub grams: f64,
    /// Tier the nutrients came from
    pub source: NutrientSource,
    /// Nutrients contributed
    pub nutrients: NutrientProfile,
}

/// Totals for one ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Meal totals rounded to two decimals
    pub total: NutrientProfile,
    /// Per-ingredient breakdown in input order
    pub contributions: Vec<IngredientContribution>,
    /// Resolution tiers used
    pub sources: SourceCounts,
}

/// Sums resolved ingredient nutrients into meal totals
pub struct MealAggregator<'a, L: NutrientLookup + ?Sized> {
    lookup: &'a L,
    config: &'a ParserConfig,
}

impl<'a, L: NutrientLookup + ?Sized> MealAggregator<'a, L> {
    /// Aggregate with `lookup` for nutrients and `config` for the gram ceiling
    #[must_use]
    pub const fn new(lookup: &'a L, config: &'a ParserConfig) -> Self {
        Self { lookup, config }
    }

    fn counted_grams(&self, grams: f64) -> f64 {
        if !grams.is_finite() || grams <= 0.0 {
            0.0
        } else if grams > self.config.gram_ceiling {
            self.config.clamped_grams
        } else {
            grams
        }
    }

    /// Sum nutrients of `ingredients`; ingredients without a name contribute nothing
    #[must_use]
    pub fn aggregate(&self, ingredients: &[ParsedIngredient]) -> Aggregation {
        let mut total = NutrientProfile::ZERO;
        let mut sources = SourceCounts::default();
        let mut contributions = Vec::with_capacity(ingredients.len());

        for ingredient in ingredients.iter().filter(|i| !i.name.is_empty()) {
            let grams = self.counted_grams(ingredient.quantity_g);
            let resolution = self.lookup.resolve(&ingredient.name);
            let nutrients = resolution.profile.scaled(grams / PROFILE_BASIS_GRAMS);

            total += nutrients;
            sources.record(resolution.source);
            contributions.push(IngredientContribution {
                name: ingredient.name.clone(),
                grams,
                source: resolution.source,
                nutrients,
            });
        }

        Aggregation {
            total: total.rounded(TOTAL_DECIMALS),
            contributions,
            sources,
        }
    }

    /// Aggregate a draft into a finished meal
    ///
    /// # Errors
    ///
    /// Returns `InvalidMeal` when the totals carry no energy, which happens when
    /// every ingredient fell through to the zero profile
    pub fn build_meal(&self, draft: MealDraft) -> AppResult<(Meal, SourceCounts)> {
        let aggregation = self.aggregate(&draft.ingredients);
        if !aggregation.total.has_energy() {
            return Err(AppError::invalid_meal(
                if draft.id.is_empty() { &draft.name } else { &draft.id },
                "no ingredient resolved to a non-zero energy value",
            ));
        }

        let meal = Meal {
            id: draft.id,
            name: draft.name,
            category: draft.category,
            area: draft.area,
            instructions: draft.instructions,
            ingredients: draft.ingredients,
            nutrition: aggregation.total,
            cluster: None,
            source: draft.source,
            tags: draft.tags,
        };
        Ok((meal, aggregation.sources))
    }
}
