// ABOUTME: Ingredient models for parsed recipe lines and measurement units
// ABOUTME: IngredientUnit vocabulary with gram weights and the ParsedIngredient record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::unit_weights::{
    GRAMS_PER_BULB, GRAMS_PER_CLOVE, GRAMS_PER_CUP, GRAMS_PER_DASH, GRAMS_PER_GRAM, GRAMS_PER_KG,
    GRAMS_PER_LB, GRAMS_PER_ML, GRAMS_PER_OZ, GRAMS_PER_PINCH, GRAMS_PER_TBSP, GRAMS_PER_TSP,
    GRAMS_PER_WHOLE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement unit recognised in ingredient lines
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IngredientUnit {
    /// Grams
    Gram,
    /// Kilograms
    Kilogram,
    /// Ounces
    Ounce,
    /// Pounds
    Pound,
    /// Cups
    Cup,
    /// Tablespoons
    Tablespoon,
    /// Teaspoons
    Teaspoon,
    /// Millilitres
    Milliliter,
    /// A dash
    Dash,
    /// A pinch
    Pinch,
    /// Garlic clove
    Clove,
    /// A whole item
    Whole,
    /// A bulb (garlic, fennel)
    Bulb,
}

impl IngredientUnit {
    /// Units in the order the parser scans for them; the first hit wins
    pub const SCAN_ORDER: [Self; 13] = [
        Self::Gram,
        Self::Kilogram,
        Self::Ounce,
        Self::Pound,
        Self::Cup,
        Self::Tablespoon,
        Self::Teaspoon,
        Self::Milliliter,
        Self::Dash,
        Self::Pinch,
        Self::Clove,
        Self::Whole,
        Self::Bulb,
    ];

    /// Get display abbreviation
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::Pound => "lb",
            Self::Cup => "cup",
            Self::Tablespoon => "tbsp",
            Self::Teaspoon => "tsp",
            Self::Milliliter => "ml",
            Self::Dash => "dash",
            Self::Pinch => "pinch",
            Self::Clove => "clove",
            Self::Whole => "whole",
            Self::Bulb => "bulb",
        }
    }

    /// Lowercase spellings matched as whole words
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Gram => &["g", "gr", "gram", "grams", "gramme", "grammes"],
            Self::Kilogram => &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"],
            Self::Ounce => &["oz", "ounce", "ounces"],
            Self::Pound => &["lb", "lbs", "pound", "pounds"],
            Self::Cup => &["cup", "cups"],
            Self::Tablespoon => &["tbsp", "tbsps", "tbs", "tbls", "tablespoon", "tablespoons"],
            Self::Teaspoon => &["tsp", "tsps", "teaspoon", "teaspoons"],
            Self::Milliliter => &[
                "ml",
                "mls",
                "milliliter",
                "milliliters",
                "millilitre",
                "millilitres",
            ],
            Self::Dash => &["dash", "dashes"],
            Self::Pinch => &["pinch", "pinches"],
            Self::Clove => &["clove", "cloves"],
            Self::Whole => &["whole"],
            Self::Bulb => &["bulb", "bulbs"],
        }
    }

    /// Grams represented by one of this unit
    #[must_use]
    pub const fn grams_per_unit(self) -> f64 {
        match self {
            Self::Gram => GRAMS_PER_GRAM,
            Self::Kilogram => GRAMS_PER_KG,
            Self::Ounce => GRAMS_PER_OZ,
            Self::Pound => GRAMS_PER_LB,
            Self::Cup => GRAMS_PER_CUP,
            Self::Tablespoon => GRAMS_PER_TBSP,
            Self::Teaspoon => GRAMS_PER_TSP,
            Self::Milliliter => GRAMS_PER_ML,
            Self::Dash => GRAMS_PER_DASH,
            Self::Pinch => GRAMS_PER_PINCH,
            Self::Clove => GRAMS_PER_CLOVE,
            Self::Whole => GRAMS_PER_WHOLE,
            Self::Bulb => GRAMS_PER_BULB,
        }
    }

    /// Match a single lowercase word against the vocabulary
    #[must_use]
    pub fn from_alias(word: &str) -> Option<Self> {
        Self::SCAN_ORDER
            .into_iter()
            .find(|unit| unit.aliases().contains(&word))
    }
}

impl fmt::Display for IngredientUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Ingredient line after parsing and name normalization
///
/// `quantity` and `quantity_g` are never negative. Records produced by other
/// tools may carry only `name` and `quantity_g`, so the remaining fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Canonical lowercase ingredient name (lookup key)
    pub name: String,
    /// Parsed leading quantity
    #[serde(default)]
    pub quantity: f64,
    /// Recognised unit, `None` when the line carried no known unit
    #[serde(default)]
    pub unit: Option<IngredientUnit>,
    /// Estimated weight in grams
    pub quantity_g: f64,
}

impl ParsedIngredient {
    /// Ingredient that contributes nothing (empty input line)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            name: String::new(),
            quantity: 0.0,
            unit: None,
            quantity_g: 0.0,
        }
    }

    /// Whether the ingredient should be dropped by callers
    #[must_use]
    pub fn is_discardable(&self, min_name_length: usize) -> bool {
        self.name.chars().count() < min_name_length || self.quantity_g <= 0.0
    }
}
