// ABOUTME: Ingredient text processing: quantity reading, unit detection and name normalization
// ABOUTME: Produces ParsedIngredient records ready for nutrient resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ingredient parsing
//!
//! `IngredientParser` is total: every input line yields a `ParsedIngredient`,
//! possibly with an empty name or zero grams. Callers drop ingredients whose
//! canonical name is shorter than the configured minimum.

mod normalizer;
mod parser;
mod quantity;

pub use normalizer::NameNormalizer;
pub use parser::{IngredientParser, ParseAnomaly, ParseOutcome};
pub use quantity::{split_leading_quantity, LeadingQuantity};
