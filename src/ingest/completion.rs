// ABOUTME: Parser for semi-structured recipe text blocks ("Meal: ...", "Ingredients: ...")
// ABOUTME: Turns generated recipe completions into raw meal records or rejects them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe text block format:
//!
//! ```text
//! Meal: Chickpea Curry.
//! Category: Vegetarian
//! Area: Indian
//! Ingredients: 1 cup chickpeas, 2 cloves garlic, 1 tbsp olive oil.
//! Instructions: Fry the garlic.
//! Add the chickpeas and simmer.
//! Source: https://example.com/curry
//! Tags: Curry,Vegan
//! ```
//!
//! Keys are matched at the start of a line. Instructions may continue over
//! the following lines until the next known key; other lines outside the
//! instructions are ignored.

use super::records::{split_tags, IngredientsField, RawMealRecord};
use nutriplan_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A prompt/completion pair as stored one per line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Prompt the completion answered; unused by ingestion
    #[serde(default)]
    pub prompt: Option<String>,
    /// Recipe text block
    pub completion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKey {
    Meal,
    Category,
    Area,
    Ingredients,
    Instructions,
    Source,
    Tags,
}

const KEYS: [(&str, BlockKey); 7] = [
    ("Meal:", BlockKey::Meal),
    ("Category:", BlockKey::Category),
    ("Area:", BlockKey::Area),
    ("Ingredients:", BlockKey::Ingredients),
    ("Instructions:", BlockKey::Instructions),
    ("Source:", BlockKey::Source),
    ("Tags:", BlockKey::Tags),
];

fn split_key(line: &str) -> Option<(BlockKey, &str)> {
    KEYS.iter()
        .find_map(|(prefix, key)| line.strip_prefix(prefix).map(|rest| (*key, rest.trim())))
}

fn strip_final_period(text: &str) -> &str {
    text.trim().strip_suffix('.').unwrap_or(text.trim()).trim_end()
}

/// Parse one recipe text block
///
/// # Errors
///
/// Returns `MissingRequiredField` when the block has no `Meal:` line or no
/// `Ingredients:` line with at least one item
pub fn parse_completion(text: &str) -> AppResult<RawMealRecord> {
    let mut record = RawMealRecord::default();
    let mut ingredients: Option<String> = None;
    let mut instructions: Vec<&str> = Vec::new();
    let mut in_instructions = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some((key, value)) = split_key(trimmed) {
            in_instructions = key == BlockKey::Instructions;
            match key {
                BlockKey::Meal => record.name = strip_final_period(value).to_owned(),
                BlockKey::Category => record.category = value.to_owned(),
                BlockKey::Area => record.area = value.to_owned(),
                BlockKey::Ingredients => {
                    ingredients = Some(strip_final_period(value).to_owned());
                }
                BlockKey::Instructions => {
                    if !value.is_empty() {
                        instructions.push(value);
                    }
                }
                BlockKey::Source => {
                    record.source_url = Some(value.to_owned()).filter(|url| !url.is_empty());
                }
                BlockKey::Tags => record.tags = split_tags(value),
            }
        } else if in_instructions && !trimmed.is_empty() {
            instructions.push(trimmed);
        }
    }

    if record.name.is_empty() {
        return Err(AppError::missing_field("Meal"));
    }
    let ingredients = IngredientsField::Line(ingredients.unwrap_or_default());
    if ingredients.is_empty() {
        return Err(AppError::missing_field("Ingredients"));
    }

    record.ingredients = ingredients;
    record.instructions = instructions.join("\n");
    Ok(record)
}
