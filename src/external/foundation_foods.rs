// ABOUTME: Loader for USDA FoodData Central "Foundation Foods" JSON downloads
// ABOUTME: Converts published food nutrients into the per-100 g nutrient reference table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `FoodData` Central Foundation Foods reader
//!
//! The download is one JSON document:
//!
//! ```json
//! {"FoundationFoods": [{"description": "Beans, black, canned",
//!   "foodNutrients": [{"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 6.9}]}]}
//! ```
//!
//! Foods keep their document order, which is the order keyword lookups
//! try them in.

use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_intelligence::nutrients::{NutrientReference, ReferenceEntry};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct FoundationFoodsDocument {
    #[serde(rename = "FoundationFoods", default)]
    foundation_foods: Vec<FoundationFood>,
}

#[derive(Debug, Deserialize)]
struct FoundationFood {
    #[serde(rename = "fdcId", default)]
    fdc_id: Option<u64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Vec<FoodNutrientResponse>,
}

#[derive(Debug, Deserialize)]
struct FoodNutrientResponse {
    #[serde(default)]
    nutrient: Option<NutrientInfo>,
    #[serde(default)]
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NutrientInfo {
    name: String,
    #[serde(rename = "unitName", default)]
    unit_name: String,
}

impl FoundationFood {
    fn into_entry(self) -> Option<ReferenceEntry> {
        let description = self.description.filter(|d| !d.trim().is_empty())?;
        let nutrients = self.food_nutrients.iter().filter_map(|food_nutrient| {
            food_nutrient.nutrient.as_ref().map(|nutrient| {
                (
                    nutrient.name.as_str(),
                    nutrient.unit_name.as_str(),
                    food_nutrient.amount.unwrap_or(0.0),
                )
            })
        });
        Some(ReferenceEntry::from_nutrients(description, nutrients))
    }
}

/// Parse a Foundation Foods document
///
/// Foods without a description are skipped; a nutrient without an amount
/// counts as zero.
///
/// # Errors
///
/// Returns a serialization error when the text is not a Foundation Foods document
pub fn parse_foundation_foods(json: &str) -> AppResult<NutrientReference> {
    let document: FoundationFoodsDocument = serde_json::from_str(json)?;
    let total = document.foundation_foods.len();

    let entries: Vec<ReferenceEntry> = document
        .foundation_foods
        .into_iter()
        .filter_map(|food| {
            let fdc_id = food.fdc_id;
            let entry = food.into_entry();
            if entry.is_none() {
                debug!(fdc_id, "Skipping foundation food without description");
            }
            entry
        })
        .collect();

    info!(
        foods = total,
        entries = entries.len(),
        skipped = total - entries.len(),
        "Loaded nutrient reference"
    );
    Ok(NutrientReference::new(entries))
}

/// Read and parse a Foundation Foods file
///
/// # Errors
///
/// Returns a storage error when the file cannot be read and a serialization
/// error when its content is malformed
pub fn load_foundation_foods(path: &Path) -> AppResult<NutrientReference> {
    let json = fs::read_to_string(path).map_err(|e| {
        AppError::storage(format!(
            "failed to read nutrient reference {}: {e}",
            path.display()
        ))
        .with_source(e)
    })?;
    parse_foundation_foods(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "FoundationFoods": [
            {
                "fdcId": 1,
                "description": "Hummus, commercial",
                "foodNutrients": [
                    {"nutrient": {"name": "Energy", "unitName": "kJ"}, "amount": 958.0},
                    {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 229.0},
                    {"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 7.35},
                    {"nutrient": {"name": "Sodium, Na", "unitName": "mg"}},
                    {"amount": 3.0}
                ]
            },
            {"fdcId": 2, "foodNutrients": []},
            {"fdcId": 3, "description": "   "}
        ]
    }"#;

    #[test]
    fn test_parse_maps_units_and_skips_undescribed_foods() {
        let reference = parse_foundation_foods(DOCUMENT).unwrap();
        assert_eq!(reference.len(), 1);

        let entry = &reference.entries()[0];
        assert_eq!(entry.description, "Hummus, commercial");
        assert!((entry.profile.calories - 229.0).abs() < f64::EPSILON);
        assert!((entry.profile.protein - 7.35).abs() < f64::EPSILON);
        assert!(entry.profile.sodium.abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_foundation_foods("FoundationFoods:").is_err());
    }

    #[test]
    fn test_document_without_foods_is_empty() {
        assert!(parse_foundation_foods("{}").unwrap().is_empty());
    }
}
