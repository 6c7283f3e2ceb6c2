// ABOUTME: Raw meal records accepted by the ingestion pipeline before parsing
// ABOUTME: Covers the native raw format and TheMealDB lookup objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of ingredient/measure column pairs in a `TheMealDB` record
const MEALDB_INGREDIENT_SLOTS: usize = 20;

/// One ingredient as it appears in a raw record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawIngredient {
    /// Free-text line such as "2 cups flour"
    Line(String),
    /// Separate measure and name columns
    Measured {
        /// Measure such as "1 1/2 cups"; may be blank
        #[serde(default)]
        measure: String,
        /// Ingredient name
        name: String,
    },
}

impl RawIngredient {
    fn is_blank(&self) -> bool {
        match self {
            Self::Line(line) => line.trim().is_empty(),
            Self::Measured { name, .. } => name.trim().is_empty(),
        }
    }
}

/// Ingredient list in either of its raw shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientsField {
    /// Ordered list of ingredients
    List(Vec<RawIngredient>),
    /// One comma-separated line
    Line(String),
}

impl Default for IngredientsField {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl IngredientsField {
    /// Non-blank ingredients in order; a comma-separated line is split
    #[must_use]
    pub fn items(&self) -> Vec<RawIngredient> {
        match self {
            Self::List(items) => items.iter().filter(|item| !item.is_blank()).cloned().collect(),
            Self::Line(line) => line
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| RawIngredient::Line(item.to_owned()))
                .collect(),
        }
    }

    /// Whether no usable ingredient is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// A meal as received from a source, before ingredient parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMealRecord {
    /// Source identifier, derived from the name when absent
    #[serde(default)]
    pub id: Option<String>,
    /// Meal name
    #[serde(default)]
    pub name: String,
    /// Category
    #[serde(default)]
    pub category: String,
    /// Cuisine area
    #[serde(default)]
    pub area: String,
    /// Preparation instructions
    #[serde(default)]
    pub instructions: String,
    /// Ingredients
    #[serde(default)]
    pub ingredients: IngredientsField,
    /// Source URL
    #[serde(default)]
    pub source_url: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
}

fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Split a comma-separated tag string
#[must_use]
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

impl RawMealRecord {
    /// Convert a `TheMealDB` lookup object (`strMeal`, `strIngredient1..20`, ...)
    ///
    /// Ingredient slots with a blank name are skipped; a blank measure is kept
    /// as blank so the parser applies its missing-quantity policy.
    #[must_use]
    pub fn from_mealdb(record: &Map<String, Value>) -> Self {
        let ingredients = (1..=MEALDB_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = text_field(record, &format!("strIngredient{slot}"))?;
                let measure = text_field(record, &format!("strMeasure{slot}")).unwrap_or_default();
                Some(RawIngredient::Measured { measure, name })
            })
            .collect();

        Self {
            id: text_field(record, "idMeal"),
            name: text_field(record, "strMeal").unwrap_or_default(),
            category: text_field(record, "strCategory").unwrap_or_default(),
            area: text_field(record, "strArea").unwrap_or_default(),
            instructions: text_field(record, "strInstructions").unwrap_or_default(),
            ingredients: IngredientsField::List(ingredients),
            source_url: text_field(record, "strSource"),
            tags: text_field(record, "strTags")
                .map(|tags| split_tags(&tags))
                .unwrap_or_default(),
        }
    }

    /// Identifier to store the meal under
    ///
    /// Records without a source id get a slug of their name.
    #[must_use]
    pub fn meal_id(&self) -> String {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| slug(&self.name), str::to_owned)
    }
}

/// Lowercase alphanumeric runs of `name` joined by `-`
pub(crate) fn slug(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingredient_line_is_split_on_commas() {
        let field = IngredientsField::Line("2 eggs, , 1 cup milk ,salt".to_owned());
        assert_eq!(
            field.items(),
            vec![
                RawIngredient::Line("2 eggs".to_owned()),
                RawIngredient::Line("1 cup milk".to_owned()),
                RawIngredient::Line("salt".to_owned()),
            ]
        );
    }

    #[test]
    fn test_mealdb_conversion_skips_blank_slots() {
        let value = json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strInstructions": "Preheat oven.",
            "strTags": "Meat,Casserole",
            "strSource": "",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "",
            "strMeasure2": " ",
            "strIngredient3": "water",
            "strMeasure3": null,
            "strIngredient4": null
        });
        let Value::Object(map) = value else {
            panic!("expected an object");
        };

        let record = RawMealRecord::from_mealdb(&map);
        assert_eq!(record.id.as_deref(), Some("52772"));
        assert_eq!(record.tags, vec!["Meat", "Casserole"]);
        assert_eq!(record.source_url, None);
        assert_eq!(
            record.ingredients.items(),
            vec![
                RawIngredient::Measured {
                    measure: "3/4 cup".to_owned(),
                    name: "soy sauce".to_owned()
                },
                RawIngredient::Measured {
                    measure: String::new(),
                    name: "water".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_meal_id_falls_back_to_name_slug() {
        let record = RawMealRecord {
            name: "Beef & Mustard Pie".to_owned(),
            ..RawMealRecord::default()
        };
        assert_eq!(record.meal_id(), "beef-mustard-pie");
    }
}
