// ABOUTME: Hard request filters applied to the corpus before ranking
// ABOUTME: Dietary restrictions, ingredient and meal exclusions, calorie and protein bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::models::Meal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MEAT_KEYWORDS: &[&str] = &["beef", "pork", "chicken", "turkey", "fish", "lamb", "bacon"];
const ANIMAL_PRODUCT_KEYWORDS: &[&str] = &["milk", "cheese", "butter", "egg", "honey"];

/// Dietary restriction matched against ingredient names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    /// No meat or fish
    Vegetarian,
    /// Vegetarian and no animal products
    Vegan,
}

impl DietaryRestriction {
    /// Keywords that disqualify a meal
    #[must_use]
    pub fn excluded_keywords(self) -> Vec<&'static str> {
        match self {
            Self::Vegetarian => MEAT_KEYWORDS.to_vec(),
            Self::Vegan => MEAT_KEYWORDS
                .iter()
                .chain(ANIMAL_PRODUCT_KEYWORDS)
                .copied()
                .collect(),
        }
    }
}

impl FromStr for DietaryRestriction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vegetarian" => Ok(Self::Vegetarian),
            "vegan" => Ok(Self::Vegan),
            other => Err(format!("unknown dietary restriction: {other}")),
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vegetarian => f.write_str("vegetarian"),
            Self::Vegan => f.write_str("vegan"),
        }
    }
}

/// Filters a request places on candidate meals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealFilters {
    /// Meal names to leave out, matched exactly
    #[serde(default)]
    pub exclude_meals: Vec<String>,
    /// Upper bound on meal calories
    #[serde(default)]
    pub max_calories: Option<f64>,
    /// Lower bound on meal protein (g)
    #[serde(default)]
    pub min_protein: Option<f64>,
    /// Dietary restrictions
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    /// Ingredient keywords to avoid, matched as substrings
    #[serde(default)]
    pub exclude_ingredients: Vec<String>,
}

impl MealFilters {
    /// Whether `meal` passes every filter; ineligible meals never pass
    #[must_use]
    pub fn admits(&self, meal: &Meal) -> bool {
        if !meal.is_eligible() {
            return false;
        }
        if self.exclude_meals.iter().any(|name| *name == meal.name) {
            return false;
        }
        if self
            .max_calories
            .is_some_and(|limit| meal.nutrition.calories > limit)
        {
            return false;
        }
        if self
            .min_protein
            .is_some_and(|limit| meal.nutrition.protein < limit)
        {
            return false;
        }
        if self.dietary_restrictions.is_empty() && self.exclude_ingredients.is_empty() {
            return true;
        }

        let ingredients = meal.ingredient_text();
        let restricted = self
            .dietary_restrictions
            .iter()
            .flat_map(|restriction| restriction.excluded_keywords())
            .any(|keyword| ingredients.contains(keyword));
        let excluded = self
            .exclude_ingredients
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .any(|keyword| ingredients.contains(&keyword));
        !(restricted || excluded)
    }

    /// Meals of `corpus` passing every filter, in corpus order
    #[must_use]
    pub fn apply<'a>(&self, corpus: &'a [Meal]) -> Vec<&'a Meal> {
        corpus.iter().filter(|meal| self.admits(meal)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriplan_core::models::{NutrientProfile, ParsedIngredient};

    fn meal(name: &str, calories: f64, protein: f64, ingredients: &[&str]) -> Meal {
        Meal {
            id: name.to_lowercase(),
            name: name.to_owned(),
            category: String::new(),
            area: String::new(),
            instructions: String::new(),
            ingredients: ingredients
                .iter()
                .map(|name| ParsedIngredient {
                    name: (*name).to_owned(),
                    quantity: 1.0,
                    unit: None,
                    quantity_g: 100.0,
                })
                .collect(),
            nutrition: NutrientProfile::new(calories, protein, 10.0, 30.0, 2.0, 300.0),
            cluster: None,
            source: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_dietary_restrictions() {
        let stew = meal("Beef Stew", 500.0, 35.0, &["ground beef", "carrot"]);
        let omelette = meal("Omelette", 300.0, 20.0, &["egg", "milk"]);
        let salad = meal("Salad", 150.0, 4.0, &["lettuce", "tomato"]);

        let vegetarian = MealFilters {
            dietary_restrictions: vec![DietaryRestriction::Vegetarian],
            ..MealFilters::default()
        };
        assert!(!vegetarian.admits(&stew));
        assert!(vegetarian.admits(&omelette));

        let vegan = MealFilters {
            dietary_restrictions: vec![DietaryRestriction::Vegan],
            ..MealFilters::default()
        };
        assert!(!vegan.admits(&omelette));
        assert!(vegan.admits(&salad));
    }

    #[test]
    fn test_bounds_and_exclusions() {
        let stew = meal("Beef Stew", 500.0, 35.0, &["beef", "carrot"]);
        let filters = MealFilters {
            max_calories: Some(450.0),
            ..MealFilters::default()
        };
        assert!(!filters.admits(&stew));

        let filters = MealFilters {
            min_protein: Some(40.0),
            ..MealFilters::default()
        };
        assert!(!filters.admits(&stew));

        let filters = MealFilters {
            exclude_meals: vec!["Beef Stew".to_owned()],
            ..MealFilters::default()
        };
        assert!(!filters.admits(&stew));

        let filters = MealFilters {
            exclude_ingredients: vec!["Carrot".to_owned()],
            ..MealFilters::default()
        };
        assert!(!filters.admits(&stew));
        assert!(MealFilters::default().admits(&stew));
    }

    #[test]
    fn test_zero_calorie_meal_never_admitted() {
        let water = meal("Water", 0.0, 0.0, &["water"]);
        assert!(!MealFilters::default().admits(&water));
    }
}
