// ABOUTME: Built-in nutrient profiles for common staples, consulted before the reference table
// ABOUTME: Values are per 100 g and keyed by canonical ingredient name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::models::NutrientProfile;
use std::collections::HashMap;
use std::sync::LazyLock;

/// (name, calories, protein, fat, carbohydrates, fiber, sodium)
const STAPLES: [(&str, f64, f64, f64, f64, f64, f64); 24] = [
    ("pepper", 251.0, 11.0, 3.3, 64.8, 26.5, 20.0),
    ("water", 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("baking powder", 53.0, 0.1, 0.2, 40.5, 0.0, 10565.0),
    ("garlic", 149.0, 6.4, 0.5, 33.1, 2.1, 15.0),
    ("sugar", 387.0, 0.0, 0.0, 100.0, 0.0, 1.0),
    ("vinegar", 18.0, 0.04, 0.0, 0.9, 0.0, 5.0),
    ("milk", 42.0, 3.4, 1.0, 5.0, 0.0, 43.0),
    ("egg", 155.0, 12.6, 10.6, 1.1, 0.0, 124.0),
    ("salt", 0.0, 0.0, 0.0, 0.0, 0.0, 38758.0),
    ("chicken", 165.0, 31.0, 3.6, 0.0, 0.0, 74.0),
    ("beef", 250.0, 26.0, 15.0, 0.0, 0.0, 72.0),
    ("apple", 52.0, 0.3, 0.2, 14.0, 2.4, 1.0),
    ("banana", 89.0, 1.1, 0.3, 23.0, 2.6, 1.0),
    ("broccoli", 34.0, 2.8, 0.4, 7.0, 2.6, 33.0),
    ("oats", 389.0, 17.0, 7.0, 66.0, 10.6, 2.0),
    ("flour", 364.0, 10.3, 1.0, 76.3, 2.7, 2.0),
    ("butter", 717.0, 0.9, 81.1, 0.1, 0.0, 643.0),
    ("olive oil", 884.0, 0.0, 100.0, 0.0, 0.0, 2.0),
    ("pork", 242.0, 27.3, 13.9, 0.0, 0.0, 75.0),
    ("fish", 134.0, 20.0, 5.0, 0.0, 0.0, 50.0),
    ("cream cheese", 342.0, 6.1, 34.0, 4.1, 0.0, 335.0),
    ("almonds", 579.0, 21.2, 49.9, 21.6, 12.5, 1.0),
    ("yogurt", 59.0, 10.0, 0.4, 3.9, 0.0, 36.0),
    ("sausage", 328.0, 16.5, 28.6, 1.9, 0.0, 776.0),
];

static FALLBACK_TABLE: LazyLock<HashMap<&'static str, NutrientProfile>> = LazyLock::new(|| {
    STAPLES
        .iter()
        .map(|&(name, calories, protein, fat, carbohydrates, fiber, sodium)| {
            (
                name,
                NutrientProfile::new(calories, protein, fat, carbohydrates, fiber, sodium),
            )
        })
        .collect()
});

/// Exact-name lookup in the staples table
#[must_use]
pub fn fallback_profile(name: &str) -> Option<NutrientProfile> {
    FALLBACK_TABLE.get(name).copied()
}

/// Names covered by the staples table
pub fn fallback_names() -> impl Iterator<Item = &'static str> {
    STAPLES.iter().map(|(name, ..)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_staples() {
        assert_eq!(fallback_names().count(), 24);
        let butter = fallback_profile("butter").unwrap();
        assert!((butter.fat - 81.1).abs() < 1e-9);
        assert!(fallback_profile("Butter").is_none());
        assert!(fallback_profile("peanut butter").is_none());
    }
}
