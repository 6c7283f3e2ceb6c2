// ABOUTME: External nutrient reference table with keyword-intersection lookup
// ABOUTME: Maps named nutrient amounts onto the six tracked nutrients with strict unit checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::models::NutrientProfile;
use serde::{Deserialize, Serialize};

/// Tracked nutrient a reference amount maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackedNutrient {
    Calories,
    Protein,
    Fat,
    Carbohydrates,
    Fiber,
    Sodium,
}

/// (reference nutrient name, required unit, tracked nutrient)
const NUTRIENT_MAP: [(&str, &str, TrackedNutrient); 6] = [
    ("Energy", "kcal", TrackedNutrient::Calories),
    ("Protein", "g", TrackedNutrient::Protein),
    ("Total lipid (fat)", "g", TrackedNutrient::Fat),
    ("Carbohydrate, by difference", "g", TrackedNutrient::Carbohydrates),
    ("Fiber, total dietary", "g", TrackedNutrient::Fiber),
    ("Sodium, Na", "mg", TrackedNutrient::Sodium),
];

fn map_nutrient(name: &str, unit: &str) -> Option<TrackedNutrient> {
    NUTRIENT_MAP
        .iter()
        .find(|(mapped_name, mapped_unit, _)| {
            *mapped_name == name.trim() && mapped_unit.eq_ignore_ascii_case(unit.trim())
        })
        .map(|(_, _, nutrient)| *nutrient)
}

/// Lowercase word tokens of a canonical name
fn keyword_tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// One food from the reference source, per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Free-text description as published by the source
    pub description: String,
    /// Tracked nutrients per 100 g
    pub profile: NutrientProfile,
    #[serde(skip)]
    search_text: String,
}

impl ReferenceEntry {
    /// Create an entry from an already-mapped profile
    #[must_use]
    pub fn new(description: impl Into<String>, profile: NutrientProfile) -> Self {
        let description = description.into();
        let search_text = description.to_lowercase();
        Self {
            description,
            profile,
            search_text,
        }
    }

    /// Build an entry from `(nutrient name, unit, amount)` triples
    ///
    /// Names and units outside the tracked set are ignored rather than
    /// converted. A repeated tracked nutrient overwrites the earlier amount.
    pub fn from_nutrients<'a, I>(description: impl Into<String>, nutrients: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut profile = NutrientProfile::ZERO;
        for (name, unit, amount) in nutrients {
            let Some(nutrient) = map_nutrient(name, unit) else {
                continue;
            };
            let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
            match nutrient {
                TrackedNutrient::Calories => profile.calories = amount,
                TrackedNutrient::Protein => profile.protein = amount,
                TrackedNutrient::Fat => profile.fat = amount,
                TrackedNutrient::Carbohydrates => profile.carbohydrates = amount,
                TrackedNutrient::Fiber => profile.fiber = amount,
                TrackedNutrient::Sodium => profile.sodium = amount,
            }
        }
        Self::new(description, profile)
    }

    fn matches_all(&self, tokens: &[String]) -> bool {
        tokens
            .iter()
            .all(|token| self.search_text.contains(token.as_str()))
    }
}

/// Ordered reference table; iteration order decides ties between matches
#[derive(Debug, Clone, Default)]
pub struct NutrientReference {
    entries: Vec<ReferenceEntry>,
}

impl NutrientReference {
    /// Wrap entries in their source order
    #[must_use]
    pub fn new(entries: Vec<ReferenceEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                if entry.search_text.is_empty() {
                    ReferenceEntry::new(entry.description, entry.profile)
                } else {
                    entry
                }
            })
            .collect();
        Self { entries }
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order
    #[must_use]
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// First entry whose description contains every word of `name`
    ///
    /// A name without word tokens matches nothing.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ReferenceEntry> {
        let tokens = keyword_tokens(name);
        if tokens.is_empty() {
            return None;
        }
        self.entries.iter().find(|entry| entry.matches_all(&tokens))
    }
}

impl FromIterator<ReferenceEntry> for NutrientReference {
    fn from_iter<T: IntoIterator<Item = ReferenceEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_mismatch_is_unmapped() {
        let entry = ReferenceEntry::from_nutrients(
            "Lentils, dry",
            [
                ("Energy", "kJ", 1470.0),
                ("Energy", "KCAL", 352.0),
                ("Protein", "G", 24.6),
                ("Sodium, Na", "g", 0.006),
                ("Iron, Fe", "mg", 6.5),
            ],
        );
        assert!((entry.profile.calories - 352.0).abs() < 1e-9);
        assert!((entry.profile.protein - 24.6).abs() < 1e-9);
        assert!(entry.profile.sodium.abs() < f64::EPSILON);
    }

    #[test]
    fn test_keyword_intersection_uses_source_order() {
        let reference: NutrientReference = [
            ReferenceEntry::new("Cheese, cheddar", NutrientProfile::new(403.0, 23.0, 33.0, 3.1, 0.0, 653.0)),
            ReferenceEntry::new("Cheese, parmesan, grated", NutrientProfile::new(420.0, 29.6, 28.0, 13.9, 0.0, 1804.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(reference.find("cheese").unwrap().description, "Cheese, cheddar");
        assert_eq!(
            reference.find("parmesan cheese").unwrap().description,
            "Cheese, parmesan, grated"
        );
        assert!(reference.find("blue cheese").is_none());
        assert!(reference.find("").is_none());
    }
}
