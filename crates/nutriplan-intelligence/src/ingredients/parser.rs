// ABOUTME: Ingredient line parser turning free text into quantity, unit, grams and name
// ABOUTME: Total over all inputs; anomalies are reported alongside the parsed ingredient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::normalizer::NameNormalizer;
use super::quantity::split_leading_quantity;
use crate::config::ParserConfig;
use nutriplan_core::models::{IngredientUnit, ParsedIngredient};
use serde::{Deserialize, Serialize};

/// Irregularity noticed while parsing a line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseAnomaly {
    /// No leading number; the missing-quantity policy was applied
    MissingQuantity,
    /// No recognised unit; the default gram weight was applied
    UnknownUnit,
    /// Raw estimate exceeded the ceiling and was replaced
    ExceededCeiling {
        /// Estimate before clamping
        grams: f64,
    },
    /// Nothing nameable remained after normalization
    EmptyName,
}

/// Parsed ingredient plus everything unusual about the line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Parsed ingredient
    pub ingredient: ParsedIngredient,
    /// Anomalies in the order they were detected
    pub anomalies: Vec<ParseAnomaly>,
}

/// A located unit word inside the remainder of a line
struct UnitMatch {
    unit: IngredientUnit,
    start: usize,
    end: usize,
}

fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (index, c) in text.char_indices() {
        if c.is_alphanumeric() {
            start.get_or_insert(index);
        } else if let Some(begin) = start.take() {
            spans.push((begin, index));
        }
    }
    if let Some(begin) = start {
        spans.push((begin, text.len()));
    }
    spans
}

fn find_unit(text: &str) -> Option<UnitMatch> {
    let words: Vec<(usize, usize, String)> = word_spans(text)
        .into_iter()
        .map(|(start, end)| (start, end, text[start..end].to_lowercase()))
        .collect();

    IngredientUnit::SCAN_ORDER.into_iter().find_map(|unit| {
        words
            .iter()
            .find(|(_, _, word)| unit.aliases().contains(&word.as_str()))
            .map(|(start, end, _)| UnitMatch {
                unit,
                start: *start,
                end: *end,
            })
    })
}

/// Free-text ingredient line parser
#[derive(Debug, Clone, Default)]
pub struct IngredientParser {
    config: ParserConfig,
    normalizer: NameNormalizer,
}

impl IngredientParser {
    /// Create a parser from its settings and the normalizer used for names
    #[must_use]
    pub const fn new(config: ParserConfig, normalizer: NameNormalizer) -> Self {
        Self { config, normalizer }
    }

    /// Parser settings in use
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Name normalizer in use
    #[must_use]
    pub const fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Parse one ingredient line
    #[must_use]
    pub fn parse(&self, line: &str) -> ParsedIngredient {
        self.parse_detailed(line).ingredient
    }

    /// Parse a measure column and a separate ingredient name ("1 1/2 cups", "flour")
    #[must_use]
    pub fn parse_measure(&self, measure: &str, name: &str) -> ParseOutcome {
        self.parse_detailed(&format!("{} {}", measure.trim(), name.trim()))
    }

    /// Parse one ingredient line and report anomalies
    #[must_use]
    pub fn parse_detailed(&self, line: &str) -> ParseOutcome {
        let line = line.trim();
        if line.is_empty() {
            return ParseOutcome {
                ingredient: ParsedIngredient::empty(),
                anomalies: vec![ParseAnomaly::EmptyName],
            };
        }

        let mut anomalies = Vec::new();
        let leading = split_leading_quantity(line);
        let quantity = leading.value.unwrap_or_else(|| {
            anomalies.push(ParseAnomaly::MissingQuantity);
            self.config.missing_quantity_policy.quantity()
        });

        let unit_match = find_unit(leading.rest);
        let name_text = unit_match.as_ref().map_or_else(
            || leading.rest.to_owned(),
            |found| {
                format!(
                    "{} {}",
                    &leading.rest[..found.start],
                    &leading.rest[found.end..]
                )
            },
        );
        let unit = unit_match.map(|found| found.unit);

        let per_unit = match unit {
            Some(IngredientUnit::Pinch | IngredientUnit::Dash) => self.config.small_measure_grams,
            Some(other) => other.grams_per_unit(),
            None => {
                anomalies.push(ParseAnomaly::UnknownUnit);
                self.config.default_grams
            }
        };

        let mut grams = (quantity * per_unit).max(0.0);
        if grams > self.config.gram_ceiling {
            anomalies.push(ParseAnomaly::ExceededCeiling { grams });
            grams = self.config.clamped_grams;
        }

        let name = self.normalizer.normalize(&name_text);
        if name.is_empty() {
            anomalies.push(ParseAnomaly::EmptyName);
        }

        ParseOutcome {
            ingredient: ParsedIngredient {
                name,
                quantity: quantity.max(0.0),
                unit,
                quantity_g: grams,
            },
            anomalies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingQuantityPolicy;

    #[test]
    fn test_unit_scan_order_prefers_earlier_units() {
        let found = find_unit("g cups").map(|m| m.unit);
        assert_eq!(found, Some(IngredientUnit::Gram));
        let found = find_unit("cloves garlic, whole").map(|m| m.unit);
        assert_eq!(found, Some(IngredientUnit::Clove));
        assert!(find_unit("garlic").is_none());
    }

    #[test]
    fn test_unit_removed_from_name() {
        let parser = IngredientParser::default();
        let outcome = parser.parse_detailed("2 Tbsp. olive oil");
        assert_eq!(outcome.ingredient.unit, Some(IngredientUnit::Tablespoon));
        assert_eq!(outcome.ingredient.name, "olive oil");
        assert!((outcome.ingredient.quantity_g - 30.0).abs() < 1e-9);
        assert!(outcome.anomalies.is_empty());
    }

    #[test]
    fn test_zero_quantity_policy() {
        let config = ParserConfig {
            missing_quantity_policy: MissingQuantityPolicy::Zero,
            ..ParserConfig::default()
        };
        let parser = IngredientParser::new(config, NameNormalizer::default());
        let ingredient = parser.parse("salt");
        assert_eq!(ingredient.name, "salt");
        assert!(ingredient.quantity_g.abs() < f64::EPSILON);
    }
}
