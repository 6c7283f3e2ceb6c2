// ABOUTME: Ingredient name normalizer producing canonical lookup keys
// ABOUTME: Strips preparation descriptors, quantities and units, then repairs known names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::NormalizerConfig;
use nutriplan_core::models::IngredientUnit;
use regex::Regex;
use std::sync::LazyLock;

/// Preparation and size descriptors, removed in this order
const DESCRIPTORS: &[&str] = &[
    "finely chopped",
    "chopped",
    "diced",
    "crushed",
    "ground",
    "sliced",
    "julienned",
    "grated",
    "minced",
    "cubed",
    "mashed",
    "a dash of",
    "a pinch of",
    "to taste",
    "extra",
    "fresh",
    "powdered",
    "dried",
    "raw",
    "cooked",
    "canned",
    "sweetened",
    "unsweetened",
    "large",
    "small",
    "medium",
    "pitted",
    "frozen",
    "beaten",
    "free-range",
    "salted",
    "unsalted",
    "plain",
    "self-raising",
];

/// Upper bound on normalization passes; each pass only removes text
const MAX_PASSES: usize = 16;

static DESCRIPTOR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DESCRIPTORS
        .iter()
        .filter_map(|descriptor| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(descriptor))).ok()
        })
        .collect()
});

static PARENTHETICAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").ok());

static QUANTITY_TOKENS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+(?:[./]\d+)?|[½⅓⅔¼¾⅛⅜⅝⅞]").ok());

static UNIT_TOKENS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let alternation = IngredientUnit::SCAN_ORDER
        .iter()
        .flat_map(|unit| unit.aliases().iter().copied())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).ok()
});

static LEADING_CONNECTIVES: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:(?:of|a|an|some)\s+)+").ok());

static EDGE_NOISE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\p{L}\p{N}]+|[^\p{L}\p{N}]+$").ok());

static GROUND_WORD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bground\b").ok());

static BEEF_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\bbeef\b").ok());

fn replace_with_space(pattern: Option<&Regex>, text: &str) -> String {
    pattern.map_or_else(|| text.to_owned(), |re| re.replace_all(text, " ").into_owned())
}

fn remove(pattern: Option<&Regex>, text: &str) -> String {
    pattern.map_or_else(|| text.to_owned(), |re| re.replace_all(text, "").into_owned())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains(pattern: Option<&Regex>, text: &str) -> bool {
    pattern.is_some_and(|re| re.is_match(text))
}

/// Maps free-text ingredient names to canonical lowercase lookup keys
///
/// Normalization is idempotent: `normalize(normalize(x)) == normalize(x)`.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    config: NormalizerConfig,
}

impl NameNormalizer {
    /// Create a normalizer with the given repair settings
    #[must_use]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Canonical form of `raw`; may be empty when nothing nameable remains
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let mut current = raw.to_owned();
        for _ in 0..MAX_PASSES {
            let next = Self::strip_pass(&current);
            if next == current {
                break;
            }
            current = next;
        }
        self.repair(raw, current)
    }

    fn strip_pass(text: &str) -> String {
        let mut text = replace_with_space(PARENTHETICAL.as_ref(), text);
        for pattern in DESCRIPTOR_PATTERNS.iter() {
            text = pattern.replace_all(&text, " ").into_owned();
        }
        text = replace_with_space(QUANTITY_TOKENS.as_ref(), &text);
        text = replace_with_space(UNIT_TOKENS.as_ref(), &text);

        let text = collapse_whitespace(&text).to_lowercase();
        let text = remove(LEADING_CONNECTIVES.as_ref(), &text);
        let text = remove(EDGE_NOISE.as_ref(), &text);
        collapse_whitespace(&text)
    }

    fn repair(&self, raw: &str, normalized: String) -> String {
        // Stripping "ground" as a descriptor would merge minced beef into steak
        if contains(GROUND_WORD.as_ref(), raw) && contains(BEEF_WORD.as_ref(), &normalized) {
            if let Some(beef) = BEEF_WORD.as_ref() {
                return beef.replace(&normalized, "ground beef").into_owned();
            }
        }
        if self.config.chicken_breast_default && normalized == "chicken" {
            return "chicken breast".to_owned();
        }
        normalized
    }
}
