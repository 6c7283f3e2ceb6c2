// ABOUTME: Integration tests for ingredient name normalization
// ABOUTME: Descriptor stripping, ground beef repair, optional chicken rewrite and idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutriplan_server::intelligence::config::NormalizerConfig;
use nutriplan_server::intelligence::NameNormalizer;

#[test]
fn test_recipe_noise_removed() {
    let normalizer = NameNormalizer::default();

    assert_eq!(normalizer.normalize("2 large eggs, beaten"), "eggs");
    assert_eq!(normalizer.normalize("1 cup Unsalted Butter (softened)"), "butter");
    assert_eq!(normalizer.normalize("chopped fresh parsley"), "parsley");
    assert_eq!(normalizer.normalize("a pinch of salt"), "salt");
    assert_eq!(normalizer.normalize("SUGAR"), "sugar");
}

#[test]
fn test_ground_beef_kept_distinct_from_beef() {
    let normalizer = NameNormalizer::default();

    assert_eq!(normalizer.normalize("Ground Beef"), "ground beef");
    assert_eq!(normalizer.normalize("beef"), "beef");
    assert_eq!(normalizer.normalize("ground ginger"), "ginger");
}

#[test]
fn test_chicken_rewrite_only_when_enabled() {
    let rewriting = NameNormalizer::new(NormalizerConfig {
        chicken_breast_default: true,
    });

    assert_eq!(rewriting.normalize("diced chicken"), "chicken breast");
    assert_eq!(NameNormalizer::default().normalize("diced chicken"), "chicken");
}

#[test]
fn test_blank_and_noise_only_input() {
    let normalizer = NameNormalizer::default();

    assert_eq!(normalizer.normalize(""), "");
    assert_eq!(normalizer.normalize("  ---  "), "");
    assert_eq!(normalizer.normalize("2 tbsp"), "");
}

#[test]
fn test_normalization_is_idempotent() {
    let normalizer = NameNormalizer::default();
    for raw in [
        "1 1/2 cups finely chopped onions",
        "Salt, to taste",
        "lean ground beef (80/20)",
        "Frozen Peas",
        "½ tsp ground cinnamon",
        "Extra Virgin Olive Oil",
    ] {
        let once = normalizer.normalize(raw);
        assert_eq!(normalizer.normalize(&once), once, "{raw:?} changed on second pass");
    }
}
