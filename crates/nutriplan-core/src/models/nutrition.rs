// ABOUTME: Nutrient profile model shared by the resolver, aggregator and clustering engine
// ABOUTME: Six tracked nutrients with scaling, accumulation and rounding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Six tracked nutrients
///
/// Used both per 100 g of an ingredient (resolver output) and as a meal total
/// (aggregator output). Energy is kcal, macros are grams, sodium is milligrams.
/// Capitalised keys are accepted on input for compatibility with older corpora.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Energy (kcal)
    #[serde(default, alias = "Calories")]
    pub calories: f64,
    /// Protein (g)
    #[serde(default, alias = "Protein")]
    pub protein: f64,
    /// Total fat (g)
    #[serde(default, alias = "Fat")]
    pub fat: f64,
    /// Carbohydrates by difference (g)
    #[serde(default, alias = "Carbohydrates")]
    pub carbohydrates: f64,
    /// Dietary fiber (g)
    #[serde(default, alias = "Fiber")]
    pub fiber: f64,
    /// Sodium (mg)
    #[serde(default, alias = "Sodium")]
    pub sodium: f64,
}

impl NutrientProfile {
    /// All-zero profile returned when an ingredient cannot be resolved
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        fat: 0.0,
        carbohydrates: 0.0,
        fiber: 0.0,
        sodium: 0.0,
    };

    /// Build a profile from values in field order
    #[must_use]
    pub const fn new(
        calories: f64,
        protein: f64,
        fat: f64,
        carbohydrates: f64,
        fiber: f64,
        sodium: f64,
    ) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbohydrates,
            fiber,
            sodium,
        }
    }

    /// Multiply every nutrient by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbohydrates: self.carbohydrates * factor,
            fiber: self.fiber * factor,
            sodium: self.sodium * factor,
        }
    }

    /// Round every nutrient to `decimals` places
    #[must_use]
    pub fn rounded(&self, decimals: i32) -> Self {
        let factor = 10_f64.powi(decimals);
        let round = |value: f64| (value * factor).round() / factor;
        Self {
            calories: round(self.calories),
            protein: round(self.protein),
            fat: round(self.fat),
            carbohydrates: round(self.carbohydrates),
            fiber: round(self.fiber),
            sodium: round(self.sodium),
        }
    }

    /// Meals whose energy total is zero are treated as resolution failures
    #[must_use]
    pub fn has_energy(&self) -> bool {
        self.calories > 0.0
    }

    /// Every nutrient is a finite, non-negative number
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.as_array()
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }

    /// Values in field order
    #[must_use]
    pub const fn as_array(&self) -> [f64; 6] {
        [
            self.calories,
            self.protein,
            self.fat,
            self.carbohydrates,
            self.fiber,
            self.sodium,
        ]
    }
}

impl Add for NutrientProfile {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbohydrates: self.carbohydrates + rhs.carbohydrates,
            fiber: self.fiber + rhs.fiber,
            sodium: self.sodium + rhs.sodium,
        }
    }
}

impl AddAssign for NutrientProfile {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutrientProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
