// ABOUTME: Macro target models for daily and per-meal nutrition goals
// ABOUTME: Validates loosely-typed request input into a strict MacroTarget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Validated macro target (daily or per meal)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbohydrates: f64,
    /// Fat (g)
    pub fat: f64,
}

impl MacroTarget {
    /// Build a target, rejecting negative or non-finite values
    ///
    /// # Errors
    ///
    /// Returns `InvalidTarget` if any macro is negative, NaN or infinite
    pub fn new(calories: f64, protein: f64, carbohydrates: f64, fat: f64) -> AppResult<Self> {
        for (field, value) in [
            ("calories", calories),
            ("protein", protein),
            ("carbohydrates", carbohydrates),
            ("fat", fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_target(format!(
                    "{field} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(Self {
            calories,
            protein,
            carbohydrates,
            fat,
        })
    }

    /// Split a daily target evenly across `meals_per_day` meals
    ///
    /// # Errors
    ///
    /// Returns `InvalidTarget` if `meals_per_day` is zero
    pub fn per_meal(&self, meals_per_day: u32) -> AppResult<Self> {
        if meals_per_day == 0 {
            return Err(AppError::invalid_target(
                "meals_per_day must be at least 1",
            ));
        }
        let meals = f64::from(meals_per_day);
        Ok(Self {
            calories: self.calories / meals,
            protein: self.protein / meals,
            carbohydrates: self.carbohydrates / meals,
            fat: self.fat / meals,
        })
    }
}

/// Macro target as received from callers, every field optional
///
/// Accepts both `carbohydrates` and `carbs`, and capitalised keys.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MacroTargetInput {
    /// Energy (kcal)
    #[serde(default, alias = "Calories")]
    pub calories: Option<f64>,
    /// Protein (g)
    #[serde(default, alias = "Protein")]
    pub protein: Option<f64>,
    /// Carbohydrates (g)
    #[serde(default, alias = "Carbohydrates", alias = "carbs")]
    pub carbohydrates: Option<f64>,
    /// Fat (g)
    #[serde(default, alias = "Fat")]
    pub fat: Option<f64>,
}

impl TryFrom<MacroTargetInput> for MacroTarget {
    type Error = AppError;

    fn try_from(input: MacroTargetInput) -> AppResult<Self> {
        let require = |value: Option<f64>, field: &str| {
            value.ok_or_else(|| AppError::invalid_target(format!("missing macro '{field}'")))
        };
        Self::new(
            require(input.calories, "calories")?,
            require(input.protein, "protein")?,
            require(input.carbohydrates, "carbohydrates")?,
            require(input.fat, "fat")?,
        )
    }
}
