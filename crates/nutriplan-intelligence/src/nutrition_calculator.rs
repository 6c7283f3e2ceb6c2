// ABOUTME: Daily nutrition target calculation from body metrics, activity and goal
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled TDEE, goal adjustment and diet-plan macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Produces the daily `MacroTarget` that the recommendation ranker divides
//! per meal.
//!
//! # References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use nutriplan_core::constants::nutrition::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::MacroTarget;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MIN_AGE: u32 = 1;
const MAX_AGE: u32 = 120;
const MIN_WEIGHT_KG: f64 = 20.0;
const MAX_WEIGHT_KG: f64 = 300.0;
const MIN_HEIGHT_CM: f64 = 100.0;
const MAX_HEIGHT_CM: f64 = 250.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

macro_rules! snake_case_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace('-', "_").as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(AppError::invalid_input(format!(
                        "unknown {}: '{other}'",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($text),)+
                }
            }
        }
    };
}

/// Sex used by the BMR equation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// +5 kcal constant
    Male,
    /// -161 kcal constant
    Female,
}

snake_case_enum!(Gender { Male => "male", Female => "female" });

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    LightlyActive,
    /// Exercise 3-5 days/week
    ModeratelyActive,
    /// Exercise 6-7 days/week
    VeryActive,
    /// Hard training twice a day
    ExtraActive,
}

snake_case_enum!(ActivityLevel {
    Sedentary => "sedentary",
    LightlyActive => "lightly_active",
    ModeratelyActive => "moderately_active",
    VeryActive => "very_active",
    ExtraActive => "extra_active",
});

impl ActivityLevel {
    /// TDEE multiplier
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

/// Body-weight goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// 500 kcal daily deficit
    StandardWeightLoss,
    /// 250 kcal daily deficit
    MildWeightLoss,
    /// No adjustment
    Maintain,
    /// 250 kcal daily surplus
    MildWeightGain,
    /// 500 kcal daily surplus
    StandardWeightGain,
}

snake_case_enum!(Goal {
    StandardWeightLoss => "standard_weight_loss",
    MildWeightLoss => "mild_weight_loss",
    Maintain => "maintain",
    MildWeightGain => "mild_weight_gain",
    StandardWeightGain => "standard_weight_gain",
});

impl Goal {
    /// Daily calorie adjustment applied to TDEE
    #[must_use]
    pub const fn calorie_adjustment(self) -> f64 {
        match self {
            Self::StandardWeightLoss => -500.0,
            Self::MildWeightLoss => -250.0,
            Self::Maintain => 0.0,
            Self::MildWeightGain => 250.0,
            Self::StandardWeightGain => 500.0,
        }
    }
}

/// Macronutrient split of the calorie target
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietPlan {
    /// 30% protein, 40% carbs, 30% fat
    #[default]
    Balanced,
    /// 40% protein, 30% carbs, 30% fat
    HighProtein,
    /// 35% protein, 20% carbs, 45% fat
    LowCarb,
}

snake_case_enum!(DietPlan {
    Balanced => "balanced",
    HighProtein => "high_protein",
    LowCarb => "low_carb",
});

impl DietPlan {
    /// (protein, carbs, fat) as percentages of calories
    #[must_use]
    pub const fn percentages(self) -> (f64, f64, f64) {
        match self {
            Self::Balanced => (30.0, 40.0, 30.0),
            Self::HighProtein => (40.0, 30.0, 30.0),
            Self::LowCarb => (35.0, 20.0, 45.0),
        }
    }
}

/// Body metrics and preferences the calculator needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimetres
    pub height_cm: f64,
    /// Sex for the BMR constant
    pub gender: Gender,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Weight goal
    pub goal: Goal,
    /// Macro split
    #[serde(default)]
    pub diet_plan: DietPlan,
}

impl UserProfile {
    /// Check that metrics are within the ranges the equations cover
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first out-of-range metric
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(AppError::invalid_input(format!(
                "Age must be between {MIN_AGE} and {MAX_AGE} years"
            )));
        }
        if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&self.weight_kg) {
            return Err(AppError::invalid_input(format!(
                "Weight must be between {MIN_WEIGHT_KG} and {MAX_WEIGHT_KG} kg"
            )));
        }
        if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&self.height_cm) {
            return Err(AppError::invalid_input(format!(
                "Height must be between {MIN_HEIGHT_CM} and {MAX_HEIGHT_CM} cm"
            )));
        }
        Ok(())
    }
}

/// Daily energy and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionalTargets {
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: f64,
    /// Goal-adjusted calorie target (kcal/day)
    pub target_calories: f64,
    /// Protein (g/day)
    pub protein_grams: f64,
    /// Carbohydrates (g/day)
    pub carbs_grams: f64,
    /// Fat (g/day)
    pub fat_grams: f64,
    /// Protein share of calories (%)
    pub protein_percentage: f64,
    /// Carbohydrate share of calories (%)
    pub carbs_percentage: f64,
    /// Fat share of calories (%)
    pub fat_percentage: f64,
}

impl NutritionalTargets {
    /// Daily macro target for the recommendation ranker
    ///
    /// # Errors
    ///
    /// Returns `InvalidTarget` if the computed calories are negative
    pub fn macro_target(&self) -> AppResult<MacroTarget> {
        MacroTarget::new(
            self.target_calories,
            self.protein_grams,
            self.carbs_grams,
            self.fat_grams,
        )
    }
}

/// Basal metabolic rate using the Mifflin-St Jeor equation
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
#[must_use]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let base = 6.25f64.mul_add(height_cm, 10.0 * weight_kg) - 5.0 * f64::from(age);
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    round2(base + offset)
}

/// Total daily energy expenditure: BMR scaled by activity
#[must_use]
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    round2(bmr * activity_level.factor())
}

/// Goal-adjusted calorie target
#[must_use]
pub fn calculate_target_calories(tdee: f64, goal: Goal) -> f64 {
    round2(tdee + goal.calorie_adjustment())
}

/// Gram targets (protein, carbs, fat) for a calorie target and diet plan
#[must_use]
pub fn calculate_macronutrients(target_calories: f64, plan: DietPlan) -> (f64, f64, f64) {
    let (protein_pct, carbs_pct, fat_pct) = plan.percentages();
    (
        round2(target_calories * protein_pct / 100.0 / KCAL_PER_GRAM_PROTEIN),
        round2(target_calories * carbs_pct / 100.0 / KCAL_PER_GRAM_CARBS),
        round2(target_calories * fat_pct / 100.0 / KCAL_PER_GRAM_FAT),
    )
}

/// Full daily targets for a user profile
///
/// # Errors
///
/// Returns `InvalidInput` if the profile's metrics are out of range
pub fn calculate_nutritional_targets(profile: &UserProfile) -> AppResult<NutritionalTargets> {
    profile.validate()?;

    let bmr = calculate_bmr(profile.weight_kg, profile.height_cm, profile.age, profile.gender);
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let target_calories = calculate_target_calories(tdee, profile.goal);
    let (protein_grams, carbs_grams, fat_grams) =
        calculate_macronutrients(target_calories, profile.diet_plan);
    let (protein_percentage, carbs_percentage, fat_percentage) = profile.diet_plan.percentages();

    Ok(NutritionalTargets {
        bmr,
        tdee,
        target_calories,
        protein_grams,
        carbs_grams,
        fat_grams,
        protein_percentage,
        carbs_percentage,
        fat_percentage,
    })
}
