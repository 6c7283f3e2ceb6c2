// ABOUTME: Domain models for ingredients, nutrients, meals and macro targets
// ABOUTME: Re-exports the record types shared across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod ingredient;
mod meal;
mod nutrition;
mod target;

pub use ingredient::{IngredientUnit, ParsedIngredient};
pub use meal::Meal;
pub use nutrition::NutrientProfile;
pub use target::{MacroTarget, MacroTargetInput};
