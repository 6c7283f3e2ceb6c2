// ABOUTME: Readers for external nutrition data sources
// ABOUTME: USDA FoodData Central Foundation Foods downloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// `FoodData` Central Foundation Foods JSON loader
pub mod foundation_foods;

pub use foundation_foods::{load_foundation_foods, parse_foundation_foods};
