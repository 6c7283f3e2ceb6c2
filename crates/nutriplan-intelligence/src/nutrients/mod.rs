// ABOUTME: Nutrient resolution tiers: built-in staples, external reference, zero default
// ABOUTME: Exposes the NutrientLookup contract used by meal aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod fallback;
mod reference;
mod resolver;

pub use fallback::{fallback_names, fallback_profile};
pub use reference::{NutrientReference, ReferenceEntry};
pub use resolver::{NutrientLookup, NutrientResolver, NutrientSource, Resolution, SourceCounts};
