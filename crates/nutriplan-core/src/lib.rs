// ABOUTME: Core types and constants for the NutriPlan meal recommendation platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriPlan` Core
//!
//! Foundation crate providing shared types and constants for the `NutriPlan`
//! meal intelligence platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Unit weights, nutrient constants, and service limits
//! - **models**: Ingredients, nutrient profiles, meals, and macro targets

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`ParsedIngredient`, `NutrientProfile`, `Meal`, `MacroTarget`)
pub mod models;
