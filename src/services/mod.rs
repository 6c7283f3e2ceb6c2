// ABOUTME: Domain service layer shared by HTTP routes and the command-line tool
// ABOUTME: Holds the recommendation service and model persistence helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Business logic lives here rather than in route handlers so the server and
//! the CLI apply the same rules.

/// Corpus, model lifecycle and recommendation requests
pub mod recommendation;

pub use recommendation::{read_model, write_model, IngredientAnalysis, RecommendationService};
