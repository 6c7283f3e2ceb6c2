// ABOUTME: Configuration module for the NutriPlan server
// ABOUTME: Environment-derived server settings; algorithm settings live in the intelligence crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, DataConfig, ServerConfig};
