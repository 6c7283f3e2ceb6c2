// ABOUTME: Main library entry point for the NutriPlan meal recommendation server
// ABOUTME: Wires recipe ingestion, nutrient clustering and the HTTP API on top of the workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriPlan` Server
//!
//! Turns free-text recipe data into a nutrient-annotated meal corpus, groups
//! the corpus into clusters of nutritionally similar meals, and recommends
//! meals whose macros best match a per-meal target.
//!
//! ## Architecture
//!
//! - **`nutriplan-core`**: error types, domain models, constants
//! - **`nutriplan-intelligence`**: ingredient parsing, nutrient resolution,
//!   aggregation, k-means clustering and ranking
//! - **this crate**: corpus ingestion, configuration, logging, the
//!   recommendation service and the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutriplan_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("NutriPlan configured on {}", config.socket_addr()?);
//!     Ok(())
//! }
//! ```

/// Server configuration loaded from the environment
pub mod config;

/// External nutrient reference loaders
pub mod external;

/// Raw recipe ingestion and corpus building
pub mod ingest;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: CORS, request ids, request spans
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Recommendation service holding the corpus and the published model
pub mod services;

pub use nutriplan_core::{constants, errors, models};
pub use nutriplan_intelligence as intelligence;
