// ABOUTME: Ingestion pipeline from raw recipe sources to the aggregated meal corpus
// ABOUTME: Record formats, text-block parsing, JSONL storage and the corpus builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingestion
//!
//! Raw records (native JSONL, `TheMealDB` objects or recipe text blocks)
//! pass through [`CorpusBuilder`], which parses every ingredient, resolves
//! nutrients and aggregates meal totals. The result is stored as JSONL, one
//! [`Meal`](nutriplan_core::models::Meal) per line.

/// Recipe text block parser
pub mod completion;
/// Corpus builder and ingest report
pub mod corpus;
/// JSONL reading and writing
pub mod jsonl;
/// Raw record types
pub mod records;

pub use completion::{parse_completion, CompletionRecord};
pub use corpus::{read_raw_records, CorpusBuild, CorpusBuilder, IngestReport, RawFormat, TierPercentages};
pub use jsonl::{decode_lines, load_corpus, read_jsonl, save_corpus, write_jsonl, JsonlLine};
pub use records::{IngredientsField, RawIngredient, RawMealRecord};
