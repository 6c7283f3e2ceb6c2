// ABOUTME: Corpus commands for nutriplan-cli
// ABOUTME: Builds a meal corpus from raw records and trains a persisted cluster model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_server::errors::AppResult;
use nutriplan_server::ingest::{load_corpus, read_raw_records, save_corpus, RawFormat};
use nutriplan_server::intelligence::IntelligenceConfig;
use nutriplan_server::logging::AppLogger;
use nutriplan_server::services::write_model;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use super::build_service;
use crate::helpers::display::{display_ingest_summary, print_json};

type Result<T> = AppResult<T>;

pub struct IngestArgs {
    pub input: PathBuf,
    pub format: RawFormat,
    pub reference: Option<PathBuf>,
    pub output: PathBuf,
}

pub struct TrainArgs {
    pub corpus: PathBuf,
    pub output: PathBuf,
    pub k: Option<usize>,
    pub seed: Option<u64>,
    pub n_init: Option<usize>,
}

/// Parse, resolve and aggregate raw records, then write the accepted meals
pub fn ingest(args: &IngestArgs) -> Result<()> {
    let service = build_service(IntelligenceConfig::load()?, args.reference.as_deref())?;

    info!(input = %args.input.display(), format = %args.format, "Reading raw records");
    let lines = read_raw_records(&args.input, args.format)?;
    let build = service.corpus_builder().build_lines(lines);

    let written = save_corpus(&args.output, &build.meals)?;
    AppLogger::log_ingest_report(&build.report);
    display_ingest_summary(&build.report);

    print_json(&json!({
        "output": args.output.display().to_string(),
        "written": written,
        "report": build.report,
        "resolution_percentages": build.report.percentages(),
    }))
}

/// Fit a cluster model on a corpus and save it
pub async fn train(args: &TrainArgs) -> Result<()> {
    let mut config = IntelligenceConfig::load()?;
    if let Some(k) = args.k {
        config.clustering.k = k;
    }
    if let Some(seed) = args.seed {
        config.clustering.seed = seed;
    }
    if let Some(n_init) = args.n_init {
        config.clustering.n_init = n_init;
    }
    config.validate()?;

    let service = build_service(config, None)?;
    service.replace_corpus(load_corpus(&args.corpus)?).await;
    let trained = service.train().await?;
    write_model(&args.output, &trained.model)?;

    print_json(&json!({
        "model_id": trained.model.model_id,
        "k": trained.model.k,
        "inertia": trained.model.inertia,
        "iterations": trained.model.iterations,
        "meals": trained.meals.len(),
        "output": args.output.display().to_string(),
        "clusters": trained.summaries,
    }))
}
