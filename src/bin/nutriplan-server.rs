// ABOUTME: HTTP server binary serving meal recommendations over the NutriPlan REST API
// ABOUTME: Loads the corpus and model at startup, then serves until Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `NutriPlan` Server Binary
//!
//! Reads configuration from the environment, restores or trains the cluster
//! model, and serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use nutriplan_server::{config::ServerConfig, logging, routes, services::RecommendationService};
#[cfg(not(unix))]
use std::future;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "nutriplan-server")]
#[command(about = "NutriPlan - macro-aware meal recommendation API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the meal corpus path
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Override the persisted model path
    #[arg(long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if args.corpus.is_some() {
        config.data.corpus_path = args.corpus;
    }
    if args.model.is_some() {
        config.data.model_path = args.model;
    }
    config.validate()?;

    info!("Starting NutriPlan server");
    info!("{}", config.summary());

    let service = RecommendationService::bootstrap(&config)
        .await
        .context("Failed to initialize recommendation service")?;
    if !service.is_ready().await {
        warn!("No cluster model published; /ready reports not_ready");
    }

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    display_available_endpoints(&config);
    info!(address = %addr, "Ready to serve meal recommendations");

    let app = routes::router(service, &config);
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.http_host;
    let port = config.http_port;
    info!("=== Available API Endpoints ===");
    info!("   Health:          GET  http://{host}:{port}/health");
    info!("   Readiness:       GET  http://{host}:{port}/ready");
    info!("   Recommendations: POST http://{host}:{port}/api/recommendations");
    info!("   Clusters:        GET  http://{host}:{port}/api/clusters");
    info!("   Targets:         POST http://{host}:{port}/api/nutrition/targets");
    info!("   Ingredient:      POST http://{host}:{port}/api/ingredients/parse");
    info!("=== End of Endpoint List ===");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
