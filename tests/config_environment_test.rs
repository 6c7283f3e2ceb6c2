// ABOUTME: Integration tests for environment-driven server and intelligence configuration
// ABOUTME: Defaults, overrides, invalid values and validation of data paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutriplan_server::config::environment::{DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT};
use nutriplan_server::config::ServerConfig;
use nutriplan_server::intelligence::{IntelligenceConfig, MatchStrategy};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const VARS: [&str; 12] = [
    "HTTP_HOST",
    "HTTP_PORT",
    "REQUEST_TIMEOUT_SECS",
    "CORS_ALLOWED_ORIGINS",
    "NUTRIPLAN_CORPUS_PATH",
    "NUTRIPLAN_REFERENCE_PATH",
    "NUTRIPLAN_MODEL_PATH",
    "NUTRIPLAN_CLUSTERS",
    "NUTRIPLAN_SEED",
    "NUTRIPLAN_MATCH_STRATEGY",
    "NUTRIPLAN_DEFAULT_RECOMMENDATIONS",
    "NUTRIPLAN_PENALTY_FACTOR",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_host, DEFAULT_HTTP_HOST);
    assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
    assert_eq!(config.cors.allowed_origins, "*");
    assert_eq!(config.data.corpus_path, None);
    assert_eq!(config.intelligence.clustering.k, 20);
    assert_eq!(config.intelligence.clustering.seed, 42);
    assert_eq!(config.intelligence.ranking.strategy, MatchStrategy::Clustered);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let corpus = dir.path().join("corpus.jsonl");
    fs::write(&corpus, "").unwrap();

    env::set_var("HTTP_HOST", "0.0.0.0");
    env::set_var("HTTP_PORT", "9090");
    env::set_var("REQUEST_TIMEOUT_SECS", "5");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:3000");
    env::set_var("NUTRIPLAN_CORPUS_PATH", &corpus);
    env::set_var("NUTRIPLAN_MODEL_PATH", "   ");
    env::set_var("NUTRIPLAN_CLUSTERS", "12");
    env::set_var("NUTRIPLAN_SEED", "7");
    env::set_var("NUTRIPLAN_MATCH_STRATEGY", "full-scan");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:9090");
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
    assert_eq!(config.data.corpus_path.as_deref(), Some(corpus.as_path()));
    assert_eq!(config.data.model_path, None);
    assert_eq!(config.intelligence.clustering.k, 12);
    assert_eq!(config.intelligence.clustering.seed, 7);
    assert_eq!(config.intelligence.ranking.strategy, MatchStrategy::FullScan);

    let summary = config.summary();
    assert_eq!(summary["clusters"], 12);
    assert_eq!(summary["match_strategy"], "full_scan");
}

#[test]
#[serial]
fn test_unparseable_values_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());
    clear_env();

    env::set_var("NUTRIPLAN_CLUSTERS", "many");
    assert!(IntelligenceConfig::load().is_err());
    clear_env();

    env::set_var("NUTRIPLAN_MATCH_STRATEGY", "random");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_parseable_but_invalid_values_rejected() {
    clear_env();
    env::set_var("NUTRIPLAN_CLUSTERS", "0");
    assert!(IntelligenceConfig::load().is_err());
    clear_env();

    env::set_var("NUTRIPLAN_PENALTY_FACTOR", "0.5");
    assert!(IntelligenceConfig::load().is_err());
    clear_env();

    env::set_var("NUTRIPLAN_DEFAULT_RECOMMENDATIONS", "500");
    assert!(IntelligenceConfig::load().is_err());
    clear_env();

    env::set_var("HTTP_PORT", "0");
    assert!(ServerConfig::from_env().is_err());
    clear_env();

    env::set_var("NUTRIPLAN_REFERENCE_PATH", "/definitely/not/here.json");
    let message = format!("{:#}", ServerConfig::from_env().unwrap_err());
    assert!(message.contains("NUTRIPLAN_REFERENCE_PATH"));
    clear_env();
}

#[test]
fn test_validate_without_environment() {
    let config = ServerConfig {
        http_host: "  ".to_owned(),
        ..ServerConfig::default()
    };
    assert!(config.validate().is_err());

    let config = ServerConfig {
        request_timeout_secs: 7200,
        ..ServerConfig::default()
    };
    assert!(config.validate().is_err());

    let mut config = ServerConfig::default();
    config.intelligence.ranking.nearest_clusters = 0;
    assert!(config.validate().is_err());
}
