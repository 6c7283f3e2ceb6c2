// ABOUTME: Environment-based server configuration for the NutriPlan HTTP service
// ABOUTME: Reads bind address, data paths, CORS and timeout settings with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server configuration loaded from environment variables.
//!
//! There are no configuration files: every setting has a default and an
//! environment override. Algorithm constants live in
//! [`IntelligenceConfig`] and are read with the `NUTRIPLAN_` prefix.

use anyhow::{bail, Context, Result};
use nutriplan_intelligence::IntelligenceConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default bind host
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Longest request timeout accepted
const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

/// Files the server loads at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSONL corpus of aggregated meals
    pub corpus_path: Option<PathBuf>,
    /// `FoodData` Central Foundation Foods document
    pub reference_path: Option<PathBuf>,
    /// Persisted cluster model; loaded instead of retraining when the file exists
    pub model_path: Option<PathBuf>,
}

/// Cross-origin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub http_host: String,
    /// Port to bind
    pub http_port: u16,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Startup data files
    pub data: DataConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// Parser, clustering and ranking constants
    pub intelligence: IntelligenceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: DEFAULT_HTTP_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            data: DataConfig::default(),
            cors: CorsConfig::default(),
            intelligence: IntelligenceConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_host: env_var_or("HTTP_HOST", DEFAULT_HTTP_HOST),
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            request_timeout_secs: env_var_or(
                "REQUEST_TIMEOUT_SECS",
                &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            data: DataConfig {
                corpus_path: env_path("NUTRIPLAN_CORPUS_PATH"),
                reference_path: env_path("NUTRIPLAN_REFERENCE_PATH"),
                model_path: env_path("NUTRIPLAN_MODEL_PATH"),
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            intelligence: IntelligenceConfig::load()
                .context("Invalid NUTRIPLAN_* intelligence configuration")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check settings that parse fine but cannot work
    ///
    /// # Errors
    ///
    /// Returns an error for a zero port, an out-of-range timeout, a blank
    /// host, or an input file that does not exist
    pub fn validate(&self) -> Result<()> {
        if self.http_host.trim().is_empty() {
            bail!("HTTP_HOST must not be empty");
        }
        if self.http_port == 0 {
            bail!("HTTP_PORT must be between 1 and 65535");
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            bail!("REQUEST_TIMEOUT_SECS must be between 1 and {MAX_REQUEST_TIMEOUT_SECS}");
        }
        for (key, path) in [
            ("NUTRIPLAN_CORPUS_PATH", &self.data.corpus_path),
            ("NUTRIPLAN_REFERENCE_PATH", &self.data.reference_path),
        ] {
            if let Some(path) = path {
                require_file(key, path)?;
            }
        }
        self.intelligence
            .validate()
            .context("Invalid intelligence configuration")?;
        Ok(())
    }

    /// Address to bind
    ///
    /// # Errors
    ///
    /// Returns an error when host and port do not form a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.http_host, self.http_port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.http_host, self.http_port))
    }

    /// Summary for the startup log
    #[must_use]
    pub fn summary(&self) -> serde_json::Value {
        json!({
            "http_host": self.http_host,
            "http_port": self.http_port,
            "request_timeout_secs": self.request_timeout_secs,
            "corpus_path": self.data.corpus_path,
            "reference_path": self.data.reference_path,
            "model_path": self.data.model_path,
            "cors_allowed_origins": self.cors.allowed_origins,
            "clusters": self.intelligence.clustering.k,
            "match_strategy": self.intelligence.ranking.strategy.to_string(),
        })
    }
}

fn require_file(key: &str, path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("{key} points to {} which is not a readable file", path.display());
    }
    Ok(())
}

/// Environment variable or a default when unset
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Optional path; unset and blank both mean "not configured"
fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ServerConfig {
            request_timeout_secs: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_corpus_file() {
        let config = ServerConfig {
            data: DataConfig {
                corpus_path: Some(PathBuf::from("/definitely/not/here.jsonl")),
                ..DataConfig::default()
            },
            ..ServerConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("NUTRIPLAN_CORPUS_PATH"));
    }
}
