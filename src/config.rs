//! Analysis configuration
//!
//! Defaults reproduce the conventional settings: 4 build workers, top 10,
//! 50 histogram bucket edges, PageRank (0.85, 100, 1e-6), HITS (100, 1e-8).
//! Files are YAML unless the extension is `.json`.

use crate::algo::{HitsConfig, PageRankConfig, DEFAULT_BUCKETS};
use crate::graph::DEFAULT_WORKERS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default size of every ranked table
pub const DEFAULT_TOP: usize = 10;
/// Largest ranked table a caller may request
pub const MAX_TOP: usize = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Parallel build workers
    pub workers: usize,
    /// Rows in each ranked table (range of interest)
    pub top: usize,
    /// Histogram bucket edges for degree distributions
    pub buckets: usize,
    pub pagerank: PageRankConfig,
    pub hits: HitsConfig,
    /// Wall-clock budget per solver run, in seconds
    pub time_budget_secs: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            top: DEFAULT_TOP,
            buckets: DEFAULT_BUCKETS,
            pagerank: PageRankConfig::default(),
            hits: HitsConfig::default(),
            time_budget_secs: None,
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if !(1..=MAX_TOP).contains(&self.top) {
            return Err(ConfigError::Invalid(format!(
                "top must be between 1 and {}, got {}",
                MAX_TOP, self.top
            )));
        }
        if let Some(secs) = self.time_budget_secs {
            if !secs.is_finite() || secs <= 0.0 || Duration::try_from_secs_f64(secs).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "time budget must be a positive, representable number of seconds, got {}",
                    secs
                )));
            }
        }
        self.pagerank
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("pagerank: {}", e)))?;
        self.hits
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("hits: {}", e)))?;
        Ok(())
    }

    /// The solver time budget. Values `validate` would reject read as no budget.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}
