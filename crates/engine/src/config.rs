//! Indexer configuration via `textindex.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the standard configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use textindex_core::{Error, Result};
use textindex_search::{BM25LiteScorer, InvertedIndex};

/// Config file name conventionally placed next to the crawler's data.
pub const CONFIG_FILE_NAME: &str = "textindex.toml";

/// Number of hits fetched from the engine per iterator page.
pub const DEFAULT_BATCH_SIZE: usize = 10;

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_k1() -> f32 {
    1.2
}

fn default_b() -> f32 {
    0.75
}

fn default_title_boost() -> f32 {
    1.2
}

/// BM25 parameters for textual relevance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Term frequency saturation
    #[serde(default = "default_k1")]
    pub k1: f32,
    /// Length normalization, between 0 and 1
    #[serde(default = "default_b")]
    pub b: f32,
    /// Multiplier applied when a query term occurs in the title
    #[serde(default = "default_title_boost")]
    pub title_boost: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            title_boost: default_title_boost(),
        }
    }
}

/// Indexer configuration loaded from `textindex.toml`.
///
/// # Example
///
/// ```toml
/// batch_size = 10
/// # max_documents = 1000000
///
/// [scoring]
/// k1 = 1.2
/// b = 0.75
/// title_boost = 1.2
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexerConfig {
    /// Hits fetched from the engine per iterator page
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Upper bound on distinct documents; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_documents: Option<usize>,
    /// Relevance scoring parameters
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_documents: None,
            scoring: ScoringConfig::default(),
        }
    }
}

impl IndexerConfig {
    /// Builder: set the iterator page size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder: cap the number of documents
    pub fn with_max_documents(mut self, limit: usize) -> Self {
        self.max_documents = Some(limit);
        self
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        if self.max_documents == Some(0) {
            return Err(Error::InvalidConfig(
                "max_documents must be greater than zero when set".to_string(),
            ));
        }
        let scoring = &self.scoring;
        if !(scoring.k1 >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "scoring.k1 must be non-negative, got {}",
                scoring.k1
            )));
        }
        if !(0.0..=1.0).contains(&scoring.b) {
            return Err(Error::InvalidConfig(format!(
                "scoring.b must be between 0 and 1, got {}",
                scoring.b
            )));
        }
        if !(scoring.title_boost >= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "scoring.title_boost must be at least 1.0, got {}",
                scoring.title_boost
            )));
        }
        Ok(())
    }

    /// Build the in-memory engine described by this configuration
    pub fn build_engine(&self) -> InvertedIndex {
        let scorer = BM25LiteScorer::new(self.scoring.k1, self.scoring.b)
            .with_title_boost(self.scoring.title_boost);
        InvertedIndex::new()
            .with_scorer(scorer)
            .with_max_documents(self.max_documents)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Text indexer configuration
#
# Number of hits fetched from the engine per iterator page (default: 10)
batch_size = 10

# Maximum number of distinct documents (default: unbounded)
# max_documents = 1000000

# BM25 relevance parameters. Relevance only breaks ties between documents
# with the same page rank.
[scoring]
k1 = 1.2
b = 0.75
title_boost = 1.2
"#
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: IndexerConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::InvalidConfig(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::InvalidConfig(format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::InvalidConfig(format!(
                "failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
