//! Analysis configuration
//!
//! Defaults match the file names used by the upstream feed exports. A YAML
//! file can override any field; the CLI layers its flags on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// JSON array of threat records
    pub records_path: PathBuf,
    /// JSON array of actor registry entries
    pub registry_path: PathBuf,
    /// Number of ranked nodes to report
    pub top_k: usize,
    /// Where to write the graph snapshot (None = don't write)
    pub snapshot_path: Option<PathBuf>,
    /// Also compute weakly connected clusters
    pub include_clusters: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from("data.json"),
            registry_path: PathBuf::from("apt_targets.json"),
            top_k: 5,
            snapshot_path: None,
            include_clusters: false,
        }
    }
}

impl AnalysisConfig {
    /// Parse a YAML document; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be greater than 0".to_string()));
        }
        Ok(())
    }
}
