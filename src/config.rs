use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root of `config.yaml`: where the spreadsheet comes from and where the
/// normalized dataset goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRoot {
    pub id: String,
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub outputs: Option<OutputsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Remote spreadsheet export URL. Fetching it is a collaborator concern;
    /// kept here so one config file describes the whole run.
    pub sheet_url: Option<String>,
    /// Local CSV fallback consumed by this binary.
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputsConfig {
    pub dir: Option<String>,
    #[serde(default)]
    pub centroids: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config.yaml: {0}")]
    Read(String),
    #[error("Failed to parse config.yaml: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Minimal validation of the run configuration.
pub fn validate_config(path: &Path) -> Result<ConfigRoot, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
    let cfg: ConfigRoot = serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if cfg.id.trim().is_empty() {
        return Err(ConfigError::Invalid("missing id".into()));
    }
    let has_fallback = cfg
        .source
        .as_ref()
        .and_then(|s| s.fallback.clone())
        .is_some();
    let has_out_dir = cfg.outputs.as_ref().and_then(|o| o.dir.clone()).is_some();
    if !has_fallback || !has_out_dir {
        return Err(ConfigError::Invalid("missing source.fallback or outputs.dir".into()));
    }

    Ok(cfg)
}

impl ConfigRoot {
    pub fn input_path(&self) -> String {
        self.source
            .as_ref()
            .and_then(|s| s.fallback.clone())
            .unwrap_or_else(|| "./data/agreements.csv".to_string())
    }

    pub fn output_dir(&self) -> String {
        self.outputs
            .as_ref()
            .and_then(|o| o.dir.clone())
            .unwrap_or_else(|| "./output".to_string())
    }

    pub fn centroids_path(&self) -> Option<String> {
        self.outputs.as_ref().and_then(|o| o.centroids.clone())
    }
}
