//! CLI configuration

use crate::error::{CliError, CliResult};
use chebyshev_detector::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration, read from TOML.
///
/// ```toml
/// stage1_probability = 0.1
/// stage2_probability = 0.001
/// data_set = "machine_temperature"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    /// Tail probabilities for the detector
    #[serde(flatten)]
    pub detector: DetectorConfig,

    /// Stream name used in log events (defaults to the input file stem)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set: Option<String>,
}

impl CliConfig {
    /// Load configuration from file
    ///
    /// An explicitly named file must exist. The default location is optional
    /// and falls back to built-in defaults when absent.
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        match path {
            Some(p) => {
                let config_path = PathBuf::from(p);
                if !config_path.is_file() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        config_path.display()
                    )));
                }
                Self::read(&config_path)
            }
            None => match Self::default_config_path() {
                Some(p) if p.is_file() => Self::read(&p),
                _ => Ok(CliConfig::default()),
            },
        }
    }

    fn read(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        toml::from_str(contents).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Apply command-line probability overrides
    pub fn with_overrides(mut self, stage1: Option<f64>, stage2: Option<f64>) -> Self {
        if let Some(p) = stage1 {
            self.detector.stage1_probability = p;
        }
        if let Some(p) = stage2 {
            self.detector.stage2_probability = p;
        }
        self
    }

    /// Get the default configuration file path
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chebyshev").join("config.toml"))
    }
}
