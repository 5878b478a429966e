//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Descriptor file used when neither `--file` nor the config names one
pub const DEFAULT_DESCRIPTOR: &str = "ecosystem.config.json";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Descriptor file to load by default
    pub default_file: Option<PathBuf>,

    /// Deployment mode to resolve by default
    pub default_mode: Option<String>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            tracing::debug!(path = %config_path.display(), "Loaded CLI config");
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("ecosystem").join("config.toml"))
    }

    /// Descriptor path: explicit flag, then config, then the default file name
    pub fn descriptor_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.default_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR))
    }

    /// Deployment mode: explicit flag, then config
    pub fn mode(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.default_mode.clone())
    }
}

/// Settings in effect after flags, config file and defaults are combined
#[derive(Debug, Serialize)]
pub struct EffectiveConfig {
    pub descriptor: PathBuf,
    pub mode: Option<String>,
    pub config: CliConfig,
}
