//! CLI configuration

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// Role used when neither `--role` nor `WASTEOPS_ROLE` is given
    pub default_role: Option<String>,

    /// Default output format
    pub output: Option<OutputFormat>,

    /// Require readable `new_end_date` values when auditing
    pub strict_dates: bool,
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
            let config: CliConfig = toml::from_str(&contents)?;
            tracing::debug!(path = %config_path.display(), "configuration loaded");
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("wasteops").join("config.toml"))
    }
}
