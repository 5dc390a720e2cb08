//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use zkbond_core::{BindingParams, StorageConfig, VerificationConfig};

/// Full configuration for the `zkbond` binary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ZkbondConfig {
    /// Holder-binding parameters.
    #[serde(default)]
    pub binding: BindingParams,

    /// Verification window.
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Bond cache settings.
    #[serde(default)]
    pub storage: CliStorageConfig,

    /// Share URL settings.
    #[serde(default)]
    pub share: ShareConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliStorageConfig {
    /// Directory the bond cache lives in.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(flatten)]
    pub cache: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin of the verification page share URLs point at.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_log_level() -> String {
    "warn".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for CliStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cache: StorageConfig::default(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ZkbondConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: ZkbondConfig = toml::from_str(&contents)?;
            config.binding.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}
