//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{SchedulerConfig, StorageConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "spof.toml";

/// Environment variables read by [`SpofConfig::load`].
pub const ENV_VARS: [&str; 5] = [
    "SPOF_REFRESH_INTERVAL",
    "SPOF_SCHEDULER_ENABLED",
    "SPOF_PRIMARY_WORKER",
    "SPOF_DB_PATH",
    "SPOF_READ_POOL_SIZE",
];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SPOF_*`)
/// 3. Project config (`spof.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SpofConfig {
    pub scheduler: SchedulerConfig,
    pub storage: StorageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub refresh_interval_secs: Option<u64>,
}

impl SpofConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(config: &SpofConfig) -> Result<(), ConfigError> {
        if config.scheduler.refresh_interval_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scheduler.refresh_interval_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.storage.read_pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.storage.db_path.as_deref() == Some("") {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn merge_toml_file(config: &mut SpofConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SpofConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut SpofConfig, other: &SpofConfig) {
        if other.scheduler.refresh_interval_secs.is_some() {
            base.scheduler.refresh_interval_secs = other.scheduler.refresh_interval_secs;
        }
        if other.scheduler.enabled.is_some() {
            base.scheduler.enabled = other.scheduler.enabled;
        }
        if other.scheduler.primary_worker.is_some() {
            base.scheduler.primary_worker = other.scheduler.primary_worker;
        }
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
    }

    /// Unparseable values are ignored so the lower layer stays in effect.
    fn apply_env_overrides(config: &mut SpofConfig) {
        if let Ok(val) = std::env::var("SPOF_REFRESH_INTERVAL") {
            if let Ok(v) = val.trim().parse::<u64>() {
                config.scheduler.refresh_interval_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPOF_SCHEDULER_ENABLED") {
            if let Some(v) = parse_flag(&val) {
                config.scheduler.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPOF_PRIMARY_WORKER") {
            if let Some(v) = parse_flag(&val) {
                config.scheduler.primary_worker = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPOF_DB_PATH") {
            if !val.is_empty() {
                config.storage.db_path = Some(val);
            }
        }
        if let Ok(val) = std::env::var("SPOF_READ_POOL_SIZE") {
            if let Ok(v) = val.trim().parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut SpofConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = cli.refresh_interval_secs {
            config.scheduler.refresh_interval_secs = Some(v);
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
