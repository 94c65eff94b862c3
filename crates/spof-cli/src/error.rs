//! CLI errors and their exit codes.

use spof_core::errors::error_code;
use spof_core::errors::{ConfigError, DetectionError, SchedulerError, StorageError};
use spof_core::SpofErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Detection(#[from] DetectionError),

    #[error("{0}")]
    Scheduler(#[from] SchedulerError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// 2 for an unknown scope, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Detection(DetectionError::ScopeNotFound { .. }) => 2,
            _ => 1,
        }
    }
}

impl SpofErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Detection(e) => e.error_code(),
            Self::Scheduler(e) => e.error_code(),
            Self::Io(_) | Self::Json(_) => error_code::OUTPUT_ERROR,
        }
    }
}
