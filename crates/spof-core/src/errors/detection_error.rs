//! Detection errors.

use super::error_code::{self, SpofErrorCode};
use super::StorageError;

/// Errors that can occur while detecting or reconciling SPOF flags.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("scope '{name}' not found")]
    ScopeNotFound { name: String },
}

impl SpofErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::ScopeNotFound { .. } => error_code::SCOPE_NOT_FOUND,
        }
    }
}
