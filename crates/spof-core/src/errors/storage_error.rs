//! Storage-layer errors.

use super::error_code::{self, SpofErrorCode};
use super::InvariantError;

/// Errors surfaced by the storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("database {path} does not exist")]
    DatabaseMissing { path: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

impl SpofErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::NotFound { .. } | Self::DatabaseMissing { .. } => error_code::NOT_FOUND,
            Self::Invariant(e) => e.error_code(),
        }
    }
}
