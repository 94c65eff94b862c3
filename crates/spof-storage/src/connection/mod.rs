//! Connection management: one serialized writer, pooled snapshot readers.

pub mod pool;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags, TransactionBehavior};
use spof_core::config::storage_config::DEFAULT_READ_POOL_SIZE;
use spof_core::errors::StorageError;

use self::pool::{in_snapshot, ReadPool};
use crate::migrations;

/// Writer pragmas. Edge cascades need `foreign_keys`; WAL lets the pooled
/// readers keep their snapshot while the writer commits.
const WRITER_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
";

/// Whether opening may create the database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create the file and its directory when missing.
    Create,
    /// Fail when the file is missing. Nothing is created on disk.
    Existing,
}

impl OpenMode {
    fn flags(self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match self {
            Self::Create => base | OpenFlags::SQLITE_OPEN_CREATE,
            Self::Existing => base,
        }
    }
}

/// Owns the write connection and the read pool.
///
/// In-memory databases have no pool: a second in-memory connection would
/// be a different database, so reads go through the writer instead.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open (creating if needed) a database, then bring its schema up to date.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with(path, OpenMode::Create, DEFAULT_READ_POOL_SIZE)
    }

    pub fn open_with(path: &Path, mode: OpenMode, pool_size: usize) -> Result<Self, StorageError> {
        match mode {
            OpenMode::Create => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| StorageError::SqliteError {
                        message: format!("failed to create database directory: {e}"),
                    })?;
                }
            }
            OpenMode::Existing => {
                if !path.is_file() {
                    return Err(StorageError::DatabaseMissing {
                        path: path.display().to_string(),
                    });
                }
            }
        }

        let writer = Connection::open_with_flags(path, mode.flags()).map_err(sqlite_err)?;
        writer.execute_batch(WRITER_PRAGMAS).map_err(|e| StorageError::SqliteError {
            message: format!("failed to apply pragmas: {e}"),
        })?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, pool_size)?;
        tracing::debug!(
            path = %path.display(),
            mode = ?mode,
            readers = readers.size(),
            "database opened"
        );

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(sqlite_err)?;
        writer
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(sqlite_err)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
        })
    }

    /// Run `f` in a BEGIN IMMEDIATE transaction on the writer.
    ///
    /// The write lock is taken up front, so a concurrent writer in another
    /// process waits on `busy_timeout` instead of failing mid-transaction.
    /// Any error from `f` rolls everything back.
    pub fn write<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let mut guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        let tx = guard
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| StorageError::SqliteError {
                message: format!("failed to begin immediate transaction: {e}"),
            })?;
        let result = f(&tx)?;
        tx.commit().map_err(|e| StorageError::SqliteError {
            message: format!("failed to commit: {e}"),
        })?;
        Ok(result)
    }

    /// Run `f` against one consistent snapshot of the database.
    pub fn read<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        match &self.readers {
            Some(pool) => pool.read(f),
            None => {
                let mut guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
                    message: "write lock poisoned".to_string(),
                })?;
                in_snapshot(&mut guard, f)
            }
        }
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
