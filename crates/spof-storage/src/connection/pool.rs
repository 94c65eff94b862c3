//! Read side: query-only connections handed out round-robin, each read
//! wrapped in its own snapshot transaction.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags, TransactionBehavior};
use spof_core::errors::StorageError;

const MAX_POOL_SIZE: usize = 8;

const READER_PRAGMAS: &str = "
    PRAGMA query_only = ON;
    PRAGMA busy_timeout = 5000;
";

pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    /// Open `size` read-only connections, clamped to `1..=8`.
    pub fn open(path: &Path, size: usize) -> Result<Self, StorageError> {
        let size = size.clamp(1, MAX_POOL_SIZE);
        let connections = (0..size)
            .map(|_| {
                let conn = Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
                .map_err(|e| StorageError::SqliteError {
                    message: e.to_string(),
                })?;
                conn.execute_batch(READER_PRAGMAS)
                    .map_err(|e| StorageError::SqliteError {
                        message: format!("failed to apply read pragmas: {e}"),
                    })?;
                Ok(Mutex::new(conn))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next reader. Every query `f` issues sees the same
    /// committed state, even if the writer commits in between.
    pub fn read<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let mut guard = self.connections[idx]
            .lock()
            .map_err(|_| StorageError::SqliteError {
                message: "read pool lock poisoned".to_string(),
            })?;
        in_snapshot(&mut guard, f)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}

/// Pin one read snapshot for the duration of `f`.
pub(crate) fn in_snapshot<F, T>(conn: &mut Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Connection) -> Result<T, StorageError>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Deferred)
        .map_err(|e| StorageError::SqliteError {
            message: format!("failed to begin read transaction: {e}"),
        })?;
    let result = f(&tx)?;
    tx.commit().map_err(|e| StorageError::SqliteError {
        message: format!("failed to end read transaction: {e}"),
    })?;
    Ok(result)
}
