//! Propagator collaborator bound to an open write transaction.

use rusqlite::{params, Connection};
use spof_core::errors::StorageError;
use spof_core::traits::InheritedDicStore;
use spof_core::types::Dic;

use super::util::{collect_rows, dic_at, sql_err};

/// Runs the propagator's reads and writes on the caller's connection, so
/// they commit or roll back with the write that triggered them.
pub struct TxDicStore<'a> {
    conn: &'a Connection,
}

impl<'a> TxDicStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl InheritedDicStore for TxDicStore<'_> {
    fn aggregate_essential_dic(&self, support_id: i64) -> Result<Dic, StorageError> {
        self.conn
            .prepare_cached(
                "SELECT COALESCE(MAX(ea.confidentiality), 0),
                        COALESCE(MAX(ea.integrity), 0),
                        COALESCE(MAX(ea.availability), 0)
                 FROM essential_support_edges e
                 JOIN essential_assets ea ON ea.id = e.essential_id
                 WHERE e.support_id = ?1",
            )
            .map_err(sql_err)?
            .query_row(params![support_id], |row| dic_at(row, 0))
            .map_err(sql_err)
    }

    fn update_inherited_dic(&self, support_id: i64, dic: Dic) -> Result<(), StorageError> {
        let updated = self
            .conn
            .execute(
                "UPDATE support_assets
                 SET inherited_confidentiality = ?2,
                     inherited_integrity = ?3,
                     inherited_availability = ?4
                 WHERE id = ?1",
                params![
                    support_id,
                    dic.confidentiality,
                    dic.integrity,
                    dic.availability
                ],
            )
            .map_err(sql_err)?;
        if updated == 0 {
            return Err(StorageError::NotFound {
                entity: "support asset",
                id: support_id,
            });
        }
        Ok(())
    }

    fn supports_of_essential(&self, essential_id: i64) -> Result<Vec<i64>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT support_id FROM essential_support_edges
                 WHERE essential_id = ?1 ORDER BY support_id",
            )
            .map_err(sql_err)?;
        let rows = stmt
            .query_map(params![essential_id], |row| row.get(0))
            .map_err(sql_err)?;
        collect_rows(rows)
    }
}
