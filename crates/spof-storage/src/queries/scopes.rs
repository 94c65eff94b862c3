//! scopes queries.

use rusqlite::{params, Connection, OptionalExtension};
use spof_core::errors::StorageError;
use spof_core::types::Scope;

use super::util::{collect_rows, sql_err};

fn map_scope(row: &rusqlite::Row<'_>) -> rusqlite::Result<Scope> {
    Ok(Scope {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_id: row.get(2)?,
    })
}

pub fn insert_scope(
    conn: &Connection,
    name: &str,
    parent_id: Option<i64>,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO scopes (name, parent_id) VALUES (?1, ?2)",
        params![name, parent_id],
    )
    .map_err(sql_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_scope(conn: &Connection, id: i64) -> Result<Option<Scope>, StorageError> {
    conn.prepare_cached("SELECT id, name, parent_id FROM scopes WHERE id = ?1")
        .map_err(sql_err)?
        .query_row(params![id], map_scope)
        .optional()
        .map_err(sql_err)
}

/// Exact, case-sensitive name lookup.
pub fn find_scope_by_name(conn: &Connection, name: &str) -> Result<Option<Scope>, StorageError> {
    conn.prepare_cached("SELECT id, name, parent_id FROM scopes WHERE name = ?1")
        .map_err(sql_err)?
        .query_row(params![name], map_scope)
        .optional()
        .map_err(sql_err)
}

pub fn list_scopes(conn: &Connection) -> Result<Vec<Scope>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name, parent_id FROM scopes ORDER BY id")
        .map_err(sql_err)?;
    let rows = stmt.query_map([], map_scope).map_err(sql_err)?;
    collect_rows(rows)
}

pub fn delete_scope(conn: &Connection, id: i64) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM scopes WHERE id = ?1", params![id])
        .map_err(sql_err)
}
