//! essential_assets, support_assets, suppliers and sites queries.

use rusqlite::{params, Connection, OptionalExtension};
use spof_core::errors::StorageError;
use spof_core::types::{Dic, EssentialAsset, LifecycleState, SupportAsset};

use super::util::{dic_at, parse_text, sql_err};

/// Input for creating an essential asset.
#[derive(Debug, Clone)]
pub struct NewEssentialAsset {
    pub name: String,
    pub scope_id: Option<i64>,
    pub dic: Dic,
}

impl NewEssentialAsset {
    pub fn new(name: impl Into<String>, dic: Dic) -> Self {
        Self {
            name: name.into(),
            scope_id: None,
            dic,
        }
    }

    pub fn in_scope(mut self, scope_id: i64) -> Self {
        self.scope_id = Some(scope_id);
        self
    }
}

/// Input for creating a support asset. Inherited levels always start at 0.
///
/// With a `parent_id` and no `scope_id`, the child takes its parent's scope.
#[derive(Debug, Clone)]
pub struct NewSupportAsset {
    pub name: String,
    pub scope_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub state: LifecycleState,
}

impl NewSupportAsset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope_id: None,
            parent_id: None,
            state: LifecycleState::Active,
        }
    }

    pub fn in_scope(mut self, scope_id: i64) -> Self {
        self.scope_id = Some(scope_id);
        self
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_state(mut self, state: LifecycleState) -> Self {
        self.state = state;
        self
    }
}

/// Any graph node an edge can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Essential,
    Support,
    Supplier,
    Site,
}

impl NodeKind {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Essential => "essential_assets",
            Self::Support => "support_assets",
            Self::Supplier => "suppliers",
            Self::Site => "sites",
        }
    }

    pub fn entity(&self) -> &'static str {
        match self {
            Self::Essential => "essential asset",
            Self::Support => "support asset",
            Self::Supplier => "supplier",
            Self::Site => "site",
        }
    }
}

pub fn node_exists(conn: &Connection, kind: NodeKind, id: i64) -> Result<bool, StorageError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", kind.table());
    conn.prepare_cached(&sql)
        .map_err(sql_err)?
        .query_row(params![id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(sql_err)
}

pub fn delete_node(conn: &Connection, kind: NodeKind, id: i64) -> Result<usize, StorageError> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
    conn.execute(&sql, params![id]).map_err(sql_err)
}

// --- essential assets ---

pub fn insert_essential(conn: &Connection, asset: &NewEssentialAsset) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO essential_assets (name, scope_id, confidentiality, integrity, availability)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            asset.name,
            asset.scope_id,
            asset.dic.confidentiality,
            asset.dic.integrity,
            asset.dic.availability,
        ],
    )
    .map_err(sql_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_essential(conn: &Connection, id: i64) -> Result<Option<EssentialAsset>, StorageError> {
    conn.prepare_cached(
        "SELECT id, name, scope_id, confidentiality, integrity, availability
         FROM essential_assets WHERE id = ?1",
    )
    .map_err(sql_err)?
    .query_row(params![id], |row| {
        Ok(EssentialAsset {
            id: row.get(0)?,
            name: row.get(1)?,
            scope_id: row.get(2)?,
            dic: dic_at(row, 3)?,
        })
    })
    .optional()
    .map_err(sql_err)
}

pub fn update_essential_dic(conn: &Connection, id: i64, dic: Dic) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE essential_assets SET confidentiality = ?2, integrity = ?3, availability = ?4
         WHERE id = ?1",
        params![id, dic.confidentiality, dic.integrity, dic.availability],
    )
    .map_err(sql_err)
}

// --- support assets ---

/// Insert a support asset whose scope has already been resolved.
pub fn insert_support(conn: &Connection, asset: &NewSupportAsset) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO support_assets (name, scope_id, parent_id, lifecycle_state)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            asset.name,
            asset.scope_id,
            asset.parent_id,
            asset.state.as_str()
        ],
    )
    .map_err(sql_err)?;
    Ok(conn.last_insert_rowid())
}

pub(crate) const SUPPORT_COLUMNS: &str = "id, name, scope_id, parent_id, lifecycle_state,
    inherited_confidentiality, inherited_integrity, inherited_availability";

pub(crate) fn map_support(row: &rusqlite::Row<'_>) -> rusqlite::Result<SupportAsset> {
    Ok(SupportAsset {
        id: row.get(0)?,
        name: row.get(1)?,
        scope_id: row.get(2)?,
        parent_id: row.get(3)?,
        state: parse_text(4, row.get(4)?)?,
        inherited: dic_at(row, 5)?,
    })
}

pub fn get_support(conn: &Connection, id: i64) -> Result<Option<SupportAsset>, StorageError> {
    let sql = format!("SELECT {SUPPORT_COLUMNS} FROM support_assets WHERE id = ?1");
    conn.prepare_cached(&sql)
        .map_err(sql_err)?
        .query_row(params![id], map_support)
        .optional()
        .map_err(sql_err)
}

pub fn set_support_state(
    conn: &Connection,
    id: i64,
    state: LifecycleState,
) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE support_assets SET lifecycle_state = ?2 WHERE id = ?1",
        params![id, state.as_str()],
    )
    .map_err(sql_err)
}

// --- suppliers and sites ---

pub fn insert_supplier(conn: &Connection, name: &str) -> Result<i64, StorageError> {
    conn.execute("INSERT INTO suppliers (name) VALUES (?1)", params![name])
        .map_err(sql_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_site(conn: &Connection, name: &str) -> Result<i64, StorageError> {
    conn.execute("INSERT INTO sites (name) VALUES (?1)", params![name])
        .map_err(sql_err)?;
    Ok(conn.last_insert_rowid())
}
