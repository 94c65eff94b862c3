//! Queries over the four edge tables.
//!
//! All families share one column layout (`criticality`, `redundancy_level`,
//! `is_spof`); only the endpoint columns differ, so every statement is
//! built from the family's [`FamilyTable`].

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use spof_core::errors::StorageError;
use spof_core::types::{Criticality, EdgeFamily, EdgeRecord, Redundancy};

use super::assets::NodeKind;
use super::util::{collect_rows, parse_opt_text, parse_text, sql_err};

/// Upper bound on bound parameters per bulk statement.
const BULK_CHUNK: usize = 500;

/// Table layout of one edge family.
#[derive(Debug, Clone, Copy)]
pub struct FamilyTable {
    pub table: &'static str,
    pub source_column: &'static str,
    pub target_column: &'static str,
    pub source: NodeKind,
    pub target: NodeKind,
    pub has_dependency_type: bool,
}

pub fn family_table(family: EdgeFamily) -> FamilyTable {
    match family {
        EdgeFamily::EssentialSupport => FamilyTable {
            table: "essential_support_edges",
            source_column: "essential_id",
            target_column: "support_id",
            source: NodeKind::Essential,
            target: NodeKind::Support,
            has_dependency_type: true,
        },
        EdgeFamily::SupportSupplier => FamilyTable {
            table: "support_supplier_edges",
            source_column: "support_id",
            target_column: "supplier_id",
            source: NodeKind::Support,
            target: NodeKind::Supplier,
            has_dependency_type: false,
        },
        EdgeFamily::SupportSite => FamilyTable {
            table: "support_site_edges",
            source_column: "support_id",
            target_column: "site_id",
            source: NodeKind::Support,
            target: NodeKind::Site,
            has_dependency_type: false,
        },
        EdgeFamily::SiteSupplier => FamilyTable {
            table: "site_supplier_edges",
            source_column: "site_id",
            target_column: "supplier_id",
            source: NodeKind::Site,
            target: NodeKind::Supplier,
            has_dependency_type: false,
        },
    }
}

/// User-editable edge attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeAttributes {
    pub criticality: Criticality,
    pub redundancy: Option<Redundancy>,
    /// Stored for essential↔support edges only.
    pub dependency_type: Option<String>,
}

impl EdgeAttributes {
    pub fn new(criticality: Criticality) -> Self {
        Self {
            criticality,
            redundancy: None,
            dependency_type: None,
        }
    }

    pub fn with_redundancy(mut self, redundancy: Redundancy) -> Self {
        self.redundancy = Some(redundancy);
        self
    }

    pub fn with_dependency_type(mut self, dependency_type: impl Into<String>) -> Self {
        self.dependency_type = Some(dependency_type.into());
        self
    }
}

/// Input for creating an edge. `source`/`target` follow the family's
/// orientation (essential → support, support → supplier, support → site,
/// site → supplier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEdge {
    pub family: EdgeFamily,
    pub source_id: i64,
    pub target_id: i64,
    pub attributes: EdgeAttributes,
}

impl NewEdge {
    pub fn new(
        family: EdgeFamily,
        source_id: i64,
        target_id: i64,
        attributes: EdgeAttributes,
    ) -> Self {
        Self {
            family,
            source_id,
            target_id,
            attributes,
        }
    }
}

/// SELECT over one family with both endpoint names joined.
/// Aliases: `e` edge, `s` source node, `t` target node.
pub(crate) fn select_edges_sql(family: EdgeFamily) -> String {
    let ft = family_table(family);
    let dependency_type = if ft.has_dependency_type {
        "e.dependency_type"
    } else {
        "NULL"
    };
    format!(
        "SELECT e.id, e.{src}, s.name, e.{tgt}, t.name, {dependency_type},
                e.criticality, e.redundancy_level, e.is_spof
         FROM {table} e
         JOIN {src_table} s ON s.id = e.{src}
         JOIN {tgt_table} t ON t.id = e.{tgt}",
        src = ft.source_column,
        tgt = ft.target_column,
        table = ft.table,
        src_table = ft.source.table(),
        tgt_table = ft.target.table(),
    )
}

/// Alias of the support-asset endpoint in [`select_edges_sql`], if any.
pub(crate) fn support_alias(family: EdgeFamily) -> Option<&'static str> {
    match family {
        EdgeFamily::EssentialSupport => Some("t"),
        EdgeFamily::SupportSupplier | EdgeFamily::SupportSite => Some("s"),
        EdgeFamily::SiteSupplier => None,
    }
}

pub(crate) fn map_edge(
    family: EdgeFamily,
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<EdgeRecord> {
    Ok(EdgeRecord {
        id: row.get(0)?,
        family,
        source_id: row.get(1)?,
        source_name: row.get(2)?,
        target_id: row.get(3)?,
        target_name: row.get(4)?,
        dependency_type: row.get(5)?,
        criticality: parse_text::<Criticality>(6, row.get(6)?)?,
        redundancy: parse_opt_text::<Redundancy>(7, row.get(7)?)?,
        is_spof: row.get(8)?,
    })
}

pub fn insert_edge(conn: &Connection, edge: &NewEdge) -> Result<i64, StorageError> {
    let ft = family_table(edge.family);
    let attrs = &edge.attributes;
    let redundancy = attrs.redundancy.map(|r| r.as_str());
    let inserted = if ft.has_dependency_type {
        let sql = format!(
            "INSERT INTO {} ({}, {}, criticality, redundancy_level, dependency_type)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            ft.table, ft.source_column, ft.target_column
        );
        conn.execute(
            &sql,
            params![
                edge.source_id,
                edge.target_id,
                attrs.criticality.as_str(),
                redundancy,
                attrs.dependency_type
            ],
        )
    } else {
        let sql = format!(
            "INSERT INTO {} ({}, {}, criticality, redundancy_level) VALUES (?1, ?2, ?3, ?4)",
            ft.table, ft.source_column, ft.target_column
        );
        conn.execute(
            &sql,
            params![
                edge.source_id,
                edge.target_id,
                attrs.criticality.as_str(),
                redundancy
            ],
        )
    };
    inserted.map_err(sql_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_edge(
    conn: &Connection,
    family: EdgeFamily,
    id: i64,
) -> Result<Option<EdgeRecord>, StorageError> {
    let sql = format!("{} WHERE e.id = ?1", select_edges_sql(family));
    conn.prepare_cached(&sql)
        .map_err(sql_err)?
        .query_row(params![id], |row| map_edge(family, row))
        .optional()
        .map_err(sql_err)
}

/// All edges of one family, ordered by id.
pub fn list_edges(conn: &Connection, family: EdgeFamily) -> Result<Vec<EdgeRecord>, StorageError> {
    let sql = format!("{} ORDER BY e.id", select_edges_sql(family));
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| map_edge(family, row))
        .map_err(sql_err)?;
    collect_rows(rows)
}

pub fn find_edge_between(
    conn: &Connection,
    family: EdgeFamily,
    source_id: i64,
    target_id: i64,
) -> Result<Option<i64>, StorageError> {
    let ft = family_table(family);
    let sql = format!(
        "SELECT id FROM {} WHERE {} = ?1 AND {} = ?2",
        ft.table, ft.source_column, ft.target_column
    );
    conn.prepare_cached(&sql)
        .map_err(sql_err)?
        .query_row(params![source_id, target_id], |row| row.get(0))
        .optional()
        .map_err(sql_err)
}

pub fn update_edge_attributes(
    conn: &Connection,
    family: EdgeFamily,
    id: i64,
    attrs: &EdgeAttributes,
) -> Result<usize, StorageError> {
    let ft = family_table(family);
    let redundancy = attrs.redundancy.map(|r| r.as_str());
    let updated = if ft.has_dependency_type {
        let sql = format!(
            "UPDATE {} SET criticality = ?2, redundancy_level = ?3, dependency_type = ?4
             WHERE id = ?1",
            ft.table
        );
        conn.execute(
            &sql,
            params![id, attrs.criticality.as_str(), redundancy, attrs.dependency_type],
        )
    } else {
        let sql = format!(
            "UPDATE {} SET criticality = ?2, redundancy_level = ?3 WHERE id = ?1",
            ft.table
        );
        conn.execute(&sql, params![id, attrs.criticality.as_str(), redundancy])
    };
    updated.map_err(sql_err)
}

pub fn delete_edge(conn: &Connection, family: EdgeFamily, id: i64) -> Result<usize, StorageError> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", family_table(family).table);
    conn.execute(&sql, params![id]).map_err(sql_err)
}

/// Set `is_spof` on the listed edges, one UPDATE per chunk of ids.
/// The caller owns the transaction that makes this atomic.
pub fn set_spof_flags(
    conn: &Connection,
    family: EdgeFamily,
    edge_ids: &[i64],
    value: bool,
) -> Result<usize, StorageError> {
    let table = family_table(family).table;
    let mut written = 0;
    for chunk in edge_ids.chunks(BULK_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!(
            "UPDATE {table} SET is_spof = {} WHERE id IN ({placeholders})",
            i64::from(value)
        );
        written += conn
            .execute(&sql, params_from_iter(chunk.iter()))
            .map_err(sql_err)?;
    }
    Ok(written)
}
