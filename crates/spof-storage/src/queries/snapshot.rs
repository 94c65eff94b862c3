//! Consistent graph snapshot for one detection pass.

use rusqlite::{params, Connection};
use spof_core::errors::StorageError;
use spof_core::types::{EdgeFamily, EdgeRecord, GraphSnapshot};

use super::assets::{get_support, map_support, SUPPORT_COLUMNS};
use super::edges::{family_table, map_edge, select_edges_sql, support_alias};
use super::util::{collect_rows, sql_err};

/// The scope `?1` and every scope nested below it. UNION stops on cycles.
const SCOPE_TREE_CTE: &str = "WITH RECURSIVE scope_tree(id) AS (
    SELECT id FROM scopes WHERE id = ?1
    UNION
    SELECT s.id FROM scopes s JOIN scope_tree st ON s.parent_id = st.id
)";

/// Read the four edge families and their support assets.
///
/// Must run inside one read transaction to observe a single state.
pub fn load_snapshot(
    conn: &Connection,
    scope: Option<i64>,
) -> Result<GraphSnapshot, StorageError> {
    let mut snapshot = GraphSnapshot::default();
    for family in EdgeFamily::ALL {
        *snapshot.edges_mut(family) = load_family(conn, family, scope)?;
    }

    let supports_sql = match scope {
        Some(_) => format!(
            "{SCOPE_TREE_CTE} SELECT {SUPPORT_COLUMNS} FROM support_assets
             WHERE scope_id IN (SELECT id FROM scope_tree)"
        ),
        None => format!("SELECT {SUPPORT_COLUMNS} FROM support_assets"),
    };
    let mut stmt = conn.prepare_cached(&supports_sql).map_err(sql_err)?;
    let rows = match scope {
        Some(scope_id) => stmt.query_map(params![scope_id], map_support),
        None => stmt.query_map([], map_support),
    }
    .map_err(sql_err)?;
    for support in collect_rows(rows)? {
        snapshot.supports.insert(support.id, support);
    }

    tracing::debug!(
        scope = ?scope,
        edges = snapshot.edge_count(),
        supports = snapshot.supports.len(),
        "graph snapshot loaded"
    );
    Ok(snapshot)
}

/// The part of the graph the rules read when judging one edge of `family`
/// between `source_id` and `target_id`: every edge of that family sharing
/// the counted endpoint (the support asset, or the site for site↔supplier),
/// plus that support asset.
pub fn load_neighbourhood(
    conn: &Connection,
    family: EdgeFamily,
    source_id: i64,
    target_id: i64,
) -> Result<GraphSnapshot, StorageError> {
    let ft = family_table(family);
    let (column, anchor_id) = match family {
        EdgeFamily::EssentialSupport => (ft.target_column, target_id),
        _ => (ft.source_column, source_id),
    };
    let sql = format!("{} WHERE e.{column} = ?1 ORDER BY e.id", select_edges_sql(family));

    let map = move |row: &rusqlite::Row<'_>| map_edge(family, row);
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt.query_map(params![anchor_id], map).map_err(sql_err)?;

    let mut snapshot = GraphSnapshot::default();
    *snapshot.edges_mut(family) = collect_rows(rows)?;
    if support_alias(family).is_some() {
        if let Some(support) = get_support(conn, anchor_id)? {
            snapshot.supports.insert(support.id, support);
        }
    }
    Ok(snapshot)
}

fn load_family(
    conn: &Connection,
    family: EdgeFamily,
    scope: Option<i64>,
) -> Result<Vec<EdgeRecord>, StorageError> {
    // Site↔supplier edges have no support endpoint and are never filtered.
    let filter = scope.zip(support_alias(family));
    let sql = match filter {
        Some((_, alias)) => format!(
            "{SCOPE_TREE_CTE} {} WHERE {alias}.scope_id IN (SELECT id FROM scope_tree)
             ORDER BY e.id",
            select_edges_sql(family)
        ),
        None => format!("{} ORDER BY e.id", select_edges_sql(family)),
    };

    let map = move |row: &rusqlite::Row<'_>| map_edge(family, row);
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = match filter {
        Some((scope_id, _)) => stmt.query_map(params![scope_id], map),
        None => stmt.query_map([], map),
    }
    .map_err(sql_err)?;
    collect_rows(rows)
}
