//! risk_criteria, risk_scale_levels and risk_matrix_cells queries.

use rusqlite::{params, Connection, OptionalExtension};
use spof_core::errors::StorageError;
use spof_core::matrix::{MatrixCell, RiskCriteria, RiskMatrix, ScaleLevel};

use super::util::{collect_rows, sql_err};

/// Input for creating a risk criteria. The matrix is always derived.
#[derive(Debug, Clone)]
pub struct NewRiskCriteria {
    pub name: String,
    pub likelihood: Vec<ScaleLevel>,
    pub impact: Vec<ScaleLevel>,
    pub risk_levels: Vec<ScaleLevel>,
    pub is_default: bool,
}

/// Which of the three scales a stored level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Likelihood,
    Impact,
    Risk,
}

impl ScaleAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Likelihood => "likelihood",
            Self::Impact => "impact",
            Self::Risk => "risk",
        }
    }
}

pub fn insert_criteria(conn: &Connection, name: &str) -> Result<i64, StorageError> {
    conn.execute("INSERT INTO risk_criteria (name) VALUES (?1)", params![name])
        .map_err(sql_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn criteria_exists(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    conn.prepare_cached("SELECT 1 FROM risk_criteria WHERE id = ?1")
        .map_err(sql_err)?
        .query_row(params![id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(sql_err)
}

/// Clear the previous default, then mark `id`. Returns rows marked (0 or 1).
pub fn set_default(conn: &Connection, id: i64) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE risk_criteria SET is_default = 0 WHERE is_default = 1 AND id != ?1",
        params![id],
    )
    .map_err(sql_err)?;
    conn.execute(
        "UPDATE risk_criteria SET is_default = 1 WHERE id = ?1",
        params![id],
    )
    .map_err(sql_err)
}

pub fn default_criteria_id(conn: &Connection) -> Result<Option<i64>, StorageError> {
    conn.prepare_cached("SELECT id FROM risk_criteria WHERE is_default = 1")
        .map_err(sql_err)?
        .query_row([], |row| row.get(0))
        .optional()
        .map_err(sql_err)
}

pub fn replace_scale(
    conn: &Connection,
    criteria_id: i64,
    axis: ScaleAxis,
    levels: &[ScaleLevel],
) -> Result<(), StorageError> {
    conn.execute(
        "DELETE FROM risk_scale_levels WHERE criteria_id = ?1 AND axis = ?2",
        params![criteria_id, axis.as_str()],
    )
    .map_err(sql_err)?;
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO risk_scale_levels (criteria_id, axis, level, name, color)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(sql_err)?;
    for level in levels {
        stmt.execute(params![
            criteria_id,
            axis.as_str(),
            level.level,
            level.name,
            level.color
        ])
        .map_err(sql_err)?;
    }
    Ok(())
}

pub fn replace_matrix(
    conn: &Connection,
    criteria_id: i64,
    matrix: &RiskMatrix,
) -> Result<(), StorageError> {
    conn.execute(
        "DELETE FROM risk_matrix_cells WHERE criteria_id = ?1",
        params![criteria_id],
    )
    .map_err(sql_err)?;
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO risk_matrix_cells (criteria_id, likelihood, impact, risk)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(sql_err)?;
    for cell in matrix.cells() {
        stmt.execute(params![criteria_id, cell.likelihood, cell.impact, cell.risk])
            .map_err(sql_err)?;
    }
    Ok(())
}

fn load_scale(
    conn: &Connection,
    criteria_id: i64,
    axis: ScaleAxis,
) -> Result<Vec<ScaleLevel>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT level, name, color FROM risk_scale_levels
             WHERE criteria_id = ?1 AND axis = ?2 ORDER BY level",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![criteria_id, axis.as_str()], |row| {
            Ok(ScaleLevel {
                level: row.get(0)?,
                name: row.get(1)?,
                color: row.get(2)?,
            })
        })
        .map_err(sql_err)?;
    collect_rows(rows)
}

fn load_matrix(conn: &Connection, criteria_id: i64) -> Result<RiskMatrix, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT likelihood, impact, risk FROM risk_matrix_cells WHERE criteria_id = ?1",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![criteria_id], |row| {
            Ok(MatrixCell {
                likelihood: row.get(0)?,
                impact: row.get(1)?,
                risk: row.get(2)?,
            })
        })
        .map_err(sql_err)?;
    Ok(collect_rows(rows)?.into_iter().collect())
}

/// Load a criteria with its scales and stored matrix.
pub fn load_criteria(conn: &Connection, id: i64) -> Result<Option<RiskCriteria>, StorageError> {
    let header: Option<(String, bool)> = conn
        .prepare_cached("SELECT name, is_default FROM risk_criteria WHERE id = ?1")
        .map_err(sql_err)?
        .query_row(params![id], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()
        .map_err(sql_err)?;
    let Some((name, is_default)) = header else {
        return Ok(None);
    };

    Ok(Some(RiskCriteria {
        id,
        name,
        likelihood: load_scale(conn, id, ScaleAxis::Likelihood)?,
        impact: load_scale(conn, id, ScaleAxis::Impact)?,
        risk_levels: load_scale(conn, id, ScaleAxis::Risk)?,
        matrix: load_matrix(conn, id)?,
        is_default,
    }))
}

pub fn delete_criteria(conn: &Connection, id: i64) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM risk_criteria WHERE id = ?1", params![id])
        .map_err(sql_err)
}
