use std::str::FromStr;

use rusqlite::types::Type;
use spof_core::errors::StorageError;
use spof_core::types::Dic;

pub(crate) fn sql_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Parse a TEXT column into one of the core enums.
pub(crate) fn parse_text<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_opt_text<T>(idx: usize, raw: Option<String>) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|value| parse_text(idx, value)).transpose()
}

/// Read three consecutive integer columns starting at `start` as a DIC triple.
pub(crate) fn dic_at(row: &rusqlite::Row<'_>, start: usize) -> rusqlite::Result<Dic> {
    let c: i64 = row.get(start)?;
    let i: i64 = row.get(start + 1)?;
    let a: i64 = row.get(start + 2)?;
    Dic::checked(c, i, a)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(start, Type::Integer, Box::new(e)))
}

/// Drain a `query_map` iterator into a Vec, mapping the first row error.
pub(crate) fn collect_rows<T, I>(rows: I) -> Result<Vec<T>, StorageError>
where
    I: Iterator<Item = rusqlite::Result<T>>,
{
    rows.map(|row| row.map_err(sql_err)).collect()
}
