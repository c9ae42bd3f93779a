//! Live schema lookups
//!
//! Table and column names coming from a request are only interpolated into
//! SQL after they have been matched against these lookups.

use crate::db::cell_text;
use p3510_common::{Error, Result};
use sqlx::{Row, SqlitePool};

/// Default cap on values offered in a dropdown
pub const DISTINCT_LIMIT: i64 = 100;

/// Plain identifier: letters, digits and underscores, under 100 chars
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() < 100
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// User tables, sorted by name
pub async fn get_all_tables(pool: &SqlitePool) -> Result<Vec<String>> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

/// Column names of `table` in declaration order
pub async fn get_table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let table = require_table(pool, table).await?;
    columns_of(pool, &table).await
}

/// Distinct non-NULL values of `table.column`, sorted, at most `limit`
pub async fn get_distinct_values(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    limit: i64,
) -> Result<Vec<String>> {
    let table = require_table(pool, table).await?;
    let column = require_column(pool, &table, column).await?;

    let sql = format!(
        "SELECT DISTINCT {c} FROM {t} WHERE {c} IS NOT NULL ORDER BY {c} LIMIT ?",
        c = column,
        t = table
    );
    let rows = sqlx::query(&sql).bind(limit).fetch_all(pool).await?;
    Ok(rows.iter().filter_map(|row| cell_text(row, 0)).collect())
}

/// Canonical name of an existing table
pub async fn require_table(pool: &SqlitePool, name: &str) -> Result<String> {
    if !is_valid_identifier(name) {
        return Err(Error::InvalidInput(format!("Invalid table name: {}", name)));
    }

    get_all_tables(pool)
        .await?
        .into_iter()
        .find(|t| t.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidInput(format!("Unknown table: {}", name)))
}

/// Canonical name of an existing column of `table`
///
/// `table` must already have passed [`require_table`].
pub async fn require_column(pool: &SqlitePool, table: &str, name: &str) -> Result<String> {
    if !is_valid_identifier(name) {
        return Err(Error::InvalidInput(format!("Invalid column name: {}", name)));
    }

    columns_of(pool, table)
        .await?
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidInput(format!("Unknown column {} in {}", name, table)))
}

async fn columns_of(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    // PRAGMA table_info returns (cid, name, type, notnull, dflt_value, pk)
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(|row| row.get::<String, _>(1)).collect())
}
