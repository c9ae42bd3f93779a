//! Generic data access driven by entity descriptors
//!
//! Identifiers interpolated into SQL come only from the static descriptors;
//! every user-supplied value is bound.

use super::values::{bind_values, cell_text, row_texts, SqlValue};
use crate::entities::{EntitySpec, Reference};
use p3510_common::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

/// One row of a list page: the id plus the display columns
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: i64,
    pub cells: Vec<String>,
}

/// Data access for one entity table
pub struct Repository<'a> {
    pool: &'a SqlitePool,
    spec: &'static EntitySpec,
}

impl<'a> Repository<'a> {
    pub fn new(pool: &'a SqlitePool, spec: &'static EntitySpec) -> Self {
        Self { pool, spec }
    }

    pub async fn list(&self) -> Result<Vec<ListRow>> {
        let rows = sqlx::query(self.spec.list_sql).fetch_all(self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| {
                let mut cells = row_texts(row);
                let id = if cells.is_empty() {
                    0
                } else {
                    cells.remove(0).parse().unwrap_or_default()
                };
                ListRow { id, cells }
            })
            .collect())
    }

    /// Current field values of a row as form text, or `None` when missing
    pub async fn get(&self, id: i64) -> Result<Option<HashMap<String, String>>> {
        let columns: Vec<&str> = self.spec.fields.iter().map(|f| f.column).collect();
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            columns.join(", "),
            self.spec.table,
            self.spec.id_column
        );

        let row = sqlx::query(&sql).bind(id).fetch_optional(self.pool).await?;

        Ok(row.map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| (column.to_string(), cell_text(&row, i).unwrap_or_default()))
                .collect()
        }))
    }

    /// Insert a row and return its new id
    pub async fn insert(&self, values: &[(&'static str, SqlValue)]) -> Result<i64> {
        let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
        let placeholders = vec!["?"; values.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.spec.table,
            columns.join(", "),
            placeholders
        );

        let bound: Vec<SqlValue> = values.iter().map(|(_, v)| v.clone()).collect();
        let result = bind_values(sqlx::query(&sql), &bound)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted {} row {}", self.spec.table, id);
        Ok(id)
    }

    /// Update a row; `false` when no row has that id
    pub async fn update(&self, id: i64, values: &[(&'static str, SqlValue)]) -> Result<bool> {
        let assignments: Vec<String> = values.iter().map(|(c, _)| format!("{} = ?", c)).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.spec.table,
            assignments.join(", "),
            self.spec.id_column
        );

        let mut bound: Vec<SqlValue> = values.iter().map(|(_, v)| v.clone()).collect();
        bound.push(SqlValue::Int(id));
        let result = bind_values(sqlx::query(&sql), &bound)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a row; `false` when no row has that id
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            self.spec.table, self.spec.id_column
        );
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// `(id, label)` choices for a foreign-key dropdown
    pub async fn options(&self, reference: Reference) -> Result<Vec<(String, String)>> {
        reference_options(self.pool, reference).await
    }
}

pub async fn reference_options(
    pool: &SqlitePool,
    reference: Reference,
) -> Result<Vec<(String, String)>> {
    let sql = format!(
        "SELECT {id}, {label} FROM {table} ORDER BY {label}",
        id = reference.id_column,
        label = reference.label_column,
        table = reference.table
    );

    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows
        .iter()
        .map(|row| {
            (
                cell_text(row, 0).unwrap_or_default(),
                cell_text(row, 1).unwrap_or_default(),
            )
        })
        .collect())
}

/// Whether a row other than `exclude_id` already holds `values` in `columns`
///
/// `table`, `id_column` and `columns` must come from a descriptor.
pub async fn row_exists(
    pool: &SqlitePool,
    table: &str,
    id_column: &str,
    columns: &[&str],
    values: &[SqlValue],
    exclude_id: Option<i64>,
) -> Result<bool> {
    let mut conditions: Vec<String> = columns.iter().map(|c| format!("{} = ?", c)).collect();
    let mut bound = values.to_vec();

    if let Some(id) = exclude_id {
        conditions.push(format!("{} != ?", id_column));
        bound.push(SqlValue::Int(id));
    }

    let sql = format!(
        "SELECT 1 FROM {} WHERE {} LIMIT 1",
        table,
        conditions.join(" AND ")
    );

    let found = bind_values(sqlx::query(&sql), &bound)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}
