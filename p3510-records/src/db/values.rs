//! Conversions between form text, bound parameters and SQLite cells

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, ValueRef};

/// A validated value ready to bind
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// Bind `values` in order
pub fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Text(s) => query.bind(s.clone()),
        };
    }
    query
}

/// Render column `index` of `row` as text; `None` for NULL
///
/// SQLite is dynamically typed, so each storage class is tried in turn.
pub fn cell_text(row: &SqliteRow, index: usize) -> Option<String> {
    let raw = row.try_get_raw(index).ok()?;
    if raw.is_null() {
        return None;
    }

    row.try_get::<String, _>(index)
        .ok()
        .or_else(|| row.try_get::<i64, _>(index).ok().map(|v| v.to_string()))
        .or_else(|| row.try_get::<f64, _>(index).ok().map(format_float))
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Render a whole row, NULL cells as empty strings
pub fn row_texts(row: &SqliteRow) -> Vec<String> {
    (0..row.len())
        .map(|i| cell_text(row, i).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cell_text_handles_each_storage_class() {
        let pool = p3510_common::db::open_in_memory(&[]).await.unwrap();
        let row = sqlx::query("SELECT 'abc', 42, 2.5, 3.0, NULL")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(cell_text(&row, 0).as_deref(), Some("abc"));
        assert_eq!(cell_text(&row, 1).as_deref(), Some("42"));
        assert_eq!(cell_text(&row, 2).as_deref(), Some("2.5"));
        assert_eq!(cell_text(&row, 3).as_deref(), Some("3"));
        assert_eq!(cell_text(&row, 4), None);
        assert_eq!(row_texts(&row), vec!["abc", "42", "2.5", "3", ""]);
    }

    #[tokio::test]
    async fn test_bind_values_in_order() {
        let pool = p3510_common::db::open_in_memory(&[]).await.unwrap();
        let values = vec![
            SqlValue::Text("x".to_string()),
            SqlValue::Int(7),
            SqlValue::Null,
        ];
        let row = bind_values(sqlx::query("SELECT ?, ?, ?"), &values)
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(row_texts(&row), vec!["x", "7", ""]);
    }
}
