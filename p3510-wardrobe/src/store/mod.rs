//! Storage for wardrobe records
//!
//! `WardrobeStore` speaks in untyped JSON rows so it stays object safe; the
//! typed helpers below convert to and from [`Record`] types.

use crate::model::Record;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Store returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse store data: {0}")]
    Parse(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid store configuration: {0}")]
    Config(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Equality condition on one column
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: String,
}

pub fn eq(column: &'static str, value: impl Into<String>) -> Filter {
    Filter {
        column,
        value: value.into(),
    }
}

/// Table-level operations of a wardrobe backend
#[async_trait]
pub trait WardrobeStore: Send + Sync {
    /// Rows matching every filter, ascending by `order` when given
    async fn select(
        &self,
        table: &'static str,
        filters: &[Filter],
        order: Option<&'static str>,
    ) -> StoreResult<Vec<Value>>;

    /// Insert a row and return it with its assigned id
    async fn insert(&self, table: &'static str, row: Value) -> StoreResult<Value>;

    /// Overwrite the given columns of row `id`
    async fn update(&self, table: &'static str, id: &str, changes: Value) -> StoreResult<()>;

    /// Delete rows matching every filter and return how many went.
    /// An empty filter list is refused with `StoreError::Config`.
    async fn delete(&self, table: &'static str, filters: &[Filter]) -> StoreResult<usize>;
}

/// Guard shared by the backends: a delete must name at least one filter
pub(crate) fn require_filters(table: &str, filters: &[Filter]) -> StoreResult<()> {
    if filters.is_empty() {
        return Err(StoreError::Config(format!(
            "refusing unfiltered delete on {}",
            table
        )));
    }
    Ok(())
}

/// Text form of a scalar JSON cell, used for filter matching
pub(crate) fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse<R: Record>(row: Value) -> StoreResult<R> {
    serde_json::from_value(row).map_err(|e| StoreError::Parse(format!("{}: {}", R::TABLE, e)))
}

fn to_row<R: Record>(record: &R) -> StoreResult<Value> {
    let mut row = serde_json::to_value(record).map_err(|e| StoreError::Parse(e.to_string()))?;
    if let Value::Object(map) = &mut row {
        map.remove("id");
    }
    Ok(row)
}

/// All records matching `filters`, in the table's list order
pub async fn fetch_all<R: Record>(store: &dyn WardrobeStore, filters: &[Filter]) -> StoreResult<Vec<R>> {
    store
        .select(R::TABLE, filters, R::ORDER)
        .await?
        .into_iter()
        .map(parse)
        .collect()
}

/// The record with `id`, or `NotFound`
pub async fn fetch_one<R: Record>(store: &dyn WardrobeStore, id: &str) -> StoreResult<R> {
    store
        .select(R::TABLE, &[eq("id", id)], None)
        .await?
        .into_iter()
        .next()
        .map(parse)
        .unwrap_or_else(|| Err(StoreError::NotFound(format!("{} {}", R::TABLE, id))))
}

/// Insert a new record; the returned copy carries the assigned id
pub async fn create<R: Record>(store: &dyn WardrobeStore, record: &R) -> StoreResult<R> {
    parse(store.insert(R::TABLE, to_row(record)?).await?)
}

/// Write every field of an existing record
pub async fn save<R: Record>(store: &dyn WardrobeStore, record: &R) -> StoreResult<()> {
    store.update(R::TABLE, record.id(), to_row(record)?).await
}

pub async fn remove<R: Record>(store: &dyn WardrobeStore, filters: &[Filter]) -> StoreResult<usize> {
    store.delete(R::TABLE, filters).await
}
