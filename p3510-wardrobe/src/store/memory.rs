//! In-process store used when no backend URL is configured, and by tests

use super::{cell_text, require_filters, Filter, StoreError, StoreResult, WardrobeStore};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Tables of JSON rows held in memory; ids are random UUIDs
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|f| {
        row.get(f.column)
            .and_then(cell_text)
            .is_some_and(|v| v == f.value)
    })
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl WardrobeStore for MemoryStore {
    async fn select(
        &self,
        table: &'static str,
        filters: &[Filter],
        order: Option<&'static str>,
    ) -> StoreResult<Vec<Value>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| matches(r, filters)).cloned().collect())
            .unwrap_or_default();

        if let Some(column) = order {
            rows.sort_by(|a, b| compare(a.get(column), b.get(column)));
        }
        Ok(rows)
    }

    async fn insert(&self, table: &'static str, mut row: Value) -> StoreResult<Value> {
        let Value::Object(map) = &mut row else {
            return Err(StoreError::Parse(format!("{} row is not an object", table)));
        };
        map.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));

        self.tables
            .write()
            .await
            .entry(table)
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &'static str, id: &str, changes: Value) -> StoreResult<()> {
        let Value::Object(changes) = changes else {
            return Err(StoreError::Parse(format!("{} changes are not an object", table)));
        };

        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(table)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            })
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", table, id)))?;

        if let Value::Object(map) = row {
            for (column, value) in changes {
                if column != "id" {
                    map.insert(column, value);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &'static str, filters: &[Filter]) -> StoreResult<usize> {
        require_filters(table, filters)?;

        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };

        let before = rows.len();
        rows.retain(|r| !matches(r, filters));
        Ok(before - rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert("slots", json!({"name": "tops"})).await.unwrap();
        let b = store.insert("slots", json!({"name": "shoes"})).await.unwrap();

        assert!(a["id"].is_string());
        assert_ne!(a["id"], b["id"]);
        assert_eq!(store.select("slots", &[], None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_select_filters_and_orders() {
        let store = MemoryStore::new();
        for (user, name, position) in [("u1", "shoes", 1), ("u2", "hats", 0), ("u1", "tops", 0)] {
            store
                .insert("slots", json!({"user_id": user, "name": name, "position": position}))
                .await
                .unwrap();
        }

        let rows = store
            .select("slots", &[eq("user_id", "u1")], Some("position"))
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["tops", "shoes"]);

        let by_number = store.select("slots", &[eq("position", "0")], None).await.unwrap();
        assert_eq!(by_number.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let row = store.insert("users", json!({"username": "ada"})).await.unwrap();
        let id = row["id"].as_str().unwrap().to_string();

        store.update("users", &id, json!({"username": "lovelace"})).await.unwrap();
        let rows = store.select("users", &[eq("id", id.clone())], None).await.unwrap();
        assert_eq!(rows[0]["username"], "lovelace");
        assert_eq!(rows[0]["id"], id.as_str());

        assert!(matches!(
            store.update("users", "missing", json!({})).await,
            Err(StoreError::NotFound(_))
        ));

        assert_eq!(store.delete("users", &[eq("id", id)]).await.unwrap(), 1);
        assert_eq!(store.delete("nothing", &[eq("id", "x")]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unfiltered_delete_is_refused() {
        let store = MemoryStore::new();
        store.insert("items", json!({"name": "scarf"})).await.unwrap();

        assert!(matches!(
            store.delete("items", &[]).await,
            Err(StoreError::Config(_))
        ));
        assert_eq!(store.select("items", &[], None).await.unwrap().len(), 1);
    }
}
