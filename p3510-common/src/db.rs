//! SQLite pool setup
//!
//! Both applications talk to SQLite through a shared `SqlitePool`. Schema
//! statements are supplied by the caller and must be idempotent
//! (`CREATE TABLE IF NOT EXISTS`).

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open (creating if needed) the database file and apply `schema`
pub async fn open_database(db_path: &Path, schema: &[&str]) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;
    prepare(&pool, schema).await?;

    Ok(pool)
}

/// Single-connection in-memory database with `schema` applied
///
/// Every connection to `sqlite::memory:` is a separate database, so the pool
/// is pinned to one connection that never expires.
pub async fn open_in_memory(schema: &[&str]) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    prepare(&pool, schema).await?;
    Ok(pool)
}

async fn prepare(pool: &SqlitePool, schema: &[&str]) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    for statement in schema {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
