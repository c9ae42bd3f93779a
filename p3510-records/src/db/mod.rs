//! Database access for the records app

pub mod repository;
pub mod schema;
pub mod values;

pub use repository::{row_exists, Repository};
pub use schema::SCHEMA;
pub use values::{cell_text, SqlValue};

use p3510_common::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Open the records database file, creating tables as needed
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    p3510_common::db::open_database(db_path, SCHEMA).await
}

/// In-memory records database
pub async fn connect_in_memory() -> Result<SqlitePool> {
    p3510_common::db::open_in_memory(SCHEMA).await
}
