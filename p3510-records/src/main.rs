//! p3510-records - student support records web app
//!
//! Serves the records CRUD pages and the report runner over a SQLite
//! database created on first start.

use anyhow::Result;
use clap::Parser;
use p3510_common::config::{database_file, ServerArgs, ServerSettings, TomlConfig, DEFAULT_DB_NAME};
use p3510_records::{build_router, db, AppState};
use std::path::PathBuf;
use tracing::{error, info};

const DEFAULT_PORT: u16 = 5001;

/// Command-line arguments for p3510-records
#[derive(Parser, Debug)]
#[command(name = "p3510-records")]
#[command(about = "Student support records and reports")]
#[command(version)]
struct Args {
    #[command(flatten)]
    server: ServerArgs,

    /// Database name or SQLite file path
    #[arg(long, env = "DB_NAME")]
    db_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let file = TomlConfig::load_optional(args.server.config.as_deref())?;
    let settings = ServerSettings::resolve(&args.server, &file, DEFAULT_PORT);

    p3510_common::logging::init_tracing(&settings.log_level);

    info!(
        "Starting p3510-records v{} (debug: {})",
        env!("CARGO_PKG_VERSION"),
        settings.debug
    );

    let db_name = args
        .db_name
        .or(file.database.name)
        .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
    let db_path: PathBuf = database_file(&db_name);
    info!("Database path: {}", db_path.display());

    let pool = match db::connect(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(pool));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("p3510-records listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
