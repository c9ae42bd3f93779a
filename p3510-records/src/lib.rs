//! p3510-records library - student support records
//!
//! CRUD pages for every records table plus the ad-hoc report runner.

use axum::Router;
use p3510_common::health::health_routes;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod entities;
pub mod error;
pub mod render;
pub mod reports;
pub mod validation;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let pages = Router::new()
        .route("/", get(api::home))
        .route("/peopletab", get(api::people_tab))
        .route("/visitstab", get(api::visits_tab))
        .route("/followupstab", get(api::followups_tab))
        .route("/misctab", get(api::misc_tab));

    let reports = Router::new()
        .route("/get_params/:function", get(api::get_params))
        .route("/get_tables", get(api::get_tables))
        .route("/get_columns/:table", get(api::get_columns))
        .route("/get_column_values/:table/:column", get(api::get_column_values))
        .route("/execute", post(api::execute));

    let records = entities::ENTITIES
        .iter()
        .copied()
        .fold(Router::new(), |router, spec| router.merge(api::entity_routes(spec)));

    Router::new()
        .merge(pages)
        .merge(reports)
        .merge(records)
        .merge(health_routes::<AppState>(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
