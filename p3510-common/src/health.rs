//! `/health` route shared by both servers

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Status, module name and version
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
}

/// GET /health for the binary named `module`
///
/// Callers pass their own `CARGO_PKG_NAME` and `CARGO_PKG_VERSION`.
pub fn health_routes<S>(module: &'static str, version: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let response = HealthResponse {
        status: "ok",
        module,
        version,
    };
    Router::new().route("/health", get(move || async move { Json(response) }))
}
