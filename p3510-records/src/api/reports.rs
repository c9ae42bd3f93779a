//! JSON endpoints behind the report form
//!
//! These answer with a flat `{"error": "..."}` body on failure, which is
//! what the form script displays.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use crate::reports::{self, catalog, format_result, ParamSpec};
use crate::AppState;

/// Flat JSON error used by the report endpoints
#[derive(Debug)]
pub struct ReportError {
    status: StatusCode,
    message: String,
}

impl ReportError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ReportResult<T> = Result<T, ReportError>;

fn catalog_error(err: p3510_common::Error) -> ReportError {
    error!("Catalog lookup failed: {}", err);
    ReportError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// GET /get_params/:function
///
/// Unknown names get an empty list.
pub async fn get_params(Path(function): Path<String>) -> Json<&'static [ParamSpec]> {
    debug!("Params requested for {}", function);
    match reports::find(&function) {
        Some(report) => Json(report.params),
        None => {
            warn!("Function not found: {}", function);
            Json(&[])
        }
    }
}

/// GET /get_tables
pub async fn get_tables(State(state): State<AppState>) -> ReportResult<Json<Vec<String>>> {
    catalog::get_all_tables(&state.db)
        .await
        .map(Json)
        .map_err(catalog_error)
}

/// GET /get_columns/:table
pub async fn get_columns(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> ReportResult<Json<Vec<String>>> {
    catalog::get_table_columns(&state.db, &table)
        .await
        .map(Json)
        .map_err(catalog_error)
}

/// GET /get_column_values/:table/:column
pub async fn get_column_values(
    State(state): State<AppState>,
    Path((table, column)): Path<(String, String)>,
) -> ReportResult<Json<Vec<String>>> {
    catalog::get_distinct_values(&state.db, &table, &column, catalog::DISTINCT_LIMIT)
        .await
        .map(Json)
        .map_err(catalog_error)
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub function_name: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// POST /execute
///
/// `{"result": html}` on success, 404 for an unknown report, 400 when the
/// parameters are bad or the query fails.
pub async fn execute(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> ReportResult<Json<Value>> {
    debug!("Executing {} with {:?}", request.function_name, request.params);

    let report = reports::find(&request.function_name)
        .ok_or_else(|| ReportError::new(StatusCode::NOT_FOUND, "Function not found"))?;

    let bad_request = |err: p3510_common::Error| {
        warn!("Report {} failed: {}", report.name, err);
        ReportError::new(StatusCode::BAD_REQUEST, err.to_string())
    };

    let params = reports::coerce_params(report.params, &request.params).map_err(bad_request)?;
    let output = reports::run(&state.db, report, &params)
        .await
        .map_err(bad_request)?;

    Ok(Json(json!({ "result": format_result(&output) })))
}
