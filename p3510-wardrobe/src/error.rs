//! Error types for the wardrobe app

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Handler failure; missing or foreign rows surface as `StoreError::NotFound`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Store(StoreError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", format!("{} not found", msg))
            }
            ApiError::Store(err) => {
                tracing::error!("Store request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", err.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
