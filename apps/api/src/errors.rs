use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::RenderError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Render failure: {0}")]
    RenderFailure(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::OutOfRange { .. } => AppError::OutOfRange(e.to_string()),
            StoreError::UnknownField { .. } | StoreError::FieldKindMismatch { .. } => {
                AppError::Validation(e.to_string())
            }
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::MissingRequiredField(field) => {
                AppError::MissingRequiredField(field.to_string())
            }
            RenderError::Failure(msg) => AppError::RenderFailure(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::OutOfRange(msg) => (StatusCode::NOT_FOUND, "OUT_OF_RANGE", msg.clone()),
            AppError::MissingRequiredField(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_REQUIRED_FIELD",
                format!("Missing required field: {field}"),
            ),
            AppError::RenderFailure(msg) => {
                tracing::error!("Render failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILURE",
                    "The resume could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
