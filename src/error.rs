use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed, missing or empty fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Fetch error: {0}")]
    Fetch(#[source] sqlx::Error),

    #[error("Write error: {0}")]
    Write(#[source] sqlx::Error),

    #[error("Not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation { ref missing } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing or empty fields: {}", missing.join(", ")),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::Fetch(e) => {
                error!("fetch error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load rooms".to_string(),
                )
            }
            AppError::Write(e) => {
                error!("write error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save changes".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
