use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use burrow_core::StoreError;
use thiserror::Error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// `message` is shown to the client; `detail` only goes to the log.
    #[error("internal error: {message}: {detail}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::InvalidShortCode(_) => {
                Self::BadRequest("Invalid shortcode format".to_string())
            }
            StoreError::InvalidValidity { .. } => {
                Self::BadRequest("Validity must be a positive integer".to_string())
            }
            StoreError::AlreadyExists(_) => Self::Conflict("Shortcode already exists".to_string()),
            StoreError::NotFound(_) => Self::NotFound("Short URL not found or expired".to_string()),
            err @ StoreError::GenerationExhausted { .. } => Self::Internal {
                message: "Failed to create short URL",
                detail: err.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg)
            | Self::Conflict(msg)
            | Self::NotFound(msg)
            | Self::MethodNotAllowed(msg) => msg,
            Self::Internal { message, detail } => {
                tracing::error!(%detail, "{message}");
                message.to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        });

        (status, body).into_response()
    }
}
