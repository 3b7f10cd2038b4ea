use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::application::services::stats::StatsError;
use crate::domain::RepositoryError;
use crate::domain::metadata::MetadataError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("metadata provider error: {0}")]
    Metadata(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::NotFound,
            RepositoryError::Conflict(message) => AppError::Conflict(message),
            RepositoryError::Unexpected(message) => AppError::Unexpected(message),
        }
    }
}

impl From<MetadataError> for AppError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::NotFound => AppError::NotFound,
            other => AppError::Metadata(other.to_string()),
        }
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        AppError::Unexpected(err.to_string())
    }
}

/// JSON body for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Handler-facing error that renders an [`AppError`] as an HTTP response.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::Conflict(message) => (StatusCode::CONFLICT, message),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Metadata(message) => {
                warn!(error = %message, "metadata provider failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Movie metadata provider is unavailable".to_string(),
                )
            }
            AppError::Unexpected(message) => {
                error!(error = %message, "unexpected error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
