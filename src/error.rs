use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::*;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("User not found")]
    UserNotFound,

    #[error("No data found: {0}")]
    NoDataFound(String),

    #[error("Sync limit exceeded")]
    SyncLimitExceeded,

    #[error("Read limit exceeded")]
    ReadLimitExceeded,

    #[error("Activity limit exceeded")]
    ActivityLimitExceeded,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Analytics query failure; carries the fixed message shown to the caller
    #[error("Store error: {0}")]
    Store(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidArgument(msg) => {
                tracing::warn!("Invalid input: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::InvalidPayload(msg) => {
                tracing::warn!("Invalid JSON input: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, ERR_USER_NOT_FOUND.to_string()),
            AppError::NoDataFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::SyncLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, ERR_SYNC_LIMIT.to_string())
            }
            AppError::ReadLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, ERR_READ_LIMIT.to_string())
            }
            AppError::ActivityLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, ERR_ACTIVITY_LIMIT.to_string())
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                (StatusCode::BAD_REQUEST, ERR_JSON_PROCESSING.to_string())
            }
            AppError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(ref e) => {
                tracing::error!("Unexpected error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
