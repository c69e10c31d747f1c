//! Error types for the car registry
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::repository::RepositoryError;

// == App Error Enum ==
/// Unified error type for the registry services and API.
#[derive(Error, Debug)]
pub enum AppError {
    /// No car matches the lookup or mutation target
    #[error("Car not found: {0}")]
    CarNotFound(String),

    /// No dealer matches the lookup or mutation target
    #[error("Dealer not found: {0}")]
    DealerNotFound(String),

    /// A car with the same VIN already exists, or a bulk add had nothing new
    #[error("Car already exists: {0}")]
    CarAlreadyExists(String),

    /// A dealer with the same name already exists
    #[error("Dealer already exists: {0}")]
    DealerAlreadyExists(String),

    /// Bulk add persisted some, but not all, of its candidates.
    /// The `saved` records stay persisted.
    #[error("Bulk addition failed: saved {saved} of {attempted} cars")]
    BulkAdditionFailed { attempted: usize, saved: usize },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected repository or server failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::CarNotFound(_) | AppError::DealerNotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            AppError::CarAlreadyExists(_) | AppError::DealerAlreadyExists(_) => {
                (StatusCode::CONFLICT, json!({ "error": self.to_string() }))
            }
            AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::BulkAdditionFailed { attempted, saved } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": self.to_string(),
                    "attempted": attempted,
                    "saved": saved,
                }),
            ),
            AppError::Internal(detail) => {
                error!("500 Internal Server Error - {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the registry.
pub type Result<T> = std::result::Result<T, AppError>;
