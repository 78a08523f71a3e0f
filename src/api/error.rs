//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::analytics::UnknownName;
use crate::dataset::AnalysisError;
use crate::report::FormatError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Dataset or aggregation error
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Response rendering failed
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnknownName> for ApiError {
    fn from(err: UnknownName) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Zero-based index of the offending record, for data errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl ApiError {
    fn row(&self) -> Option<usize> {
        match self {
            ApiError::Analysis(AnalysisError::Data(err)) => Some(err.row()),
            _ => None,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Analysis(AnalysisError::Data(_))
            | ApiError::Analysis(AnalysisError::CountOverflow { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DATA_ERROR")
            }
            ApiError::Analysis(AnalysisError::EmptyInput { .. }) => {
                (StatusCode::NOT_FOUND, "NO_DATA")
            }
            ApiError::Analysis(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATASET_ERROR"),
            ApiError::Format(_) => (StatusCode::INTERNAL_SERVER_ERROR, "FORMAT_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
                row: self.row(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
