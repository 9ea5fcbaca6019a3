//! Error types for the metadata refiner

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error codes reported in the `code` field of error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    MissingPath = 1,
    MissingIdentifier = 2,
    BadFormat = 3,
    BadValue = 4,
    ReferenceTable = 5,
}

/// Failures raised by the refinement pipelines.
///
/// A field or block that is simply absent is not an error: lookups return
/// `None` and the pipeline skips the step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefineError {
    /// A required key path is missing from the document.
    #[error("Missing required key: {path}")]
    MissingPath { path: String },

    /// The persistent identifier a pipeline links against is missing.
    #[error("DOI is missing from the metadata")]
    MissingIdentifier { key: String },

    /// A value is present but does not have the expected shape.
    #[error("Invalid {field}: {message}")]
    Format { field: String, message: String },
}

impl RefineError {
    /// Missing path error for the dotted join of `segments`
    pub fn missing_path(segments: &[&str]) -> Self {
        RefineError::MissingPath {
            path: segments.join("."),
        }
    }

    pub fn missing_identifier(key: &str) -> Self {
        RefineError::MissingIdentifier {
            key: key.to_string(),
        }
    }

    pub fn format(field: &str, message: impl Into<String>) -> Self {
        RefineError::Format {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Failures while loading the legacy title reference table
#[derive(Error, Debug)]
pub enum ReferenceTableError {
    #[error("cannot load reference table {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed reference table: {0}")]
    Csv(#[from] csv::Error),

    #[error("reference table loader did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Refine(#[from] RefineError),

    #[error("Reference table error: {0}")]
    ReferenceTable(#[from] ReferenceTableError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// True when the failure was caused by the request content
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::ReferenceTable(_))
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Refine(err @ RefineError::MissingPath { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::MissingPath,
                err.to_string(),
            ),
            AppError::Refine(err @ RefineError::MissingIdentifier { .. }) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::MissingIdentifier,
                err.to_string(),
            ),
            AppError::Refine(err @ RefineError::Format { .. }) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadFormat, err.to_string())
            }
            AppError::ReferenceTable(e) => {
                tracing::error!("Reference table error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::ReferenceTable,
                    "Reference table unavailable".to_string(),
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for pipeline operations
pub type RefineResult<T> = Result<T, RefineError>;
