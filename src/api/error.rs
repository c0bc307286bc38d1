//! API error types with structured JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::BackendError;
use crate::export::ExportError;
use crate::models::ValidationError;
use crate::session_state::SessionStateError;
use crate::workflow::AssessmentError;

/// Message shown to the user for any prediction service failure.
pub const BACKEND_FAILURE_MESSAGE: &str = "Something went wrong connecting to the backend.";

/// Structured error response body for the front end.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    /// Input field to highlight (validation errors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Underlying cause, shown under the user message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    Validation(ValidationError),
    /// Body is not JSON, misses a field or holds a non-numeric value.
    #[error("Invalid request body: {detail}")]
    InvalidBody { status: StatusCode, detail: String },
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("Backend error (status {status}): {body}")]
    BackendStatus { status: u16, body: String },
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
    #[error("Nothing to export")]
    NothingToExport,
    #[error("No assessment yet")]
    NoAssessment,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field, detail) = match &self {
            ApiError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                format!(
                    "{} must be between {} and {}",
                    e.field, e.allowed_range.min, e.allowed_range.max
                ),
                Some(e.field.wire_key()),
                Some(e.to_string()),
            ),
            ApiError::InvalidBody { status, detail } => (
                *status,
                "INVALID_BODY",
                "All eight measurements must be provided as numbers".to_string(),
                None,
                Some(detail.clone()),
            ),
            ApiError::BackendUnavailable(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "BACKEND_UNAVAILABLE",
                BACKEND_FAILURE_MESSAGE.to_string(),
                None,
                Some(detail.clone()),
            ),
            ApiError::BackendStatus { status, body } => (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                BACKEND_FAILURE_MESSAGE.to_string(),
                None,
                Some(format!("status {status}: {body}")),
            ),
            ApiError::MalformedResponse(detail) => (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_RESPONSE",
                BACKEND_FAILURE_MESSAGE.to_string(),
                None,
                Some(detail.clone()),
            ),
            ApiError::NothingToExport => (
                StatusCode::NOT_FOUND,
                "NOTHING_TO_EXPORT",
                "No assessment to export yet".to_string(),
                None,
                None,
            ),
            ApiError::NoAssessment => (
                StatusCode::NOT_FOUND,
                "NO_ASSESSMENT",
                "No assessment yet; submit the form first".to_string(),
                None,
                None,
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                field,
                detail,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable(detail) => ApiError::BackendUnavailable(detail),
            BackendError::Status { status, body } => ApiError::BackendStatus { status, body },
            BackendError::MalformedResponse(detail) => ApiError::MalformedResponse(detail),
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::Validation(e) => ApiError::Validation(e),
            AssessmentError::Backend { call, source } => {
                tracing::warn!(%call, error = %source, "Assessment aborted by backend failure");
                source.into()
            }
            AssessmentError::Session(e) => e.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NothingToExport => ApiError::NothingToExport,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<SessionStateError> for ApiError {
    fn from(err: SessionStateError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
