//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_claims::ClaimError;
use domain_export::ExportError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type")
            }
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let (message, details) = match self {
            ApiError::Validation { message, details } => (message, Some(details)),
            ApiError::BadRequest(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => (msg, None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ExtractionInFlight
            | ClaimError::StaleExtraction(_)
            | ClaimError::InvalidStatusTransition { .. }
            | ClaimError::NoOpenDraft => ApiError::Conflict(err.to_string()),
            ClaimError::UnknownPaymentMethod(_) => ApiError::BadRequest(err.to_string()),
            ClaimError::Validation(_) => ApiError::Validation {
                message: "Required claim fields are missing".to_string(),
                details: err.invalid_fields(),
            },
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        error!(error = %err, "Report export failed");
        ApiError::Internal(err.to_string())
    }
}
