pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body returned for every failed request.
///
/// ```json
/// { "error": "stock must be greater than or equal to 0", "code": "VALIDATION_ERROR" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error identifier
    pub code: ErrorCode,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own errors into this type so every route
/// answers with the same [`ErrorResponse`] shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Email not found: {0}")]
    EmailNotFound(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::Validation(_)
            | AppError::InvalidUuid(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials(_)
            | AppError::InvalidData(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::EmailNotFound(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) | AppError::Validation(_) => {
                ErrorCode::ValidationError
            }
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            AppError::InvalidData(_) => ErrorCode::InvalidData,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::EmailNotFound(_) => ErrorCode::EmailNotFound,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    /// Message sent to the client. Server-side faults are not echoed.
    fn client_message(self) -> String {
        match self {
            AppError::JsonExtractorRejection(e) => e.body_text(),
            AppError::InternalServerError(_) => self.code().default_message().to_string(),
            AppError::Validation(msg)
            | AppError::InvalidUuid(msg)
            | AppError::Conflict(msg)
            | AppError::InvalidCredentials(msg)
            | AppError::InvalidData(msg)
            | AppError::Unauthorized(msg)
            | AppError::EmailNotFound(msg)
            | AppError::NotFound(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(error_code = %code, "{}", self);
        } else {
            tracing::info!(error_code = %code, "{}", self);
        }

        error_response(status, code, self.client_message())
    }
}

/// Build an error response outside of the [`AppError`] flow.
pub fn error_response(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(code, message))).into_response()
}
