//! Type-safe error codes for API responses.
//!
//! Each code has a string form sent to clients (e.g. `"VALIDATION_ERROR"`)
//! and a default human-readable message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body is malformed or fails a field rule
    ValidationError,

    /// Invalid UUID format in a path parameter
    InvalidUuid,

    /// Requested resource was not found
    NotFound,

    /// Authentication credentials are missing or invalid
    Unauthorized,

    /// A unique field already holds the submitted value
    Conflict,

    /// Login credentials did not match
    InvalidCredentials,

    /// Login email has no account
    EmailNotFound,

    /// The store rejected the submitted document
    InvalidData,

    /// An unexpected internal server error occurred
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::EmailNotFound => "EMAIL_NOT_FOUND",
            ErrorCode::InvalidData => "INVALID_DATA",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub const fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidUuid => "Invalid UUID format",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Unauthorized => "Authentication required",
            ErrorCode::Conflict => "Resource already exists",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::EmailNotFound => "Email not found",
            ErrorCode::InvalidData => "Invalid data",
            ErrorCode::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::EmailNotFound,
            ErrorCode::InvalidCredentials,
            ErrorCode::InvalidData,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::json!(code.as_str()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::Conflict.to_string(), "CONFLICT");
    }
}
