use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, TokenError};
use thiserror::Error;

pub const MSG_EMAIL_NOT_FOUND: &str = "No account is registered with this email";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MSG_INVALID_USER_DATA: &str = "Invalid user data";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("No user with email '{0}'")]
    EmailNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The store refused to persist a new account.
    #[error("User could not be stored: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Store(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(email) => {
                AppError::Conflict(format!("User with email '{}' already exists", email))
            }
            UserError::EmailNotFound(_) => AppError::EmailNotFound(MSG_EMAIL_NOT_FOUND.to_string()),
            UserError::InvalidCredentials => {
                AppError::InvalidCredentials(MSG_INVALID_CREDENTIALS.to_string())
            }
            UserError::InvalidData(_) => AppError::InvalidData(MSG_INVALID_USER_DATA.to_string()),
            UserError::Store(msg) | UserError::PasswordHash(msg) => {
                AppError::InternalServerError(msg)
            }
            UserError::Token(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Store(err.to_string())
    }
}
