use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// One human-readable message per empty field, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join("; "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Username '{0}' is already registered")]
    DuplicateUsername(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid registration: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Convert RegistrationError to AppError for standardized error responses
impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation(errors) => AppError::Validation(errors.into_messages()),
            RegistrationError::Storage(e) => AppError::Database(e.to_string()),
            RegistrationError::PasswordHash(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
