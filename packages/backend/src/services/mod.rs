pub mod accounts;
pub mod decks;
pub mod review;

use thiserror::Error;

use crate::auth::AuthError;
use crate::response::AppError;

pub const WORD_NOT_FOUND_MESSAGE: &str = "Word not found or user not authorized";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing id and foreign owner look the same from outside.
    #[error("word not found")]
    NotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("user already exists")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        use axum::http::StatusCode;

        match err {
            ServiceError::NotFound => AppError::not_found(WORD_NOT_FOUND_MESSAGE),
            ServiceError::InvalidInput(message) => AppError::validation(message),
            ServiceError::UserExists => crate::response::json_error(
                StatusCode::BAD_REQUEST,
                "USER_EXISTS",
                "User already exists",
            ),
            ServiceError::InvalidCredentials => crate::response::json_error(
                StatusCode::BAD_REQUEST,
                "INVALID_CREDENTIALS",
                "Invalid credentials",
            ),
            ServiceError::Auth(err) => AppError::internal(err.to_string()),
            ServiceError::Storage(err) => AppError::internal(err.to_string()),
        }
    }
}
