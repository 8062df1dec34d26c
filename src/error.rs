use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::forms::InputError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] InputError),

    #[error("Password hashing error: {0}")]
    Password(String),

    #[error("Session error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),
}

impl AppError {
    /// Maps a UNIQUE constraint violation to `AlreadyExists`, everything else to `Database`.
    pub fn from_insert(err: sqlx::Error, what: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return AppError::AlreadyExists(what.into());
            }
        }
        AppError::Database(err)
    }
}

// Convert AppError to an HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into()),
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::AlreadyExists(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Password(_) | AppError::Session(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Template error".into()),
            AppError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        tracing::error!(?self);
        (status, error_message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
