//! Error types for the surfsup application.
//!
//! This module defines the error enum shared by the storage layer, the
//! configuration layer and the HTTP handlers, plus its mapping onto HTTP
//! responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned to clients when a path segment is not a `YYYY-MM-DD` date.
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Please use YYYY-MM-DD.";

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsUpError {
    /// SQLite driver errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The data file does not carry the expected tables or columns
    #[error("Schema mismatch: {message}")]
    Schema { message: String },

    /// A date path segment could not be parsed
    #[error("{}", INVALID_DATE_MESSAGE)]
    InvalidDate { value: String },

    /// A stored value could not be interpreted
    #[error("Invalid stored data: {message}")]
    InvalidData { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsUpError {
    /// HTTP status this error maps to when it escapes a handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurfsUpError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SurfsUpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match status {
            StatusCode::BAD_REQUEST => self.to_string(),
            _ => "Internal server error".to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Convenience type alias for Results with SurfsUpError
pub type Result<T> = std::result::Result<T, SurfsUpError>;
