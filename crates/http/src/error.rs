//! Error handling for the bookshelf HTTP layer
//!
//! Every failure crosses the wire as a `text/plain` summary with the matching
//! status code. Internal causes stay in the server log.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

/// Body returned when a handler panics.
pub const PANIC_MESSAGE: &str = "Something broke!";

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed client input.
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// Body the request extractors refused, with the status they chose
    /// (e.g. 413 for an upload over the body limit).
    #[error("rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// `message` is what the client sees; `source` is only logged.
    #[error("{message}: {source:#}")]
    Internal {
        message: String,
        source: anyhow::Error,
    },
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Create an internal error with a client-safe summary
    pub fn internal(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Rejected { status, .. } => *status,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let status = self.status();

        let message = match self {
            AppError::Validation { message }
            | AppError::NotFound { message }
            | AppError::Rejected { message, .. } => {
                tracing::warn!(
                    error_id = %error_id,
                    status_code = status.as_u16(),
                    %message,
                    "request rejected"
                );
                message
            }
            AppError::Internal { message, source } => {
                tracing::error!(
                    error_id = %error_id,
                    status_code = status.as_u16(),
                    %message,
                    error = ?source,
                    "request failed"
                );
                message
            }
        };

        (status, message).into_response()
    }
}

/// Catch-all for panics raised inside handlers.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(text) = panic.downcast_ref::<String>() {
        text.as_str()
    } else if let Some(text) = panic.downcast_ref::<&str>() {
        text
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, PANIC_MESSAGE).into_response()
}
