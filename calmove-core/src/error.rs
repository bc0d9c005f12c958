//! Error types for calmove.

use thiserror::Error;

/// Errors that can occur while talking to the calendar provider.
#[derive(Error, Debug)]
pub enum CalMoveError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Calendar API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Event listing failed: {0}")]
    Listing(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calmove operations.
pub type CalMoveResult<T> = Result<T, CalMoveError>;
