// Error types for the roster library.
// Handles GitHub API errors, cancellation, and general failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
