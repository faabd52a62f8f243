//! Error types for parsing and the project registry

use thiserror::Error;

/// Errors raised by the interface parser.
///
/// Malformed interface text is never an error; only input that is not text at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Interface source must be valid UTF-8 text: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),
}

/// Errors that can occur during project registry operations
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Project missing, deactivated or expired
    #[error("{0}")]
    NotFound(String),

    /// Rejected request input
    #[error("{0}")]
    Validation(String),

    /// Registry is at its configured capacity
    #[error("Project limit reached ({0} active projects)")]
    LimitReached(usize),

    /// Interface source could not be read
    #[error("Invalid interface: {0}")]
    InvalidInterface(#[from] ParseError),
}

impl ProjectError {
    pub fn not_found() -> Self {
        Self::NotFound("Project not found or expired".to_string())
    }
}
