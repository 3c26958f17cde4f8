//! Core Error Types
//!
//! Errors raised by the domain types themselves. Dependency-free apart from thiserror,
//! so the core crate stays lightweight.

use thiserror::Error;

/// Core error type for the PhishGuard workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A value violated the analysis data contract
    #[error("Invalid analysis result: {0}")]
    InvalidResult(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an invalid-result error
    pub fn invalid_result(msg: impl Into<String>) -> Self {
        Self::InvalidResult(msg.into())
    }
}
