//! Error Handling
//!
//! Unified error types for the retrieval core.
//! Uses thiserror for ergonomic error definitions.
//!
//! Two kinds of failure propagate to callers: configuration errors
//! (invalid chunking parameters) and degenerate-input errors (a document
//! that produces no chunks, or a vocabulary that empties out after
//! stop-word removal). Everything unexpected is converted to `Internal`
//! at the narrowest point — no raw failures cross the crate boundary.

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid chunking configuration (non-positive size, step exceeding
    /// window, unknown strategy parameters)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input that cannot be indexed: zero chunks produced, or no
    /// vocabulary terms survive stop-word removal
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for retrieval-core errors
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a degenerate-input error
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert EngineError to a string suitable for UI-facing responses
impl From<EngineError> for String {
    fn from(err: EngineError) -> String {
        err.to_string()
    }
}
