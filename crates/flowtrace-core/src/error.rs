//! Error types for the FlowTrace engine.
//!
//! The detection stages themselves are pure functions over the graph and
//! cannot fail on well-formed input; errors exist at the boundaries
//! (registration, configuration, degenerate input surfaced to callers).

use thiserror::Error;

/// Result type alias using `EngineError`.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur around the detection engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Zero valid transactions after upstream filtering.
    ///
    /// Surfaced to the caller as a user-facing message; never retried.
    #[error("no valid transactions in input batch")]
    DegenerateInput,

    /// Input validation failed.
    #[error("input validation failed: {0}")]
    ValidationError(String),

    /// Analyzer not found in registry.
    #[error("analyzer not found: {0}")]
    AnalyzerNotFound(String),

    /// Analyzer already registered.
    #[error("analyzer already registered: {0}")]
    AnalyzerAlreadyRegistered(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Internal error (logic defect, never a transient condition).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl EngineError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::ValidationError(msg.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        EngineError::InternalError(msg.into())
    }

    /// Create an analyzer-not-found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        EngineError::AnalyzerNotFound(id.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::ConfigError(msg.into())
    }

    /// Returns true if the caller should surface this as a user-facing
    /// message rather than a defect.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EngineError::DegenerateInput | EngineError::ValidationError(_)
        )
    }
}
