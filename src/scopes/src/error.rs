//! Error types for the scope expansion engine

use thiserror::Error;

/// Scope expansion errors
#[derive(Debug, Error)]
pub enum ExpansionError {
    /// The fixed-point loop did not converge within the configured round limit.
    ///
    /// Callers must fail closed: an expansion that cannot be shown to converge
    /// grants nothing beyond the scopes the principal already held.
    #[error("Maximum role expansion depth reached after {max_rounds} rounds")]
    ExpansionDepthExceeded {
        /// The round limit that was exceeded
        max_rounds: usize,
    },

    /// Invalid role definition
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Role id given more than once
    #[error("Duplicate role: {0}")]
    DuplicateRole(String),

    /// Invalid expander or cache configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Role map or configuration could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for scope expansion operations
pub type Result<T> = std::result::Result<T, ExpansionError>;
