//! Error types for payload synthesis.
//!
//! Every operation in this crate is pure and deterministic, so none of these
//! errors is retried internally: calling again with the same inputs fails
//! the same way.

use thiserror::Error;

/// Result type alias for synthesis operations.
pub type Result<T> = std::result::Result<T, HashDosError>;

#[derive(Error, Debug)]
pub enum HashDosError {
    /// The attack configuration is invalid.
    ///
    /// This occurs when:
    /// - `count` is above the configured ceiling
    /// - the configured ceiling is above [`crate::MAX_COUNT`]
    /// - a header line or variant name cannot be parsed
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The message template cannot take a payload.
    #[error("Invalid template: placeholder {marker:?} found {found} times, expected exactly once")]
    Template {
        /// The marker that was searched for.
        marker: String,
        /// Number of occurrences found in the template.
        found: usize,
    },

    /// An internal generation invariant was violated.
    ///
    /// For the shipped hash variants this indicates a defect, not a runtime
    /// condition.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HashDosError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Returns true for errors caused by caller input rather than a defect.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Template { .. } | Self::Io(_))
    }
}
