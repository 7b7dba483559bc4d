//! # Error Types for ARIA
//!
//! Unified error handling across all ARIA crates.

use thiserror::Error;

/// Main error type for ARIA operations
#[derive(Error, Debug)]
pub enum AriaError {
    /// Bad construction or configuration parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Array length does not match the expected width
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Normalization or entropy would divide by zero or produce NaN
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Pattern registered twice
    #[error("Pattern {0} already exists")]
    DuplicateIdentifier(String),

    /// Unknown pattern identifier
    #[error("Pattern {0} not found")]
    NotFound(String),

    /// Operation attempted before initialization
    #[error("Not ready: {0}")]
    NotReady(String),

    /// Zero-length input
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Activation attempted with safety protocols disengaged
    #[error("Safety violation: {0}")]
    SafetyViolation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for ARIA operations
pub type AriaResult<T> = Result<T, AriaError>;

impl AriaError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a degenerate input error
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Create a not-found error for a pattern id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a dimension mismatch error
    pub fn dimension(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

impl From<serde_json::Error> for AriaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
