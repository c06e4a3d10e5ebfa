//! Error types for statistical inference
//!
//! Provides a unified error type for all inference crates. Every variant
//! belongs to exactly one [`ErrorKind`]; callers that translate failures into
//! user-facing messages should match on the kind rather than the variant.

use thiserror::Error;

/// Core error type for inference operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A sample violates an estimator's domain precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not enough observations for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Unsupported combination of explicit parameters, or a parameter out of bounds
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A computed result broke one of its invariants
    #[error("Numerical anomaly: {0}")]
    NumericalAnomaly(String),
}

/// The three failure kinds of the inference core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller's data cannot be used with the requested estimator
    InvalidInput,
    /// The caller's explicit choices are unsupported or out of range
    Configuration,
    /// A correctness defect; never a user mistake
    NumericalAnomaly,
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::InsufficientData { .. } => ErrorKind::InvalidInput,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::NumericalAnomaly(_) => ErrorKind::NumericalAnomaly,
        }
    }

    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(p: f64) -> Self {
        Self::Configuration(format!("Probability {p} must be in [0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values in caller data
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }
}
