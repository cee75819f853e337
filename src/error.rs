//! Error types for sine model analysis

use std::fmt;

/// Errors that can occur during sine model analysis
#[derive(Debug, Clone)]
pub enum SineModelError {
    /// Invalid input parameters or contract violation at an API boundary
    InvalidInput(String),

    /// Processing error during analysis
    ProcessingError(String),

    /// Numerical error (overflow, non-finite values, etc.)
    NumericalError(String),
}

impl fmt::Display for SineModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SineModelError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SineModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            SineModelError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for SineModelError {}
