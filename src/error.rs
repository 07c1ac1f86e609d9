//! Error types for the energy-trends library.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during analysis operations.
///
/// Degenerate-but-valid numeric input (zero variance, singular regression
/// matrices) never produces an error; those cases have defined fallbacks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Malformed parameter value.
    #[error("invalid parameter: {0}")]
    Validation(String),
}

impl AnalysisError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = AnalysisError::InsufficientData { needed: 24, got: 5 };
        assert_eq!(err.to_string(), "insufficient data: need at least 24, got 5");

        let err = AnalysisError::validation("alpha must be in (0, 1)");
        assert_eq!(err.to_string(), "invalid parameter: alpha must be in (0, 1)");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = AnalysisError::InsufficientData { needed: 3, got: 2 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, AnalysisError::validation("x"));
    }
}
