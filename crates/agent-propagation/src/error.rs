//! Error types for state initialization and propagation

use thiserror::Error;

/// Errors raised by the propagation layer
///
/// Every variant is fatal to the run in which it occurs: seeding failures
/// surface synchronously to the caller, and the other variants indicate
/// wiring bugs in the engine or a stage. This layer performs no retries.
#[derive(Debug, Error)]
pub enum PropagationError {
    /// Malformed input at seed or construction time
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A debate role name that no debate variant recognizes
    #[error("invalid debate side: {0}")]
    InvalidSide(String),

    /// A second write to a write-once report field
    #[error("report field already written: {0}")]
    ReportAlreadyWritten(&'static str),
}

/// Result type alias for propagation operations
pub type Result<T> = std::result::Result<T, PropagationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PropagationError::InvalidInput("target must not be empty".to_string());
        assert_eq!(err.to_string(), "invalid input: target must not be empty");

        let err = PropagationError::InvalidSide("referee".to_string());
        assert_eq!(err.to_string(), "invalid debate side: referee");

        let err = PropagationError::ReportAlreadyWritten("market_report");
        assert_eq!(err.to_string(), "report field already written: market_report");
    }
}
