//! Unified error type for engine specs
//!
//! Every failure an engine spec can produce is synchronous and scoped to the
//! single call that raised it; retry policy belongs to the caller.

use thiserror::Error;

/// Error type for engine spec operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// The database `extra` field did not parse as a JSON object
    #[error("Unable to parse database extras: {0}")]
    InvalidExtra(#[from] serde_json::Error),

    /// The server certificate is missing, truncated, or not valid PEM
    #[error("Invalid server certificate: {0}")]
    Certificate(String),

    /// Failed to persist the certificate file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_extra_display_wraps_parse_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EngineError::InvalidExtra(parse_err);
        assert!(
            err.to_string()
                .starts_with("Unable to parse database extras:")
        );
    }

    #[test]
    fn test_certificate_error_display() {
        let err = EngineError::Certificate("missing PEM certificate markers".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid server certificate: missing PEM certificate markers"
        );
    }
}
