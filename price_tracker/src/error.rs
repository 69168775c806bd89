//! Error types for price_tracker

use mtg_common::MtgError;
use thiserror::Error;

/// Unified error type for price_tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Inventory or pricing API failure
    #[error(transparent)]
    Api(#[from] MtgError),
    /// Socket or file I/O failed (binding the web server, reading static files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Filter or sort selection that names an unknown value
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    /// Invalid command line or environment configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias for price_tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        TrackerError::Api(MtgError::Network(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_are_transparent() {
        let err: TrackerError = MtgError::MissingIdentifier("Sol Ring".to_string()).into();
        assert_eq!(err.to_string(), "Missing identifier for card: Sol Ring");
    }

    #[test]
    fn config_error_display() {
        let err = TrackerError::Config("unknown pricing source".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown pricing source"
        );
    }
}
