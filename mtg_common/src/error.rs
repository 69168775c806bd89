//! Error types shared by the MTG API clients

use thiserror::Error;

/// Unified error type for inventory and pricing lookups
#[derive(Debug, Error)]
pub enum MtgError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// API returned a structured error body
    #[error("{code}: {details}")]
    ApiResponse { code: String, details: String },
    /// A lookup was requested for an entry without an external identifier
    #[error("Missing identifier for card: {0}")]
    MissingIdentifier(String),
}

/// Result alias for MTG API operations
pub type Result<T> = std::result::Result<T, MtgError>;
