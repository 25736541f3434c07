//! Error types for the Qloo client.

use thiserror::Error;

/// Result type for Qloo client operations.
pub type Result<T> = std::result::Result<T, QlooError>;

/// Qloo client errors.
#[derive(Debug, Error)]
pub enum QlooError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, key rejected)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
