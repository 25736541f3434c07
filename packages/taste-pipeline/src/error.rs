//! Typed errors for the taste pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. None of these errors
//! propagate out of the pipeline facade: each tier converts a failure
//! into the next fallback's input.

use std::time::Duration;

use thiserror::Error;

/// Errors from a single semantic-extraction attempt.
///
/// Every variant is handled the same way by the orchestrator (log and
/// move to the next credential), but they are distinguished so telemetry
/// can tell a rate-limited key from a model that rambled.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The model backend failed (transport, rate limit, rejected key)
    #[error("model error: {0}")]
    Model(String),

    /// The attempt exceeded its time budget
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    /// No structured document could be recovered from the model output
    #[error("model returned no usable document")]
    Unparseable,

    /// A document was recovered but does not match the canonical shape
    #[error("model document failed validation: {0}")]
    Invalid(String),
}

impl From<gemini_client::GeminiError> for ExtractError {
    fn from(e: gemini_client::GeminiError) -> Self {
        Self::Model(e.to_string())
    }
}

/// Errors from knowledge-graph lookups and queries.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (unexpected response format)
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<qloo_client::QlooError> for GraphError {
    fn from(e: qloo_client::QlooError) -> Self {
        match e {
            qloo_client::QlooError::Network(m) => Self::Network(m),
            qloo_client::QlooError::Api(m) => Self::Api(m),
            qloo_client::QlooError::Parse(m) => Self::Parse(m),
        }
    }
}

/// Result type alias for extraction attempts.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;
