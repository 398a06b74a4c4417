//! Error types for the search provider clients.

use thiserror::Error;

/// Result type for search client operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Search provider errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// API key or engine id absent or blank
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// Transport failure (connection refused, timeout, TLS)
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response from the provider
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("parse error: {0}")]
    Parse(String),
}

impl SearchError {
    /// Whether this error is a configuration problem the caller must fix.
    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, SearchError::MissingCredentials(_))
    }
}
