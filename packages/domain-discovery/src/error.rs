//! Typed errors for the discovery library.
//!
//! Provider and classifier failures are deliberately absent from
//! [`DiscoveryError`]: they degrade to partial or unfiltered results and are
//! reported through [`SearchOutcome`](crate::search::SearchOutcome) and
//! [`FilterReport`](crate::classifier::FilterReport). Only conditions the
//! caller has to fix before retrying surface as errors.

use search_client::SearchError;
use thiserror::Error;

/// Errors returned by discovery and expansion.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A required API key or engine id is absent. No request was sent.
    #[error("missing {provider} credentials: {detail}")]
    MissingCredentials {
        provider: &'static str,
        detail: String,
    },

    /// Blank company name, malformed root label, and similar.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl DiscoveryError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Build from a provider's credential check.
    pub(crate) fn from_credentials(provider: &'static str, error: SearchError) -> Self {
        let detail = match error {
            SearchError::MissingCredentials(detail) => detail,
            other => other.to_string(),
        };
        Self::MissingCredentials { provider, detail }
    }
}

/// Errors from an [`ExclusionClassifier`](crate::classifier::ExclusionClassifier).
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Transport failure talking to the model provider
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response from the model provider
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// The model returned no completion
    #[error("model returned no completion")]
    EmptyResponse,
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for classifier operations.
pub type ClassifierResult<T> = std::result::Result<T, ClassifierError>;
