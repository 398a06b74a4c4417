//! API key wrapper that never shows up in logs.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A provider API key.
///
/// Backed by `secrecy::SecretBox` so `Debug` and `Display` print
/// `[REDACTED]` instead of the key.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the key for use in a request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// True when the key is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
