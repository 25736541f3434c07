//! Credential pool with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of API keys.
//! The pool is an explicit ordered collection: the orchestrator tries
//! keys front to back, and running out is a normal, testable outcome.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API key that won't be logged or displayed.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Create a new key.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the key for use.
    ///
    /// Only call this when actually sending the key in an API request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
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

/// An ordered pool of credentials for the generative-language service.
///
/// An empty pool is legal: the orchestrator then goes straight to the
/// lexical tier.
#[derive(Clone, Default)]
pub struct CredentialPool {
    keys: Vec<ApiKey>,
}

impl CredentialPool {
    /// Create an empty pool.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a pool from keys, in rotation order.
    pub fn new(keys: Vec<ApiKey>) -> Self {
        Self { keys }
    }

    /// Parse a comma-separated key list (the `GEMINI_API_KEYS` env
    /// format). Whitespace is trimmed and empty segments dropped, so
    /// trailing commas are harmless.
    pub fn parse(raw: &str) -> Self {
        Self {
            keys: raw
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ApiKey::from)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Keys in rotation order.
    pub fn iter(&self) -> impl Iterator<Item = &ApiKey> {
        self.keys.iter()
    }
}

impl fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPool")
            .field("keys", &format!("[{} REDACTED]", self.keys.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_in_debug_or_display() {
        let key = ApiKey::new("sk-super-secret");
        assert!(!format!("{:?}", key).contains("sk-super"));
        assert!(!format!("{}", key).contains("sk-super"));
        assert_eq!(key.expose(), "sk-super-secret");
    }

    #[test]
    fn test_parse_comma_separated() {
        let pool = CredentialPool::parse(" key-a, key-b ,, key-c,");
        assert_eq!(pool.len(), 3);
        let keys: Vec<&str> = pool.iter().map(|k| k.expose()).collect();
        assert_eq!(keys, vec!["key-a", "key-b", "key-c"]);
    }

    #[test]
    fn test_parse_empty_string_is_empty_pool() {
        assert!(CredentialPool::parse("").is_empty());
        assert!(CredentialPool::parse("  ,  ").is_empty());
    }

    #[test]
    fn test_pool_debug_redacts() {
        let pool = CredentialPool::parse("key-a,key-b");
        let debug = format!("{:?}", pool);
        assert!(!debug.contains("key-a"));
        assert!(debug.contains("2 REDACTED"));
    }
}
