//! Bearer credential for the armory API.

use std::fmt;

use crate::error::DomainError;

/// A non-blank API key, trimmed on construction.
///
/// `Debug` never prints the key itself so the value can sit inside
/// configuration structs that get logged.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the key is empty or whitespace only.
    pub fn new(key: impl Into<String>) -> Result<Self, DomainError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("API key cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Lenient constructor for configuration sources: blank or missing
    /// values mean "not configured".
    pub fn from_optional(key: Option<String>) -> Option<Self> {
        key.and_then(|k| Self::new(k).ok())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
