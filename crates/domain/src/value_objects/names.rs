//! Validated name newtypes for domain entities
//!
//! A character name only has to be non-empty. It is otherwise kept exactly
//! as supplied: the armory API treats it as an opaque path segment and
//! decides for itself whether the character exists, so no trimming, case
//! folding or length limit is applied here.

use std::fmt;

use crate::error::DomainError;

// ============================================================================
// CharacterName
// ============================================================================

/// A character name, non-empty and otherwise verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is the empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
