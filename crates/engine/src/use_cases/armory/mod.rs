//! Armory use cases.

mod fetch_character;

use std::sync::Arc;

pub use fetch_character::{FetchCharacter, FetchCharacterError};

/// Container for armory use cases.
pub struct ArmoryUseCases {
    pub fetch_character: Arc<FetchCharacter>,
}

impl ArmoryUseCases {
    pub fn new(fetch_character: Arc<FetchCharacter>) -> Self {
        Self { fetch_character }
    }
}
