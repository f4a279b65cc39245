//! Value objects - Immutable objects defined by their attributes

mod api_key;
mod names;

pub use api_key::ApiKey;
pub use names::CharacterName;
