//! Armory domain types.
//!
//! Pure types with no I/O: the validated character name and credential, the
//! catalog of armory sub-resources, per-call fetch outcomes and the assembled
//! character snapshot.

pub mod armory;
pub mod error;
pub mod value_objects;

pub use armory::{CharacterSnapshot, FetchFailure, FetchOutcome, SubResourceKind};
pub use error::DomainError;
pub use value_objects::{ApiKey, CharacterName};
