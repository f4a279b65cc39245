//! Armory sub-resources and the results of fetching them.

mod outcome;
mod snapshot;
mod sub_resource;

pub use outcome::{FetchFailure, FetchOutcome, TRANSPORT_FAILURE_STATUS};
pub use snapshot::CharacterSnapshot;
pub use sub_resource::{SubResourceKind, NAME_PLACEHOLDER};
