//! External service port traits.

use armory_domain::{ApiKey, CharacterName, FetchOutcome, SubResourceKind};
use async_trait::async_trait;

// =============================================================================
// Armory API
// =============================================================================

/// One authenticated GET against an armory sub-resource.
///
/// Implementations classify every result, including transport faults, into
/// a [`FetchOutcome`] and never retry or cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArmoryPort: Send + Sync {
    async fn fetch(
        &self,
        resource: SubResourceKind,
        name: &CharacterName,
        credential: &ApiKey,
    ) -> FetchOutcome;
}
