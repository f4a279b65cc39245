//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use armory_domain::ApiKey;

use crate::infrastructure::ports::ArmoryPort;
use crate::use_cases;
use crate::use_cases::armory::FetchCharacter;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state. The API key is fixed for the
/// process lifetime and only ever read.
pub struct App {
    pub use_cases: UseCases,
    api_key: Option<ApiKey>,
}

/// Container for all use cases.
pub struct UseCases {
    pub armory: use_cases::ArmoryUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        armory: Arc<dyn ArmoryPort>,
        api_key: Option<ApiKey>,
        optional_timeout: Duration,
    ) -> Self {
        let fetch_character = Arc::new(FetchCharacter::new(armory, optional_timeout));

        Self {
            use_cases: UseCases {
                armory: use_cases::ArmoryUseCases::new(fetch_character),
            },
            api_key,
        }
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }
}
