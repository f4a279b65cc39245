//! Lost Ark armory API client
//!
//! Implements the ArmoryPort trait with one authenticated GET per sub-resource.

use armory_domain::armory::NAME_PLACEHOLDER;
use armory_domain::{ApiKey, CharacterName, FetchOutcome, SubResourceKind};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::time::Duration;

use crate::infrastructure::ports::ArmoryPort;

/// Default armory API base URL.
pub const DEFAULT_ARMORY_BASE_URL: &str = "https://developer-lostark.game.onstove.com";

/// Default per-request timeout.
pub const DEFAULT_ARMORY_TIMEOUT: Duration = Duration::from_secs(10);

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Client for the armory REST API
#[derive(Clone)]
pub struct ArmoryClient {
    client: Client,
    base_url: Url,
}

impl ArmoryClient {
    /// Build a client whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Expand a sub-resource template under the base URL.
    ///
    /// The name becomes a single percent-encoded path segment, so spaces,
    /// slashes and Hangul never change the route.
    fn endpoint_url(&self, resource: SubResourceKind, name: &CharacterName) -> Result<Url, String> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| format!("Armory base URL cannot carry a path: {}", self.base_url))?;
            segments.pop_if_empty();
            for segment in resource.path_template().trim_start_matches('/').split('/') {
                if segment == NAME_PLACEHOLDER {
                    segments.push(name.as_str());
                } else {
                    segments.push(segment);
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ArmoryPort for ArmoryClient {
    async fn fetch(
        &self,
        resource: SubResourceKind,
        name: &CharacterName,
        credential: &ApiKey,
    ) -> FetchOutcome {
        let url = match self.endpoint_url(resource, name) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::transport_error(e),
        };

        let response = match self
            .client
            .get(url)
            .header(AUTHORIZATION, credential.bearer())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, "Armory request failed");
                return FetchOutcome::transport_error(format!("Armory request failed: {e}"));
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, "Armory response body unreadable");
                return FetchOutcome::transport_error(format!("Armory response unreadable: {e}"));
            }
        };

        if !status.is_success() {
            return FetchOutcome::upstream_error(status.as_u16(), bytes);
        }

        // The armory answers unknown names with an empty 200 on some endpoints
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return FetchOutcome::success(status.as_u16(), serde_json::Value::Null);
        }

        match serde_json::from_slice(&bytes) {
            Ok(body) => FetchOutcome::success(status.as_u16(), body),
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, "Armory returned malformed JSON");
                FetchOutcome::transport_error(format!("Malformed armory response: {e}"))
            }
        }
    }
}
