//! Fetch character use case - assembles every armory section for one name.

use std::sync::Arc;
use std::time::Duration;

use armory_domain::{
    ApiKey, CharacterName, CharacterSnapshot, DomainError, FetchFailure, FetchOutcome,
    SubResourceKind,
};
use tokio::task::JoinSet;

use crate::infrastructure::ports::ArmoryPort;

#[derive(Debug, thiserror::Error)]
pub enum FetchCharacterError {
    #[error("Armory API key is not configured")]
    MissingCredential,
    #[error(transparent)]
    InvalidName(#[from] DomainError),
    #[error("Profile lookup failed: {0}")]
    Profile(FetchFailure),
}

/// Builds a [`CharacterSnapshot`] from the armory.
///
/// The credential is checked before the name, so a missing key gives the
/// same error for every name. The name is then only required to be
/// non-empty; the armory decides whether it exists.
///
/// The profile is fetched first and alone; if it fails the lookup ends with
/// that failure and nothing else is requested. Once it succeeds, the seven
/// optional sections are fetched concurrently, each under its own timeout.
/// Any optional failure, timeout or panic leaves only that section `None`.
///
/// Optional fetches live in a `JoinSet`, so dropping the `execute` future
/// (client disconnect, outer timeout) aborts whatever is still in flight.
pub struct FetchCharacter {
    armory: Arc<dyn ArmoryPort>,
    optional_timeout: Duration,
}

impl FetchCharacter {
    pub fn new(armory: Arc<dyn ArmoryPort>, optional_timeout: Duration) -> Self {
        Self {
            armory,
            optional_timeout,
        }
    }

    pub async fn execute(
        &self,
        name: &str,
        credential: Option<&ApiKey>,
    ) -> Result<CharacterSnapshot, FetchCharacterError> {
        let Some(credential) = credential else {
            tracing::warn!(character = %name, "Armory API key missing, skipping lookup");
            return Err(FetchCharacterError::MissingCredential);
        };
        let name = CharacterName::new(name)?;

        tracing::info!(character = %name, "Fetching character from armory");

        let profile = match self
            .armory
            .fetch(SubResourceKind::Profile, &name, credential)
            .await
        {
            FetchOutcome::Success { body, .. } => body,
            FetchOutcome::Failure(failure) => {
                tracing::warn!(
                    character = %name,
                    status = failure.status,
                    "Profile lookup failed, aborting"
                );
                return Err(FetchCharacterError::Profile(failure));
            }
        };

        let mut snapshot = CharacterSnapshot::new(profile);

        let mut tasks = JoinSet::new();
        for kind in SubResourceKind::ALL.into_iter().filter(|k| !k.is_mandatory()) {
            let armory = Arc::clone(&self.armory);
            let name = name.clone();
            let credential = credential.clone();
            let timeout = self.optional_timeout;

            tasks.spawn(async move {
                let body = match tokio::time::timeout(timeout, armory.fetch(kind, &name, &credential))
                    .await
                {
                    Ok(FetchOutcome::Success { body, .. }) => Some(body),
                    Ok(FetchOutcome::Failure(failure)) => {
                        tracing::debug!(
                            character = %name,
                            resource = %kind,
                            status = failure.status,
                            "Optional section unavailable"
                        );
                        None
                    }
                    Err(_) => {
                        tracing::debug!(
                            character = %name,
                            resource = %kind,
                            timeout_ms = timeout.as_millis() as u64,
                            "Optional section timed out"
                        );
                        None
                    }
                };
                (kind, body)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((kind, body)) => snapshot.set_section(kind, body),
                // The section stays empty; its kind is lost with the task
                Err(e) => tracing::warn!(character = %name, error = %e, "Optional fetch task failed"),
            }
        }

        let missing: Vec<&str> = snapshot
            .missing_sections()
            .iter()
            .map(|kind| kind.response_key())
            .collect();
        if !missing.is_empty() {
            tracing::debug!(character = %name, missing = ?missing, "Character assembled with null sections");
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockArmoryPort;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    const LUTERRA: &str = "Luterra";

    fn key() -> ApiKey {
        ApiKey::new("test-key").unwrap()
    }

    /// Scripted fake that records every call in order.
    #[derive(Default)]
    struct ScriptedArmory {
        outcomes: HashMap<SubResourceKind, FetchOutcome>,
        delays: HashMap<SubResourceKind, Duration>,
        panics_on: Option<SubResourceKind>,
        calls: Mutex<Vec<SubResourceKind>>,
        completed: Mutex<Vec<SubResourceKind>>,
    }

    impl ScriptedArmory {
        /// Every sub-resource answers 200 `{}` unless overridden.
        fn all_ok() -> Self {
            let outcomes = SubResourceKind::ALL
                .into_iter()
                .map(|kind| (kind, FetchOutcome::success(200, json!({}))))
                .collect();
            Self {
                outcomes,
                ..Default::default()
            }
        }

        fn with(mut self, kind: SubResourceKind, outcome: FetchOutcome) -> Self {
            self.outcomes.insert(kind, outcome);
            self
        }

        fn with_delay(mut self, kind: SubResourceKind, delay: Duration) -> Self {
            self.delays.insert(kind, delay);
            self
        }

        fn calls(&self) -> Vec<SubResourceKind> {
            self.calls.lock().unwrap().clone()
        }

        fn completed(&self) -> Vec<SubResourceKind> {
            self.completed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ArmoryPort for ScriptedArmory {
        async fn fetch(
            &self,
            resource: SubResourceKind,
            _name: &CharacterName,
            _credential: &ApiKey,
        ) -> FetchOutcome {
            self.calls.lock().unwrap().push(resource);
            if let Some(delay) = self.delays.get(&resource) {
                tokio::time::sleep(*delay).await;
            }
            if self.panics_on == Some(resource) {
                panic!("simulated fault fetching {resource}");
            }
            self.completed.lock().unwrap().push(resource);
            self.outcomes
                .get(&resource)
                .cloned()
                .unwrap_or_else(|| FetchOutcome::transport_error("unscripted"))
        }
    }

    fn use_case(armory: Arc<dyn ArmoryPort>) -> FetchCharacter {
        FetchCharacter::new(armory, TEST_TIMEOUT)
    }

    #[tokio::test]
    async fn missing_credential_makes_no_calls() {
        let mut armory = MockArmoryPort::new();
        armory.expect_fetch().times(0);

        let result = use_case(Arc::new(armory)).execute(LUTERRA, None).await;

        assert!(matches!(result, Err(FetchCharacterError::MissingCredential)));
    }

    #[tokio::test]
    async fn missing_credential_wins_over_any_name() {
        for name in ["", " ", "Luterra"] {
            let mut armory = MockArmoryPort::new();
            armory.expect_fetch().times(0);

            let result = use_case(Arc::new(armory)).execute(name, None).await;

            assert!(
                matches!(result, Err(FetchCharacterError::MissingCredential)),
                "{name:?}"
            );
        }
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_calls() {
        let mut armory = MockArmoryPort::new();
        armory.expect_fetch().times(0);

        let result = use_case(Arc::new(armory)).execute("", Some(&key())).await;

        assert!(matches!(result, Err(FetchCharacterError::InvalidName(_))));
    }

    #[tokio::test]
    async fn whitespace_and_long_names_are_forwarded_verbatim() {
        let long = "a".repeat(65);
        for raw in ["   ", long.as_str()] {
            let expected = raw.to_string();
            let mut armory = MockArmoryPort::new();
            armory
                .expect_fetch()
                .withf(move |kind, name, _| {
                    *kind == SubResourceKind::Profile && name.as_str() == expected
                })
                .times(1)
                .returning(|_, _, _| FetchOutcome::upstream_error(404, "not found"));

            let result = use_case(Arc::new(armory)).execute(raw, Some(&key())).await;

            assert!(matches!(
                result,
                Err(FetchCharacterError::Profile(FetchFailure { status: 404, .. }))
            ));
        }
    }

    #[test]
    fn missing_credential_error_message_is_fixed() {
        let err = FetchCharacterError::MissingCredential;
        assert_eq!(err.to_string(), "Armory API key is not configured");
    }

    #[tokio::test]
    async fn profile_not_found_is_returned_verbatim() {
        let mut armory = MockArmoryPort::new();
        armory
            .expect_fetch()
            .withf(|kind, name, credential| {
                *kind == SubResourceKind::Profile
                    && name.as_str() == "Luterra"
                    && credential.bearer() == "bearer test-key"
            })
            .times(1)
            .returning(|_, _, _| FetchOutcome::upstream_error(404, "not found"));

        let result = use_case(Arc::new(armory))
            .execute(LUTERRA, Some(&key()))
            .await;

        match result {
            Err(FetchCharacterError::Profile(failure)) => {
                assert_eq!(failure.status, 404);
                assert_eq!(&failure.body[..], b"not found");
            }
            other => panic!("expected profile failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn profile_failure_suppresses_optional_calls() {
        for outcome in [
            FetchOutcome::upstream_error(401, "unauthorized"),
            FetchOutcome::upstream_error(503, "maintenance"),
            FetchOutcome::transport_error("connection reset"),
        ] {
            let armory = Arc::new(ScriptedArmory::all_ok().with(SubResourceKind::Profile, outcome));

            let result = use_case(armory.clone())
                .execute(LUTERRA, Some(&key()))
                .await;

            assert!(matches!(result, Err(FetchCharacterError::Profile(_))));
            assert_eq!(armory.calls(), vec![SubResourceKind::Profile]);
        }
    }

    #[tokio::test]
    async fn profile_transport_fault_surfaces_as_500() {
        let armory = Arc::new(
            ScriptedArmory::all_ok()
                .with(SubResourceKind::Profile, FetchOutcome::transport_error("dns failure")),
        );

        let result = use_case(armory).execute(LUTERRA, Some(&key())).await;

        match result {
            Err(FetchCharacterError::Profile(failure)) => assert_eq!(failure.status, 500),
            other => panic!("expected profile failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn gems_not_found_leaves_only_gems_null() {
        let mut armory = MockArmoryPort::new();
        armory
            .expect_fetch()
            .withf(|kind, _, _| *kind == SubResourceKind::Profile)
            .times(1)
            .returning(|_, _, _| FetchOutcome::success(200, json!({"name": "Luterra"})));
        armory
            .expect_fetch()
            .withf(|kind, _, _| *kind == SubResourceKind::Gems)
            .times(1)
            .returning(|_, _, _| FetchOutcome::upstream_error(404, "not found"));
        armory
            .expect_fetch()
            .withf(|kind, _, _| {
                !kind.is_mandatory() && *kind != SubResourceKind::Gems
            })
            .times(6)
            .returning(|_, _, _| FetchOutcome::success(200, json!({})));

        let snapshot = use_case(Arc::new(armory))
            .execute(LUTERRA, Some(&key()))
            .await
            .unwrap();

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            json!({
                "profile": {"name": "Luterra"},
                "skills": {},
                "gems": null,
                "arkpassive": {},
                "siblings": {},
                "engravings": {},
                "cards": {},
                "arkgrid": {},
            })
        );
    }

    #[tokio::test]
    async fn arkgrid_transport_fault_is_null() {
        let armory = Arc::new(
            ScriptedArmory::all_ok()
                .with(SubResourceKind::Profile, FetchOutcome::success(200, json!({"name": "Luterra"})))
                .with(SubResourceKind::Cards, FetchOutcome::upstream_error(500, "boom"))
                .with(
                    SubResourceKind::Arkgrid,
                    FetchOutcome::transport_error("connection reset by peer"),
                ),
        );

        let snapshot = use_case(armory).execute(LUTERRA, Some(&key())).await.unwrap();

        assert_eq!(snapshot.profile, json!({"name": "Luterra"}));
        assert_eq!(snapshot.arkgrid, None);
        assert_eq!(snapshot.cards, None);
        assert_eq!(snapshot.skills, Some(json!({})));
        assert_eq!(snapshot.engravings, Some(json!({})));
    }

    #[tokio::test]
    async fn all_optional_failures_still_yield_every_key() {
        let mut armory = ScriptedArmory::default()
            .with(SubResourceKind::Profile, FetchOutcome::success(200, json!({"name": "Luterra"})));
        for kind in SubResourceKind::OPTIONAL {
            armory = armory.with(kind, FetchOutcome::upstream_error(503, "unavailable"));
        }

        let snapshot = use_case(Arc::new(armory))
            .execute(LUTERRA, Some(&key()))
            .await
            .unwrap();

        let value = serde_json::to_value(&snapshot).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 8);
        assert_eq!(object["profile"], json!({"name": "Luterra"}));
        for kind in SubResourceKind::OPTIONAL {
            assert_eq!(object[kind.response_key()], Value::Null, "{kind}");
        }
    }

    #[tokio::test]
    async fn flipping_one_optional_changes_only_its_slot() {
        let baseline = use_case(Arc::new(ScriptedArmory::all_ok()))
            .execute(LUTERRA, Some(&key()))
            .await
            .unwrap();

        for flipped in SubResourceKind::OPTIONAL {
            let armory = ScriptedArmory::all_ok()
                .with(flipped, FetchOutcome::upstream_error(404, "not found"));
            let snapshot = use_case(Arc::new(armory))
                .execute(LUTERRA, Some(&key()))
                .await
                .unwrap();

            for kind in SubResourceKind::ALL {
                if kind == flipped {
                    assert!(snapshot.section(kind).is_none(), "{kind} should be empty");
                } else {
                    assert_eq!(snapshot.section(kind), baseline.section(kind), "{kind}");
                }
            }
        }
    }

    #[tokio::test]
    async fn profile_is_fetched_before_any_optional_section() {
        let armory = Arc::new(ScriptedArmory::all_ok());

        use_case(armory.clone())
            .execute(LUTERRA, Some(&key()))
            .await
            .unwrap();

        let calls = armory.calls();
        assert_eq!(calls.len(), 8);
        assert_eq!(calls[0], SubResourceKind::Profile);
        for kind in SubResourceKind::OPTIONAL {
            assert_eq!(calls.iter().filter(|c| **c == kind).count(), 1, "{kind}");
        }
    }

    #[tokio::test]
    async fn repeated_lookups_are_structurally_identical() {
        let armory = Arc::new(
            ScriptedArmory::all_ok()
                .with(SubResourceKind::Siblings, FetchOutcome::upstream_error(404, "")),
        );
        let fetch = use_case(armory);

        let first = fetch.execute(LUTERRA, Some(&key())).await.unwrap();
        let second = fetch.execute(LUTERRA, Some(&key())).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.missing_sections(), vec![SubResourceKind::Siblings]);
    }

    #[tokio::test]
    async fn slow_optional_section_times_out_to_null() {
        let armory = Arc::new(
            ScriptedArmory::all_ok().with_delay(SubResourceKind::Arkpassive, Duration::from_secs(5)),
        );
        let fetch = FetchCharacter::new(armory, Duration::from_millis(100));

        let snapshot = fetch.execute(LUTERRA, Some(&key())).await.unwrap();

        assert_eq!(snapshot.arkpassive, None);
        assert_eq!(snapshot.missing_sections(), vec![SubResourceKind::Arkpassive]);
    }

    #[tokio::test]
    async fn panicking_optional_fetch_is_contained() {
        let armory = ScriptedArmory {
            panics_on: Some(SubResourceKind::Arkgrid),
            ..ScriptedArmory::all_ok()
        };

        let snapshot = use_case(Arc::new(armory))
            .execute(LUTERRA, Some(&key()))
            .await
            .unwrap();

        assert_eq!(snapshot.arkgrid, None);
        assert_eq!(snapshot.missing_sections(), vec![SubResourceKind::Arkgrid]);
    }

    #[tokio::test]
    async fn dropping_the_lookup_aborts_optional_fetches() {
        let mut armory = ScriptedArmory::all_ok();
        for kind in SubResourceKind::OPTIONAL {
            armory = armory.with_delay(kind, Duration::from_millis(200));
        }
        let armory = Arc::new(armory);
        let fetch = use_case(armory.clone());

        let key = key();
        let cancelled =
            tokio::time::timeout(Duration::from_millis(50), fetch.execute(LUTERRA, Some(&key))).await;
        assert!(cancelled.is_err());

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(armory.completed(), vec![SubResourceKind::Profile]);
    }
}
