//! Lifecycle of one profile write: idle, pending, then success or error until
//! the caller acknowledges the result. Each `mutate` issues exactly one client
//! call; nothing is retried.

use crate::{
    errors::TransportError,
    profile::{
        client::ProfileApi,
        types::{ProfileSaved, ProfileUpdate},
    },
};
use tracing::{debug, instrument};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl MutationState {
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

#[derive(Debug)]
pub struct MutationOrchestrator<C> {
    client: C,
    state: MutationState,
}

impl<C: ProfileApi> MutationOrchestrator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: MutationState::Idle,
        }
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, MutationState::Pending)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs one write cycle. A settled previous result is discarded.
    ///
    /// # Errors
    /// Returns the client's error unchanged; the state records its user message.
    #[instrument(skip_all)]
    pub async fn mutate(&mut self, update: &ProfileUpdate) -> Result<ProfileSaved, TransportError> {
        self.state = MutationState::Pending;
        debug!("profile mutation pending");

        let result = self.client.update_profile(update).await;

        self.state = match &result {
            Ok(saved) => MutationState::Succeeded(saved.message.clone()),
            Err(err) => MutationState::Failed(err.user_message()),
        };
        debug!(state = ?self.state, "profile mutation settled");

        result
    }

    /// Returns a settled state to idle once the result has been shown. A
    /// `Pending` state seen here belongs to a dropped `mutate` future, since a
    /// live one holds the exclusive borrow, so it is reset too.
    pub fn acknowledge(&mut self) {
        self.state = MutationState::Idle;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profile::types::Preferences;
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
        time::Duration,
    };

    struct ScriptedApi {
        responses: Mutex<Vec<Result<ProfileSaved, TransportError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(mut responses: Vec<Result<ProfileSaved, TransportError>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ProfileApi for ScriptedApi {
        async fn update_profile(
            &self,
            _update: &ProfileUpdate,
        ) -> Result<ProfileSaved, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(TransportError::Network("no response".to_string())))
        }
    }

    struct StalledApi;

    impl ProfileApi for StalledApi {
        async fn update_profile(
            &self,
            _update: &ProfileUpdate,
        ) -> Result<ProfileSaved, TransportError> {
            std::future::pending().await
        }
    }

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            full_name: "Ada".to_string(),
            phone_number: "555".to_string(),
            bio: None,
            website: None,
            preferences: Preferences::default(),
        }
    }

    #[tokio::test]
    async fn success_settles_with_server_message() {
        let api = ScriptedApi::new(vec![Ok(ProfileSaved {
            message: "Saved".to_string(),
        })]);
        let mut mutation = MutationOrchestrator::new(api);
        assert_eq!(mutation.state(), &MutationState::Idle);

        let saved = mutation.mutate(&update()).await.unwrap();

        assert_eq!(saved.message, "Saved");
        assert_eq!(
            mutation.state(),
            &MutationState::Succeeded("Saved".to_string())
        );
        assert_eq!(mutation.client().calls.load(Ordering::SeqCst), 1);

        mutation.acknowledge();
        assert_eq!(mutation.state(), &MutationState::Idle);
    }

    #[tokio::test]
    async fn failure_settles_with_user_message_and_is_not_retried() {
        let api = ScriptedApi::new(vec![Err(TransportError::Http {
            status: 500,
            message: "boom".to_string(),
        })]);
        let mut mutation = MutationOrchestrator::new(api);

        let err = mutation.mutate(&update()).await.unwrap_err();

        assert_eq!(err.user_message(), "boom");
        assert_eq!(mutation.state(), &MutationState::Failed("boom".to_string()));
        assert_eq!(mutation.client().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn each_mutate_is_a_fresh_cycle() {
        let api = ScriptedApi::new(vec![
            Err(TransportError::Timeout("slow".to_string())),
            Ok(ProfileSaved {
                message: "Saved".to_string(),
            }),
        ]);
        let mut mutation = MutationOrchestrator::new(api);

        assert!(mutation.mutate(&update()).await.is_err());
        assert!(mutation.mutate(&update()).await.is_ok());
        assert_eq!(mutation.client().calls.load(Ordering::SeqCst), 2);
        assert!(!mutation.is_pending());
    }

    #[tokio::test]
    async fn acknowledge_resets_an_abandoned_mutation() {
        let mut mutation = MutationOrchestrator::new(StalledApi);
        let result =
            tokio::time::timeout(Duration::from_millis(10), mutation.mutate(&update())).await;
        assert!(result.is_err());
        assert!(mutation.is_pending());

        mutation.acknowledge();
        assert_eq!(mutation.state(), &MutationState::Idle);
    }

    #[test]
    fn acknowledge_keeps_idle_idle() {
        let mut mutation = MutationOrchestrator::new(ScriptedApi::new(Vec::new()));
        mutation.acknowledge();
        assert_eq!(mutation.state(), &MutationState::Idle);
    }
}
