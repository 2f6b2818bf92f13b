//! Identity session watching.
//!
//! The original kept authentication state in ambient process-wide callbacks;
//! here it is an explicit object with an init/teardown lifecycle. The
//! watcher folds provider events into a `watch` channel, so any number of
//! views can observe the current state, and aborting the fold task is the
//! deterministic unsubscription required at teardown.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::ports::{IdentityProvider, Navigator, SessionEvent, SessionIdentity, UserDirectory};
use crate::domain::user::{DisplayName, UserId};

/// Current authentication state as observed by the watcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No user is signed in.
    #[default]
    Anonymous,
    /// A user is signed in.
    Authenticated {
        /// Provider-assigned user id.
        user_id: UserId,
        /// Display name from the profile record; `None` when the record is
        /// missing (logged, not surfaced).
        display_name: Option<DisplayName>,
    },
}

impl SessionState {
    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Id of the signed-in user, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user_id, .. } => Some(user_id),
        }
    }
}

/// Observes sign-in/sign-out transitions and exposes the current identity.
pub struct SessionWatcher<P, N> {
    provider: Arc<P>,
    navigator: Arc<N>,
    state_rx: watch::Receiver<SessionState>,
    task: JoinHandle<()>,
}

impl<P, N> SessionWatcher<P, N>
where
    P: IdentityProvider + 'static,
    N: Navigator,
{
    /// Start watching. The initial state is derived from the provider's
    /// current session before any event arrives.
    pub fn spawn<D>(provider: Arc<P>, directory: Arc<D>, navigator: Arc<N>) -> Self
    where
        D: UserDirectory + 'static,
    {
        let (state_tx, state_rx) = watch::channel(SessionState::Anonymous);
        let mut events = provider.subscribe();
        let task_provider = Arc::clone(&provider);

        let task = tokio::spawn(async move {
            if let Some(identity) = task_provider.current_session() {
                publish(&state_tx, directory.as_ref(), identity).await;
            }

            loop {
                match events.recv().await {
                    Ok(SessionEvent::SignedIn(identity)) => {
                        publish(&state_tx, directory.as_ref(), identity).await;
                    }
                    Ok(SessionEvent::SignedOut) => {
                        let _ = state_tx.send(SessionState::Anonymous);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Missed transitions; resync from the provider.
                        tracing::debug!(skipped, "session events lagged, resyncing");
                        match task_provider.current_session() {
                            Some(identity) => {
                                publish(&state_tx, directory.as_ref(), identity).await;
                            }
                            None => {
                                let _ = state_tx.send(SessionState::Anonymous);
                            }
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self {
            provider,
            navigator,
            state_rx,
            task,
        }
    }

    /// Snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to session-state changes; views gate their controls on
    /// this receiver.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// End the current session and navigate home. Failures are logged; the
    /// UI keeps its last state.
    pub async fn sign_out(&self) {
        match self.provider.sign_out().await {
            Ok(()) => self.navigator.push("/"),
            Err(err) => tracing::warn!(error = %err, "sign-out failed"),
        }
    }

    /// Stop observing session events. Idempotent; also performed on drop.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl<P, N> Drop for SessionWatcher<P, N> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn publish<D: UserDirectory>(
    state_tx: &watch::Sender<SessionState>,
    directory: &D,
    identity: SessionIdentity,
) {
    let display_name = match directory.find_user(&identity.user_id).await {
        Ok(Some(user)) => Some(user.display_name().clone()),
        Ok(None) => {
            tracing::warn!(user_id = %identity.user_id, "no profile record for signed-in user");
            None
        }
        Err(err) => {
            tracing::warn!(user_id = %identity.user_id, error = %err, "profile lookup failed");
            None
        }
    };

    let _ = state_tx.send(SessionState::Authenticated {
        user_id: identity.user_id,
        display_name,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockIdentityProvider, MockNavigator, MockUserDirectory, SessionEvent,
    };
    use crate::domain::user::User;
    use std::time::Duration;
    use tokio::sync::broadcast;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(1);

    fn identity(raw: &str) -> SessionIdentity {
        SessionIdentity {
            user_id: UserId::new(raw).expect("user id"),
        }
    }

    async fn next_state(rx: &mut watch::Receiver<SessionState>) -> SessionState {
        timeout(WAIT, rx.changed()).await.expect("state change").expect("channel open");
        rx.borrow().clone()
    }

    #[tokio::test]
    async fn sign_in_event_resolves_the_profile_name() {
        let (events_tx, _) = broadcast::channel(16);
        let mut provider = MockIdentityProvider::new();
        provider.expect_current_session().return_const(None);
        let subscribe_tx = events_tx.clone();
        provider
            .expect_subscribe()
            .returning(move || subscribe_tx.subscribe());

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_user()
            .returning(|id| Ok(Some(User::try_from_strings(id.as_ref(), "Alice").expect("user"))));

        let watcher = SessionWatcher::spawn(
            Arc::new(provider),
            Arc::new(directory),
            Arc::new(MockNavigator::new()),
        );
        let mut states = watcher.subscribe();
        assert_eq!(watcher.state(), SessionState::Anonymous);

        events_tx
            .send(SessionEvent::SignedIn(identity("alice")))
            .expect("deliver event");

        let state = next_state(&mut states).await;
        assert_eq!(state.user_id().map(AsRef::as_ref), Some("alice"));
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn missing_profile_leaves_the_display_name_empty() {
        let (events_tx, _) = broadcast::channel(16);
        let mut provider = MockIdentityProvider::new();
        provider.expect_current_session().return_const(None);
        let subscribe_tx = events_tx.clone();
        provider
            .expect_subscribe()
            .returning(move || subscribe_tx.subscribe());

        let mut directory = MockUserDirectory::new();
        directory.expect_find_user().returning(|_| Ok(None));

        let watcher = SessionWatcher::spawn(
            Arc::new(provider),
            Arc::new(directory),
            Arc::new(MockNavigator::new()),
        );
        let mut states = watcher.subscribe();

        events_tx
            .send(SessionEvent::SignedIn(identity("ghost")))
            .expect("deliver event");

        match next_state(&mut states).await {
            SessionState::Authenticated { display_name, .. } => assert_eq!(display_name, None),
            SessionState::Anonymous => panic!("expected an authenticated state"),
        }
    }

    #[tokio::test]
    async fn sign_out_event_returns_to_anonymous() {
        let (events_tx, _) = broadcast::channel(16);
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_current_session()
            .return_const(Some(identity("alice")));
        let subscribe_tx = events_tx.clone();
        provider
            .expect_subscribe()
            .returning(move || subscribe_tx.subscribe());

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_user()
            .returning(|id| Ok(Some(User::try_from_strings(id.as_ref(), "Alice").expect("user"))));

        let watcher = SessionWatcher::spawn(
            Arc::new(provider),
            Arc::new(directory),
            Arc::new(MockNavigator::new()),
        );
        let mut states = watcher.subscribe();

        // Initial session is restored first.
        assert!(next_state(&mut states).await.is_authenticated());

        events_tx
            .send(SessionEvent::SignedOut)
            .expect("deliver event");
        assert_eq!(next_state(&mut states).await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn sign_out_navigates_home() {
        let (events_tx, _keep_alive) = broadcast::channel::<SessionEvent>(16);
        let mut provider = MockIdentityProvider::new();
        provider.expect_current_session().return_const(None);
        let subscribe_tx = events_tx.clone();
        provider
            .expect_subscribe()
            .returning(move || subscribe_tx.subscribe());
        provider.expect_sign_out().times(1).returning(|| Ok(()));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .withf(|path| path == "/")
            .times(1)
            .return_const(());

        let watcher = SessionWatcher::spawn(
            Arc::new(provider),
            Arc::new(MockUserDirectory::new()),
            Arc::new(navigator),
        );
        watcher.sign_out().await;
    }
}
