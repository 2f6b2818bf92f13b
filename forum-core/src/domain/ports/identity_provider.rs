//! Driven port for the external identity collaborator.
//!
//! The provider owns registration, credentials, and session persistence;
//! this core only observes sign-in/sign-out transitions and asks it to end
//! the current session on logout.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::user::UserId;

use super::define_port_error;

/// Opaque authenticated identity reported by the provider.
///
/// Carries only the user id; the display name lives in the `users`
/// collection and is resolved separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Provider-assigned user id, shared with the document store.
    pub user_id: UserId,
}

/// A session-state transition emitted by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A user signed in (or an existing session was restored).
    SignedIn(SessionIdentity),
    /// The current session ended.
    SignedOut,
}

define_port_error! {
    /// Failures reported by the identity provider.
    pub enum IdentityError {
        /// The provider rejected or dropped the sign-out call.
        SignOutFailed { message: String } => "sign-out failed: {message}",
    }
}

/// Port over the identity provider's session surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identity of the currently signed-in user, if any.
    fn current_session(&self) -> Option<SessionIdentity>;

    /// Subscribe to session-state transitions. Dropping the receiver is the
    /// deterministic unsubscription required at view teardown.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
