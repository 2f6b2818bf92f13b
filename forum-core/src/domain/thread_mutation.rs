//! Creator-gated thread mutations.
//!
//! Both operations apply optimistically to the view's local mirror and roll
//! the mirror back when the remote write fails. The store's access rules are
//! assumed to enforce the creator gate remotely as well; the local gate only
//! decides whether a call is attempted at all.

use std::sync::Arc;

use crate::domain::comment::CommentId;
use crate::domain::ports::ThreadRepository;
use crate::domain::thread::{Thread, ThreadId};
use crate::domain::user::UserId;

/// Local, optimistic mirror of the mutable thread fields.
///
/// Seeded from the loaded thread record; the view renders lock and
/// marked-answer state from here rather than from the (stale) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMirror {
    thread_id: ThreadId,
    creator: UserId,
    locked: bool,
    marked_answer_id: Option<CommentId>,
}

impl ThreadMirror {
    /// Seed a mirror from a loaded thread record.
    pub fn for_thread(thread: &Thread) -> Self {
        Self {
            thread_id: thread.id().clone(),
            creator: thread.creator().clone(),
            locked: thread.locked(),
            marked_answer_id: thread.marked_answer_id().cloned(),
        }
    }

    /// Mirrored thread id.
    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    /// Creator of the mirrored thread.
    pub fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Current (possibly optimistic) lock state.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Current (possibly optimistic) marked answer.
    pub fn marked_answer_id(&self) -> Option<&CommentId> {
        self.marked_answer_id.as_ref()
    }
}

/// Result of a gated mutation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The optimistic update stands and the write was acknowledged.
    Applied,
    /// The caller is not the thread's creator; nothing changed locally or
    /// remotely.
    Denied,
    /// The write failed and the optimistic local change was reverted.
    RolledBack,
}

/// Creator-gated state transitions on a thread record.
pub struct ThreadMutationGateway<T> {
    threads: Arc<T>,
}

impl<T> ThreadMutationGateway<T> {
    /// Create a gateway over the thread store.
    pub fn new(threads: Arc<T>) -> Self {
        Self { threads }
    }

    fn is_creator(mirror: &ThreadMirror, current_user: Option<&UserId>) -> bool {
        current_user == Some(&mirror.creator)
    }
}

impl<T: ThreadRepository> ThreadMutationGateway<T> {
    /// Flip the thread's `locked` flag. An involution: applying it twice
    /// returns the lock to its original state.
    pub async fn toggle_lock(
        &self,
        mirror: &mut ThreadMirror,
        current_user: Option<&UserId>,
    ) -> MutationOutcome {
        if !Self::is_creator(mirror, current_user) {
            return MutationOutcome::Denied;
        }

        let next = !mirror.locked;
        mirror.locked = next;
        match self.threads.set_locked(&mirror.thread_id, next).await {
            Ok(()) => MutationOutcome::Applied,
            Err(err) => {
                tracing::warn!(thread_id = %mirror.thread_id, error = %err, "lock update failed");
                mirror.locked = !next;
                MutationOutcome::RolledBack
            }
        }
    }

    /// Toggle the marked answer: marking the currently-marked comment clears
    /// it, marking any other comment replaces it. At most one comment is
    /// marked per thread.
    pub async fn set_marked_answer(
        &self,
        mirror: &mut ThreadMirror,
        current_user: Option<&UserId>,
        comment_id: &CommentId,
    ) -> MutationOutcome {
        if !Self::is_creator(mirror, current_user) {
            return MutationOutcome::Denied;
        }

        let next = if mirror.marked_answer_id.as_ref() == Some(comment_id) {
            None
        } else {
            Some(comment_id.clone())
        };
        let previous = std::mem::replace(&mut mirror.marked_answer_id, next.clone());

        match self
            .threads
            .set_marked_answer(&mirror.thread_id, next)
            .await
        {
            Ok(()) => MutationOutcome::Applied,
            Err(err) => {
                tracing::warn!(
                    thread_id = %mirror.thread_id,
                    error = %err,
                    "marked-answer update failed"
                );
                mirror.marked_answer_id = previous;
                MutationOutcome::RolledBack
            }
        }
    }
}
