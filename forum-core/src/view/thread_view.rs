//! The composed thread view.
//!
//! Mirrors the thread detail page: on mount the thread aggregate and the
//! comment collection load in parallel, identity state gates the comment
//! form and the creator controls, and the comment list is re-ordered on
//! every render. Remote failures degrade silently: the thread stays in its
//! loading state and the comment list stays empty.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::comment::CommentId;
use crate::domain::comment_loader::{CommentCollectionLoader, CommentView};
use crate::domain::comment_submission::CommentSubmissionGateway;
use crate::domain::error::DomainError;
use crate::domain::ordering::order_comments;
use crate::domain::ports::{CommentRepository, ThreadRepository, UserDirectory};
use crate::domain::session_watcher::SessionState;
use crate::domain::thread::ThreadId;
use crate::domain::thread_loader::{ThreadAggregateLoader, ThreadView};
use crate::domain::thread_mutation::{MutationOutcome, ThreadMirror, ThreadMutationGateway};
use crate::domain::user::UserId;
use crate::domain::username_resolver::UsernameResolver;
use crate::view::liveness::ViewLiveness;
use crate::view::route::thread_id_from_path;

/// Render state for the thread header area.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadState {
    /// Initial state; also the terminal state after a failed load
    /// ("Loading thread..." persists, no retry).
    Loading,
    /// The record does not exist ("No such thread!").
    NotFound,
    /// Loaded and denormalised.
    Ready(ThreadView),
}

/// One mounted thread view: loaders, gateways, and local optimistic state.
pub struct ThreadViewSession<T, C, D> {
    thread_loader: ThreadAggregateLoader<T, D>,
    comment_loader: CommentCollectionLoader<C, D>,
    mutations: ThreadMutationGateway<T>,
    submissions: CommentSubmissionGateway<C, D>,
    session: watch::Receiver<SessionState>,
    thread_id: ThreadId,
    state: ThreadState,
    mirror: Option<ThreadMirror>,
    comments: Vec<CommentView>,
    liveness: ViewLiveness,
}

impl<T, C, D> ThreadViewSession<T, C, D>
where
    T: ThreadRepository,
    C: CommentRepository,
    D: UserDirectory,
{
    /// Build a view for a thread id. The username memo is shared by both
    /// loaders and the submission gateway, scoped to this view instance.
    pub fn new(
        threads: Arc<T>,
        comments: Arc<C>,
        directory: Arc<D>,
        session: watch::Receiver<SessionState>,
        thread_id: ThreadId,
    ) -> Self {
        let resolver = Arc::new(UsernameResolver::new(directory));
        Self {
            thread_loader: ThreadAggregateLoader::new(Arc::clone(&threads), Arc::clone(&resolver)),
            comment_loader: CommentCollectionLoader::new(
                Arc::clone(&comments),
                Arc::clone(&resolver),
            ),
            mutations: ThreadMutationGateway::new(threads),
            submissions: CommentSubmissionGateway::new(comments, resolver),
            session,
            thread_id,
            state: ThreadState::Loading,
            mirror: None,
            comments: Vec::new(),
            liveness: ViewLiveness::new(),
        }
    }

    /// Build a view from a route path; `None` when no thread id can be
    /// extracted from it.
    pub fn from_path(
        threads: Arc<T>,
        comments: Arc<C>,
        directory: Arc<D>,
        session: watch::Receiver<SessionState>,
        path: &str,
    ) -> Option<Self> {
        let thread_id = thread_id_from_path(path)?;
        Some(Self::new(threads, comments, directory, session, thread_id))
    }

    /// Load the thread aggregate and the comment collection in parallel.
    /// Safe to call again on a route change; results arriving after
    /// [`Self::unmount`] are discarded.
    pub async fn mount(&mut self) {
        let (thread, comments) = tokio::join!(
            self.thread_loader.load(&self.thread_id),
            self.comment_loader.load(&self.thread_id),
        );

        if !self.liveness.is_live() {
            tracing::debug!(thread_id = %self.thread_id, "discarding load results for dead view");
            return;
        }

        match thread {
            Ok(Some(view)) => {
                self.mirror = Some(ThreadMirror::for_thread(&view.thread));
                self.state = ThreadState::Ready(view);
            }
            Ok(None) => {
                self.state = ThreadState::NotFound;
            }
            Err(err) => {
                // Stay in the loading state; no retry.
                tracing::warn!(thread_id = %self.thread_id, error = %err, "thread load failed");
            }
        }

        match comments {
            Ok(views) => self.comments = views,
            Err(err) => {
                tracing::warn!(thread_id = %self.thread_id, error = %err, "comment load failed");
            }
        }
    }

    /// Revoke liveness so in-flight results are discarded. The owner is
    /// expected to also shut down its session watcher at teardown.
    pub fn unmount(&self) {
        self.liveness.revoke();
    }

    /// Current render state of the thread header.
    pub fn thread_state(&self) -> &ThreadState {
        &self.state
    }

    /// Comment collection in render order: the marked answer first, then
    /// newest first. Re-derived on every call from the same pure rule.
    pub fn ordered_comments(&self) -> Vec<CommentView> {
        order_comments(
            self.comments.clone(),
            self.mirror.as_ref().and_then(ThreadMirror::marked_answer_id),
        )
    }

    /// Current (possibly optimistic) lock state.
    pub fn locked(&self) -> bool {
        self.mirror.as_ref().is_some_and(ThreadMirror::locked)
    }

    /// Current (possibly optimistic) marked answer.
    pub fn marked_answer_id(&self) -> Option<&CommentId> {
        self.mirror.as_ref().and_then(ThreadMirror::marked_answer_id)
    }

    /// Whether the signed-in user created this thread; gates the lock and
    /// mark controls.
    pub fn is_creator(&self) -> bool {
        let state = self.session.borrow();
        match (&self.mirror, state.user_id()) {
            (Some(mirror), Some(user_id)) => mirror.creator() == user_id,
            _ => false,
        }
    }

    /// Whether the comment form is shown: signed in, thread loaded, and not
    /// locked.
    pub fn can_comment(&self) -> bool {
        self.session.borrow().is_authenticated() && self.mirror.is_some() && !self.locked()
    }

    fn current_user(&self) -> Option<UserId> {
        self.session.borrow().user_id().cloned()
    }

    /// Toggle the thread lock (creator only).
    pub async fn toggle_lock(&mut self) -> MutationOutcome {
        let user = self.current_user();
        let Some(mirror) = self.mirror.as_mut() else {
            return MutationOutcome::Denied;
        };
        self.mutations.toggle_lock(mirror, user.as_ref()).await
    }

    /// Toggle the marked answer on a comment (creator only).
    pub async fn mark_answer(&mut self, comment_id: &CommentId) -> MutationOutcome {
        let user = self.current_user();
        let Some(mirror) = self.mirror.as_mut() else {
            return MutationOutcome::Denied;
        };
        self.mutations
            .set_marked_answer(mirror, user.as_ref(), comment_id)
            .await
    }

    /// Submit a comment and append the optimistic copy to the collection.
    pub async fn submit_comment(&mut self, content: &str) -> Result<(), DomainError> {
        let user = self.current_user();
        let Some(mirror) = self.mirror.as_ref() else {
            return Err(DomainError::not_found("thread is not loaded"));
        };

        let view = self
            .submissions
            .submit(mirror, content, user.as_ref())
            .await?;

        if self.liveness.is_live() {
            self.comments.push(view);
        }
        Ok(())
    }
}
