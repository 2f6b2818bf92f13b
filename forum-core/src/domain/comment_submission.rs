//! Comment submission.
//!
//! The form is hidden when the thread is locked or the user is anonymous;
//! the gateway re-checks both anyway so no caller can bypass the gate.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::comment::{Comment, NewComment};
use crate::domain::comment_loader::{map_comment_store_error, CommentView};
use crate::domain::error::DomainError;
use crate::domain::ports::{CommentRepository, UserDirectory};
use crate::domain::thread_mutation::ThreadMirror;
use crate::domain::user::UserId;
use crate::domain::username_resolver::UsernameResolver;

/// Creates comment records under a thread.
pub struct CommentSubmissionGateway<C, D> {
    comments: Arc<C>,
    resolver: Arc<UsernameResolver<D>>,
}

impl<C, D> CommentSubmissionGateway<C, D> {
    /// Create a gateway sharing the view's resolver memo.
    pub fn new(comments: Arc<C>, resolver: Arc<UsernameResolver<D>>) -> Self {
        Self { comments, resolver }
    }
}

impl<C, D> CommentSubmissionGateway<C, D>
where
    C: CommentRepository,
    D: UserDirectory,
{
    /// Submit a comment under the mirrored thread.
    ///
    /// Preconditions: the caller is authenticated, the thread is not locked,
    /// and the content is non-empty after trimming. The store assigns the
    /// real id and timestamp; the returned view is an optimistic copy with a
    /// local timestamp, visible immediately and reconciled on the next full
    /// reload.
    pub async fn submit(
        &self,
        thread: &ThreadMirror,
        content: &str,
        current_user: Option<&UserId>,
    ) -> Result<CommentView, DomainError> {
        let user = current_user.ok_or_else(|| DomainError::unauthorized("sign in to comment"))?;
        if thread.locked() {
            return Err(DomainError::forbidden("thread is locked"));
        }
        if content.trim().is_empty() {
            return Err(DomainError::invalid_request("comment must not be empty"));
        }

        let payload = NewComment::new(thread.thread_id().clone(), user.clone(), content)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        let id = self
            .comments
            .create(&payload)
            .await
            .map_err(map_comment_store_error)?;

        let comment = Comment::new(
            id,
            content,
            user.clone(),
            thread.thread_id().clone(),
            Utc::now(),
        )
        .map_err(|err| DomainError::internal(format!("optimistic comment invalid: {err}")))?;
        let author_name = self.resolver.resolve(user).await;

        Ok(CommentView {
            comment,
            author_name,
        })
    }
}
