//! Comment collection loading for the thread view.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::ports::{CommentRepository, CommentStoreError, UserDirectory};
use crate::domain::thread::ThreadId;
use crate::domain::user::{rendered_name, DisplayName, UserId};
use crate::domain::username_resolver::UsernameResolver;

/// A comment denormalised with its author's resolved display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// The underlying comment record.
    pub comment: Comment,
    /// Resolved author name; `None` when the profile is missing or the
    /// lookup failed.
    pub author_name: Option<DisplayName>,
}

impl CommentView {
    /// Author name as rendered, with the uniform `"Unknown"` fallback.
    pub fn rendered_author(&self) -> &str {
        rendered_name(self.author_name.as_ref())
    }
}

pub(crate) fn map_comment_store_error(error: CommentStoreError) -> DomainError {
    match error {
        CommentStoreError::Unavailable { message } => {
            DomainError::unavailable(format!("comment store unavailable: {message}"))
        }
        CommentStoreError::PermissionDenied { message } => {
            DomainError::forbidden(format!("comment store denied the operation: {message}"))
        }
    }
}

/// Loads the full comment collection for a thread and resolves authors.
pub struct CommentCollectionLoader<C, D> {
    comments: Arc<C>,
    resolver: Arc<UsernameResolver<D>>,
}

impl<C, D> CommentCollectionLoader<C, D> {
    /// Create a loader sharing the view's resolver memo.
    pub fn new(comments: Arc<C>, resolver: Arc<UsernameResolver<D>>) -> Self {
        Self { comments, resolver }
    }
}

impl<C, D> CommentCollectionLoader<C, D>
where
    C: CommentRepository,
    D: UserDirectory,
{
    /// Fetch every comment under `thread_id` and resolve each distinct
    /// author in parallel. The collection is published only once all
    /// resolutions have settled, so renders never see half-resolved names.
    pub async fn load(&self, thread_id: &ThreadId) -> Result<Vec<CommentView>, DomainError> {
        let comments = self
            .comments
            .list_by_thread(thread_id)
            .await
            .map_err(map_comment_store_error)?;

        let names = self
            .resolver
            .resolve_many(comments.iter().map(Comment::creator))
            .await;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let author_name = lookup_name(&names, comment.creator());
                CommentView {
                    comment,
                    author_name,
                }
            })
            .collect())
    }
}

fn lookup_name(
    names: &std::collections::HashMap<UserId, Option<DisplayName>>,
    creator: &UserId,
) -> Option<DisplayName> {
    names.get(creator).cloned().flatten()
}
