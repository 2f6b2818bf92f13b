//! Thread aggregate loading for the thread view.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::ports::{ThreadRepository, ThreadStoreError, UserDirectory};
use crate::domain::thread::{Thread, ThreadId};
use crate::domain::user::{rendered_name, DisplayName};
use crate::domain::username_resolver::UsernameResolver;

/// A thread denormalised with its creator's resolved display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadView {
    /// The underlying thread record.
    pub thread: Thread,
    /// Resolved creator name; `None` when the profile is missing or the
    /// lookup failed.
    pub creator_name: Option<DisplayName>,
}

impl ThreadView {
    /// Creator name as rendered, with the uniform `"Unknown"` fallback.
    pub fn rendered_creator(&self) -> &str {
        rendered_name(self.creator_name.as_ref())
    }
}

pub(crate) fn map_thread_store_error(error: ThreadStoreError) -> DomainError {
    match error {
        ThreadStoreError::Unavailable { message } => {
            DomainError::unavailable(format!("thread store unavailable: {message}"))
        }
        ThreadStoreError::PermissionDenied { message } => {
            DomainError::forbidden(format!("thread store denied the operation: {message}"))
        }
        ThreadStoreError::NotFound { thread_id } => {
            DomainError::not_found(format!("no such thread: {thread_id}"))
        }
    }
}

/// Loads a thread record together with its creator's display name.
pub struct ThreadAggregateLoader<T, D> {
    threads: Arc<T>,
    resolver: Arc<UsernameResolver<D>>,
}

impl<T, D> ThreadAggregateLoader<T, D> {
    /// Create a loader sharing the view's resolver memo.
    pub fn new(threads: Arc<T>, resolver: Arc<UsernameResolver<D>>) -> Self {
        Self { threads, resolver }
    }
}

impl<T, D> ThreadAggregateLoader<T, D>
where
    T: ThreadRepository,
    D: UserDirectory,
{
    /// Fetch the thread and resolve its creator. `Ok(None)` means the record
    /// does not exist ("No such thread!"); `Err` is a degraded state the
    /// view logs and absorbs by staying in its loading state.
    pub async fn load(&self, thread_id: &ThreadId) -> Result<Option<ThreadView>, DomainError> {
        let thread = self
            .threads
            .find_by_id(thread_id)
            .await
            .map_err(map_thread_store_error)?;

        let Some(thread) = thread else {
            return Ok(None);
        };

        let creator_name = self.resolver.resolve(thread.creator()).await;
        Ok(Some(ThreadView {
            thread,
            creator_name,
        }))
    }
}
