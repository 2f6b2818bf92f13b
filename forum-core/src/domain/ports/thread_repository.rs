//! Driven port for the `threads` collection.

use async_trait::async_trait;

use crate::domain::comment::CommentId;
use crate::domain::thread::{Thread, ThreadId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by thread store adapters.
    pub enum ThreadStoreError {
        /// The remote call was rejected or dropped.
        Unavailable { message: String } => "thread store unavailable: {message}",
        /// The store's access rules denied the operation.
        PermissionDenied { message: String } => "thread store operation denied: {message}",
        /// A field update targeted a record that does not exist.
        NotFound { thread_id: String } => "no such thread: {thread_id}",
    }
}

/// Port over thread reads and the two creator-gated field updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Fetch a thread by id; `Ok(None)` when no such record exists.
    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<Thread>, ThreadStoreError>;

    /// Fetch every thread record, for the home index.
    async fn list_all(&self) -> Result<Vec<Thread>, ThreadStoreError>;

    /// Update the `locked` field by id.
    async fn set_locked(&self, id: &ThreadId, locked: bool) -> Result<(), ThreadStoreError>;

    /// Update the `markedAnswerId` field by id; `None` clears the mark.
    async fn set_marked_answer(
        &self,
        id: &ThreadId,
        marked_answer_id: Option<CommentId>,
    ) -> Result<(), ThreadStoreError>;
}
