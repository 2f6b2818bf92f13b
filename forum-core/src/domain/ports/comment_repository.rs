//! Driven port for the `comments` collection.

use async_trait::async_trait;

use crate::domain::comment::{Comment, CommentId, NewComment};
use crate::domain::thread::ThreadId;

use super::define_port_error;

define_port_error! {
    /// Failures raised by comment store adapters.
    pub enum CommentStoreError {
        /// The remote call was rejected or dropped.
        Unavailable { message: String } => "comment store unavailable: {message}",
        /// The store's access rules denied the operation.
        PermissionDenied { message: String } => "comment store operation denied: {message}",
    }
}

/// Port over comment reads and creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fetch every comment whose `threadId` equals the given id. The full
    /// set is loaded on each thread-view mount; there is no pagination.
    async fn list_by_thread(&self, thread_id: &ThreadId)
        -> Result<Vec<Comment>, CommentStoreError>;

    /// Create a comment record. The store assigns the id (returned) and the
    /// `createdAt` timestamp at write time.
    async fn create(&self, comment: &NewComment) -> Result<CommentId, CommentStoreError>;
}
