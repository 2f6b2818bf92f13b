//! Comment entity and creation payload.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::thread::ThreadId;
use crate::domain::user::UserId;

/// Validation errors for comment types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("comment id must not be empty")]
    EmptyId,
    #[error("comment id must not contain surrounding whitespace")]
    PaddedId,
    #[error("comment content must not be empty")]
    EmptyContent,
}

/// Opaque comment identifier assigned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentId(String);

impl CommentId {
    /// Validate and construct a [`CommentId`].
    pub fn new(id: impl Into<String>) -> Result<Self, CommentValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CommentValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(CommentValidationError::PaddedId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for CommentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CommentId> for String {
    fn from(value: CommentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CommentId {
    type Error = CommentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A reply attached to a thread, as stored in the `comments` collection.
///
/// Immutable once created; the only pointer to it that changes afterwards is
/// the owning thread's `marked_answer_id`, which lives on the thread record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    content: String,
    creator: UserId,
    thread_id: ThreadId,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment from validated components.
    pub fn new(
        id: CommentId,
        content: impl Into<String>,
        creator: UserId,
        thread_id: ThreadId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CommentValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        Ok(Self {
            id,
            content,
            creator,
            thread_id,
            created_at,
        })
    }

    /// Stable comment identifier.
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Comment body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Id of the user who wrote the comment.
    pub fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Owning thread.
    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    /// Creation timestamp, assigned by the store at write time. Optimistic
    /// copies carry a local timestamp until the next full reload.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Payload for creating a comment. The store assigns the id and the
/// `created_at` timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    thread_id: ThreadId,
    creator: UserId,
    content: String,
}

impl NewComment {
    /// Build a creation payload; content must be non-empty after trimming.
    pub fn new(
        thread_id: ThreadId,
        creator: UserId,
        content: impl Into<String>,
    ) -> Result<Self, CommentValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        Ok(Self {
            thread_id,
            creator,
            content,
        })
    }

    /// Target thread.
    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    /// Authenticated author.
    pub fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Comment body as submitted.
    pub fn content(&self) -> &str {
        &self.content
    }
}
