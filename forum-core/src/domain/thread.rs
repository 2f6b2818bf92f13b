//! Thread entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::comment::CommentId;
use crate::domain::user::UserId;

/// Validation errors for thread types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThreadValidationError {
    #[error("thread id must not be empty")]
    EmptyId,
    #[error("thread id must not contain surrounding whitespace")]
    PaddedId,
    #[error("thread title must not be empty")]
    EmptyTitle,
}

/// Opaque thread identifier assigned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThreadId(String);

impl ThreadId {
    /// Validate and construct a [`ThreadId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ThreadValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ThreadValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ThreadValidationError::PaddedId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ThreadId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ThreadId> for String {
    fn from(value: ThreadId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ThreadId {
    type Error = ThreadValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A top-level discussion topic as stored in the `threads` collection.
///
/// ## Invariants
/// - `marked_answer_id`, when set, must reference a comment whose
///   `thread_id` equals this thread's `id`. Only the creator may mutate
///   `locked` or `marked_answer_id`; the mutation gateway enforces this
///   locally and the store's access rules are assumed to enforce it
///   remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    id: ThreadId,
    title: String,
    description: String,
    category: String,
    creator: UserId,
    created_at: DateTime<Utc>,
    #[serde(default)]
    locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marked_answer_id: Option<CommentId>,
}

impl Thread {
    /// Build a thread from validated components.
    #[allow(clippy::too_many_arguments, reason = "record constructor mirrors the stored fields")]
    pub fn new(
        id: ThreadId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        creator: UserId,
        created_at: DateTime<Utc>,
        locked: bool,
        marked_answer_id: Option<CommentId>,
    ) -> Result<Self, ThreadValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ThreadValidationError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            description: description.into(),
            category: category.into(),
            creator,
            created_at,
            locked,
            marked_answer_id,
        })
    }

    /// Stable thread identifier.
    pub fn id(&self) -> &ThreadId {
        &self.id
    }

    /// Thread title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form thread body.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category label chosen at creation time.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Id of the user who created the thread.
    pub fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Store-assigned creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether new comments are rejected.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Currently pinned comment, if any.
    pub fn marked_answer_id(&self) -> Option<&CommentId> {
        self.marked_answer_id.as_ref()
    }

    /// Copy of this record with `locked` replaced; models the store's
    /// update-fields-by-id write.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Copy of this record with `marked_answer_id` replaced.
    pub fn with_marked_answer(mut self, marked_answer_id: Option<CommentId>) -> Self {
        self.marked_answer_id = marked_answer_id;
        self
    }
}
