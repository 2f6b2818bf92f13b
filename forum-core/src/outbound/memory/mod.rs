//! In-memory adapters for the driven ports.
//!
//! Reference implementations of the document store, identity provider,
//! preference storage, and router contracts. They back the integration
//! tests and double as executable documentation of each port's semantics:
//! generated string ids, write-time timestamps, and broadcast session
//! events. A `fail_writes` switch simulates remote write failures for the
//! optimistic-rollback paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use crate::domain::comment::{Comment, CommentId, NewComment};
use crate::domain::ports::{
    CommentRepository, CommentStoreError, IdentityError, IdentityProvider, Navigator,
    PreferenceStore, SessionEvent, SessionIdentity, ThreadRepository, ThreadStoreError,
    UserDirectory,
};
use crate::domain::thread::{Thread, ThreadId};
use crate::domain::user::{User, UserId};

use crate::domain::ports::DirectoryError;

#[derive(Default)]
struct StoreInner {
    users: HashMap<UserId, User>,
    threads: HashMap<ThreadId, Thread>,
    comments: HashMap<CommentId, Comment>,
}

/// In-memory document store over the `users`, `threads`, and `comments`
/// collections.
#[derive(Default)]
pub struct InMemoryForumStore {
    inner: Mutex<StoreInner>,
    fail_writes: AtomicBool,
}

impl InMemoryForumStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile record.
    pub async fn insert_user(&self, user: User) {
        self.inner.lock().await.users.insert(user.id().clone(), user);
    }

    /// Seed a thread record.
    pub async fn insert_thread(&self, thread: Thread) {
        self.inner
            .lock()
            .await
            .threads
            .insert(thread.id().clone(), thread);
    }

    /// Seed a comment record.
    pub async fn insert_comment(&self, comment: Comment) {
        self.inner
            .lock()
            .await
            .comments
            .insert(comment.id().clone(), comment);
    }

    /// Make every subsequent write fail with an unavailable error; reads
    /// keep working. Used to exercise optimistic-rollback paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Release);
    }

    /// Read back a thread record.
    pub async fn thread(&self, id: &ThreadId) -> Option<Thread> {
        self.inner.lock().await.threads.get(id).cloned()
    }

    /// Read back the stored comments for a thread.
    pub async fn comments_for(&self, thread_id: &ThreadId) -> Vec<Comment> {
        self.inner
            .lock()
            .await
            .comments
            .values()
            .filter(|comment| comment.thread_id() == thread_id)
            .cloned()
            .collect()
    }

    fn check_writable<E>(&self, err: E) -> Result<(), E> {
        if self.fail_writes.load(Ordering::Acquire) {
            Err(err)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ThreadRepository for InMemoryForumStore {
    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<Thread>, ThreadStoreError> {
        Ok(self.inner.lock().await.threads.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Thread>, ThreadStoreError> {
        Ok(self.inner.lock().await.threads.values().cloned().collect())
    }

    async fn set_locked(&self, id: &ThreadId, locked: bool) -> Result<(), ThreadStoreError> {
        self.check_writable(ThreadStoreError::unavailable("simulated write failure"))?;
        let mut inner = self.inner.lock().await;
        match inner.threads.remove(id) {
            Some(thread) => {
                inner.threads.insert(id.clone(), thread.with_locked(locked));
                Ok(())
            }
            None => Err(ThreadStoreError::not_found(id.as_ref())),
        }
    }

    async fn set_marked_answer(
        &self,
        id: &ThreadId,
        marked_answer_id: Option<CommentId>,
    ) -> Result<(), ThreadStoreError> {
        self.check_writable(ThreadStoreError::unavailable("simulated write failure"))?;
        let mut inner = self.inner.lock().await;
        match inner.threads.remove(id) {
            Some(thread) => {
                inner
                    .threads
                    .insert(id.clone(), thread.with_marked_answer(marked_answer_id));
                Ok(())
            }
            None => Err(ThreadStoreError::not_found(id.as_ref())),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryForumStore {
    async fn list_by_thread(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<Comment>, CommentStoreError> {
        Ok(self.comments_for(thread_id).await)
    }

    async fn create(&self, comment: &NewComment) -> Result<CommentId, CommentStoreError> {
        self.check_writable(CommentStoreError::unavailable("simulated write failure"))?;

        let id = CommentId::new(Uuid::new_v4().to_string())
            .map_err(|err| CommentStoreError::unavailable(format!("generated id invalid: {err}")))?;
        let record = Comment::new(
            id.clone(),
            comment.content(),
            comment.creator().clone(),
            comment.thread_id().clone(),
            Utc::now(),
        )
        .map_err(|err| CommentStoreError::unavailable(format!("payload rejected: {err}")))?;

        self.inner.lock().await.comments.insert(id.clone(), record);
        Ok(id)
    }
}

#[async_trait]
impl UserDirectory for InMemoryForumStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.inner.lock().await.users.get(id).cloned())
    }
}

const SESSION_EVENT_CAPACITY: usize = 16;

/// In-memory identity provider with broadcast session events.
pub struct InMemoryIdentityProvider {
    session: StdMutex<Option<SessionIdentity>>,
    events: broadcast::Sender<SessionEvent>,
}

impl InMemoryIdentityProvider {
    /// Create a provider with no signed-in user.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            session: StdMutex::new(None),
            events,
        }
    }

    /// Sign a user in and notify subscribers. Test control surface;
    /// credentials are the real provider's concern.
    pub fn sign_in(&self, user_id: UserId) {
        let identity = SessionIdentity { user_id };
        if let Ok(mut session) = self.session.lock() {
            *session = Some(identity.clone());
        }
        let _ = self.events.send(SessionEvent::SignedIn(identity));
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    fn current_session(&self) -> Option<SessionIdentity> {
        self.session.lock().ok().and_then(|session| session.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        if let Ok(mut session) = self.session.lock() {
            *session = None;
        }
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }
}

/// In-memory stand-in for browser-local key-value storage.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    flags: StdMutex<HashMap<String, bool>>,
}

impl InMemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get_flag(&self, key: &str) -> Option<bool> {
        self.flags.lock().ok().and_then(|flags| flags.get(key).copied())
    }

    fn set_flag(&self, key: &str, value: bool) {
        if let Ok(mut flags) = self.flags.lock() {
            flags.insert(key.to_owned(), value);
        }
    }
}

/// Navigator that records pushed paths for assertions.
#[derive(Default)]
pub struct RecordingNavigator {
    paths: StdMutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Create a navigator with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths pushed so far, oldest first.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().map(|paths| paths.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_owned());
        }
    }
}
