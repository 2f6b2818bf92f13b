//! Thread index for the home view.

use std::sync::Arc;

use crate::domain::ports::ThreadRepository;
use crate::domain::thread::Thread;

/// Loads every thread for the home index, newest first.
pub struct ThreadIndexLoader<T> {
    threads: Arc<T>,
}

impl<T> ThreadIndexLoader<T> {
    /// Create an index loader over the thread store.
    pub fn new(threads: Arc<T>) -> Self {
        Self { threads }
    }
}

impl<T: ThreadRepository> ThreadIndexLoader<T> {
    /// Fetch all threads ordered by creation time descending. Failures are
    /// logged and degrade to an empty index.
    pub async fn load_all(&self) -> Vec<Thread> {
        match self.threads.list_all().await {
            Ok(mut threads) => {
                threads.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
                threads
            }
            Err(err) => {
                tracing::warn!(error = %err, "thread index fetch failed");
                Vec::new()
            }
        }
    }
}
