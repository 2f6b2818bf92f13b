//! Memoised display-name resolution.
//!
//! One page view issues many author lookups, and most of them repeat (a
//! thread's comments often share a handful of creators). The resolver keeps
//! a per-view memo so each distinct id hits the directory at most once, and
//! coalesces in-flight lookups so concurrent resolutions of the same id do
//! not duplicate the underlying call. The memo lives and dies with the view;
//! a full reload starts cold.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::{Mutex, OnceCell};

use crate::domain::ports::UserDirectory;
use crate::domain::user::{DisplayName, UserId};

type ResolvedCell = Arc<OnceCell<Option<DisplayName>>>;

/// Per-view display-name resolver over a [`UserDirectory`].
pub struct UsernameResolver<D> {
    directory: Arc<D>,
    cache: Mutex<HashMap<UserId, ResolvedCell>>,
}

impl<D> UsernameResolver<D> {
    /// Create a resolver with an empty memo.
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<D: UserDirectory> UsernameResolver<D> {
    /// Resolve one id. Missing profiles and failed lookups both settle as
    /// `None` (logged, never surfaced); the outcome is memoised either way
    /// so the directory sees at most one call per id.
    pub async fn resolve(&self, id: &UserId) -> Option<DisplayName> {
        let cell = {
            let mut cache = self.cache.lock().await;
            Arc::clone(cache.entry(id.clone()).or_default())
        };

        cell.get_or_init(|| async {
            match self.directory.find_user(id).await {
                Ok(Some(user)) => Some(user.display_name().clone()),
                Ok(None) => {
                    tracing::warn!(user_id = %id, "no profile record for user");
                    None
                }
                Err(err) => {
                    tracing::warn!(user_id = %id, error = %err, "profile lookup failed");
                    None
                }
            }
        })
        .await
        .clone()
    }

    /// Resolve a batch of ids in parallel, deduplicating before any lookup
    /// is issued. Returns only once every resolution has settled.
    pub async fn resolve_many<'a, I>(&self, ids: I) -> HashMap<UserId, Option<DisplayName>>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        let distinct: HashSet<&UserId> = ids.into_iter().collect();
        let lookups = distinct
            .into_iter()
            .map(|id| async move { (id.clone(), self.resolve(id).await) });
        join_all(lookups).await.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{DirectoryError, MockUserDirectory};
    use crate::domain::user::User;

    fn user_id(raw: &str) -> UserId {
        UserId::new(raw).expect("user id")
    }

    fn profile(id: &UserId, name: &str) -> User {
        User::try_from_strings(id.as_ref(), name).expect("profile")
    }

    #[tokio::test]
    async fn resolves_through_the_directory_once_per_id() {
        let alice = user_id("alice");
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_user()
            .times(1)
            .returning(|id| Ok(Some(User::try_from_strings(id.as_ref(), "Alice").expect("user"))));

        let resolver = UsernameResolver::new(Arc::new(directory));
        let first = resolver.resolve(&alice).await;
        let second = resolver.resolve(&alice).await;

        assert_eq!(first.as_ref().map(AsRef::as_ref), Some("Alice"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn batch_resolution_issues_one_lookup_per_distinct_creator() {
        // Five comments, two distinct creators: exactly two directory calls.
        let alice = user_id("alice");
        let bob = user_id("bob");
        let authors = vec![
            alice.clone(),
            bob.clone(),
            alice.clone(),
            alice.clone(),
            bob.clone(),
        ];

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_user()
            .times(2)
            .returning(|id| Ok(Some(User::try_from_strings(id.as_ref(), "Someone").expect("user"))));

        let resolver = UsernameResolver::new(Arc::new(directory));
        let resolved = resolver.resolve_many(authors.iter()).await;

        assert_eq!(resolved.len(), 2);
        assert!(resolved[&alice].is_some());
        assert!(resolved[&bob].is_some());
    }

    #[tokio::test]
    async fn concurrent_resolutions_of_one_id_share_a_single_lookup() {
        let alice = user_id("alice");
        let expected = profile(&alice, "Alice");
        let mut directory = MockUserDirectory::new();
        directory.expect_find_user().times(1).returning(move |_| {
            let user = expected.clone();
            Ok(Some(user))
        });

        let resolver = Arc::new(UsernameResolver::new(Arc::new(directory)));
        let (a, b) = tokio::join!(resolver.resolve(&alice), resolver.resolve(&alice));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn missing_profile_settles_as_none_and_is_memoised() {
        let ghost = user_id("ghost");
        let mut directory = MockUserDirectory::new();
        directory.expect_find_user().times(1).returning(|_| Ok(None));

        let resolver = UsernameResolver::new(Arc::new(directory));
        assert_eq!(resolver.resolve(&ghost).await, None);
        // Memoised: no second directory call.
        assert_eq!(resolver.resolve(&ghost).await, None);
    }

    #[tokio::test]
    async fn failed_lookup_settles_as_none() {
        let alice = user_id("alice");
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_user()
            .times(1)
            .returning(|_| Err(DirectoryError::unavailable("network down")));

        let resolver = UsernameResolver::new(Arc::new(directory));
        assert_eq!(resolver.resolve(&alice).await, None);
    }
}
