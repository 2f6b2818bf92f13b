//! Driven ports for the external collaborators.
//!
//! The document store, identity provider, preference storage, and router are
//! external systems; every interaction with them goes through the traits in
//! this module so the domain services stay adapter-free and mockable.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod identity_provider;
mod navigator;
mod preference_store;
mod thread_repository;
mod user_directory;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentStoreError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityError, IdentityProvider, SessionEvent, SessionIdentity};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::Navigator;
#[cfg(test)]
pub use preference_store::MockPreferenceStore;
pub use preference_store::PreferenceStore;
#[cfg(test)]
pub use thread_repository::MockThreadRepository;
pub use thread_repository::{ThreadRepository, ThreadStoreError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{DirectoryError, FixtureUserDirectory, UserDirectory};
