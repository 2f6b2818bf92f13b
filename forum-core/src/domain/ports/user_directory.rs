//! Driven port for profile lookups in the `users` collection.

use async_trait::async_trait;

use crate::domain::user::{DisplayName, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user directory adapters.
    pub enum DirectoryError {
        /// The remote call was rejected or dropped.
        Unavailable { message: String } => "user directory unavailable: {message}",
        /// The store's access rules denied the read.
        PermissionDenied { message: String } => "user directory read denied: {message}",
    }
}

/// Port for resolving user ids to profile records.
///
/// A missing profile is `Ok(None)`, not an error; the resolver renders it
/// with the `"Unknown"` fallback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the profile record for a user id.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;
}

/// Deterministic directory for wiring experiments and smoke tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

impl FixtureUserDirectory {
    /// Display name returned for every id.
    pub const DISPLAY_NAME: &'static str = "Ada Lovelace";
}

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let display_name = DisplayName::new(Self::DISPLAY_NAME)
            .map_err(|err| DirectoryError::unavailable(format!("invalid fixture name: {err}")))?;
        Ok(Some(User::new(id.clone(), display_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_directory_echoes_the_requested_id() {
        let directory = FixtureUserDirectory;
        let id = UserId::new("u1").expect("user id");

        let user = directory
            .find_user(&id)
            .await
            .expect("lookup")
            .expect("profile present");
        assert_eq!(user.id(), &id);
        assert_eq!(
            user.display_name().as_ref(),
            FixtureUserDirectory::DISPLAY_NAME
        );
    }
}
