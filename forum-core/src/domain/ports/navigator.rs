//! Driven port for the routing collaborator.

/// Navigation primitive supplied by the router. The only use in this core is
/// returning to the home page after sign-out.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to the given path.
    fn push(&self, path: &str);
}
