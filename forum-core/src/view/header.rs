//! Header state: the persisted dark-mode preference.
//!
//! Sign-out also lives in the header but is wired through
//! [`crate::domain::session_watcher::SessionWatcher::sign_out`].

use std::sync::Arc;

use crate::domain::ports::PreferenceStore;

/// Storage key for the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Dark-mode toggle backed by browser-local key-value storage.
///
/// Read once at mount (absent key means light mode), written on each toggle.
pub struct DarkModeToggle<S> {
    store: Arc<S>,
    enabled: bool,
}

impl<S: PreferenceStore> DarkModeToggle<S> {
    /// Read the persisted preference and build the toggle.
    pub fn mount(store: Arc<S>) -> Self {
        let enabled = store.get_flag(DARK_MODE_KEY).unwrap_or(false);
        Self { store, enabled }
    }

    /// Current mode.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the mode, persist it, and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.store.set_flag(DARK_MODE_KEY, self.enabled);
        self.enabled
    }
}
