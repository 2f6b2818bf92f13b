//! Driven port for the browser-local key-value preference storage.

/// Synchronous boolean-flag storage keyed by string, mirroring the
/// `localStorage` surface the header uses for the dark-mode toggle.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync {
    /// Read a stored flag; `None` when the key has never been written.
    fn get_flag(&self, key: &str) -> Option<bool>;

    /// Write a flag.
    fn set_flag(&self, key: &str, value: bool);
}
