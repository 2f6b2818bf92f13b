//! View liveness tracking.
//!
//! One-shot loads in the original could finish after the view unmounted and
//! write into dead state. Each view owns a liveness handle, revokes it at
//! teardown, and checks it after every suspension point before publishing a
//! result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared liveness flag for a single view instance.
#[derive(Debug, Clone)]
pub struct ViewLiveness {
    live: Arc<AtomicBool>,
}

impl ViewLiveness {
    /// Create a live handle.
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether results may still be published into the view.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Revoke the view; in-flight work observing the handle discards its
    /// results. Irreversible for this view instance.
    pub fn revoke(&self) {
        self.live.store(false, Ordering::Release);
    }
}

impl Default for ViewLiveness {
    fn default() -> Self {
        Self::new()
    }
}
