//! Route-path parsing for the thread view.

use crate::domain::thread::ThreadId;

/// Extract the thread id from a route path: the last path segment, as in
/// `/threads/<id>`. `None` for paths whose last segment is empty or padded
/// (for example a trailing slash).
pub fn thread_id_from_path(path: &str) -> Option<ThreadId> {
    let segment = path.rsplit('/').next()?;
    ThreadId::new(segment).ok()
}
