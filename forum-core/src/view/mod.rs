//! Stateful view components composing the domain services.

pub mod header;
pub mod liveness;
pub mod route;
pub mod thread_view;

pub use self::header::{DarkModeToggle, DARK_MODE_KEY};
pub use self::liveness::ViewLiveness;
pub use self::route::thread_id_from_path;
pub use self::thread_view::{ThreadState, ThreadViewSession};
