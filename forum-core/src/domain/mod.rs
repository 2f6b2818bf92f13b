//! Domain entities, ports, and services.
//!
//! Entities are immutable records mirroring the remote document store;
//! services compose the driven ports in [`ports`] and stay free of adapter
//! concerns. All user-visible failure handling follows one policy: catch at
//! the call site, log, degrade.

pub mod comment;
pub mod comment_loader;
pub mod comment_submission;
pub mod error;
pub mod ordering;
pub mod ports;
pub mod session_watcher;
pub mod thread;
pub mod thread_index;
pub mod thread_loader;
pub mod thread_mutation;
pub mod user;
pub mod username_resolver;

pub use self::comment::{Comment, CommentId, CommentValidationError, NewComment};
pub use self::comment_loader::{CommentCollectionLoader, CommentView};
pub use self::comment_submission::CommentSubmissionGateway;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::ordering::order_comments;
pub use self::session_watcher::{SessionState, SessionWatcher};
pub use self::thread::{Thread, ThreadId, ThreadValidationError};
pub use self::thread_index::ThreadIndexLoader;
pub use self::thread_loader::{ThreadAggregateLoader, ThreadView};
pub use self::thread_mutation::{MutationOutcome, ThreadMirror, ThreadMutationGateway};
pub use self::user::{rendered_name, DisplayName, User, UserId, UserValidationError, UNKNOWN_AUTHOR};
pub use self::username_resolver::UsernameResolver;
