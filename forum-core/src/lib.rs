//! Client-side core of a forum application.
//!
//! Users browse threads, post comments, and — as a thread's creator — lock
//! the thread or pin a "top comment". Persistence and authentication live in
//! external collaborators (a document store and an identity provider); this
//! crate models everything between them and the rendered page:
//!
//! - [`domain::session_watcher`] — authentication-state gating with an
//!   explicit lifecycle.
//! - [`domain::username_resolver`] — memoised, deduplicated display-name
//!   resolution.
//! - [`domain::thread_loader`] / [`domain::comment_loader`] — denormalising
//!   fan-out loaders.
//! - [`domain::ordering`] — the pure marked-answer-first comment ordering.
//! - [`domain::thread_mutation`] / [`domain::comment_submission`] — gated,
//!   optimistic write gateways with rollback on failure.
//! - [`view`] — the composed thread view, route parsing, liveness tracking,
//!   and the dark-mode header toggle.
//! - [`outbound::memory`] — in-memory adapters for every port.
//!
//! Remote failures degrade rather than surface: they are logged through
//! `tracing` and the view keeps its loading or empty state, with no retries.

pub mod domain;
pub mod outbound;
pub mod view;

pub use domain::{
    Comment, CommentId, CommentView, DisplayName, DomainError, ErrorCode, MutationOutcome,
    NewComment, SessionState, SessionWatcher, Thread, ThreadId, ThreadView, User, UserId,
};
pub use view::{ThreadState, ThreadViewSession};
