//! End-to-end thread view scenarios over the in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::time::timeout;

use forum_core::domain::session_watcher::{SessionState, SessionWatcher};
use forum_core::domain::thread_mutation::MutationOutcome;
use forum_core::domain::{Comment, CommentId, ErrorCode, Thread, ThreadId, User, UserId};
use forum_core::outbound::memory::{
    InMemoryForumStore, InMemoryIdentityProvider, RecordingNavigator,
};
use forum_core::view::{ThreadState, ThreadViewSession};

const WAIT: Duration = Duration::from_secs(1);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

type Store = InMemoryForumStore;
type Session = ThreadViewSession<Store, Store, Store>;

struct Fixture {
    store: Arc<Store>,
    provider: Arc<InMemoryIdentityProvider>,
    navigator: Arc<RecordingNavigator>,
    watcher: SessionWatcher<InMemoryIdentityProvider, RecordingNavigator>,
}

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("user id")
}

fn thread_id(raw: &str) -> ThreadId {
    ThreadId::new(raw).expect("thread id")
}

fn comment_id(raw: &str) -> CommentId {
    CommentId::new(raw).expect("comment id")
}

async fn seed_forum(store: &Store) {
    store
        .insert_user(User::try_from_strings("alice", "Alice").expect("user"))
        .await;
    store
        .insert_user(User::try_from_strings("bob", "Bob").expect("user"))
        .await;
    store
        .insert_thread(
            Thread::new(
                thread_id("t1"),
                "Favourite crates?",
                "What are you using these days?",
                "general",
                user_id("alice"),
                Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().expect("timestamp"),
                false,
                None,
            )
            .expect("thread"),
        )
        .await;
    store
        .insert_comment(
            Comment::new(
                comment_id("c1"),
                "serde, obviously",
                user_id("bob"),
                thread_id("t1"),
                Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single().expect("timestamp"),
            )
            .expect("comment"),
        )
        .await;
    store
        .insert_comment(
            Comment::new(
                comment_id("c2"),
                "tokio for me",
                user_id("alice"),
                thread_id("t1"),
                Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).single().expect("timestamp"),
            )
            .expect("comment"),
        )
        .await;
}

async fn fixture() -> Fixture {
    init_tracing();
    let store = Arc::new(Store::new());
    seed_forum(&store).await;
    let provider = Arc::new(InMemoryIdentityProvider::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let watcher = SessionWatcher::spawn(
        Arc::clone(&provider),
        Arc::clone(&store),
        Arc::clone(&navigator),
    );
    Fixture {
        store,
        provider,
        navigator,
        watcher,
    }
}

impl Fixture {
    fn view(&self, raw_thread_id: &str) -> Session {
        ThreadViewSession::new(
            Arc::clone(&self.store),
            Arc::clone(&self.store),
            Arc::clone(&self.store),
            self.watcher.subscribe(),
            thread_id(raw_thread_id),
        )
    }

    async fn sign_in(&self, raw_user_id: &str) {
        let mut states = self.watcher.subscribe();
        self.provider.sign_in(user_id(raw_user_id));
        loop {
            timeout(WAIT, states.changed())
                .await
                .expect("session change")
                .expect("watcher alive");
            if states.borrow().is_authenticated() {
                break;
            }
        }
    }
}

fn ordered_ids(view: &Session) -> Vec<String> {
    view.ordered_comments()
        .iter()
        .map(|comment| comment.comment.id().to_string())
        .collect()
}

#[tokio::test]
async fn mount_denormalises_thread_and_comments() {
    let fixture = fixture().await;
    let mut view = fixture.view("t1");
    view.mount().await;

    let ThreadState::Ready(thread) = view.thread_state() else {
        panic!("thread should be loaded");
    };
    assert_eq!(thread.thread.title(), "Favourite crates?");
    assert_eq!(thread.rendered_creator(), "Alice");

    let comments = view.ordered_comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].rendered_author(), "Alice");
    assert_eq!(comments[1].rendered_author(), "Bob");
}

#[tokio::test]
async fn comments_order_newest_first_without_a_mark() {
    let fixture = fixture().await;
    let mut view = fixture.view("t1");
    view.mount().await;

    assert_eq!(ordered_ids(&view), ["c2", "c1"]);
}

#[tokio::test]
async fn marking_a_comment_pins_it_first_and_persists() {
    let fixture = fixture().await;
    fixture.sign_in("alice").await;
    let mut view = fixture.view("t1");
    view.mount().await;

    assert_eq!(
        view.mark_answer(&comment_id("c1")).await,
        MutationOutcome::Applied
    );
    assert_eq!(ordered_ids(&view), ["c1", "c2"]);

    let stored = fixture.store.thread(&thread_id("t1")).await.expect("thread");
    assert_eq!(stored.marked_answer_id(), Some(&comment_id("c1")));

    // Marking the same comment again clears the pin.
    assert_eq!(
        view.mark_answer(&comment_id("c1")).await,
        MutationOutcome::Applied
    );
    assert_eq!(ordered_ids(&view), ["c2", "c1"]);
}

#[tokio::test]
async fn missing_thread_shows_not_found() {
    let fixture = fixture().await;
    let mut view = fixture.view("t9");
    view.mount().await;

    assert_eq!(*view.thread_state(), ThreadState::NotFound);
}

#[tokio::test]
async fn submitted_comment_appears_optimistically_and_is_stored() {
    let fixture = fixture().await;
    fixture.sign_in("bob").await;
    let mut view = fixture.view("t1");
    view.mount().await;

    assert!(view.can_comment());
    view.submit_comment("Nice thread!").await.expect("submission");

    let comments = view.ordered_comments();
    assert_eq!(comments.len(), 3);
    assert!(comments
        .iter()
        .any(|comment| comment.comment.content() == "Nice thread!"));

    let stored = fixture.store.comments_for(&thread_id("t1")).await;
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn locked_thread_rejects_submission_and_leaves_the_list_unchanged() {
    let fixture = fixture().await;
    fixture.sign_in("alice").await;
    let mut view = fixture.view("t1");
    view.mount().await;

    assert_eq!(view.toggle_lock().await, MutationOutcome::Applied);
    assert!(view.locked());
    assert!(!view.can_comment());

    let err = view
        .submit_comment("too late")
        .await
        .expect_err("locked thread");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(view.ordered_comments().len(), 2);
    assert_eq!(fixture.store.comments_for(&thread_id("t1")).await.len(), 2);
}

#[tokio::test]
async fn toggle_lock_twice_is_an_involution() {
    let fixture = fixture().await;
    fixture.sign_in("alice").await;
    let mut view = fixture.view("t1");
    view.mount().await;

    assert_eq!(view.toggle_lock().await, MutationOutcome::Applied);
    assert_eq!(view.toggle_lock().await, MutationOutcome::Applied);
    assert!(!view.locked());

    let stored = fixture.store.thread(&thread_id("t1")).await.expect("thread");
    assert!(!stored.locked());
}

#[tokio::test]
async fn non_creator_lock_toggle_changes_nothing() {
    let fixture = fixture().await;
    fixture.sign_in("bob").await;
    let mut view = fixture.view("t1");
    view.mount().await;

    assert!(!view.is_creator());
    assert_eq!(view.toggle_lock().await, MutationOutcome::Denied);
    assert!(!view.locked());

    let stored = fixture.store.thread(&thread_id("t1")).await.expect("thread");
    assert!(!stored.locked());
}

#[tokio::test]
async fn failed_lock_write_rolls_back_the_optimistic_flip() {
    let fixture = fixture().await;
    fixture.sign_in("alice").await;
    let mut view = fixture.view("t1");
    view.mount().await;

    fixture.store.set_fail_writes(true);
    assert_eq!(view.toggle_lock().await, MutationOutcome::RolledBack);
    assert!(!view.locked());

    fixture.store.set_fail_writes(false);
    let stored = fixture.store.thread(&thread_id("t1")).await.expect("thread");
    assert!(!stored.locked());
}

#[tokio::test]
async fn sign_out_returns_to_anonymous_and_navigates_home() {
    let fixture = fixture().await;
    fixture.sign_in("alice").await;

    let mut states = fixture.watcher.subscribe();
    fixture.watcher.sign_out().await;
    loop {
        timeout(WAIT, states.changed())
            .await
            .expect("session change")
            .expect("watcher alive");
        if *states.borrow() == SessionState::Anonymous {
            break;
        }
    }

    assert_eq!(fixture.navigator.paths(), ["/"]);

    let mut view = fixture.view("t1");
    view.mount().await;
    assert!(!view.can_comment());
}

#[tokio::test]
async fn teardown_revokes_liveness_and_discards_late_results() {
    let fixture = fixture().await;
    let mut view = fixture.view("t1");

    view.unmount();
    view.mount().await;

    assert_eq!(*view.thread_state(), ThreadState::Loading);
    assert!(view.ordered_comments().is_empty());
    fixture.watcher.shutdown();
}
