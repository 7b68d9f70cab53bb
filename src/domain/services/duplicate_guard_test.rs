use std::time::Duration;
use std::time::Instant;

use serde_json::json;

use super::DuplicateGuard;
use crate::domain::models::ChatPayload;

fn text(value: &str) -> ChatPayload {
    return ChatPayload::Text(value.to_string());
}

#[test]
fn it_accepts_first_submission() {
    let mut guard = DuplicateGuard::new(Duration::from_millis(1200));
    assert!(guard.accept(None, &text("hello"), Instant::now()));
}

#[test]
fn it_rejects_identical_submission_within_window() {
    let mut guard = DuplicateGuard::new(Duration::from_millis(1200));
    let now = Instant::now();

    assert!(guard.accept(None, &text("hello"), now));
    assert!(!guard.accept(None, &text("hello"), now + Duration::from_millis(300)));
}

#[test]
fn it_accepts_identical_submission_after_window() {
    let mut guard = DuplicateGuard::new(Duration::from_millis(1200));
    let now = Instant::now();

    assert!(guard.accept(None, &text("hello"), now));
    assert!(guard.accept(None, &text("hello"), now + Duration::from_millis(1200)));
}

#[test]
fn it_accepts_different_submission_within_window() {
    let mut guard = DuplicateGuard::new(Duration::from_millis(1200));
    let now = Instant::now();

    assert!(guard.accept(None, &text("hello"), now));
    assert!(guard.accept(None, &text("hola"), now + Duration::from_millis(10)));
    assert!(guard.accept(
        None,
        &ChatPayload::Action(json!({ "type": "book" })),
        now + Duration::from_millis(20)
    ));
}

#[test]
fn it_forgets_after_reset() {
    let mut guard = DuplicateGuard::new(Duration::from_millis(1200));
    let now = Instant::now();

    assert!(guard.accept(None, &text("hello"), now));
    guard.reset();
    assert!(guard.accept(None, &text("hello"), now));
}

#[test]
fn it_tells_apart_same_action_with_different_echo() {
    let mut guard = DuplicateGuard::new(Duration::from_millis(1200));
    let now = Instant::now();
    let book = ChatPayload::Action(json!({ "type": "book", "data": ["slot-1"] }));

    assert!(guard.accept(Some("Table at 20:00"), &book, now));
    assert!(guard.accept(Some("Book it"), &book, now + Duration::from_millis(100)));
    assert!(!guard.accept(Some("Book it"), &book, now + Duration::from_millis(200)));
}
