// Tests for the inbound event router
//
// Verifies that well-formed frames reach the store and event bus, and
// that malformed or unknown frames are dropped without effect.

use meeting_captions::session::{EventRouter, SessionEvent};
use meeting_captions::{EventBus, SessionStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn router() -> (EventRouter, Arc<SessionStore>, EventBus<SessionEvent>) {
    let store = Arc::new(SessionStore::new());
    let bus: EventBus<SessionEvent> = EventBus::new();
    let router = EventRouter::new(Arc::clone(&store), bus.clone());
    (router, store, bus)
}

#[test]
fn test_subtitle_frame_reaches_store_and_bus() {
    let (router, store, bus) = router();

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_cb = Arc::clone(&seen);
    let _sub = bus.subscribe(move |event| {
        if matches!(event, SessionEvent::Subtitle(_)) {
            seen_cb.fetch_add(1, Ordering::SeqCst);
        }
    });

    router.dispatch(
        r#"{
            "type": "subtitle",
            "data": {
                "speakerName": "Alice",
                "originalLanguage": "en",
                "originalText": "hello",
                "translatedText": "안녕하세요",
                "targetLanguage": "ko",
                "timestamp": "2026-08-27T12:00:00Z",
                "isFinal": true
            }
        }"#,
    );

    let subtitles = store.subtitles();
    assert_eq!(subtitles.len(), 1);
    assert_eq!(subtitles[0].translated_text, "안녕하세요");
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_participant_join_and_leave() {
    let (router, store, _bus) = router();

    router.dispatch(
        r#"{"type": "participant_joined", "data": {"participantId": "p2", "preferredLanguage": "ja"}}"#,
    );
    assert_eq!(store.participants().len(), 1);
    assert_eq!(store.participants()[0].id, "p2");

    router.dispatch(r#"{"type": "participant_left", "data": {"participantId": "p2"}}"#);
    assert!(store.participants().is_empty());
}

#[test]
fn test_meeting_ended_publishes_event() {
    let (router, _store, bus) = router();

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_cb = Arc::clone(&seen);
    let _sub = bus.subscribe(move |event| {
        if matches!(event, SessionEvent::MeetingEnded) {
            seen_cb.fetch_add(1, Ordering::SeqCst);
        }
    });

    router.dispatch(r#"{"type": "meeting_ended"}"#);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_malformed_and_unknown_frames_are_dropped() {
    let (router, store, bus) = router();

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_cb = Arc::clone(&seen);
    let _sub = bus.subscribe(move |_| {
        seen_cb.fetch_add(1, Ordering::SeqCst);
    });

    router.dispatch("not json at all");
    router.dispatch(r#"{"type": "subtitle", "data": {"wrong": "shape"}}"#);
    router.dispatch(r#"{"type": "some_future_message", "data": {}}"#);
    router.dispatch(r#"{"no_type_field": true}"#);

    assert!(store.subtitles().is_empty());
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

#[test]
fn test_pong_is_consumed_silently() {
    let (router, store, bus) = router();

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_cb = Arc::clone(&seen);
    let _sub = bus.subscribe(move |_| {
        seen_cb.fetch_add(1, Ordering::SeqCst);
    });

    router.dispatch(r#"{"type": "pong"}"#);

    assert!(store.subtitles().is_empty());
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}
