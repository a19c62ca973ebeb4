use std::sync::{Arc, Mutex};

use engage_dom::Key;
use engage_ui::runtime::KeyEvent;
use engage_ui::{Document, KeyListenerGuard, PageScroll, Propagation};

fn escape() -> KeyEvent {
    KeyEvent::plain(Key::Escape)
}

#[test]
fn test_scroll_lock_is_reference_counted() {
    let document = Document::new();

    let first = document.lock_scroll();
    let second = document.lock_scroll();
    assert_eq!(document.scroll_lock_count(), 2);

    drop(first);
    assert!(document.is_scroll_locked());

    drop(second);
    assert!(!document.is_scroll_locked());
}

#[test]
fn test_listeners_run_newest_first_until_stopped() {
    let document = Document::new();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&calls);
    let _old = document.add_key_listener(move |_| {
        log.lock().unwrap().push("old");
        Propagation::Continue
    });
    let log = Arc::clone(&calls);
    let _new = document.add_key_listener(move |_| {
        log.lock().unwrap().push("new");
        Propagation::Continue
    });

    assert_eq!(document.dispatch_key(&escape()), Propagation::Continue);
    assert_eq!(*calls.lock().unwrap(), vec!["new", "old"]);

    let log = Arc::clone(&calls);
    let _newest = document.add_key_listener(move |_| {
        log.lock().unwrap().push("newest");
        Propagation::Stop
    });
    calls.lock().unwrap().clear();

    assert_eq!(document.dispatch_key(&escape()), Propagation::Stop);
    assert_eq!(*calls.lock().unwrap(), vec!["newest"]);
}

#[test]
fn test_dropping_guard_removes_listener() {
    let document = Document::new();
    let guard = document.add_key_listener(|_| Propagation::Stop);
    assert_eq!(document.key_listener_count(), 1);

    drop(guard);

    assert_eq!(document.key_listener_count(), 0);
    assert_eq!(document.dispatch_key(&escape()), Propagation::Continue);
}

#[test]
fn test_listener_removed_mid_dispatch_is_skipped() {
    let document = Document::new();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&calls);
    let older = document.add_key_listener(move |_| {
        log.lock().unwrap().push("older");
        Propagation::Continue
    });
    let slot: Arc<Mutex<Option<KeyListenerGuard>>> = Arc::new(Mutex::new(Some(older)));

    let remover = Arc::clone(&slot);
    let _newer = document.add_key_listener(move |_| {
        remover.lock().unwrap().take();
        Propagation::Continue
    });

    document.dispatch_key(&escape());

    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(document.key_listener_count(), 1);
}

#[test]
fn test_page_scroll_frozen_while_locked() {
    let document = Document::new();
    let mut scroll = PageScroll::new();

    assert!(scroll.scroll_by(3, 10, &document));
    assert_eq!(scroll.offset(), 3);

    let lock = document.lock_scroll();
    assert!(!scroll.scroll_by(3, 10, &document));
    assert_eq!(scroll.offset(), 3);

    drop(lock);
    scroll.scroll_by(20, 10, &document);
    assert_eq!(scroll.offset(), 10);
    scroll.scroll_by(-20, 10, &document);
    assert_eq!(scroll.offset(), 0);
}
