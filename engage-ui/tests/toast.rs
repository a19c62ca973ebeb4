use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use engage_dom::Rect;
use engage_ui::runtime::ClickEvent;
use engage_ui::{Toast, ToastLevel};

fn toast(duration: Duration) -> (Arc<AtomicUsize>, Toast) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let toast = Toast::new("toast", ToastLevel::Success, "Category saved", move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
    .with_duration(duration);
    (count, toast)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn test_dismisses_once_after_duration() {
    let (count, mut toast) = toast(Duration::from_millis(3000));
    toast.sync(true);

    advance(2999).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    advance(2).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Still open: no second timer
    toast.sync(true);
    advance(5000).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_timer() {
    let (count, mut toast) = toast(Duration::from_millis(3000));
    toast.sync(true);

    advance(1000).await;
    drop(toast);
    advance(5000).await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_close_cancels_timer() {
    let (count, mut toast) = toast(Duration::from_millis(3000));
    toast.sync(true);

    advance(1000).await;
    toast.sync(false);
    assert!(!toast.has_pending_timer());
    advance(5000).await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_sync_schedules_one_timer() {
    let (count, mut toast) = toast(Duration::from_millis(500));
    for _ in 0..5 {
        toast.sync(true);
    }

    advance(1000).await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_new_message_restarts_timer() {
    let (count, mut toast) = toast(Duration::from_millis(3000));
    toast.sync(true);

    advance(2000).await;
    toast.set_message(ToastLevel::Error, "Delete failed");
    toast.sync(true);
    advance(2000).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    advance(1001).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_without_duration_never_schedules() {
    let mut toast = Toast::new("toast", ToastLevel::Info, "Hello", || {});
    toast.sync(true);
    assert!(!toast.has_pending_timer());
}

#[test]
fn test_close_button_dismisses() {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let mut toast = Toast::new("toast", ToastLevel::Warning, "Check input", move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });

    let element = toast.render(true, Rect::new(0, 0, 80, 24)).expect("open toast renders");
    assert!(element.text_content().contains(&"Check input"));

    let mut event = ClickEvent::new(0, 0, vec!["toast-close".into(), "toast".into()]);
    toast.handle_click(&mut event);

    assert!(event.is_stopped());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_closed_toast_renders_nothing() {
    let mut toast = Toast::new("toast", ToastLevel::Info, "Hello", || {});
    assert!(toast.render(false, Rect::new(0, 0, 80, 24)).is_none());
}
