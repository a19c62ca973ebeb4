//! Host-level resources shared by everything on screen.
//!
//! A [`Document`] owns two things that several components may want at once:
//! the background scroll lock and the list of document-wide key listeners.
//! Both are handed out as guards and released when the guard is dropped, so a
//! component that is torn down can never leave them behind.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::runtime::KeyEvent;

/// Whether a key listener let the event continue to older listeners and the
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

type KeyListener = Arc<dyn Fn(&KeyEvent) -> Propagation + Send + Sync>;

#[derive(Default)]
struct Inner {
    scroll_locks: usize,
    next_listener_id: u64,
    listeners: Vec<(u64, KeyListener)>,
}

#[derive(Clone, Default)]
pub struct Document {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("Document")
            .field("scroll_locks", &inner.scroll_locks)
            .field("key_listeners", &inner.listeners.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Freeze background scrolling until the returned lock is dropped.
    ///
    /// Locks are counted: the document stays locked while any lock is alive.
    pub fn lock_scroll(&self) -> ScrollLock {
        let mut inner = self.lock();
        inner.scroll_locks += 1;
        log::debug!("scroll locked ({} holders)", inner.scroll_locks);
        ScrollLock {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock().scroll_locks > 0
    }

    pub fn scroll_lock_count(&self) -> usize {
        self.lock().scroll_locks
    }

    /// Register a document-wide key listener until the guard is dropped.
    pub fn add_key_listener<F>(&self, listener: F) -> KeyListenerGuard
    where
        F: Fn(&KeyEvent) -> Propagation + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        KeyListenerGuard {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    pub fn key_listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Offer a key event to the listeners, newest first, until one stops it.
    ///
    /// Listeners run without the document lock held, so a listener may drop
    /// guards or register new listeners. A listener removed during the
    /// dispatch is skipped; one added during it is not called.
    pub fn dispatch_key(&self, event: &KeyEvent) -> Propagation {
        let ids: Vec<u64> = self.lock().listeners.iter().rev().map(|(id, _)| *id).collect();

        for id in ids {
            let listener = self
                .lock()
                .listeners
                .iter()
                .find(|(listener_id, _)| *listener_id == id)
                .map(|(_, listener)| Arc::clone(listener));

            let Some(listener) = listener else {
                continue;
            };
            if listener(event) == Propagation::Stop {
                return Propagation::Stop;
            }
        }

        Propagation::Continue
    }
}

/// Held scroll lock; dropping it releases one holder.
#[must_use = "the scroll lock is released as soon as this is dropped"]
pub struct ScrollLock {
    inner: Arc<Mutex<Inner>>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.scroll_locks = inner.scroll_locks.saturating_sub(1);
        log::debug!("scroll lock released ({} holders)", inner.scroll_locks);
    }
}

/// Registered key listener; dropping it removes the listener.
#[must_use = "the listener is removed as soon as this is dropped"]
pub struct KeyListenerGuard {
    inner: Arc<Mutex<Inner>>,
    id: u64,
}

impl Drop for KeyListenerGuard {
    fn drop(&mut self) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.listeners.retain(|(id, _)| *id != self.id);
    }
}

/// Vertical scroll position of a page body.
///
/// Scrolling is ignored while the document is scroll locked, which is how an
/// open overlay keeps the page behind it still.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageScroll {
    offset: u16,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Move by `delta` rows, never past `max`. Returns whether it moved.
    pub fn scroll_by(&mut self, delta: i16, max: u16, document: &Document) -> bool {
        if document.is_scroll_locked() {
            return false;
        }
        let next = self.offset.saturating_add_signed(delta).min(max);
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
