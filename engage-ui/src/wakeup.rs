//! Wakeup channel for the event loop.
//!
//! The loop sleeps while idle. State changes made from spawned tasks (a login
//! request finishing, a toast timer firing) send a wakeup so the next frame
//! gets drawn.

use std::cell::RefCell;

use tokio::sync::mpsc;

#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Non-blocking; a full or closed channel is ignored.
    pub fn send(&self) {
        let _ = self.tx.try_send(());
    }
}

pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Collapse buffered wakeups into the one just received.
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(16);
    (WakeupSender { tx }, WakeupReceiver { rx })
}

// The console runs on a current-thread runtime, so every task that touches
// state sees the sender installed here.
thread_local! {
    static WAKEUP_SENDER: RefCell<Option<WakeupSender>> = const { RefCell::new(None) };
}

pub fn install_sender(sender: WakeupSender) {
    WAKEUP_SENDER.with(|s| *s.borrow_mut() = Some(sender));
}

pub fn uninstall_sender() {
    WAKEUP_SENDER.with(|s| *s.borrow_mut() = None);
}

/// Wake the event loop if one is running on this thread.
pub fn send_wakeup() {
    WAKEUP_SENDER.with(|s| {
        if let Some(sender) = s.borrow().as_ref() {
            sender.send();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wakeup_reaches_installed_receiver() {
        let (tx, mut rx) = channel();
        install_sender(tx);
        send_wakeup();
        send_wakeup();
        assert_eq!(rx.recv().await, Some(()));
        rx.drain();
        uninstall_sender();
        send_wakeup();
        assert!(rx.rx.try_recv().is_err());
    }
}
