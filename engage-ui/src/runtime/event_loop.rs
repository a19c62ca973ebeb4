use crossterm::event::EventStream;
use engage_dom::{Event, Rect, Terminal};
use futures::StreamExt;
use log::{debug, info, trace};

use crate::wakeup;

use super::{Router, RuntimeError, Session};

/// Terminal front end for a [`Session`].
pub struct Runtime {
    router: Router,
}

impl Runtime {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Run until a page quits or Ctrl+C is pressed.
    ///
    /// Expects a current-thread tokio runtime: tasks spawned by pages share
    /// the thread-local wakeup sender installed here.
    pub async fn run(self, initial_path: &str) -> Result<(), RuntimeError> {
        let mut terminal = Terminal::new()?;
        let (width, height) = terminal.size();
        let mut session = Session::new(self.router, initial_path, Rect::from_size(width, height))?;

        let (wakeup_tx, mut wakeup_rx) = wakeup::channel();
        wakeup::install_sender(wakeup_tx);
        let mut events = EventStream::new();

        let result = loop {
            session.frame();
            if let Err(e) = terminal.render(session.root()) {
                break Err(e.into());
            }
            if session.should_quit() {
                break Ok(());
            }

            tokio::select! {
                next = events.next() => match next {
                    Some(Ok(raw)) => {
                        trace!("terminal event: {raw:?}");
                        if let Some(event) = Event::from_crossterm(&raw) {
                            session.handle_event(event);
                        }
                    }
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                },
                Some(()) = wakeup_rx.recv() => {
                    debug!("wakeup received");
                    wakeup_rx.drain();
                }
            }

            if session.should_quit() {
                break Ok(());
            }
        };

        wakeup::uninstall_sender();
        info!("runtime stopped");
        result
    }
}
