//! Auto-dismissing notices.
//!
//! Like an overlay, a [`Toast`] does not own its open flag. While it is
//! rendered open with a duration it keeps one timer running; when the timer
//! fires it calls the dismiss callback, and the caller closes it. Closing or
//! dropping the toast cancels a pending timer, so the callback never fires
//! for a toast that is already gone.

use std::sync::Arc;
use std::time::Duration;

use engage_dom::text::display_width;
use engage_dom::{Border, Edges, Element, Position, Rect, Size, Style, TextWrap};
use tokio_util::sync::CancellationToken;

use crate::runtime::ClickEvent;
use crate::theme;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }

    fn color(self) -> engage_dom::Color {
        match self {
            Self::Info => theme::INFO,
            Self::Success => theme::SUCCESS,
            Self::Warning => theme::WARNING,
            Self::Error => theme::ERROR,
        }
    }
}

pub struct Toast {
    id: String,
    level: ToastLevel,
    message: String,
    duration: Option<Duration>,
    on_dismiss: Arc<dyn Fn() + Send + Sync>,
    timer: Option<CancellationToken>,
}

impl Toast {
    pub fn new<F>(id: impl Into<String>, level: ToastLevel, message: impl Into<String>, on_dismiss: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            level,
            message: message.into(),
            duration: None,
            on_dismiss: Arc::new(on_dismiss),
            timer: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn level(&self) -> ToastLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn close_button_id(&self) -> String {
        format!("{}-close", self.id)
    }

    /// Change what the toast says. A pending timer is cancelled so the new
    /// message gets its full duration at the next sync.
    pub fn set_message(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.level = level;
        self.message = message.into();
        self.cancel_timer();
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Follow the caller's open flag. Must run inside a tokio runtime when a
    /// duration is set.
    pub fn sync(&mut self, is_open: bool) {
        if !is_open {
            self.cancel_timer();
            return;
        }
        if self.timer.is_some() {
            return;
        }
        let Some(duration) = self.duration else {
            return;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let on_dismiss = Arc::clone(&self.on_dismiss);
        let id = self.id.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    if !cancelled.is_cancelled() {
                        log::debug!("toast {id} timed out");
                        on_dismiss();
                    }
                }
            }
        });
        self.timer = Some(token);
    }

    fn cancel_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
        }
    }

    /// Sync with `is_open` and build the notice in the bottom-right corner of
    /// `viewport`, `None` while closed.
    pub fn render(&mut self, is_open: bool, viewport: Rect) -> Option<Element> {
        self.sync(is_open);
        if !is_open {
            return None;
        }

        // icon, message and close button with gaps, plus border and padding
        let width = (display_width(&self.message) as u16)
            .saturating_add(10)
            .min(viewport.width.saturating_sub(2))
            .max(12);
        let height = 3;

        Some(
            Element::row()
                .id(self.id.clone())
                .position(Position::Absolute)
                .left(viewport.width.saturating_sub(width + 1) as i16)
                .top(viewport.height.saturating_sub(height + 1) as i16)
                .width(Size::Fixed(width))
                .height(Size::Fixed(height))
                .z_index(theme::layer::TOAST)
                .padding(Edges::horizontal(1))
                .gap(1)
                .style(
                    Style::new()
                        .background(theme::SURFACE)
                        .border(Border::Rounded)
                        .foreground(self.level.color()),
                )
                .child(
                    Element::text(self.level.icon())
                        .style(Style::new().foreground(self.level.color())),
                )
                .child(
                    Element::text(self.message.clone())
                        .id(format!("{}-message", self.id))
                        .width(Size::Fill)
                        .text_wrap(TextWrap::Truncate)
                        .style(Style::new().foreground(theme::TEXT)),
                )
                .child(
                    Element::text("✕")
                        .id(self.close_button_id())
                        .clickable(true)
                        .style(Style::new().foreground(theme::TEXT_MUTED)),
                ),
        )
    }

    pub fn handle_click(&self, event: &mut ClickEvent) {
        if event.is_stopped() || !event.hits(&self.close_button_id()) {
            return;
        }
        event.stop_propagation();
        (self.on_dismiss)();
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
