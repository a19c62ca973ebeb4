//! Overlay lifecycle controller.
//!
//! An [`Overlay`] renders a modal panel over the page and, while it is open,
//! holds the host resources that go with it: a scroll lock on the document
//! and (optionally) an Escape key listener. The open flag itself belongs to
//! the caller. The controller only reports a wish to close through `on_close`
//! and follows whatever flag it is rendered with.
//!
//! ```text
//!            sync(true)                 sync(false) / drop
//!   CLOSED ─────────────▶ OPEN ─────────────────────────▶ CLOSED
//!            lock scroll,               release lock,
//!            add listener               remove listener
//! ```

use std::sync::Arc;

use engage_dom::{
    Align, Backdrop, Border, Edges, Element, Justify, Key, Position, Rect, Size, Style,
};

use crate::document::{Document, KeyListenerGuard, Propagation, ScrollLock};
use crate::runtime::{ClickEvent, KeyEvent, ScrollEvent};
use crate::theme;

/// Callback invoked when the user asks to close the overlay.
pub type OnClose = Arc<dyn Fn() + Send + Sync>;

pub const MIN_PANEL_WIDTH: u16 = 20;
pub const MIN_PANEL_HEIGHT: u16 = 5;

/// Panel size relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlaySize {
    /// 40% x 40%
    Sm,
    /// 60% x 60%
    #[default]
    Md,
    /// 75% x 75%
    Lg,
    /// 90% x 85%
    Xl,
    /// The whole viewport.
    Full,
}

impl OverlaySize {
    fn fractions(self) -> (f32, f32) {
        match self {
            Self::Sm => (0.4, 0.4),
            Self::Md => (0.6, 0.6),
            Self::Lg => (0.75, 0.75),
            Self::Xl => (0.9, 0.85),
            Self::Full => (1.0, 1.0),
        }
    }

    /// Panel width and height for `viewport`, never below the minimum panel
    /// size and never larger than the viewport.
    pub fn panel_size(self, viewport: Rect) -> (u16, u16) {
        let (fw, fh) = self.fractions();
        let scale = |total: u16, fraction: f32, min: u16| {
            ((total as f32 * fraction).round() as u16)
                .max(min)
                .min(total)
        };
        (
            scale(viewport.width, fw, MIN_PANEL_WIDTH),
            scale(viewport.height, fh, MIN_PANEL_HEIGHT),
        )
    }
}

/// Mount-time settings of an overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub title: Option<String>,
    pub size: OverlaySize,
    pub close_on_escape: bool,
    pub close_on_overlay_click: bool,
    pub show_close_button: bool,
    pub footer: Option<Element>,
    pub z_index: i16,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: None,
            size: OverlaySize::default(),
            close_on_escape: true,
            close_on_overlay_click: true,
            show_close_button: true,
            footer: None,
            z_index: theme::layer::OVERLAY,
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn size(mut self, size: OverlaySize) -> Self {
        self.size = size;
        self
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    pub fn close_on_overlay_click(mut self, enabled: bool) -> Self {
        self.close_on_overlay_click = enabled;
        self
    }

    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = show;
        self
    }

    pub fn footer(mut self, footer: Element) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Stack above other overlays mounted at the default layer.
    pub fn z_index(mut self, z_index: i16) -> Self {
        self.z_index = z_index;
        self
    }
}

/// Resources held for one open period. Dropping it releases them.
struct OverlaySession {
    _scroll_lock: ScrollLock,
    _escape: Option<KeyListenerGuard>,
    body_scroll: u16,
    body_rows: u16,
}

pub struct Overlay {
    id: String,
    document: Document,
    config: OverlayConfig,
    on_close: OnClose,
    session: Option<OverlaySession>,
}

enum ClickAction {
    Close,
    Absorb,
    Backdrop,
}

impl Overlay {
    pub fn new<F>(id: impl Into<String>, document: &Document, config: OverlayConfig, on_close: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            document: document.clone(),
            config,
            on_close: Arc::new(on_close),
            session: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Whether the overlay currently holds its open-state resources.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn backdrop_id(&self) -> String {
        format!("{}-backdrop", self.id)
    }

    pub fn panel_id(&self) -> String {
        format!("{}-panel", self.id)
    }

    pub fn close_button_id(&self) -> String {
        format!("{}-close", self.id)
    }

    pub fn body_id(&self) -> String {
        format!("{}-body", self.id)
    }

    pub fn footer_id(&self) -> String {
        format!("{}-footer", self.id)
    }

    /// Follow the caller's open flag. Opening acquires the scroll lock and the
    /// escape listener, closing releases them. Calling it again with the same
    /// flag changes nothing.
    pub fn sync(&mut self, is_open: bool) {
        match (is_open, self.session.is_some()) {
            (true, false) => self.open(),
            (false, true) => {
                self.session = None;
                log::debug!("overlay {} closed", self.id);
            }
            _ => {}
        }
    }

    fn open(&mut self) {
        let scroll_lock = self.document.lock_scroll();
        let escape = self.config.close_on_escape.then(|| {
            let on_close = Arc::clone(&self.on_close);
            self.document.add_key_listener(move |event: &KeyEvent| {
                if event.key == Key::Escape {
                    on_close();
                    Propagation::Stop
                } else {
                    Propagation::Continue
                }
            })
        });

        self.session = Some(OverlaySession {
            _scroll_lock: scroll_lock,
            _escape: escape,
            body_scroll: 0,
            body_rows: 0,
        });
        log::debug!("overlay {} opened", self.id);
    }

    /// Sync with `is_open` and build the overlay, `None` while closed.
    ///
    /// The returned backdrop fills its parent, so it belongs directly under
    /// the screen root. `body` keeps its ids inside the `{id}-body` region and
    /// is made to fill and scroll it by whole children.
    pub fn render(&mut self, is_open: bool, viewport: Rect, body: Element) -> Option<Element> {
        self.sync(is_open);

        let body_rows = body.child_elements().len() as u16;
        let session = self.session.as_mut()?;
        session.body_rows = body_rows;
        session.body_scroll = session.body_scroll.min(body_rows.saturating_sub(1));
        let body_scroll = session.body_scroll;

        let (width, height) = self.config.size.panel_size(viewport);

        let header = (self.config.title.is_some() || self.config.show_close_button).then(|| {
            let title = Element::text(self.config.title.clone().unwrap_or_default())
                .id(format!("{}-title", self.id))
                .width(Size::Fill)
                .style(Style::new().foreground(theme::TEXT).bold());
            let close = self.config.show_close_button.then(|| {
                Element::text("✕")
                    .id(self.close_button_id())
                    .clickable(true)
                    .style(Style::new().foreground(theme::TEXT_MUTED))
            });
            Element::row()
                .width(Size::Fill)
                .margin(Edges::new(0, 0, 1, 0))
                .child(title)
                .child_opt(close)
        });

        let body = Element::col()
            .id(self.body_id())
            .width(Size::Fill)
            .height(Size::Fill)
            .child(
                body.width(Size::Fill)
                    .height(Size::Fill)
                    .overflow(engage_dom::Overflow::Scroll)
                    .scroll_offset(body_scroll),
            );

        let footer = self.config.footer.clone().map(|footer| {
            Element::row()
                .id(self.footer_id())
                .width(Size::Fill)
                .margin(Edges::new(1, 0, 0, 0))
                .justify(Justify::End)
                .child(footer)
        });

        let panel = Element::col()
            .id(self.panel_id())
            .width(Size::Fixed(width))
            .height(Size::Fixed(height))
            .padding(Edges::horizontal(1))
            .style(
                Style::new()
                    .background(theme::SURFACE)
                    .border(Border::Rounded),
            )
            .clickable(true)
            .child_opt(header)
            .child(body)
            .child_opt(footer);

        Some(
            Element::col()
                .id(self.backdrop_id())
                .position(Position::Absolute)
                .left(0)
                .top(0)
                .width(Size::Fill)
                .height(Size::Fill)
                .z_index(self.config.z_index)
                .backdrop(Backdrop::Dim(0.5))
                .justify(Justify::Center)
                .align(Align::Center)
                .clickable(true)
                .child(panel),
        )
    }

    /// Route a click that reached the overlay.
    ///
    /// The close affordance asks to close. Any other click inside the panel
    /// is absorbed so it never reaches the backdrop. A click on the backdrop
    /// itself asks to close when `close_on_overlay_click` is set, and is
    /// absorbed otherwise.
    pub fn handle_click(&self, event: &mut ClickEvent) {
        if self.session.is_none() || event.is_stopped() {
            return;
        }

        let close = self.close_button_id();
        let panel = self.panel_id();
        let backdrop = self.backdrop_id();
        let action = event.path().iter().find_map(|id| {
            if self.config.show_close_button && *id == close {
                Some(ClickAction::Close)
            } else if *id == panel {
                Some(ClickAction::Absorb)
            } else if *id == backdrop {
                Some(ClickAction::Backdrop)
            } else {
                None
            }
        });

        let Some(action) = action else {
            return;
        };
        event.stop_propagation();
        match action {
            ClickAction::Close => (self.on_close)(),
            ClickAction::Absorb => {}
            ClickAction::Backdrop if self.config.close_on_overlay_click => (self.on_close)(),
            ClickAction::Backdrop => {}
        }
    }

    /// Scroll the body when the wheel turns over the panel. Returns whether
    /// the overlay took the event.
    pub fn handle_scroll(&mut self, event: &ScrollEvent) -> bool {
        let panel = self.panel_id();
        let backdrop = self.backdrop_id();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if event.hits(&panel) {
            let max = session.body_rows.saturating_sub(1);
            session.body_scroll = session
                .body_scroll
                .saturating_add_signed(event.delta)
                .min(max);
            return true;
        }
        event.hits(&backdrop)
    }

    /// Body scroll offset of the current open period.
    pub fn body_scroll(&self) -> u16 {
        self.session.as_ref().map_or(0, |s| s.body_scroll)
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        if self.session.is_some() {
            log::debug!("overlay {} unmounted while open", self.id);
        }
    }
}
