use engage_dom::Element;

use super::{ClickEvent, Context, KeyEvent, ScrollEvent};

/// A routed screen.
///
/// The runtime asks for a fresh element tree after every event. Pages keep
/// their own state and mount overlays and toasts inside the tree they return.
/// Dropping a page unmounts it.
pub trait Page {
    fn element(&mut self, cx: &mut Context) -> Element;

    /// Keys that no document listener stopped.
    fn on_key(&mut self, _event: &KeyEvent, _cx: &mut Context) {}

    fn on_click(&mut self, _event: &mut ClickEvent, _cx: &mut Context) {}

    fn on_scroll(&mut self, _event: &ScrollEvent, _cx: &mut Context) {}
}
