use engage_dom::{Buffer, Element, Event, Key, LayoutNode, Rect, hit_path, layout, render_to_buffer};

use crate::document::{Document, Propagation};

use super::{ClickEvent, Context, KeyEvent, Page, Router, RuntimeError, ScrollEvent};

/// The current page plus everything needed to feed it events.
///
/// A session runs without a terminal: [`frame`](Self::frame) builds and lays
/// out the page, [`handle_event`](Self::handle_event) routes input against the
/// last frame. The terminal loop and tests drive it the same way.
pub struct Session {
    router: Router,
    document: Document,
    page: Box<dyn Page>,
    path: String,
    viewport: Rect,
    root: Element,
    layout: LayoutNode,
    quit: bool,
}

impl Session {
    pub fn new(router: Router, initial_path: &str, viewport: Rect) -> Result<Self, RuntimeError> {
        let document = Document::new();
        let page = router
            .build(initial_path, &document)
            .ok_or_else(|| RuntimeError::UnknownRoute(initial_path.to_string()))?;
        log::info!("starting at {initial_path}");

        Ok(Self {
            router,
            document,
            page,
            path: initial_path.to_string(),
            viewport,
            root: Element::box_(),
            layout: LayoutNode::default(),
            quit: false,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Root element of the last frame.
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn layout(&self) -> &LayoutNode {
        &self.layout
    }

    /// Ask the page for its tree and lay it out. A navigation requested while
    /// rendering is applied and the new page rendered in its place.
    pub fn frame(&mut self) -> &Element {
        let mut cx = self.context();
        let mut root = self.page.element(&mut cx);
        if self.finish(cx) {
            let mut cx = self.context();
            root = self.page.element(&mut cx);
            self.finish(cx);
        }
        self.layout = layout(&root, self.viewport);
        self.root = root;
        &self.root
    }

    /// Render the last frame into a cell buffer.
    pub fn buffer(&self) -> Buffer {
        let mut buf = Buffer::new(self.viewport.width, self.viewport.height);
        render_to_buffer(&self.root, &self.layout, &mut buf);
        buf
    }

    /// Handle one input event against the last frame.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key { key, modifiers } => {
                let event = KeyEvent::new(key, modifiers);
                if event.is_ctrl('c') {
                    log::info!("quit requested");
                    self.quit = true;
                    return;
                }
                self.key(&event);
            }
            Event::Click { x, y, .. } => {
                let path = hit_path(&self.layout, &self.root, x, y);
                let mut event = ClickEvent::new(x, y, path);
                let mut cx = self.context();
                self.page.on_click(&mut event, &mut cx);
                self.finish(cx);
            }
            Event::Scroll { x, y, delta } => {
                let path = hit_path(&self.layout, &self.root, x, y);
                let event = ScrollEvent::new(x, y, delta, path);
                let mut cx = self.context();
                self.page.on_scroll(&event, &mut cx);
                self.finish(cx);
            }
            Event::Resize { width, height } => {
                self.viewport = Rect::from_size(width, height);
            }
        }
    }

    /// Document listeners first, newest to oldest; the page gets the key if
    /// none of them stopped it.
    pub fn key(&mut self, event: &KeyEvent) {
        if self.document.dispatch_key(event) == Propagation::Stop {
            return;
        }
        let mut cx = self.context();
        self.page.on_key(event, &mut cx);
        self.finish(cx);
    }

    pub fn press(&mut self, key: Key) {
        self.key(&KeyEvent::plain(key));
    }

    /// Click the top-left cell of the element with `id` in the last frame.
    /// Returns false when no such element was laid out.
    pub fn click_on(&mut self, id: &str) -> bool {
        let Some(rect) = self.layout.find(&self.root, id) else {
            return false;
        };
        if rect.is_empty() {
            return false;
        }
        self.handle_event(Event::Click {
            x: rect.x,
            y: rect.y,
            button: engage_dom::MouseButton::Left,
        });
        true
    }

    fn context(&self) -> Context {
        Context::new(self.viewport, self.document.clone())
    }

    /// Apply what the page asked for. Returns whether the page changed.
    fn finish(&mut self, mut cx: Context) -> bool {
        if cx.wants_quit() {
            self.quit = true;
        }
        let Some(path) = cx.take_navigation() else {
            return false;
        };
        if path == self.path {
            return false;
        }
        match self.router.build(&path, &self.document) {
            Some(page) => {
                log::info!("navigating {} -> {path}", self.path);
                // The old page unmounts here, releasing anything it held
                self.page = page;
                self.path = path;
                true
            }
            None => {
                log::warn!("no page registered for {path}, staying on {}", self.path);
                false
            }
        }
    }
}
