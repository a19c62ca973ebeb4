use engage_dom::Rect;

use crate::document::Document;

/// What a page may ask of the runtime while handling an event or rendering.
pub struct Context {
    viewport: Rect,
    document: Document,
    navigation: Option<String>,
    quit: bool,
}

impl Context {
    pub(crate) fn new(viewport: Rect, document: Document) -> Self {
        Self {
            viewport,
            document,
            navigation: None,
            quit: false,
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Switch to the page at `path` once the current handler returns.
    pub fn navigate(&mut self, path: impl Into<String>) {
        self.navigation = Some(path.into());
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub(crate) fn take_navigation(&mut self) -> Option<String> {
        self.navigation.take()
    }

    pub(crate) fn wants_quit(&self) -> bool {
        self.quit
    }
}
