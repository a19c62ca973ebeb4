use engage_dom::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::new())
    }

    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.ctrl && self.key == Key::Char(c)
    }
}

/// A mouse click, resolved to the ids under the pointer.
///
/// `path` runs from the deepest element outwards, like event bubbling.
/// Handlers call [`stop_propagation`](Self::stop_propagation) once they have
/// dealt with the click; later handlers see [`is_stopped`](Self::is_stopped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub x: u16,
    pub y: u16,
    path: Vec<String>,
    stopped: bool,
}

impl ClickEvent {
    pub fn new(x: u16, y: u16, path: Vec<String>) -> Self {
        Self {
            x,
            y,
            path,
            stopped: false,
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Deepest element under the pointer.
    pub fn target(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    /// Whether the click landed on `id` or inside it.
    pub fn hits(&self, id: &str) -> bool {
        self.path.iter().any(|p| p == id)
    }

    /// First id on the path starting with `prefix`, with the prefix removed.
    pub fn hit_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.path.iter().find_map(|p| p.strip_prefix(prefix))
    }

    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollEvent {
    pub x: u16,
    pub y: u16,
    /// Rows to move; positive scrolls down.
    pub delta: i16,
    path: Vec<String>,
}

impl ScrollEvent {
    pub fn new(x: u16, y: u16, delta: i16, path: Vec<String>) -> Self {
        Self { x, y, delta, path }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn hits(&self, id: &str) -> bool {
        self.path.iter().any(|p| p == id)
    }
}
