use engage_dom::{Border, Edges, Element, Key, Size, Style, TextWrap};

use crate::runtime::KeyEvent;
use crate::theme;

const CURSOR: char = '▏';

/// Single-line text input with a label and an inline error.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    id: String,
    label: String,
    placeholder: String,
    value: String,
    /// Byte offset into `value`, always on a char boundary.
    cursor: usize,
    masked: bool,
    error: Option<String>,
}

impl TextField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Show bullets instead of the value, for passwords.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.error = None;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply an editing key. Returns whether the key was used.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.modifiers.ctrl || event.modifiers.alt {
            return false;
        }
        match event.key {
            Key::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            Key::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.value.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            Key::Delete => {
                if let Some(next) = self.next_boundary() {
                    self.value.replace_range(self.cursor..next, "");
                }
            }
            Key::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            Key::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
            }
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.value.len(),
            _ => return false,
        }
        true
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn display_value(&self, focused: bool) -> (String, bool) {
        if self.value.is_empty() && !focused {
            return (self.placeholder.clone(), true);
        }
        let shown = |s: &str| {
            if self.masked {
                "•".repeat(s.chars().count())
            } else {
                s.to_string()
            }
        };
        let mut text = shown(&self.value[..self.cursor]);
        if focused {
            text.push(CURSOR);
        }
        text.push_str(&shown(&self.value[self.cursor..]));
        (text, false)
    }

    pub fn element(&self, focused: bool) -> Element {
        let (text, is_placeholder) = self.display_value(focused);
        let border_color = match (&self.error, focused) {
            (Some(_), _) => theme::ERROR,
            (None, true) => theme::PRIMARY,
            (None, false) => theme::BORDER,
        };
        let text_color = if is_placeholder {
            theme::TEXT_MUTED
        } else {
            theme::TEXT
        };

        let input = Element::row()
            .id(format!("{}-input", self.id))
            .width(Size::Fill)
            .padding(Edges::horizontal(1))
            .style(Style::new().border(Border::Rounded).foreground(border_color))
            .clickable(true)
            .child(
                Element::text(text)
                    .width(Size::Fill)
                    .text_wrap(TextWrap::Truncate)
                    .style(Style::new().foreground(text_color)),
            );

        let error = self.error.as_ref().map(|message| {
            Element::text(message.clone())
                .id(format!("{}-error", self.id))
                .style(Style::new().foreground(theme::ERROR))
        });

        Element::col()
            .id(self.id.clone())
            .width(Size::Fill)
            .child(Element::text(self.label.clone()).style(Style::new().foreground(theme::TEXT_MUTED)))
            .child(input)
            .child_opt(error)
    }
}
