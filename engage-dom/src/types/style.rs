//! How an element paints: colors, frame and text attributes.

use super::{Border, Color, Rgb, TextStyle};
use crate::buffer::DEFAULT_FG;

/// Glyphs for one frame, corners first: top-left, top-right, bottom-left,
/// bottom-right, then horizontal and vertical edges.
pub(crate) type BorderGlyphs = [char; 6];

/// Unset colors let whatever is underneath show through.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub border: Border,
    pub text_style: TextStyle,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(self, color: Color) -> Self {
        self.background_opt(Some(color))
    }

    /// `None` keeps the cells underneath, e.g. for ghost buttons.
    pub fn background_opt(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn bold(mut self) -> Self {
        self.text_style.bold = true;
        self
    }

    /// Faint text, how disabled controls and hints render.
    pub fn dim(mut self) -> Self {
        self.text_style.dim = true;
        self
    }

    pub fn dim_if(self, condition: bool) -> Self {
        if condition { self.dim() } else { self }
    }

    pub(crate) fn fg_rgb(&self) -> Rgb {
        self.foreground.as_ref().map_or(DEFAULT_FG, Color::to_rgb)
    }

    /// Background for a glyph drawn over a cell whose background is `under`.
    pub(crate) fn bg_over(&self, under: Rgb) -> Rgb {
        self.background.as_ref().map_or(under, Color::to_rgb)
    }

    /// Cells taken by the border on each side.
    pub(crate) fn border_size(&self) -> u16 {
        if self.border == Border::None { 0 } else { 1 }
    }

    pub(crate) fn border_glyphs(&self) -> Option<BorderGlyphs> {
        match self.border {
            Border::None => None,
            Border::Single => Some(['┌', '┐', '└', '┘', '─', '│']),
            Border::Double => Some(['╔', '╗', '╚', '╝', '═', '║']),
            Border::Rounded => Some(['╭', '╮', '╰', '╯', '─', '│']),
            Border::Thick => Some(['┏', '┓', '┗', '┛', '━', '┃']),
        }
    }
}
