use engage_dom::{Color, Edges, Element, Style};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    fn colors(self) -> (Option<Color>, Color) {
        match self {
            Self::Primary => (Some(theme::PRIMARY), theme::ON_PRIMARY),
            Self::Secondary => (Some(theme::SURFACE_RAISED), theme::TEXT),
            Self::Danger => (Some(theme::ERROR), theme::ON_PRIMARY),
            Self::Ghost => (None, theme::TEXT_MUTED),
        }
    }
}

/// Clickable label. Disabled buttons render dimmed and are not clickable.
pub fn button(id: impl Into<String>, label: &str, variant: ButtonVariant, disabled: bool) -> Element {
    let (background, foreground) = variant.colors();
    let style = Style::new()
        .foreground(foreground)
        .background_opt(background)
        .dim_if(disabled);

    Element::text(label)
        .id(id)
        .padding(Edges::horizontal(1))
        .style(style)
        .clickable(!disabled)
}

/// Single-glyph action, e.g. edit or delete in a table row.
pub fn icon_button(id: impl Into<String>, icon: &str, color: Color) -> Element {
    Element::text(icon)
        .id(id)
        .style(Style::new().foreground(color))
        .clickable(true)
}
