//! Everything a page needs in one import.

pub use engage_dom::{
    Align, Backdrop, Border, Color, Direction, Edges, Element, Justify, Key, Modifiers, Overflow,
    Position, Rect, Size, Style, TextAlign, TextWrap,
};

pub use crate::document::{Document, PageScroll, Propagation};
pub use crate::overlay::{Overlay, OverlayConfig, OverlaySize};
pub use crate::runtime::{ClickEvent, Context, KeyEvent, Page, Router, ScrollEvent};
pub use crate::search::{Pagination, fuzzy_filter};
pub use crate::state::State;
pub use crate::table::{Column, Table};
pub use crate::theme;
pub use crate::toast::{Toast, ToastLevel};
pub use crate::validation::{FormErrors, ValidationResult, Validator};
pub use crate::widgets::{ButtonVariant, TextField, avatar, button, icon_button};
