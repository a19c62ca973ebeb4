//! Terminal element tree for the engage console.
//!
//! Pages describe their screen as an [`Element`] tree every frame. The tree is
//! laid out into a [`LayoutNode`] tree of the same shape, rendered into a
//! [`Buffer`] of cells and flushed to the terminal. Clicks are resolved back to
//! element ids with [`hit_path`].

pub mod buffer;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use element::{Content, Element, find_element};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use hit::hit_path;
pub use layout::{LayoutNode, Rect, layout};
pub use render::render_to_buffer;
pub use terminal::Terminal;
pub use types::*;
