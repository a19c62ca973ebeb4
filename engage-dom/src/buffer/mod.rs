mod cell;
mod grid;

pub use cell::{Cell, DEFAULT_BG, DEFAULT_FG};
pub use grid::Buffer;
