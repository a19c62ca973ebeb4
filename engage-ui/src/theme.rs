//! Fixed console palette.

use engage_dom::Color;

pub const BACKGROUND: Color = Color::oklch(0.15, 0.02, 250.0);
pub const SURFACE: Color = Color::oklch(0.2, 0.02, 250.0);
pub const SURFACE_RAISED: Color = Color::oklch(0.25, 0.02, 250.0);
pub const BORDER: Color = Color::oklch(0.4, 0.02, 250.0);

pub const TEXT: Color = Color::oklch(0.9, 0.02, 250.0);
pub const TEXT_MUTED: Color = Color::oklch(0.6, 0.02, 250.0);

pub const PRIMARY: Color = Color::oklch(0.6, 0.15, 250.0);
pub const ON_PRIMARY: Color = Color::oklch(0.98, 0.0, 0.0);

pub const SUCCESS: Color = Color::oklch(0.7, 0.15, 145.0);
pub const WARNING: Color = Color::oklch(0.75, 0.15, 85.0);
pub const ERROR: Color = Color::oklch(0.65, 0.2, 25.0);
pub const INFO: Color = Color::oklch(0.8, 0.0, 0.0);

/// Stacking order of screen layers.
pub mod layer {
    pub const PAGE: i16 = 0;
    pub const OVERLAY: i16 = 100;
    pub const TOAST: i16 = 200;
}
