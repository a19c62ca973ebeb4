//! Screen building blocks for the engage console.
//!
//! The two central pieces are [`Overlay`], which owns the host resources a
//! modal dialog needs while it is open, and [`Table`], which turns column
//! descriptors and records into an element tree. Everything else supports
//! them: the [`Document`] host, caller-owned [`State`], toasts, validation,
//! filtering and the page runtime.

pub mod document;
pub mod overlay;
pub mod prelude;
pub mod runtime;
pub mod search;
pub mod state;
pub mod table;
pub mod theme;
pub mod toast;
pub mod validation;
pub mod wakeup;
pub mod widgets;

pub use document::{Document, KeyListenerGuard, PageScroll, Propagation, ScrollLock};
pub use overlay::{OnClose, Overlay, OverlayConfig, OverlaySize};
pub use state::State;
pub use table::{Column, Table};
pub use toast::{Toast, ToastLevel};
