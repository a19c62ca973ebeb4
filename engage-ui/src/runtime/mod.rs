//! Page runtime: routing, event handling and the terminal loop.

mod context;
mod error;
mod event_loop;
mod events;
mod page;
mod router;
mod session;

pub use context::Context;
pub use error::RuntimeError;
pub use event_loop::Runtime;
pub use events::{ClickEvent, KeyEvent, ScrollEvent};
pub use page::Page;
pub use router::Router;
pub use session::Session;
