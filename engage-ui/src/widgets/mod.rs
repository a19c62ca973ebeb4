//! Small presentational pieces shared by pages.

mod avatar;
mod button;
mod text_field;

pub use avatar::{avatar, initials};
pub use button::{ButtonVariant, button, icon_button};
pub use text_field::TextField;
