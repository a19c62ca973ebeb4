//! Page controllers, one per route.

mod categories;
mod dashboard;
mod login;
mod settings;
mod shell;
mod tickets;

pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use settings::SettingsPage;
pub use tickets::TicketsPage;
