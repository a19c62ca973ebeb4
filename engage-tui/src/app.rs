//! Shared services and the route table.

use std::future::Future;

use engage_api::AuthService;
use engage_api::model::User;
use engage_ui::{Document, State, runtime::Router};
use log::warn;

use crate::pages::{CategoriesPage, DashboardPage, LoginPage, SettingsPage, TicketsPage};

pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const DASHBOARD: &str = "/dashboard";
    pub const SETTINGS: &str = "/settings";
    pub const CATEGORIES: &str = "/settings/categories";
    pub const TICKETS: &str = "/tickets";
}

/// What every page can reach: the auth service and the signed-in user.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub user: State<Option<User>>,
}

impl Services {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            user: State::new(None),
        }
    }

    /// Fetch the signed-in user in the background unless already known.
    pub fn load_user(&self) {
        if self.user.with(Option::is_some) {
            return;
        }
        let auth = self.auth.clone();
        let user = self.user.clone();
        spawn_background(async move {
            match auth.current_user().await {
                Ok(current) => user.set(Some(current)),
                Err(e) => warn!("could not load current user: {e}"),
            }
        });
    }

    /// Forget the user and end the backend session. The stored token is
    /// cleared whether or not the request succeeds.
    pub fn logout(&self) {
        self.user.set(None);
        let auth = self.auth.clone();
        spawn_background(async move {
            if let Err(e) = auth.logout().await {
                warn!("logout request failed: {e}");
            }
        });
    }
}

/// Run `task` on the current tokio runtime. Without one the task is dropped,
/// which only happens when pages are driven synchronously.
pub fn spawn_background<F>(task: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(task);
        }
        Err(_) => warn!("no async runtime, background task dropped"),
    }
}

pub fn router(services: &Services) -> Router {
    let login = services.clone();
    let dashboard = services.clone();
    let settings = services.clone();
    let categories = services.clone();
    let tickets = services.clone();

    Router::new()
        .route(routes::LOGIN, move |document: &Document| LoginPage::new(document, login.clone()))
        .route(routes::DASHBOARD, move |document: &Document| {
            DashboardPage::new(document, dashboard.clone())
        })
        .route(routes::SETTINGS, move |document: &Document| {
            SettingsPage::new(document, settings.clone())
        })
        .route(routes::CATEGORIES, move |document: &Document| {
            CategoriesPage::new(document, categories.clone())
        })
        .route(routes::TICKETS, move |document: &Document| {
            TicketsPage::new(document, tickets.clone())
        })
}
