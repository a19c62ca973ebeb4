//! Helpers for driving pages in tests.

use std::sync::Arc;
use std::time::Duration;

use engage_api::model::User;
use engage_api::{ApiClient, ApiConfig, AuthService, MemoryTokenStore};
use engage_dom::{Rect, find_element};
use engage_ui::runtime::Session;
use httpmock::MockServer;

use crate::app::{Services, router};

pub const VIEWPORT: Rect = Rect::new(0, 0, 120, 40);

/// A base URL nothing listens on.
pub const DEAD_URL: &str = "http://127.0.0.1:9/api";

pub fn services(base_url: &str, tokens: MemoryTokenStore) -> Services {
    let config = ApiConfig::new(base_url).unwrap();
    Services::new(AuthService::new(ApiClient::new(config, Arc::new(tokens))))
}

/// Services with a known user, so pages fetch nothing on mount.
pub fn signed_in(base_url: &str) -> Services {
    let services = services(base_url, MemoryTokenStore::with_token("tok"));
    services.user.set(Some(User {
        id: 1,
        name: "Ada Agent".into(),
        email: "ada@example.com".into(),
        email_verified_at: None,
    }));
    services
}

pub fn session(services: &Services, path: &str) -> Session {
    let mut session = Session::new(router(services), path, VIEWPORT).unwrap();
    session.frame();
    session
}

pub fn type_text(session: &mut Session, text: &str) {
    for c in text.chars() {
        session.press(engage_dom::Key::Char(c));
    }
}

/// Concatenated text under `id` in the last frame.
pub fn text_of(session: &Session, id: &str) -> Option<String> {
    find_element(session.root(), id).map(|e| e.text_content().concat())
}

/// The backend base URL on a mock server.
pub fn api_base(server: &MockServer) -> String {
    server.url("/api")
}

/// Render frames until `done` holds or two seconds pass.
pub async fn frame_until(session: &mut Session, done: impl Fn(&Session) -> bool) {
    for _ in 0..200 {
        session.frame();
        if done(session) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached");
}
