//! Sign-in form.

use engage_api::Feedback;
use engage_api::model::LoginRequest;
use engage_ui::prelude::*;
use log::{info, warn};

use crate::app::{Services, routes, spawn_background};

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const SUBMIT_ID: &str = "login-submit";
pub const ERROR_ID: &str = "login-error";

const FIELDS: [&str; 2] = ["email", "password"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Submission {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(Feedback),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Email,
    Password,
}

pub struct LoginPage {
    services: Services,
    email: TextField,
    password: TextField,
    focus: Focus,
    errors: FormErrors,
    submission: State<Submission>,
}

impl LoginPage {
    pub fn new(_document: &Document, services: Services) -> Self {
        Self {
            services,
            email: TextField::new("email", "Email").placeholder("you@company.com"),
            password: TextField::new("password", "Password").masked(),
            focus: Focus::Email,
            errors: FormErrors::new(),
            submission: State::new(Submission::Idle),
        }
    }

    fn is_pending(&self) -> bool {
        self.submission.with(|s| *s == Submission::Pending)
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Focus::Email => &mut self.email,
            Focus::Password => &mut self.password,
        }
    }

    fn submit(&mut self) {
        if self.is_pending() {
            return;
        }

        let result = Validator::new()
            .field("email", self.email.value().trim())
            .required("Email is required")
            .email("Enter a valid email address")
            .field("password", self.password.value())
            .required("Password is required")
            .validate();
        if !result.is_valid() {
            self.errors = FormErrors::from_result(&result);
            self.show_errors();
            return;
        }

        self.errors.clear();
        self.show_errors();
        self.submission.set(Submission::Pending);

        let request = LoginRequest::new(self.email.value().trim(), self.password.value());
        let auth = self.services.auth.clone();
        let user = self.services.user.clone();
        let submission = self.submission.clone();
        spawn_background(async move {
            match auth.login(&request).await {
                Ok(response) => {
                    user.set(Some(response.user));
                    submission.set(Submission::Succeeded);
                }
                Err(e) => {
                    warn!("login failed: {e}");
                    let feedback = match e.as_api() {
                        Some(api) => api.feedback(&FIELDS, LOGIN_FAILED),
                        None => Feedback::General(e.user_message(LOGIN_FAILED)),
                    };
                    submission.set(Submission::Failed(feedback));
                }
            }
        });
    }

    /// Pick up the result of a finished request.
    fn finish_submission(&mut self, cx: &mut Context) {
        if matches!(self.submission.get(), Submission::Idle | Submission::Pending) {
            return;
        }
        match self.submission.replace(Submission::Idle) {
            Submission::Succeeded => {
                info!("signed in");
                self.password.clear();
                cx.navigate(routes::DASHBOARD);
            }
            Submission::Failed(Feedback::Fields(fields)) => {
                self.errors.clear();
                for (field, message) in &fields {
                    self.errors.set(field, message);
                }
                self.show_errors();
            }
            Submission::Failed(Feedback::General(message)) => {
                self.errors.clear();
                self.errors.set_message(message);
                self.show_errors();
            }
            Submission::Idle | Submission::Pending => {}
        }
    }

    fn show_errors(&mut self) {
        self.email.set_error(self.errors.get("email").map(str::to_string));
        self.password.set_error(self.errors.get("password").map(str::to_string));
    }
}

impl Page for LoginPage {
    fn element(&mut self, cx: &mut Context) -> Element {
        self.finish_submission(cx);

        let pending = self.is_pending();
        let message = self.errors.message().map(|message| {
            Element::text(message)
                .id(ERROR_ID)
                .width(Size::Fill)
                .text_wrap(TextWrap::Truncate)
                .style(Style::new().foreground(theme::ERROR))
        });
        let label = if pending { "Signing in…" } else { "Sign in" };

        let card = Element::col()
            .id("login-card")
            .width(Size::Fixed(48))
            .padding(Edges::symmetric(1, 2))
            .gap(1)
            .style(
                Style::new()
                    .background(theme::SURFACE)
                    .border(Border::Rounded),
            )
            .child(Element::text("Engage Console").style(Style::new().foreground(theme::PRIMARY).bold()))
            .child(Element::text("Sign in to continue").style(Style::new().foreground(theme::TEXT_MUTED)))
            .child_opt(message)
            .child(self.email.element(self.focus == Focus::Email))
            .child(self.password.element(self.focus == Focus::Password))
            .child(
                Element::row()
                    .width(Size::Fill)
                    .justify(Justify::End)
                    .child(button(SUBMIT_ID, label, ButtonVariant::Primary, pending)),
            );

        Element::col()
            .id("login")
            .width(Size::Fill)
            .height(Size::Fill)
            .justify(Justify::Center)
            .align(Align::Center)
            .style(Style::new().background(theme::BACKGROUND))
            .child(card)
    }

    fn on_key(&mut self, event: &KeyEvent, _cx: &mut Context) {
        match event.key {
            Key::Tab | Key::BackTab | Key::Up | Key::Down => {
                self.focus = match self.focus {
                    Focus::Email => Focus::Password,
                    Focus::Password => Focus::Email,
                };
            }
            Key::Enter => self.submit(),
            _ => {
                let field = self.focused_field();
                if field.handle_key(event) && field.error().is_some() {
                    let name = field.id().to_string();
                    field.set_error(None);
                    self.errors.clear_field(&name);
                }
            }
        }
    }

    fn on_click(&mut self, event: &mut ClickEvent, _cx: &mut Context) {
        if event.hits(SUBMIT_ID) {
            self.submit();
        } else if event.hits(self.email.id()) {
            self.focus = Focus::Email;
        } else if event.hits(self.password.id()) {
            self.focus = Focus::Password;
        }
    }
}

#[cfg(test)]
mod tests {
    use engage_api::{MemoryTokenStore, TokenStore};
    use engage_dom::Key;
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::testing::{DEAD_URL, api_base, frame_until, services, session, text_of, type_text};

    /// A backend answering every login attempt with `status` and `body`.
    async fn login_backend(status: u16, body: &'static str) -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/login");
                then.status(status).header("content-type", "application/json").body(body);
            })
            .await;
        server
    }

    fn fill_and_submit(session: &mut engage_ui::runtime::Session, email: &str, password: &str) {
        type_text(session, email);
        session.press(Key::Tab);
        type_text(session, password);
        session.press(Key::Enter);
    }

    #[test]
    fn test_empty_submit_shows_field_errors() {
        let services = services(DEAD_URL, MemoryTokenStore::new());
        let mut session = session(&services, routes::LOGIN);

        session.press(Key::Enter);
        session.frame();

        assert_eq!(text_of(&session, "email-error").as_deref(), Some("Email is required"));
        assert_eq!(text_of(&session, "password-error").as_deref(), Some("Password is required"));
    }

    #[test]
    fn test_invalid_email_and_typing_clears_error() {
        let services = services(DEAD_URL, MemoryTokenStore::new());
        let mut session = session(&services, routes::LOGIN);

        fill_and_submit(&mut session, "not-an-email", "secret");
        session.frame();
        assert_eq!(
            text_of(&session, "email-error").as_deref(),
            Some("Enter a valid email address")
        );
        assert!(text_of(&session, "password-error").is_none());

        session.click_on("email-input");
        session.press(Key::Backspace);
        session.frame();
        assert!(text_of(&session, "email-error").is_none());
    }

    #[tokio::test]
    async fn test_successful_login_navigates_to_dashboard() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/login")
                    .header("accept", "application/json")
                    .header_missing("authorization")
                    .json_body(json!({"email": "ada@example.com", "password": "secret"}));
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"token":"tok-9","user":{"id":1,"name":"Ada Agent","email":"ada@example.com"}}"#);
            })
            .await;
        let tokens = MemoryTokenStore::new();
        let services = services(&api_base(&server), tokens.clone());
        let mut session = session(&services, routes::LOGIN);

        fill_and_submit(&mut session, "ada@example.com", "secret");
        session.frame();
        assert_eq!(text_of(&session, SUBMIT_ID).as_deref(), Some("Signing in…"));

        frame_until(&mut session, |s| s.path() == routes::DASHBOARD).await;
        mock.assert_async().await;
        assert_eq!(tokens.get().await.unwrap().as_deref(), Some("tok-9"));
        assert_eq!(services.user.get().map(|u| u.name), Some("Ada Agent".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_login_shows_backend_message() {
        let server = login_backend(401, r#"{"message":"These credentials do not match our records."}"#).await;
        let services = services(&api_base(&server), MemoryTokenStore::new());
        let mut session = session(&services, routes::LOGIN);

        fill_and_submit(&mut session, "ada@example.com", "wrong");

        frame_until(&mut session, |s| text_of(s, ERROR_ID).is_some()).await;
        assert_eq!(
            text_of(&session, ERROR_ID).as_deref(),
            Some("These credentials do not match our records.")
        );
        assert_eq!(session.path(), routes::LOGIN);
    }

    #[tokio::test]
    async fn test_validation_response_maps_to_fields() {
        let server = login_backend(
            422,
            r#"{"message":"The given data was invalid.","errors":{"email":["These credentials do not match our records."]}}"#,
        )
        .await;
        let services = services(&api_base(&server), MemoryTokenStore::new());
        let mut session = session(&services, routes::LOGIN);

        fill_and_submit(&mut session, "ada@example.com", "wrong");

        frame_until(&mut session, |s| text_of(s, "email-error").is_some()).await;
        assert_eq!(
            text_of(&session, "email-error").as_deref(),
            Some("These credentials do not match our records.")
        );
        assert!(text_of(&session, ERROR_ID).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_shows_generic_message() {
        let services = services(DEAD_URL, MemoryTokenStore::new());
        let mut session = session(&services, routes::LOGIN);

        fill_and_submit(&mut session, "ada@example.com", "secret");

        frame_until(&mut session, |s| text_of(s, ERROR_ID).is_some()).await;
        assert_eq!(text_of(&session, ERROR_ID).as_deref(), Some(LOGIN_FAILED));
    }
}
