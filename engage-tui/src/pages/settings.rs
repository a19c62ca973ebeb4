//! Settings menu and account status.

use engage_ui::prelude::*;
use log::warn;

use super::shell::{Section, handle_shell_click, shell};
use crate::app::{Services, routes, spawn_background};

pub const CATEGORIES_ID: &str = "settings-categories";
pub const RESEND_ID: &str = "resend-verification";

const SEND_FAILED: &str = "Could not send the verification email.";

/// Result of a background request, waiting to be shown.
type Notice = Option<(ToastLevel, String)>;

pub struct SettingsPage {
    services: Services,
    sending: State<bool>,
    notice: State<Notice>,
    toast_open: State<bool>,
    toast: Toast,
}

impl SettingsPage {
    pub fn new(_document: &Document, services: Services) -> Self {
        services.load_user();
        let toast_open = State::new(false);
        let dismiss = toast_open.clone();
        Self {
            services,
            sending: State::new(false),
            notice: State::new(None),
            toast: Toast::new("settings-toast", ToastLevel::Info, "", move || dismiss.set(false))
                .with_duration(engage_ui::toast::DEFAULT_TOAST_DURATION),
            toast_open,
        }
    }

    fn resend_verification(&self) {
        if self.sending.get() {
            return;
        }
        self.sending.set(true);
        let auth = self.services.auth.clone();
        let sending = self.sending.clone();
        let notice = self.notice.clone();
        spawn_background(async move {
            let result = match auth.send_verification_email().await {
                Ok(response) if !response.message.is_empty() => (ToastLevel::Success, response.message),
                Ok(_) => (ToastLevel::Success, "Verification link sent.".to_string()),
                Err(e) => {
                    warn!("verification email failed: {e}");
                    (ToastLevel::Error, e.user_message(SEND_FAILED))
                }
            };
            notice.set(Some(result));
            sending.set(false);
        });
    }

    fn menu_item(id: &str, title: &str, description: &str) -> Element {
        Element::col()
            .id(id)
            .width(Size::Fill)
            .padding(Edges::horizontal(1))
            .clickable(true)
            .style(Style::new().background(theme::SURFACE).border(Border::Rounded))
            .child(Element::text(title).style(Style::new().foreground(theme::TEXT).bold()))
            .child(Element::text(description).style(Style::new().foreground(theme::TEXT_MUTED)))
    }

    fn account(&self) -> Element {
        let user = self.services.user.get();
        let Some(user) = user else {
            return Element::text("Loading account…")
                .id("account")
                .style(Style::new().foreground(theme::TEXT_MUTED));
        };

        let status = if user.is_verified() {
            Element::text("✓ Email verified").style(Style::new().foreground(theme::SUCCESS))
        } else {
            Element::text("! Email not verified").style(Style::new().foreground(theme::WARNING))
        };
        let resend = (!user.is_verified()).then(|| {
            let sending = self.sending.get();
            let label = if sending { "Sending…" } else { "Resend verification email" };
            button(RESEND_ID, label, ButtonVariant::Secondary, sending)
        });

        Element::col()
            .id("account")
            .width(Size::Fill)
            .padding(Edges::horizontal(1))
            .style(Style::new().background(theme::SURFACE).border(Border::Rounded))
            .child(
                Element::row()
                    .gap(1)
                    .child(avatar(&user.name))
                    .child(Element::text(user.name.clone()).style(Style::new().foreground(theme::TEXT).bold())),
            )
            .child(Element::text(user.email.clone()).id("account-email").style(Style::new().foreground(theme::TEXT_MUTED)))
            .child(Element::row().gap(2).child(status).child_opt(resend))
    }
}

impl Page for SettingsPage {
    fn element(&mut self, cx: &mut Context) -> Element {
        // replace() wakes the loop, so only take a waiting notice
        let notice = if self.notice.with(Option::is_some) {
            self.notice.replace(None)
        } else {
            None
        };
        if let Some((level, message)) = notice {
            self.toast.set_message(level, message);
            self.toast_open.set(true);
        }

        let content = Element::col()
            .gap(1)
            .child(Element::text("Account").style(Style::new().foreground(theme::TEXT_MUTED).bold()))
            .child(self.account())
            .child(Element::text("Configuration").style(Style::new().foreground(theme::TEXT_MUTED).bold()))
            .child(Self::menu_item(
                CATEGORIES_ID,
                "Categories",
                "Group tickets by topic: add, rename or remove categories",
            ));

        let toast = self.toast.render(self.toast_open.get(), cx.viewport());
        let user = self.services.user.get();
        shell(Section::Settings, "Settings", user.as_ref(), content).child_opt(toast)
    }

    fn on_click(&mut self, event: &mut ClickEvent, cx: &mut Context) {
        self.toast.handle_click(event);
        if event.is_stopped() || handle_shell_click(event, &self.services, cx) {
            return;
        }
        if event.hits(CATEGORIES_ID) {
            cx.navigate(routes::CATEGORIES);
        } else if event.hits(RESEND_ID) {
            self.resend_verification();
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;
    use crate::testing::{DEAD_URL, api_base, frame_until, session, signed_in, text_of};

    #[test]
    fn test_categories_item_navigates() {
        let mut session = session(&signed_in(DEAD_URL), routes::SETTINGS);

        assert!(session.click_on(CATEGORIES_ID));
        session.frame();

        assert_eq!(session.path(), routes::CATEGORIES);
    }

    #[test]
    fn test_unverified_account_offers_resend() {
        let session = session(&signed_in(DEAD_URL), routes::SETTINGS);

        assert_eq!(text_of(&session, "account-email").as_deref(), Some("ada@example.com"));
        assert_eq!(text_of(&session, RESEND_ID).as_deref(), Some("Resend verification email"));
    }

    #[tokio::test]
    async fn test_resend_shows_backend_message_in_toast() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/email/verification-notification")
                    .header("authorization", "Bearer tok");
                then.status(202)
                    .header("content-type", "application/json")
                    .body(r#"{"message":"Verification link sent!"}"#);
            })
            .await;
        let mut session = session(&signed_in(&api_base(&server)), routes::SETTINGS);

        session.click_on(RESEND_ID);
        session.frame();
        assert_eq!(text_of(&session, RESEND_ID).as_deref(), Some("Sending…"));

        frame_until(&mut session, |s| text_of(s, "settings-toast-message").is_some()).await;
        assert_eq!(
            text_of(&session, "settings-toast-message").as_deref(),
            Some("Verification link sent!")
        );

        mock.assert_async().await;

        session.click_on("settings-toast-close");
        session.frame();
        assert!(text_of(&session, "settings-toast").is_none());
    }

    #[tokio::test]
    async fn test_resend_failure_shows_error_toast() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/email/verification-notification");
                then.status(429)
                    .header("content-type", "application/json")
                    .body(r#"{"message":"Too Many Attempts."}"#);
            })
            .await;
        let mut session = session(&signed_in(&api_base(&server)), routes::SETTINGS);

        session.click_on(RESEND_ID);

        frame_until(&mut session, |s| text_of(s, "settings-toast-message").is_some()).await;
        assert_eq!(
            text_of(&session, "settings-toast-message").as_deref(),
            Some("Too Many Attempts.")
        );
        assert_eq!(text_of(&session, RESEND_ID).as_deref(), Some("Resend verification email"));
    }
}
