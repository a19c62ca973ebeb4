//! Sidebar and header shared by every signed-in page.

use engage_api::model::User;
use engage_ui::prelude::*;

use crate::app::{Services, routes};

pub const LOGOUT_ID: &str = "logout";
pub const SHELL_ID: &str = "shell";
pub const CONTENT_ID: &str = "content";

const SIDEBAR_WIDTH: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Tickets,
    Settings,
}

impl Section {
    const ALL: [Section; 3] = [Self::Dashboard, Self::Tickets, Self::Settings];

    fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tickets => "Tickets",
            Self::Settings => "Settings",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "◆",
            Self::Tickets => "✉",
            Self::Settings => "⚙",
        }
    }

    pub fn nav_id(self) -> &'static str {
        match self {
            Self::Dashboard => "nav-dashboard",
            Self::Tickets => "nav-tickets",
            Self::Settings => "nav-settings",
        }
    }

    fn route(self) -> &'static str {
        match self {
            Self::Dashboard => routes::DASHBOARD,
            Self::Tickets => routes::TICKETS,
            Self::Settings => routes::SETTINGS,
        }
    }
}

/// Full-screen frame around `content`. Pages append their overlays and
/// toasts to the returned root.
pub fn shell(active: Section, title: &str, user: Option<&User>, content: Element) -> Element {
    let nav = Section::ALL.into_iter().map(|section| {
        let mut style = Style::new().foreground(theme::TEXT_MUTED);
        if section == active {
            style = Style::new()
                .background(theme::SURFACE_RAISED)
                .foreground(theme::TEXT)
                .bold();
        }
        Element::text(format!("{} {}", section.icon(), section.label()))
            .id(section.nav_id())
            .width(Size::Fill)
            .padding(Edges::horizontal(1))
            .clickable(true)
            .style(style)
    });

    let sidebar = Element::col()
        .id("sidebar")
        .width(Size::Fixed(SIDEBAR_WIDTH))
        .height(Size::Fill)
        .padding(Edges::symmetric(1, 1))
        .gap(1)
        .style(Style::new().background(theme::SURFACE))
        .child(
            Element::text("Engage Console")
                .padding(Edges::horizontal(1))
                .style(Style::new().foreground(theme::PRIMARY).bold()),
        )
        .child(Element::col().width(Size::Fill).children(nav));

    let account = user.map(|user| {
        Element::row()
            .gap(1)
            .child(avatar(&user.name))
            .child(Element::text(user.name.clone()).style(Style::new().foreground(theme::TEXT)))
    });

    let header = Element::row()
        .id("header")
        .width(Size::Fill)
        .height(Size::Fixed(1))
        .gap(2)
        .align(Align::Center)
        .child(
            Element::text(title)
                .width(Size::Fill)
                .style(Style::new().foreground(theme::TEXT).bold()),
        )
        .child_opt(account)
        .child(button(LOGOUT_ID, "Log out", ButtonVariant::Ghost, false));

    let main = Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .padding(Edges::symmetric(1, 2))
        .gap(1)
        .child(header)
        .child(content.id(CONTENT_ID).width(Size::Fill).height(Size::Fill));

    Element::row()
        .id(SHELL_ID)
        .width(Size::Fill)
        .height(Size::Fill)
        .style(Style::new().background(theme::BACKGROUND))
        .child(sidebar)
        .child(main)
}

/// Navigation and logout. Returns whether the click was handled.
pub fn handle_shell_click(event: &mut ClickEvent, services: &Services, cx: &mut Context) -> bool {
    if event.is_stopped() {
        return false;
    }
    if event.hits(LOGOUT_ID) {
        event.stop_propagation();
        services.logout();
        cx.navigate(routes::LOGIN);
        return true;
    }
    let Some(section) = Section::ALL.into_iter().find(|s| event.hits(s.nav_id())) else {
        return false;
    };
    event.stop_propagation();
    cx.navigate(section.route());
    true
}
