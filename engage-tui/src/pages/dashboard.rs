//! Landing page after sign-in: ticket counts and the latest activity.

use engage_ui::prelude::*;

use super::shell::{Section, handle_shell_click, shell};
use super::tickets::{status_color, ticket_columns};
use crate::app::{Services, routes};
use crate::fixtures::{self, Ticket, TicketStatus};

const RECENT: usize = 5;

pub struct DashboardPage {
    services: Services,
    tickets: Vec<Ticket>,
    recent: Table<Ticket>,
    scroll: PageScroll,
}

impl DashboardPage {
    pub fn new(_document: &Document, services: Services) -> Self {
        services.load_user();
        Self {
            services,
            tickets: fixtures::tickets(),
            recent: Table::new("recent", ticket_columns()).empty_message("No recent activity"),
            scroll: PageScroll::new(),
        }
    }

    fn stat_card(status: TicketStatus, count: usize) -> Element {
        Element::col()
            .id(format!("stat-{}", status.label().to_lowercase()))
            .width(Size::Flex(1))
            .padding(Edges::horizontal(1))
            .style(Style::new().background(theme::SURFACE).border(Border::Rounded))
            .child(Element::text(status.label()).style(Style::new().foreground(theme::TEXT_MUTED)))
            .child(
                Element::text(count.to_string())
                    .style(Style::new().foreground(status_color(status)).bold()),
            )
    }
}

impl Page for DashboardPage {
    fn element(&mut self, _cx: &mut Context) -> Element {
        let user = self.services.user.get();
        let greeting = match &user {
            Some(user) => format!("Welcome back, {}", user.name),
            None => "Welcome back".to_string(),
        };

        let stats = Element::row().id("stats").width(Size::Fill).gap(1).children(
            TicketStatus::ALL.into_iter().map(|status| {
                let count = self.tickets.iter().filter(|t| t.status == status).count();
                Self::stat_card(status, count)
            }),
        );

        let recent = &self.tickets[..RECENT.min(self.tickets.len())];
        let content = Element::col()
            .overflow(Overflow::Scroll)
            .scroll_offset(self.scroll.offset())
            .gap(1)
            .child(Element::text(greeting).id("greeting").style(Style::new().foreground(theme::TEXT)))
            .child(stats)
            .child(Element::text("Recent tickets").style(Style::new().foreground(theme::TEXT_MUTED).bold()))
            .child(self.recent.render(recent));

        shell(Section::Dashboard, "Dashboard", user.as_ref(), content)
    }

    fn on_click(&mut self, event: &mut ClickEvent, cx: &mut Context) {
        if handle_shell_click(event, &self.services, cx) {
            return;
        }
        if event.hit_with_prefix("recent-row-").is_some() {
            cx.navigate(routes::TICKETS);
        }
    }

    fn on_scroll(&mut self, event: &ScrollEvent, cx: &mut Context) {
        // greeting, stats, heading, table
        self.scroll.scroll_by(event.delta, 3, cx.document());
    }
}
