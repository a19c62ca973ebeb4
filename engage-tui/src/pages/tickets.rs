//! Ticket list with search, status filter, paging and a detail dialog.

use engage_ui::prelude::*;

use super::shell::{Section, handle_shell_click, shell};
use crate::app::Services;
use crate::fixtures::{self, Priority, Ticket, TicketStatus};

pub const SEARCH_ID: &str = "ticket-search";
pub const PREV_ID: &str = "tickets-prev";
pub const NEXT_ID: &str = "tickets-next";
pub const PAGE_LABEL_ID: &str = "tickets-page";

const TABLE_ID: &str = "tickets";
const PER_PAGE: usize = 8;

pub fn status_color(status: TicketStatus) -> Color {
    match status {
        TicketStatus::Open => theme::INFO,
        TicketStatus::Pending => theme::WARNING,
        TicketStatus::Resolved => theme::SUCCESS,
        TicketStatus::Closed => theme::TEXT_MUTED,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => theme::TEXT_MUTED,
        Priority::Medium => theme::TEXT,
        Priority::High => theme::WARNING,
        Priority::Urgent => theme::ERROR,
    }
}

/// Columns shared by the ticket list and the dashboard.
pub fn ticket_columns() -> Vec<Column<Ticket>> {
    vec![
        Column::new("id", "#", |t: &Ticket, _| Element::text(format!("#{}", t.id))).width(Size::Fixed(7)),
        Column::new("subject", "Subject", |t: &Ticket, _| {
            Element::text(t.subject.clone()).text_wrap(TextWrap::Truncate)
        })
        .width(Size::Flex(3)),
        Column::new("requester", "Requester", |t: &Ticket, _| {
            Element::text(t.requester.clone()).text_wrap(TextWrap::Truncate)
        })
        .width(Size::Flex(2)),
        Column::new("status", "Status", |t: &Ticket, _| {
            Element::text(t.status.label()).style(Style::new().foreground(status_color(t.status)))
        })
        .width(Size::Fixed(10)),
        Column::new("priority", "Priority", |t: &Ticket, _| {
            Element::text(t.priority.label()).style(Style::new().foreground(priority_color(t.priority)))
        })
        .width(Size::Fixed(10)),
        Column::new("updated", "Updated", |t: &Ticket, _| Element::text(t.updated_at.clone()))
            .width(Size::Fixed(17))
            .align(TextAlign::Right),
    ]
}

fn filter_id(status: Option<TicketStatus>) -> String {
    match status {
        Some(status) => format!("filter-{}", status.label().to_lowercase()),
        None => "filter-all".to_string(),
    }
}

pub struct TicketsPage {
    services: Services,
    tickets: Vec<Ticket>,
    table: Table<Ticket>,
    search: TextField,
    status: Option<TicketStatus>,
    pagination: Pagination,
    scroll: PageScroll,
    selected: State<Option<u32>>,
    details: Overlay,
}

impl TicketsPage {
    pub fn new(document: &Document, services: Services) -> Self {
        services.load_user();
        let selected = State::new(None);
        let close = selected.clone();
        let details = Overlay::new(
            "ticket-details",
            document,
            OverlayConfig::new().title("Ticket").size(OverlaySize::Lg),
            move || close.set(None),
        );

        Self {
            services,
            tickets: fixtures::tickets(),
            table: Table::new(TABLE_ID, ticket_columns()).empty_message("No tickets match your filters"),
            search: TextField::new(SEARCH_ID, "Search").placeholder("Subject, requester or number"),
            status: None,
            pagination: Pagination::new(PER_PAGE),
            scroll: PageScroll::new(),
            selected,
            details,
        }
    }

    /// Tickets passing the search and status filter, in list order.
    fn visible(&self) -> Vec<&Ticket> {
        fuzzy_filter(self.search.value(), &self.tickets, |t| {
            format!("{} {} #{}", t.subject, t.requester, t.id)
        })
        .into_iter()
        .map(|i| &self.tickets[i])
        .filter(|t| self.status.is_none_or(|s| t.status == s))
        .collect()
    }

    fn details_body(ticket: &Ticket) -> Element {
        let line = |label: &str, value: Element| {
            Element::row()
                .gap(1)
                .child(
                    Element::text(label)
                        .width(Size::Fixed(11))
                        .style(Style::new().foreground(theme::TEXT_MUTED)),
                )
                .child(value)
        };
        Element::col()
            .child(line("Number", Element::text(format!("#{}", ticket.id))))
            .child(line("Subject", Element::text(ticket.subject.clone())))
            .child(line("Requester", Element::text(ticket.requester.clone())))
            .child(line(
                "Status",
                Element::text(ticket.status.label()).style(Style::new().foreground(status_color(ticket.status))),
            ))
            .child(line(
                "Priority",
                Element::text(ticket.priority.label())
                    .style(Style::new().foreground(priority_color(ticket.priority))),
            ))
            .child(line("Updated", Element::text(ticket.updated_at.clone())))
    }

    fn filters(&self) -> Element {
        let options = std::iter::once(None).chain(TicketStatus::ALL.into_iter().map(Some));
        Element::row().gap(1).children(options.map(|status| {
            let label = status.map_or("All", TicketStatus::label);
            let variant = if status == self.status {
                ButtonVariant::Primary
            } else {
                ButtonVariant::Secondary
            };
            button(filter_id(status), label, variant, false)
        }))
    }
}

impl Page for TicketsPage {
    fn element(&mut self, cx: &mut Context) -> Element {
        let total = self.visible().len();
        self.pagination.clamp(total);
        let visible: Vec<Ticket> = self.visible().into_iter().cloned().collect();
        let rows = self.pagination.slice(&visible);

        let pager = Element::row()
            .width(Size::Fill)
            .gap(1)
            .child(
                Element::text(self.pagination.label(total))
                    .id(PAGE_LABEL_ID)
                    .width(Size::Fill)
                    .style(Style::new().foreground(theme::TEXT_MUTED)),
            )
            .child(button(PREV_ID, "‹ Prev", ButtonVariant::Secondary, !self.pagination.has_prev()))
            .child(button(NEXT_ID, "Next ›", ButtonVariant::Secondary, !self.pagination.has_next(total)));

        let content = Element::col()
            .overflow(Overflow::Scroll)
            .scroll_offset(self.scroll.offset())
            .gap(1)
            .child(self.search.element(true))
            .child(self.filters())
            .child(self.table.render(rows))
            .child(pager);

        let selected = self
            .selected
            .get()
            .and_then(|id| self.tickets.iter().find(|t| t.id == id));
        let body = selected.map_or_else(Element::col, Self::details_body);
        let dialog = self.details.render(selected.is_some(), cx.viewport(), body);

        let user = self.services.user.get();
        shell(Section::Tickets, "Tickets", user.as_ref(), content).child_opt(dialog)
    }

    fn on_key(&mut self, event: &KeyEvent, _cx: &mut Context) {
        // The details dialog owns the keyboard; Escape reaches it directly
        if self.selected.get().is_some() {
            return;
        }
        let total = self.visible().len();
        match event.key {
            Key::PageDown => self.pagination.next(total),
            Key::PageUp => self.pagination.prev(total),
            _ => {
                if self.search.handle_key(event) {
                    self.pagination.set_page(1, total);
                    self.scroll.reset();
                }
            }
        }
    }

    fn on_click(&mut self, event: &mut ClickEvent, cx: &mut Context) {
        self.details.handle_click(event);
        if event.is_stopped() || handle_shell_click(event, &self.services, cx) {
            return;
        }

        let total = self.visible().len();
        if event.hits(PREV_ID) {
            self.pagination.prev(total);
        } else if event.hits(NEXT_ID) {
            self.pagination.next(total);
        } else if let Some(status) = std::iter::once(None)
            .chain(TicketStatus::ALL.into_iter().map(Some))
            .find(|s| event.hits(&filter_id(*s)))
        {
            self.status = status;
            self.pagination.set_page(1, total);
        } else if let Some(rest) = event.hit_with_prefix(&format!("{TABLE_ID}-row-")) {
            let index = rest.split('-').next().and_then(|i| i.parse::<usize>().ok());
            let visible = self.visible();
            let range = self.pagination.range(visible.len());
            let ticket = index.and_then(|i| visible.get(range.start + i));
            if let Some(ticket) = ticket {
                self.selected.set(Some(ticket.id));
            }
        }
    }

    fn on_scroll(&mut self, event: &ScrollEvent, cx: &mut Context) {
        if self.details.handle_scroll(event) {
            return;
        }
        // search, filters, table, pager
        self.scroll.scroll_by(event.delta, 3, cx.document());
    }
}

#[cfg(test)]
mod tests {
    use engage_dom::{Event, find_element};
    use engage_ui::runtime::Session;

    use super::*;
    use crate::app::routes;
    use crate::pages::shell::CONTENT_ID;
    use crate::testing::{self, DEAD_URL, signed_in, text_of};

    fn session() -> Session {
        testing::session(&signed_in(DEAD_URL), routes::TICKETS)
    }

    fn text(session: &Session, id: &str) -> String {
        text_of(session, id).unwrap_or_default()
    }

    fn content_scroll(session: &Session) -> u16 {
        find_element(session.root(), CONTENT_ID).map_or(0, |content| content.scroll_offset)
    }

    fn row_count(session: &Session) -> usize {
        find_element(session.root(), "tickets-body")
            .map(|body| {
                body.child_elements()
                    .iter()
                    .filter(|row| row.id.as_deref().is_some_and(|id| id.starts_with("tickets-row-")))
                    .count()
            })
            .unwrap_or(0)
    }

    #[test]
    fn test_first_page_and_paging() {
        let mut session = session();
        assert_eq!(row_count(&session), 8);
        assert_eq!(text(&session, PAGE_LABEL_ID), "Showing 1-8 of 24");

        session.click_on(NEXT_ID);
        session.frame();
        assert_eq!(text(&session, PAGE_LABEL_ID), "Showing 9-16 of 24");
        assert_eq!(text(&session, "tickets-row-0-id"), "#1016");

        session.press(Key::PageDown);
        session.press(Key::PageDown);
        session.frame();
        assert_eq!(text(&session, PAGE_LABEL_ID), "Showing 17-24 of 24");
    }

    #[test]
    fn test_status_filter_and_search() {
        let mut session = session();

        session.click_on("filter-pending");
        session.frame();
        assert_eq!(text(&session, PAGE_LABEL_ID), "Showing 1-6 of 6");

        for c in "zzzz".chars() {
            session.press(Key::Char(c));
        }
        session.frame();
        assert_eq!(row_count(&session), 0);
        assert_eq!(text(&session, "tickets-empty"), "No tickets match your filters");
        assert_eq!(text(&session, PAGE_LABEL_ID), "No results");
    }

    #[test]
    fn test_row_click_opens_details_and_escape_closes() {
        let mut session = session();

        session.click_on("tickets-row-2");
        session.frame();
        assert!(session.document().is_scroll_locked());
        assert!(text(&session, "ticket-details-body").contains("#1022"));

        // The page behind stays put while the dialog is open
        session.handle_event(Event::Scroll { x: 30, y: 10, delta: 1 });
        session.handle_event(Event::Scroll { x: 1, y: 1, delta: 2 });
        session.frame();
        assert_eq!(content_scroll(&session), 0);

        session.press(Key::Escape);
        session.frame();
        assert!(!session.document().is_scroll_locked());
        assert!(find_element(session.root(), "ticket-details-backdrop").is_none());
        assert_eq!(content_scroll(&session), 0);
    }

    #[test]
    fn test_keys_stay_in_open_details_dialog() {
        let mut session = session();

        session.click_on("tickets-row-2");
        session.frame();
        session.press(Key::PageDown);
        session.press(Key::Char('z'));
        session.press(Key::Escape);
        session.frame();

        assert!(find_element(session.root(), "ticket-details-backdrop").is_none());
        assert_eq!(text(&session, PAGE_LABEL_ID), "Showing 1-8 of 24");
        assert!(!text(&session, SEARCH_ID).contains('z'));
        assert_eq!(row_count(&session), 8);
    }
}
