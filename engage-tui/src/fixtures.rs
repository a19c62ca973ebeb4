//! Sample records the console pages start from.
//!
//! Nothing here talks to the backend; pages copy these into their own state
//! and mutate the copy.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Format every fabricated timestamp uses.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [Self::Open, Self::Pending, Self::Resolved, Self::Closed];

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: u32,
    pub subject: String,
    pub requester: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub updated_at: String,
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 6)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}

fn stamp(offset_minutes: i64) -> String {
    (base_time() + Duration::minutes(offset_minutes))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn categories() -> Vec<Category> {
    [
        ("Billing", "Invoices, refunds and payment methods"),
        ("Technical Support", "Product faults and troubleshooting"),
        ("Sales Inquiry", "Pricing questions and new contracts"),
        ("Account Management", "Access, seats and ownership changes"),
        ("Feedback", "Suggestions and feature requests"),
        ("Complaints", "Escalated dissatisfaction cases"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, description))| Category {
        id: i as u32 + 1,
        name: name.to_string(),
        description: description.to_string(),
        created_at: stamp(i as i64 * 1440 + 35),
    })
    .collect()
}

const SUBJECTS: [&str; 8] = [
    "Cannot log in after password reset",
    "Invoice shows wrong VAT number",
    "Export to CSV times out",
    "Request for additional seats",
    "Dashboard loads slowly",
    "Refund for duplicate charge",
    "Agent cannot see assigned queue",
    "Campaign emails marked as spam",
];

const REQUESTERS: [&str; 5] = [
    "Maria Lopez",
    "Tom Becker",
    "Aiko Tanaka",
    "Samuel Okafor",
    "Lena Fischer",
];

const PRIORITIES: [Priority; 4] = [Priority::Medium, Priority::High, Priority::Low, Priority::Urgent];

/// Twenty-four tickets, newest first.
pub fn tickets() -> Vec<Ticket> {
    let count = 24;
    (0..count)
        .map(|i| Ticket {
            id: 1000 + (count - i) as u32,
            subject: SUBJECTS[i % SUBJECTS.len()].to_string(),
            requester: REQUESTERS[i % REQUESTERS.len()].to_string(),
            status: TicketStatus::ALL[i % TicketStatus::ALL.len()],
            priority: PRIORITIES[(i / 2) % PRIORITIES.len()],
            updated_at: stamp(10_000 - i as i64 * 173),
        })
        .collect()
}
