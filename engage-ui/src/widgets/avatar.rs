use engage_dom::{Element, Style};

use crate::theme;

/// Up to two uppercase initials: first letters of the first and last word.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().and_then(|w| w.chars().next());
    let last = words.last().and_then(|w| w.chars().next());
    first
        .into_iter()
        .chain(last)
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn avatar(name: &str) -> Element {
    let initials = initials(name);
    let label = if initials.is_empty() { "?".to_string() } else { initials };
    Element::text(format!(" {label} "))
        .style(
            Style::new()
                .background(theme::PRIMARY)
                .foreground(theme::ON_PRIMARY)
                .bold(),
        )
}
