use engage_ui::search::{Pagination, fuzzy_filter};

fn names() -> Vec<String> {
    ["Billing", "Technical Support", "Sales", "General Inquiry", "Bugs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// fuzzy_filter
// =============================================================================

#[test]
fn test_blank_query_matches_all() {
    let rows = names();
    assert_eq!(fuzzy_filter("", &rows, |s| s.clone()), vec![0, 1, 2, 3, 4]);
    assert_eq!(fuzzy_filter("   ", &rows, |s| s.clone()), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_matches_keep_source_order() {
    let rows = names();
    let matches = fuzzy_filter("bu", &rows, |s| s.clone());

    assert!(matches.contains(&4));
    assert!(matches.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_case_insensitive() {
    let rows = names();
    assert_eq!(fuzzy_filter("SALES", &rows, |s| s.clone()), vec![2]);
}

#[test]
fn test_no_matches() {
    let rows = names();
    assert!(fuzzy_filter("xyz", &rows, |s| s.clone()).is_empty());
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_total_pages() {
    let pages = Pagination::new(10);
    assert_eq!(pages.total_pages(0), 1);
    assert_eq!(pages.total_pages(10), 1);
    assert_eq!(pages.total_pages(11), 2);
}

#[test]
fn test_navigation_is_clamped() {
    let mut pages = Pagination::new(10);
    pages.prev(25);
    assert_eq!(pages.page(), 1);

    pages.next(25);
    pages.next(25);
    pages.next(25);
    assert_eq!(pages.page(), 3);
    assert!(!pages.has_next(25));

    pages.set_page(99, 25);
    assert_eq!(pages.page(), 3);
}

#[test]
fn test_slice_and_label() {
    let items: Vec<u32> = (1..=25).collect();
    let mut pages = Pagination::new(10);

    assert_eq!(pages.slice(&items), &items[0..10]);
    assert_eq!(pages.label(items.len()), "Showing 1-10 of 25");

    pages.set_page(3, items.len());
    assert_eq!(pages.slice(&items), &items[20..25]);
    assert_eq!(pages.label(items.len()), "Showing 21-25 of 25");
}

#[test]
fn test_clamp_after_shrink() {
    let mut pages = Pagination::new(5);
    pages.set_page(4, 20);
    pages.clamp(7);
    assert_eq!(pages.page(), 2);
    assert_eq!(pages.range(7), 5..7);
}

#[test]
fn test_empty_label() {
    let pages = Pagination::new(10);
    assert_eq!(pages.label(0), "No results");
    assert!(pages.slice::<u32>(&[]).is_empty());
}
