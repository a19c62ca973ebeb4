//! Caller-side narrowing of table rows: fuzzy search and paging.

use std::ops::Range;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Indices of the rows whose `text` fuzzy-matches `query`, in source order.
///
/// A blank query matches every row.
pub fn fuzzy_filter<T, F>(query: &str, rows: &[T], text: F) -> Vec<usize>
where
    F: Fn(&T) -> String,
{
    let query = query.trim();
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let haystack_text = text(row);
            let haystack = Utf32Str::new(&haystack_text, &mut buf);
            pattern.score(haystack, &mut matcher).map(|_| index)
        })
        .collect()
}

/// 1-based page position over a list of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
}

impl Pagination {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// At least one page, even for an empty list.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.total_pages(total));
    }

    /// Pull the page back into range after the list shrank.
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    pub fn next(&mut self, total: usize) {
        self.set_page(self.page + 1, total);
    }

    pub fn prev(&mut self, total: usize) {
        self.set_page(self.page.saturating_sub(1), total);
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page < self.total_pages(total)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Index range of the current page.
    pub fn range(&self, total: usize) -> Range<usize> {
        let page = self.page.min(self.total_pages(total));
        let start = ((page - 1) * self.per_page).min(total);
        let end = (start + self.per_page).min(total);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn label(&self, total: usize) -> String {
        let range = self.range(total);
        if range.is_empty() {
            return "No results".to_string();
        }
        format!("Showing {}-{} of {}", range.start + 1, range.end, total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}
