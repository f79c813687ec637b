//! Page-range computation with boundary pages, sibling pages, and ellipses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "page")]
/// One entry of a rendered page range.
pub enum PageItem {
    /// A 1-based page link.
    Page(u32),
    /// A gap of hidden pages.
    Ellipsis,
}

/// Builds the visible page list for `current` out of `total` pages.
///
/// `boundaries` pages stay pinned at each end and `siblings` pages flank the current one.
/// The list has a constant length once `total` is large enough, and an ellipsis that would
/// hide exactly one page shows that page instead. `current` is clamped into `1..=total`;
/// zero pages yield an empty list.
pub fn page_range(current: u32, total: u32, siblings: u32, boundaries: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let count = i64::from(total);
    let page = i64::from(current.clamp(1, total));
    let siblings = i64::from(siblings);
    let boundaries = i64::from(boundaries);

    let start_pages = 1..=boundaries.min(count);
    let end_first = (count - boundaries + 1).max(boundaries + 1);
    let end_pages = end_first..=count;

    let siblings_start = (page - siblings)
        .min(count - boundaries - siblings * 2 - 1)
        .max(boundaries + 2);
    let siblings_end = (page + siblings)
        .max(boundaries + siblings * 2 + 2)
        .min(if end_pages.is_empty() {
            count - 1
        } else {
            end_first - 2
        });

    let mut items: Vec<PageItem> = start_pages.map(as_page).collect();
    if siblings_start > boundaries + 2 {
        items.push(PageItem::Ellipsis);
    } else if boundaries + 1 < count - boundaries {
        items.push(as_page(boundaries + 1));
    }
    items.extend((siblings_start..=siblings_end).map(as_page));
    if siblings_end < count - boundaries - 1 {
        items.push(PageItem::Ellipsis);
    } else if count - boundaries > boundaries {
        items.push(as_page(count - boundaries));
    }
    items.extend(end_pages.map(as_page));
    items
}

fn as_page(page: i64) -> PageItem {
    PageItem::Page(u32::try_from(page).unwrap_or(u32::MAX))
}

/// Number of pages needed for `items` entries at `page_size` per page.
pub fn total_pages_for(items: usize, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(items.div_ceil(page_size)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Current page within a fixed page count.
pub struct PaginationState {
    page: u32,
    total_pages: u32,
}

impl PaginationState {
    /// State at `page`, clamped into range.
    pub fn new(page: u32, total_pages: u32) -> Self {
        let mut state = Self {
            page: 1,
            total_pages,
        };
        state.go_to(page);
        state
    }

    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page count.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Moves to `page`, clamped. Returns whether the page changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages.max(1));
        let changed = target != self.page;
        self.page = target;
        changed
    }

    /// Advances one page.
    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    /// Goes back one page.
    pub fn previous(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Changes the page count, clamping the current page.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        self.go_to(self.page);
    }

    /// Visible range for the current page.
    pub fn range(&self, siblings: u32, boundaries: u32) -> Vec<PageItem> {
        page_range(self.page, self.total_pages, siblings, boundaries)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PageItem::{Ellipsis, Page};
    use super::*;

    #[test]
    fn first_page_of_ten() {
        assert_eq!(
            page_range(1, 10, 1, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn middle_page_has_two_ellipses() {
        assert_eq!(
            page_range(5, 10, 1, 1),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn last_page_of_ten() {
        assert_eq!(
            page_range(10, 10, 1, 1),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(page_range(2, 3, 1, 1), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_range(1, 1, 1, 1), vec![Page(1)]);
        assert_eq!(page_range(1, 0, 1, 1), Vec::new());
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_range(99, 10, 1, 1), page_range(10, 10, 1, 1));
        assert_eq!(page_range(0, 10, 1, 1), page_range(1, 10, 1, 1));
    }

    #[test]
    fn single_hidden_page_is_shown_instead_of_ellipsis() {
        assert_eq!(
            page_range(4, 7, 1, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn state_navigation_is_clamped() {
        let mut state = PaginationState::new(3, 3);
        assert!(!state.has_next());
        assert!(!state.next());
        assert!(state.previous());
        assert_eq!(state.page(), 2);
        state.set_total_pages(1);
        assert_eq!(state.page(), 1);
        assert!(!state.has_previous());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages_for(0, 10), 0);
        assert_eq!(total_pages_for(21, 10), 3);
        assert_eq!(total_pages_for(5, 0), 0);
    }
}
