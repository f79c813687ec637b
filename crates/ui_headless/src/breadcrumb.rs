//! Breadcrumb trail collapsing.

#[derive(Debug, Clone, PartialEq, Eq)]
/// Rendered breadcrumb position.
pub enum BreadcrumbSlot<T> {
    /// A visible crumb.
    Entry(T),
    /// Collapsed crumbs, with the hidden entries for a dropdown.
    Ellipsis(Vec<T>),
}

/// Collapses a trail longer than `max_items` into head, ellipsis, and tail.
///
/// `items_before` crumbs stay at the start and the rest of the budget goes to the end. The
/// last crumb always stays visible, so `items_before` is reduced when the budget is too tight,
/// and a budget below two still yields the ellipsis and the last crumb. A trail that fits is
/// returned untouched.
pub fn collapse_trail<T: Clone>(
    items: &[T],
    max_items: usize,
    items_before: usize,
) -> Vec<BreadcrumbSlot<T>> {
    if items.len() <= max_items.max(1) {
        return items.iter().cloned().map(BreadcrumbSlot::Entry).collect();
    }
    let visible_budget = max_items.max(2) - 1;
    let items_before = items_before.min(visible_budget - 1);
    let items_after = visible_budget - items_before;
    let hidden_end = items.len() - items_after;

    let mut slots: Vec<BreadcrumbSlot<T>> = items[..items_before]
        .iter()
        .cloned()
        .map(BreadcrumbSlot::Entry)
        .collect();
    slots.push(BreadcrumbSlot::Ellipsis(items[items_before..hidden_end].to_vec()));
    slots.extend(items[hidden_end..].iter().cloned().map(BreadcrumbSlot::Entry));
    slots
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::BreadcrumbSlot::{Ellipsis, Entry};
    use super::*;

    #[test]
    fn short_trail_is_untouched() {
        assert_eq!(
            collapse_trail(&["Home", "Docs"], 3, 1),
            vec![Entry("Home"), Entry("Docs")]
        );
    }

    #[test]
    fn long_trail_keeps_head_and_tail() {
        let trail = ["Home", "Docs", "Components", "Data", "Breadcrumb"];
        assert_eq!(
            collapse_trail(&trail, 4, 1),
            vec![
                Entry("Home"),
                Ellipsis(vec!["Docs", "Components"]),
                Entry("Data"),
                Entry("Breadcrumb"),
            ]
        );
    }

    #[test]
    fn tight_budget_still_collapses() {
        let trail: Vec<usize> = (0..10).collect();
        assert_eq!(
            collapse_trail(&trail, 3, 2),
            vec![Entry(0), Ellipsis((1..9).collect()), Entry(9)]
        );
        assert_eq!(
            collapse_trail(&["a", "b", "c", "d"], 1, 0),
            vec![Ellipsis(vec!["a", "b", "c"]), Entry("d")]
        );
    }
}
