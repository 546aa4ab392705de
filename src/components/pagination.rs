use std::collections::BTreeSet;

/// Current page / total pages for a roster. Stateless: page changes are
/// forwarded to the caller untouched, so a caller that passes an
/// out-of-range page gets exactly that page back in its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination { current_page: 1, total_pages: 1 }
    }
}

/// One slot in the page strip. `number == None` is a gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub number: Option<u32>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub items: Vec<PageItem>,
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

impl Pagination {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Pagination { current_page, total_pages }
    }

    /// The control exists only with more than one page and a listener.
    pub fn is_visible(&self, has_handler: bool) -> bool {
        self.total_pages > 1 && has_handler
    }

    /// Page strip: first and last page, one sibling either side of the
    /// current page, gaps for anything longer than a single skipped page.
    pub fn view(&self) -> Option<PaginationView> {
        if self.total_pages <= 1 {
            return None;
        }
        let total = self.total_pages;
        let current = self.current_page;

        let mut shown = BTreeSet::from([1, total]);
        for n in [current.saturating_sub(1), current, current.saturating_add(1)] {
            if (1..=total).contains(&n) {
                shown.insert(n);
            }
        }

        let mut items = Vec::with_capacity(shown.len() + 2);
        let mut last = 0;
        for n in shown {
            if last != 0 {
                match n - last {
                    1 => {}
                    2 => items.push(page_item(last + 1, current)),
                    _ => items.push(PageItem { number: None, active: false }),
                }
            }
            items.push(page_item(n, current));
            last = n;
        }

        Some(PaginationView {
            items,
            prev: (current > 1).then(|| current - 1),
            next: (current < total).then(|| current + 1),
        })
    }
}

fn page_item(number: u32, current: u32) -> PageItem {
    PageItem { number: Some(number), active: number == current }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(view: &PaginationView) -> Vec<Option<u32>> {
        view.items.iter().map(|i| i.number).collect()
    }

    #[test]
    fn single_page_renders_nothing() {
        assert!(Pagination::new(1, 1).view().is_none());
        assert!(Pagination::new(1, 0).view().is_none());
        assert!(!Pagination::new(1, 1).is_visible(true));
    }

    #[test]
    fn visibility_needs_pages_and_handler() {
        assert!(Pagination::new(1, 2).is_visible(true));
        assert!(!Pagination::new(1, 2).is_visible(false));
    }

    #[test]
    fn short_strip_lists_every_page() {
        let view = Pagination::new(2, 4).view().unwrap();
        assert_eq!(numbers(&view), vec![Some(1), Some(2), Some(3), Some(4)]);
        assert!(view.items[1].active);
        assert_eq!(view.prev, Some(1));
        assert_eq!(view.next, Some(3));
    }

    #[test]
    fn long_strip_collapses_into_gaps() {
        let view = Pagination::new(6, 12).view().unwrap();
        assert_eq!(
            numbers(&view),
            vec![Some(1), None, Some(5), Some(6), Some(7), None, Some(12)]
        );
    }

    #[test]
    fn single_skipped_page_is_shown_not_gapped() {
        let view = Pagination::new(4, 10).view().unwrap();
        assert_eq!(
            numbers(&view),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(10)]
        );
    }

    #[test]
    fn ends_disable_prev_and_next() {
        let first = Pagination::new(1, 3).view().unwrap();
        let last = Pagination::new(3, 3).view().unwrap();
        assert_eq!(first.prev, None);
        assert_eq!(last.next, None);
    }

    #[test]
    fn out_of_range_current_is_not_clamped() {
        let view = Pagination::new(9, 3).view().unwrap();
        assert!(view.items.iter().all(|i| !i.active));
        assert_eq!(view.prev, Some(8));
        assert_eq!(view.next, None);
    }
}
