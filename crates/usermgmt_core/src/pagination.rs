//! Offset pagination over already filtered and ordered results.
//!
//! # Invariants
//! - `page_index` is 1-based; callers clamp it before calling.
//! - `total_pages` is never below 1, even for an empty input.
//! - An index past the last page yields no items, not an error.

use serde::Serialize;

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next_page(&self) -> bool {
        self.page_index < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 1
    }
}

/// Slices `items` into page `page_index` of `page_size` items.
///
/// A `page_size` of 0 is treated as 1.
pub fn paginate<T>(items: Vec<T>, page_index: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let offset = page_index.saturating_sub(1).saturating_mul(page_size);

    let items = items.into_iter().skip(offset).take(page_size).collect();

    Page {
        items,
        page_index,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::paginate;

    #[test]
    fn last_partial_page_of_twenty_five() {
        let page = paginate((0..25).collect::<Vec<i32>>(), 3, 10);
        assert_eq!(page.items, (20..25).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next_page());
        assert!(page.has_previous_page());
    }

    #[test]
    fn first_page_has_next_but_no_previous() {
        let page = paginate((0..25).collect::<Vec<i32>>(), 1, 10);
        assert_eq!(page.items.len(), 10);
        assert!(page.has_next_page());
        assert!(!page.has_previous_page());
    }

    #[test]
    fn empty_input_still_has_one_page() {
        let page = paginate(Vec::<u8>::new(), 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page());
    }

    #[test]
    fn index_past_end_is_empty_with_valid_total() {
        let page = paginate((0..25).collect::<Vec<i32>>(), 7, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_index, 7);
    }

    #[test]
    fn exact_multiple_does_not_add_trailing_page() {
        let page = paginate((0..20).collect::<Vec<i32>>(), 2, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.first(), Some(&10));
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let page = paginate(vec!['a', 'b', 'c'], 2, 0);
        assert_eq!(page.items, vec!['b']);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn identical_inputs_yield_identical_pages() {
        let first = paginate((0..13).collect::<Vec<i32>>(), 2, 5);
        let second = paginate((0..13).collect::<Vec<i32>>(), 2, 5);
        assert_eq!(first, second);
    }
}
