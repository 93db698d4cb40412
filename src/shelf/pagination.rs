//! List Presentation: 1-indexed pagination over the saved shelf.

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Returns the items of page `page` (1-indexed).
///
/// The slice is `[(page-1)*page_size, page*page_size)` clipped to the list.
/// Page 0, a zero page size and pages past the end all yield an empty slice.
///
/// ```
/// use bookshelf::shelf::paginate;
///
/// let items: Vec<u32> = (0..20).collect();
/// assert_eq!(paginate(&items, 9, 3), &[18, 19]);
/// assert!(paginate(&items, 9, 4).is_empty());
/// ```
#[must_use]
pub fn paginate<T>(list: &[T], page_size: usize, page: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(list.len());
    let end = start.saturating_add(page_size).min(list.len());
    &list[start..end]
}

/// `ceil(len / page_size)`; zero for an empty list.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (len + page_size - 1) / page_size
}

/// Current page over a list whose length may change underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    /// Starts on page 1. A zero `page_size` is replaced by the default.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        Self { page: 1, page_size }
    }

    /// Current page, 1-indexed.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items on the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        paginate(list, self.page_size, self.page)
    }

    /// Index into the full list of slot `slot` on the current page.
    #[must_use]
    pub const fn absolute_index(&self, slot: usize) -> usize {
        (self.page - 1) * self.page_size + slot
    }

    /// Moves to `page`. Returns whether the page changed.
    ///
    /// Pages outside `1..=total_pages(len)` are rejected.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page == 0 || page > total_pages(len, self.page_size) || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Moves one page forward if there is one.
    pub fn next(&mut self, len: usize) -> bool {
        self.go_to(self.page + 1, len)
    }

    /// Moves one page back if there is one.
    pub fn prev(&mut self, len: usize) -> bool {
        self.page > 1 && self.go_to(self.page - 1, len)
    }

    /// Pulls the page back inside the list after it shrank.
    ///
    /// Returns whether the page changed.
    pub fn clamp(&mut self, len: usize) -> bool {
        let last = total_pages(len, self.page_size).max(1);
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twenty() -> Vec<usize> {
        (0..20).collect()
    }

    #[test]
    fn first_page_is_first_nine() {
        let list = twenty();
        assert_eq!(paginate(&list, 9, 1), &list[0..9]);
    }

    #[test]
    fn last_page_is_partial() {
        let list = twenty();
        assert_eq!(paginate(&list, 9, 3), &[18, 19]);
    }

    #[test]
    fn page_past_end_is_empty() {
        let list = twenty();
        assert!(paginate(&list, 9, 4).is_empty());
        assert!(paginate(&list, 9, usize::MAX).is_empty());
    }

    #[test]
    fn page_zero_is_empty() {
        assert!(paginate(&twenty(), 9, 0).is_empty());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(20, 9), 3);
        assert_eq!(total_pages(18, 9), 2);
        assert_eq!(total_pages(1, 9), 1);
        assert_eq!(total_pages(0, 9), 0);
    }

    #[test]
    fn pager_navigation_stays_in_bounds() {
        let mut pager = Pager::new(9);
        assert!(!pager.prev(20));
        assert!(pager.next(20));
        assert!(pager.next(20));
        assert!(!pager.next(20));
        assert_eq!(pager.page(), 3);
        assert!(pager.go_to(1, 20));
        assert!(!pager.go_to(4, 20));
        assert_eq!(pager.absolute_index(2), 2);
    }

    #[test]
    fn pager_clamps_after_delete() {
        let mut pager = Pager::new(9);
        pager.go_to(3, 20);
        assert!(pager.clamp(18));
        assert_eq!(pager.page(), 2);
        assert!(pager.clamp(0));
        assert_eq!(pager.page(), 1);
        assert!(!pager.clamp(0));
    }
}
