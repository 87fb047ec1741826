use super::page::{DEFAULT_PAGE_SIZE, PageMeta, PageRequest};

/// Navigation state for a paginated listing.
///
/// Invariants: `1 <= page <= total_pages` and `page_size >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    page_size: u32,
    total_pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
        }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// The request for the current page.
    pub const fn request(&self) -> PageRequest {
        PageRequest {
            page_number: self.page,
            page_size: self.page_size,
        }
    }

    /// Change the page size. Always returns to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Return to the first page, e.g. after the filters changed.
    pub const fn reset(&mut self) {
        self.page = 1;
    }

    /// Jump to `page`, clamped to the known range.
    pub fn go_to(&mut self, page: u32) {
        self.page = page.clamp(1, self.total_pages);
    }

    /// Advance one page. Returns false when already on the last page.
    pub const fn next(&mut self) -> bool {
        if self.page < self.total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns false when already on the first page.
    pub const fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Absorb the metadata of a fetched page.
    pub fn apply(&mut self, meta: &PageMeta) {
        self.total_pages = meta.total_pages.max(1);
        self.page = meta.current_page.clamp(1, self.total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current_page: u32, total_pages: u32) -> PageMeta {
        PageMeta {
            total_count: u64::from(total_pages) * 10,
            total_pages,
            current_page,
            page_size: 10,
            sum_paid: None,
        }
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut pager = Pager::default();
        pager.apply(&meta(1, 5));
        pager.go_to(4);
        assert_eq!(pager.page(), 4);

        pager.set_page_size(50);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.request(), PageRequest::new(1, 50));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut pager = Pager::new(10);
        assert!(!pager.next());
        assert!(!pager.previous());

        pager.apply(&meta(1, 3));
        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.page(), 3);

        pager.go_to(99);
        assert_eq!(pager.page(), 3);
        pager.go_to(0);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_apply_shrinking_results() {
        let mut pager = Pager::new(10);
        pager.apply(&meta(5, 5));
        assert_eq!(pager.page(), 5);

        pager.apply(&meta(5, 2));
        assert_eq!(pager.page(), 2);
        assert_eq!(pager.total_pages(), 2);
    }

    #[test]
    fn test_reset() {
        let mut pager = Pager::new(10);
        pager.apply(&meta(3, 4));
        pager.reset();
        assert_eq!(pager.page(), 1);
    }
}
