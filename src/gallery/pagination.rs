pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Growing prefix of the filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    page: usize,
    page_size: usize,
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationWindow {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_len(&self, filtered_len: usize) -> usize {
        filtered_len.min(self.page.saturating_mul(self.page_size))
    }

    pub fn has_more(&self, filtered_len: usize) -> bool {
        self.visible_len(filtered_len) < filtered_len
    }

    /// Moves to the next page if anything is still hidden. Returns whether
    /// the window grew.
    pub fn advance(&mut self, filtered_len: usize) -> bool {
        if !self.has_more(filtered_len) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}
