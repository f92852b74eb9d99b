use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: usize = 10;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Client-held page state threaded through every list screen.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paginator {
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
            total: 0,
        }
    }

    /// Moves to `page`, treating page zero as the first page.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn last_page(&self) -> usize {
        self.total.div_ceil(self.per_page.max(1)).max(1)
    }

    /// One-based index of the first record on the current page, zero when empty.
    pub fn from(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            ((self.current_page - 1) * self.per_page + 1).min(self.total)
        }
    }

    /// One-based index of the last record on the current page.
    pub fn to(&self) -> usize {
        (self.current_page * self.per_page).min(self.total)
    }

    /// Page links around the current page; `None` marks an elided gap.
    pub fn pages(&self) -> Vec<Option<usize>> {
        if self.total == 0 {
            return vec![];
        }
        get_pages(self.last_page(), self.current_page, 2, 2, 4, 2)
    }

    /// Keeps the total consistent after records were removed client-side.
    pub fn decrement_total(&mut self, removed: usize) {
        self.total = self.total.saturating_sub(removed);
    }
}

/// One page of records together with the paginator the backend reported.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub paginator: Paginator,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>, current_page: usize, per_page: usize, total: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        Self {
            records,
            paginator: Paginator {
                current_page,
                per_page: per_page.max(1),
                total,
            },
        }
    }
}
