// Pagination engine - Page cursor, slices and control state
use std::ops::{Range, RangeInclusive};

/// Maximum number of page-number buttons shown at once.
pub const PAGE_BUTTON_WINDOW: usize = 10;

/// The 1-based cursor of the currently displayed table page.
///
/// This is the only persistent mutable piece of view state. It starts at
/// page 1 and moves only through the navigation methods below; everything
/// else (slices, control enablement, the button window) is derived from
/// the cursor and the current item count on demand. Out-of-range requests
/// clamp or no-op, they never fail.
#[derive(Debug, Clone)]
pub struct Pager {
    current: usize,
    page_size: usize,
}

/// Derived state for the pagination control row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: usize,
    pub total_pages: usize,
    pub first_enabled: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    /// The windowed run of page-number buttons; empty when there are no
    /// pages yet.
    pub page_numbers: RangeInclusive<usize>,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total_items / page_size)`, zero pages when there is no data.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Item range displayed on the current page:
    /// `[(current-1)*page_size, min(current*page_size, total_items))`.
    pub fn slice(&self, total_items: usize) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(total_items);
        let end = (self.current * self.page_size).min(total_items);
        start..end
    }

    /// Zero-based item offset of the current page, matching the hosted
    /// store's range convention (`offset = (page-1)*page_size`).
    pub fn offset(&self) -> usize {
        (self.current - 1) * self.page_size
    }

    /// Row limit of one page, matching the hosted store's range
    /// convention (`limit = page_size`).
    pub fn limit(&self) -> usize {
        self.page_size
    }

    pub fn first(&mut self) {
        self.current = 1;
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, total_items: usize) {
        let total_pages = self.total_pages(total_items);
        if total_pages > 0 {
            self.current = (self.current + 1).min(total_pages);
        }
    }

    pub fn last(&mut self, total_items: usize) {
        let total_pages = self.total_pages(total_items);
        if total_pages > 0 {
            self.current = total_pages;
        }
    }

    pub fn goto(&mut self, page: usize, total_items: usize) {
        if page >= 1 && page <= self.total_pages(total_items) {
            self.current = page;
        }
    }

    pub fn controls(&self, total_items: usize) -> PaginationControls {
        let total_pages = self.total_pages(total_items);
        let at_end = total_pages == 0 || self.current == total_pages;
        PaginationControls {
            current: self.current,
            total_pages,
            first_enabled: self.current > 1,
            prev_enabled: self.current > 1,
            next_enabled: !at_end,
            last_enabled: !at_end,
            page_numbers: page_number_window(self.current, total_pages),
        }
    }
}

/// The run of page numbers to render as buttons.
///
/// All pages when they fit; otherwise a window of exactly
/// `PAGE_BUTTON_WINDOW` numbers clamped inside `[1, total_pages]`:
/// pinned to the start while the cursor sits in the first half-window,
/// pinned to the end when it reaches the last one, centered on the cursor
/// in between.
fn page_number_window(current: usize, total_pages: usize) -> RangeInclusive<usize> {
    if total_pages <= PAGE_BUTTON_WINDOW {
        return 1..=total_pages;
    }
    let middle = PAGE_BUTTON_WINDOW.div_ceil(2);
    if current <= middle {
        1..=PAGE_BUTTON_WINDOW
    } else if current + middle - 1 >= total_pages {
        (total_pages - PAGE_BUTTON_WINDOW + 1)..=total_pages
    } else {
        (current - middle + 1)..=(current + (PAGE_BUTTON_WINDOW - middle))
    }
}
