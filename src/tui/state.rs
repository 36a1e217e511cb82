//! Cursor state for the tree table.
//!
//! The cursor is a row index into the active view's flattened rows. The
//! view's own selection is kept in sync by the app; this type only handles
//! movement, clamping and scrolling.

use super::constants::PAGE_SIZE;

/// Trait for list-based navigation state.
pub trait ListNavigation {
    /// Get the current selection index.
    fn selected(&self) -> usize;

    /// Set the selection index.
    fn set_selected(&mut self, idx: usize);

    /// Get the total number of items.
    fn total(&self) -> usize;

    /// Set the total number of items.
    fn set_total(&mut self, total: usize);

    /// Rows moved by a page step.
    fn page_size(&self) -> usize {
        PAGE_SIZE
    }

    /// Move selection to the next item.
    fn select_next(&mut self) {
        let total = self.total();
        let selected = self.selected();
        if total > 0 && selected < total.saturating_sub(1) {
            self.set_selected(selected + 1);
        }
    }

    /// Move selection to the previous item.
    fn select_prev(&mut self) {
        let selected = self.selected();
        if selected > 0 {
            self.set_selected(selected - 1);
        }
    }

    /// Ensure selection is within valid bounds.
    fn clamp_selection(&mut self) {
        let total = self.total();
        let selected = self.selected();
        if total == 0 {
            self.set_selected(0);
        } else if selected >= total {
            self.set_selected(total.saturating_sub(1));
        }
    }

    /// Move selection up by a page.
    fn page_up(&mut self) {
        let selected = self.selected();
        self.set_selected(selected.saturating_sub(self.page_size()));
    }

    /// Move selection down by a page.
    fn page_down(&mut self) {
        let total = self.total();
        let selected = self.selected();
        if total > 0 {
            self.set_selected((selected + self.page_size()).min(total.saturating_sub(1)));
        }
    }

    /// Move to the first item.
    fn go_first(&mut self) {
        self.set_selected(0);
    }

    /// Move to the last item.
    fn go_last(&mut self) {
        let total = self.total();
        if total > 0 {
            self.set_selected(total.saturating_sub(1));
        }
    }
}

/// Cursor and scroll position of one view's table.
#[derive(Debug, Clone)]
pub struct TableCursor {
    pub selected: usize,
    pub total: usize,
    /// First row drawn
    pub scroll_offset: usize,
    page_size: usize,
}

impl Default for TableCursor {
    fn default() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }
}

impl TableCursor {
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            selected: 0,
            total: 0,
            scroll_offset: 0,
            page_size: page_size.max(1),
        }
    }

    /// Scroll so the cursor is inside a viewport of `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
        let max_offset = self.total.saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Inclusive row range drawn in a viewport of `height` rows.
    #[must_use]
    pub fn visible_range(&self, height: usize) -> Option<(usize, usize)> {
        if self.total == 0 || height == 0 {
            return None;
        }
        let last = (self.scroll_offset + height - 1).min(self.total - 1);
        Some((self.scroll_offset, last))
    }
}

impl ListNavigation for TableCursor {
    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
    }

    fn total(&self) -> usize {
        self.total
    }

    fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
