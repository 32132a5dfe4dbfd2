//! Fixed row height list virtualization
//!
//! Only the rows intersecting the viewport are rendered. Heights and offsets
//! share one unit (pixels in a browser-style list, lines in the terminal).

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    row_height: usize,
    scroll_offset: usize,
}

impl Viewport {
    pub fn new(height: usize, row_height: usize) -> Self {
        Self {
            height,
            row_height: row_height.max(1),
            scroll_offset: 0,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_height(&self) -> usize {
        self.row_height
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Resize, e.g. after a terminal resize. Keeps the offset valid.
    pub fn set_height(&mut self, height: usize, row_count: usize) {
        self.height = height;
        self.clamp(row_count);
    }

    /// Rows that fit in the viewport, counting a partially visible one
    pub fn visible_rows(&self) -> usize {
        self.height.div_ceil(self.row_height)
    }

    /// Indices of the rows intersecting the viewport
    pub fn visible_range(&self, row_count: usize) -> Range<usize> {
        let first = self.scroll_offset / self.row_height;
        let end = (self.scroll_offset + self.height).div_ceil(self.row_height);
        first.min(row_count)..end.min(row_count)
    }

    pub fn last_visible_index(&self, row_count: usize) -> Option<usize> {
        let range = self.visible_range(row_count);
        if range.is_empty() {
            None
        } else {
            Some(range.end - 1)
        }
    }

    fn max_scroll_offset(&self, row_count: usize) -> usize {
        (row_count * self.row_height).saturating_sub(self.height)
    }

    /// Scroll by `delta` units, clamped to the content
    pub fn scroll_by(&mut self, delta: isize, row_count: usize) {
        self.scroll_offset = if delta.is_negative() {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        self.clamp(row_count);
    }

    /// Scroll the minimum amount needed for row `index` to be fully visible
    pub fn ensure_visible(&mut self, index: usize, row_count: usize) {
        let top = index * self.row_height;
        let bottom = top + self.row_height;

        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.height {
            self.scroll_offset = bottom.saturating_sub(self.height);
        }
        self.clamp(row_count);
    }

    /// Pull the offset back after the row count shrank
    pub fn clamp(&mut self, row_count: usize) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset(row_count));
    }

    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }
}
