//! Virtualized grid layout.
//!
//! The list is a virtual index space: row 0 is the header (title,
//! recommendations, filter controls), rows `1..` each hold `columns`
//! products of the current page. Every row height is known from its index
//! alone, so offsets and the visible window are computed without rendering.
use crate::config::{Breakpoint, LayoutConfig};
use std::ops::Range;

pub const HEADER_ROW: usize = 0;

/// Column count for a container `width`, given breakpoints ordered widest first.
#[must_use]
pub fn columns_for_width(width: u32, breakpoints: &[Breakpoint]) -> usize {
    breakpoints
        .iter()
        .find(|bp| width >= bp.min_width)
        .map_or(1, |bp| bp.columns.max(1))
}

/// What a row renderer should draw at a virtual index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDescriptor {
    Header,
    /// Indices into the current page slice.
    Products(Range<usize>),
}

/// Pure geometry for one (item count, column count) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
    item_count: usize,
    header_height: u32,
    row_height: u32,
}

impl GridLayout {
    #[must_use]
    pub fn new(columns: usize, item_count: usize, header_height: u32, row_height: u32) -> Self {
        Self {
            columns: columns.max(1),
            item_count,
            header_height,
            row_height: row_height.max(1),
        }
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn product_rows(&self) -> usize {
        self.item_count.div_ceil(self.columns)
    }

    /// Product rows plus the header row.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.product_rows() + 1
    }

    #[must_use]
    pub fn row_height(&self, index: usize) -> u32 {
        if index == HEADER_ROW {
            self.header_height
        } else {
            self.row_height
        }
    }

    /// Top edge of row `index`. Indices past the end give the total height.
    #[must_use]
    pub fn row_offset(&self, index: usize) -> u32 {
        if index == HEADER_ROW {
            return 0;
        }
        let rows_above = index.min(self.row_count()) - 1;
        let rows_above = u32::try_from(rows_above).unwrap_or(u32::MAX);
        self.header_height
            .saturating_add(rows_above.saturating_mul(self.row_height))
    }

    #[must_use]
    pub fn total_height(&self) -> u32 {
        self.row_offset(self.row_count())
    }

    /// Row containing the pixel `offset`, clamped to the last row.
    #[must_use]
    pub fn row_at_offset(&self, offset: u32) -> usize {
        if offset < self.header_height {
            return HEADER_ROW;
        }
        let below_header = (offset - self.header_height) / self.row_height;
        let row = usize::try_from(below_header).unwrap_or(usize::MAX).saturating_add(1);
        row.min(self.row_count() - 1)
    }

    /// Row that renders page item `item`.
    #[must_use]
    pub const fn row_of_item(&self, item: usize) -> usize {
        item / self.columns + 1
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<RowDescriptor> {
        if index == HEADER_ROW {
            return Some(RowDescriptor::Header);
        }
        if index >= self.row_count() {
            return None;
        }
        let start = (index - 1) * self.columns;
        let end = (start + self.columns).min(self.item_count);
        Some(RowDescriptor::Products(start..end))
    }

    /// Rows intersecting `[scroll_top, scroll_top + viewport_height)`, widened by `overscan`.
    #[must_use]
    pub fn visible_rows(&self, scroll_top: u32, viewport_height: u32, overscan: usize) -> Range<usize> {
        let first = self.row_at_offset(scroll_top);
        let bottom = scroll_top.saturating_add(viewport_height.max(1) - 1);
        let last = self.row_at_offset(bottom);
        let start = first.saturating_sub(overscan);
        let end = last.saturating_add(1).saturating_add(overscan).min(self.row_count());
        start..end
    }

    #[must_use]
    pub fn max_scroll(&self, viewport_height: u32) -> u32 {
        self.total_height().saturating_sub(viewport_height)
    }
}

/// Rows to materialize and where to place them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportWindow {
    pub rows: Range<usize>,
    /// Top offset of the first rendered row.
    pub offset: u32,
    pub total_height: u32,
}

/// Scroll and size state of the product grid.
///
/// The viewport tracks a view generation; when the generation changes (new
/// page, search, sort, or page size) the scroll offset returns to the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    config: LayoutConfig,
    width: u32,
    height: u32,
    scroll_top: u32,
    item_count: usize,
    has_recommendations: bool,
    generation: u64,
}

impl Viewport {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        let height = config.initial_viewport_height;
        Self {
            config,
            width: 0,
            height,
            scroll_top: 0,
            item_count: 0,
            has_recommendations: false,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        columns_for_width(self.width, &self.config.breakpoints)
    }

    #[must_use]
    pub fn header_height(&self) -> u32 {
        if self.has_recommendations {
            self.config.header_height_with_recommendations
        } else {
            self.config.header_height_plain
        }
    }

    #[must_use]
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(
            self.columns(),
            self.item_count,
            self.header_height(),
            self.config.product_row_height,
        )
    }

    /// Update the rendered content. Returns `true` when the scroll offset was reset.
    pub fn set_content(&mut self, item_count: usize, has_recommendations: bool, generation: u64) -> bool {
        self.item_count = item_count;
        self.has_recommendations = has_recommendations;
        if generation != self.generation {
            self.generation = generation;
            let moved = self.scroll_top != 0;
            self.scroll_top = 0;
            return moved;
        }
        self.clamp_scroll();
        false
    }

    pub fn scroll_to(&mut self, offset: u32) {
        self.scroll_top = offset;
        self.clamp_scroll();
    }

    /// Apply a new container size, keeping the first visible product in view
    /// when the column count changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        let before = self.layout();
        let top_row = before.row_at_offset(self.scroll_top);
        let anchor = (top_row != HEADER_ROW && before.item_count() > 0)
            .then(|| (top_row - 1) * before.columns());

        self.width = width;
        self.height = height.max(1);

        let after = self.layout();
        if let Some(item) = anchor
            && after.columns() != before.columns()
        {
            self.scroll_top = after.row_offset(after.row_of_item(item));
        }
        self.clamp_scroll();
    }

    #[must_use]
    pub fn window(&self) -> ViewportWindow {
        let layout = self.layout();
        let rows = layout.visible_rows(self.scroll_top, self.height, self.config.overscan_rows);
        ViewportWindow {
            offset: layout.row_offset(rows.start),
            total_height: layout.total_height(),
            rows,
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self.layout().max_scroll(self.height);
        self.scroll_top = self.scroll_top.min(max);
    }
}
