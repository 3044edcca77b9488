//! Viewport state management for scrolling.

use super::GridLayout;

/// Viewport state - the visible pixel window over the grid.
///
/// The scroll offset is measured over the movable columns only: at
/// `scroll_x == 0` the first non-frozen column sits flush against the
/// frozen region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll offset in pixels
    pub scroll_x: f32,
    /// Vertical scroll offset in pixels
    pub scroll_y: f32,
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
}

/// Pixel bounds of the movable region in scroll space.
///
/// These coordinates are NOT shifted by the frozen columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

/// Inclusive logical bounds of the visible movable cells.
///
/// Row bounds are not clamped against the row count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start_col: u32,
    pub end_col: u32,
    pub start_row: u32,
    pub end_row: u32,
}

/// Where a frame placed its visible window on the surface.
///
/// Hit-testing between frames resolves against this, so a click always maps
/// onto what was last painted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOrigin {
    pub window: VisibleWindow,
    /// Surface x of `window.start_col`'s left edge
    pub origin_x: f32,
    /// Surface y of `window.start_row`'s top edge
    pub origin_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp one axis of the scroll offset to `[0, max(0, content - viewport)]`.
///
/// NaN offsets collapse to 0.
pub fn clamp_axis(offset: f32, content_extent: f32, viewport_extent: f32) -> f32 {
    let max = (content_extent - viewport_extent).max(0.0);
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max)
}

impl Viewport {
    /// Create a new viewport with default values
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    /// Create a viewport of the given surface size, scrolled to the origin
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::new()
        }
    }

    /// Largest valid scroll offset on each axis.
    pub fn max_scroll(&self, layout: &GridLayout) -> (f32, f32) {
        (
            (layout.total_width() - self.width).max(0.0),
            (layout.total_height() - self.height).max(0.0),
        )
    }

    /// Clamp scroll position to valid range.
    pub fn clamp_scroll(&mut self, layout: &GridLayout) {
        self.scroll_x = clamp_axis(self.scroll_x, layout.total_width(), self.width);
        self.scroll_y = clamp_axis(self.scroll_y, layout.total_height(), self.height);
    }

    /// Scroll by delta amounts. Bounds are enforced by the next frame.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
    }

    /// Set absolute scroll position. Bounds are enforced by the next frame.
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Bounds of the movable region; the frozen width is taken off the right edge.
    pub fn view_box(&self, layout: &GridLayout) -> ViewBox {
        ViewBox {
            start_x: self.scroll_x,
            start_y: self.scroll_y,
            end_x: self.scroll_x + self.width - layout.frozen_cols_width(),
            end_y: self.scroll_y + self.height,
        }
    }

    /// Get visible movable column range (inclusive).
    ///
    /// Falls back to `frozen_cols` for both ends when no movable column
    /// reaches the left edge, which may point one past the last column.
    pub fn visible_cols(&self, layout: &GridLayout) -> (u32, u32) {
        let view_box = self.view_box(layout);
        let frozen = layout.frozen_cols;
        let col_count = layout.col_count();

        let mut pointer: f32 = 0.0;
        let mut start = frozen;
        let mut end = frozen;

        for col in frozen..col_count {
            pointer += layout.col_width(col).unwrap_or(0.0);
            if pointer >= view_box.start_x {
                start = col;
                end = col;
                break;
            }
        }

        for col in start.saturating_add(1)..col_count {
            pointer += layout.col_width(col).unwrap_or(0.0);
            end = col;
            if pointer >= view_box.end_x {
                break;
            }
        }

        (start, end)
    }

    /// Get visible row range (inclusive), unclamped against the row count.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_rows(&self, layout: &GridLayout) -> (u32, u32) {
        let view_box = self.view_box(layout);
        // Float-to-int casts saturate: negative offsets land on row 0
        let start = (view_box.start_y / layout.row_height).floor() as u32;
        let end = (view_box.end_y / layout.row_height).floor() as u32;
        (start, end)
    }

    /// Visible movable window for the current scroll offset.
    pub fn visible_window(&self, layout: &GridLayout) -> VisibleWindow {
        let (start_col, end_col) = self.visible_cols(layout);
        let (start_row, end_row) = self.visible_rows(layout);
        VisibleWindow {
            start_col,
            end_col,
            start_row,
            end_row,
        }
    }

    /// Surface position of `window`'s top-left cell.
    ///
    /// The x origin sits right of the frozen columns, shifted left by the
    /// scroll offset; frozen columns themselves always paint from x = 0.
    pub fn frame_origin(&self, layout: &GridLayout, window: VisibleWindow) -> FrameOrigin {
        FrameOrigin {
            window,
            origin_x: layout.col_left(window.start_col) - self.scroll_x,
            origin_y: layout.row_height * window.start_row as f32 - self.scroll_y,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_axis() {
        assert_eq!(clamp_axis(-10.0, 500.0, 200.0), 0.0);
        assert_eq!(clamp_axis(400.0, 500.0, 200.0), 300.0);
        assert_eq!(clamp_axis(120.0, 500.0, 200.0), 120.0);
        // Content smaller than the viewport pins to 0
        assert_eq!(clamp_axis(50.0, 100.0, 200.0), 0.0);
        assert_eq!(clamp_axis(f32::NAN, 500.0, 200.0), 0.0);
        assert_eq!(clamp_axis(f32::INFINITY, 500.0, 200.0), 300.0);
    }

    #[test]
    fn test_visible_cols_excludes_frozen() {
        let layout = GridLayout::new(&[80.0, 90.0, 100.0], 10, 1, 30.0);
        let viewport = Viewport::with_size(200.0, 100.0);
        assert_eq!(viewport.visible_cols(&layout), (1, 2));
    }

    #[test]
    fn test_visible_cols_scrolled() {
        let layout = GridLayout::new(&[50.0; 20], 10, 0, 30.0);
        let mut viewport = Viewport::with_size(200.0, 100.0);
        viewport.scroll_x = 120.0;
        // Column 2 spans 100..150 and is the first to reach 120
        assert_eq!(viewport.visible_cols(&layout), (2, 6));
    }

    #[test]
    fn test_visible_cols_all_frozen() {
        let layout = GridLayout::new(&[80.0, 90.0], 10, 2, 30.0);
        let viewport = Viewport::with_size(200.0, 100.0);
        assert_eq!(viewport.visible_cols(&layout), (2, 2));
    }

    #[test]
    fn test_visible_rows() {
        let layout = GridLayout::new(&[80.0], 100, 0, 30.0);
        let mut viewport = Viewport::with_size(200.0, 100.0);
        assert_eq!(viewport.visible_rows(&layout), (0, 3));
        viewport.scroll_y = 75.0;
        assert_eq!(viewport.visible_rows(&layout), (2, 5));
    }

    #[test]
    fn test_frame_origin() {
        let layout = GridLayout::new(&[50.0; 20], 100, 2, 30.0);
        let mut viewport = Viewport::with_size(300.0, 100.0);
        viewport.scroll_x = 70.0;
        viewport.scroll_y = 45.0;
        let window = viewport.visible_window(&layout);
        assert_eq!(window.start_col, 3);
        assert_eq!(window.start_row, 1);
        let origin = viewport.frame_origin(&layout, window);
        // Frozen 100px + column 2 (50px) skipped - 70px scroll
        assert_eq!(origin.origin_x, 150.0 - 70.0);
        assert_eq!(origin.origin_y, 30.0 - 45.0);
    }
}
