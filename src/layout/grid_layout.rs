//! Pre-computed layout data for a grid.
//!
//! Column edges are accumulated once per frame from the host's widths; rows
//! share a single fixed height so their positions are pure arithmetic.

use super::FrameOrigin;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 30.0;

/// Pre-computed layout data for a grid
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Cumulative column positions (`col_positions[i]` = x of column i's left edge)
    pub col_positions: Vec<f32>,
    /// Column widths, with non-finite or negative host values flattened to 0
    pub col_widths: Vec<f32>,
    /// Height shared by every row
    pub row_height: f32,
    /// Number of rows in the grid content
    pub row_count: u32,
    /// Number of frozen leading columns, never more than the column count
    pub frozen_cols: u32,
}

impl GridLayout {
    /// Create a layout from column widths and the grid's row count.
    pub fn new(col_widths: &[f32], row_count: u32, frozen_cols: u32, row_height: f32) -> Self {
        let col_widths: Vec<f32> = col_widths
            .iter()
            .map(|&w| if w.is_finite() { w.max(0.0) } else { 0.0 })
            .collect();

        let mut col_positions = Vec::with_capacity(col_widths.len() + 1);
        let mut x: f32 = 0.0;
        for w in &col_widths {
            col_positions.push(x);
            x += w;
        }
        col_positions.push(x); // Final edge

        let col_count = u32::try_from(col_widths.len()).unwrap_or(u32::MAX);
        let row_height = if row_height.is_finite() && row_height > 0.0 {
            row_height
        } else {
            DEFAULT_ROW_HEIGHT
        };

        GridLayout {
            col_positions,
            col_widths,
            row_height,
            row_count,
            frozen_cols: frozen_cols.min(col_count),
        }
    }

    /// Number of columns
    pub fn col_count(&self) -> u32 {
        u32::try_from(self.col_widths.len()).unwrap_or(u32::MAX)
    }

    /// Get column width at index
    pub fn col_width(&self, col: u32) -> Option<f32> {
        self.col_widths.get(col as usize).copied()
    }

    /// Left edge of a column in content coordinates
    pub fn col_left(&self, col: u32) -> f32 {
        self.col_positions
            .get(col as usize)
            .or_else(|| self.col_positions.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Get the total width of frozen columns (returns 0 if no frozen columns)
    pub fn frozen_cols_width(&self) -> f32 {
        if self.frozen_cols == 0 {
            return 0.0;
        }
        self.col_left(self.frozen_cols)
    }

    /// Get total width of all columns
    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }

    /// Get total height of all rows
    pub fn total_height(&self) -> f32 {
        self.row_height * self.row_count as f32
    }

    /// Resolve a surface-local point to `(column, row)`.
    ///
    /// Each axis is resolved independently and is `None` when the point lies
    /// outside the content. `origin` is where the last frame placed the
    /// movable window.
    pub fn local_point_to_cell(&self, x: f32, y: f32, origin: &FrameOrigin) -> (Option<u32>, Option<u32>) {
        (self.col_at(x, origin), self.row_at(y, origin))
    }

    /// Column under surface-local `x`.
    ///
    /// Points inside the frozen span always resolve against the frozen
    /// columns, whatever the horizontal scroll.
    pub fn col_at(&self, x: f32, origin: &FrameOrigin) -> Option<u32> {
        if !x.is_finite() {
            return None;
        }

        let (start, end, mut left) = if self.frozen_cols > 0 && x <= self.frozen_cols_width() {
            (0, self.frozen_cols - 1, 0.0)
        } else {
            (origin.window.start_col, origin.window.end_col, origin.origin_x)
        };

        for col in start..=end {
            let right = left + self.col_width(col)?;
            if left <= x && x <= right {
                return Some(col);
            }
            left = right;
        }
        None
    }

    /// Row under surface-local `y`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row_at(&self, y: f32, origin: &FrameOrigin) -> Option<u32> {
        let rows_down = ((f64::from(y) - f64::from(origin.origin_y)) / f64::from(self.row_height)).floor();
        if !rows_down.is_finite() || rows_down < 0.0 {
            return None;
        }
        let row = f64::from(origin.window.start_row) + rows_down;
        if row >= f64::from(self.row_count) {
            return None;
        }
        // Bounded by row_count above, so the cast is exact
        Some(row as u32)
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
    use crate::layout::VisibleWindow;

    fn origin(start_col: u32, end_col: u32, start_row: u32, origin_x: f32, origin_y: f32) -> FrameOrigin {
        FrameOrigin {
            window: VisibleWindow {
                start_col,
                end_col,
                start_row,
                end_row: start_row + 10,
            },
            origin_x,
            origin_y,
        }
    }

    #[test]
    fn test_basic_layout() {
        let layout = GridLayout::new(&[80.0, 90.0, 100.0], 10, 0, 30.0);
        assert_eq!(layout.col_positions, vec![0.0, 80.0, 170.0, 270.0]);
        assert_eq!(layout.total_width(), 270.0);
        assert_eq!(layout.total_height(), 300.0);
        assert_eq!(layout.frozen_cols_width(), 0.0);
    }

    #[test]
    fn test_frozen_width() {
        let layout = GridLayout::new(&[80.0, 90.0, 100.0], 10, 2, 30.0);
        assert_eq!(layout.frozen_cols_width(), 170.0);
    }

    #[test]
    fn test_frozen_count_clamped_to_columns() {
        let layout = GridLayout::new(&[80.0, 90.0], 10, 7, 30.0);
        assert_eq!(layout.frozen_cols, 2);
        assert_eq!(layout.frozen_cols_width(), 170.0);
    }

    #[test]
    fn test_bad_widths_flattened() {
        let layout = GridLayout::new(&[f32::NAN, -5.0, 40.0], 1, 0, 30.0);
        assert_eq!(layout.col_widths, vec![0.0, 0.0, 40.0]);
        assert_eq!(layout.total_width(), 40.0);
    }

    #[test]
    fn test_col_at_movable() {
        let layout = GridLayout::new(&[80.0, 90.0, 100.0], 10, 0, 30.0);
        let o = origin(0, 2, 0, 0.0, 0.0);
        assert_eq!(layout.col_at(0.0, &o), Some(0));
        assert_eq!(layout.col_at(79.0, &o), Some(0));
        assert_eq!(layout.col_at(81.0, &o), Some(1));
        assert_eq!(layout.col_at(269.0, &o), Some(2));
        assert_eq!(layout.col_at(271.0, &o), None);
        assert_eq!(layout.col_at(-1.0, &o), None);
    }

    #[test]
    fn test_col_at_frozen_ignores_scroll() {
        let layout = GridLayout::new(&[80.0, 90.0, 100.0, 100.0], 10, 1, 30.0);
        // Movable window scrolled so column 2 starts at the frozen edge
        let o = origin(2, 3, 0, 80.0, 0.0);
        assert_eq!(layout.col_at(40.0, &o), Some(0));
        assert_eq!(layout.col_at(80.0, &o), Some(0));
        assert_eq!(layout.col_at(81.0, &o), Some(2));
    }

    #[test]
    fn test_row_at() {
        let layout = GridLayout::new(&[80.0], 5, 0, 30.0);
        let o = origin(0, 0, 0, 0.0, 0.0);
        assert_eq!(layout.row_at(0.0, &o), Some(0));
        assert_eq!(layout.row_at(29.9, &o), Some(0));
        assert_eq!(layout.row_at(30.0, &o), Some(1));
        assert_eq!(layout.row_at(149.0, &o), Some(4));
        assert_eq!(layout.row_at(150.0, &o), None);
        assert_eq!(layout.row_at(-1.0, &o), None);
        assert_eq!(layout.row_at(f32::NAN, &o), None);
    }

    #[test]
    fn test_row_at_scrolled() {
        let layout = GridLayout::new(&[80.0], 100, 0, 30.0);
        // scroll_y = 75: row 2 starts at y = -15
        let o = origin(0, 0, 2, 0.0, -15.0);
        assert_eq!(layout.row_at(0.0, &o), Some(2));
        assert_eq!(layout.row_at(15.0, &o), Some(3));
    }
}
