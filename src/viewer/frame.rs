//! Per-frame render scheduling with change detection.
//!
//! Each tick recomputes geometry from the current view-state, then compares
//! a snapshot of everything that affects pixels against the last painted
//! one. Identical frames are skipped without touching the surface.

use super::GridView;
use crate::layout::VisibleWindow;
use crate::render::{paint_cells, paint_frozen_columns, DrawSurface, PaintParams};
use crate::types::{CellCoord, GridRegion, Selection};

/// Result of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The surface was cleared and repainted
    Painted { cells: usize },
    /// Nothing visible changed since the last painted frame
    Skipped,
}

impl FrameOutcome {
    pub fn painted(self) -> bool {
        matches!(self, Self::Painted { .. })
    }
}

/// Everything a frame's pixels depend on besides the layout inputs.
///
/// Column widths and configuration are not captured; changing them
/// invalidates the scheduler instead.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    active_cell: Option<CellCoord>,
    scroll: (u32, u32),
    selection: Selection,
    frozen_cols: u32,
    surface: (u32, u32),
    visible: Vec<Vec<String>>,
    frozen: Vec<Vec<String>>,
}

/// Inputs compared by a snapshot, borrowed from the live view.
struct FrameInputs<'a> {
    active_cell: Option<CellCoord>,
    scroll: (f32, f32),
    selection: &'a Selection,
    frozen_cols: u32,
    surface: (u32, u32),
    visible: GridRegion<'a>,
    frozen: GridRegion<'a>,
}

fn scroll_bits(scroll: (f32, f32)) -> (u32, u32) {
    (scroll.0.to_bits(), scroll.1.to_bits())
}

fn region_matches(stored: &[Vec<String>], region: &GridRegion<'_>) -> bool {
    stored.len() == region.row_count()
        && stored
            .iter()
            .zip(region.iter_rows())
            .all(|(kept, live)| kept.as_slice() == live)
}

impl FrameSnapshot {
    fn capture(inputs: &FrameInputs<'_>) -> Self {
        Self {
            active_cell: inputs.active_cell,
            scroll: scroll_bits(inputs.scroll),
            selection: inputs.selection.clone(),
            frozen_cols: inputs.frozen_cols,
            surface: inputs.surface,
            visible: inputs.visible.to_rows(),
            frozen: inputs.frozen.to_rows(),
        }
    }

    /// Compare against live inputs without copying them.
    fn matches(&self, inputs: &FrameInputs<'_>) -> bool {
        self.active_cell == inputs.active_cell
            && self.scroll == scroll_bits(inputs.scroll)
            && self.frozen_cols == inputs.frozen_cols
            && self.surface == inputs.surface
            && self.selection == *inputs.selection
            && region_matches(&self.visible, &inputs.visible)
            && region_matches(&self.frozen, &inputs.frozen)
    }

    pub fn active_cell(&self) -> Option<CellCoord> {
        self.active_cell
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn frozen_column_count(&self) -> u32 {
        self.frozen_cols
    }

    /// Visible movable cells as they were painted.
    pub fn visible_rows(&self) -> &[Vec<String>] {
        &self.visible
    }
}

/// Decides per tick whether to repaint.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    last: Option<FrameSnapshot>,
    forced: bool,
    frames_painted: u64,
    frames_skipped: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next tick to repaint.
    pub fn invalidate(&mut self) {
        self.forced = true;
    }

    pub fn last_snapshot(&self) -> Option<&FrameSnapshot> {
        self.last.as_ref()
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }
}

/// Clamp a window's rows to the data. `None` when no row is visible.
fn visible_row_span(window: VisibleWindow, row_count: u32) -> Option<(u32, u32)> {
    let last = row_count.checked_sub(1)?;
    (window.start_row <= last).then(|| (window.start_row, window.end_row.min(last)))
}

impl GridView {
    /// Run one frame: clamp scrolling, resolve the visible window, and
    /// repaint `surface` if anything visible changed.
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> FrameOutcome {
        let surface_size = (surface.width(), surface.height());
        self.viewport
            .resize(surface_size.0 as f32, surface_size.1 as f32);

        let layout = self.layout();
        self.viewport.clamp_scroll(&layout);
        let window = self.viewport.visible_window(&layout);
        self.origin = self.viewport.frame_origin(&layout, window);

        let frozen_cols = layout.frozen_cols;
        let rows = visible_row_span(window, layout.row_count);
        let (visible, frozen) = match rows {
            Some((first, last)) => (
                self.data
                    .region(first, last, window.start_col, window.end_col),
                if frozen_cols > 0 {
                    self.data.region(first, last, 0, frozen_cols - 1)
                } else {
                    GridRegion::empty()
                },
            ),
            None => (GridRegion::empty(), GridRegion::empty()),
        };

        let inputs = FrameInputs {
            active_cell: self.active_cell,
            scroll: (self.viewport.scroll_x, self.viewport.scroll_y),
            selection: &self.selection,
            frozen_cols: self.frozen_cols,
            surface: surface_size,
            visible,
            frozen,
        };

        let unchanged = self
            .scheduler
            .last
            .as_ref()
            .is_some_and(|last| last.matches(&inputs));
        if unchanged && !self.scheduler.forced {
            self.scheduler.frames_skipped += 1;
            tracing::trace!("frame skipped");
            return FrameOutcome::Skipped;
        }
        let snapshot = FrameSnapshot::capture(&inputs);

        surface.clear_rect(
            0.0,
            0.0,
            f64::from(surface_size.0),
            f64::from(surface_size.1),
        );

        let start_row = rows.map_or(window.start_row, |(first, _)| first);
        let movable = PaintParams {
            region: visible,
            layout: &layout,
            origin_x: f64::from(self.origin.origin_x),
            origin_y: f64::from(self.origin.origin_y),
            start_col: window.start_col,
            start_row,
            selection: &self.selection,
            active_cell: self.active_cell,
            config: &self.config,
        };
        let mut cells = paint_cells(surface, &movable);

        let pinned = PaintParams {
            region: frozen,
            origin_x: 0.0,
            start_col: 0,
            ..movable
        };
        cells += paint_frozen_columns(surface, &pinned);

        self.scheduler.last = Some(snapshot);
        self.scheduler.forced = false;
        self.scheduler.frames_painted += 1;
        tracing::trace!(
            cells,
            start_col = window.start_col,
            end_col = window.end_col,
            start_row = window.start_row,
            end_row = window.end_row,
            "frame painted"
        );
        FrameOutcome::Painted { cells }
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
    use crate::render::RecordingSurface;
    use crate::types::GridData;

    fn view(rows: u32, cols: u32, width: f32) -> GridView {
        let data = (0..rows)
            .map(|r| (0..cols).map(|c| (r * cols + c).to_string()).collect())
            .collect();
        let mut view = GridView::new();
        view.set_data(GridData::new(data));
        view.set_column_widths(vec![width; cols as usize]);
        view
    }

    #[test]
    fn test_row_span_clamped_to_data() {
        let window = VisibleWindow {
            start_col: 0,
            end_col: 0,
            start_row: 2,
            end_row: 9,
        };
        assert_eq!(visible_row_span(window, 5), Some((2, 4)));
        assert_eq!(visible_row_span(window, 2), None);
        assert_eq!(visible_row_span(window, 0), None);
    }

    #[test]
    fn test_second_identical_tick_is_skipped() {
        let mut view = view(10, 4, 50.0);
        let mut surface = RecordingSurface::new(200, 120);
        assert!(view.tick(&mut surface).painted());
        assert_eq!(view.tick(&mut surface), FrameOutcome::Skipped);
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(view.scheduler().frames_skipped(), 1);
    }

    #[test]
    fn test_invalidate_forces_repaint() {
        let mut view = view(10, 4, 50.0);
        let mut surface = RecordingSurface::new(200, 120);
        view.tick(&mut surface);
        view.invalidate();
        assert!(view.tick(&mut surface).painted());
        assert_eq!(view.tick(&mut surface), FrameOutcome::Skipped);
    }

    #[test]
    fn test_resize_repaints() {
        let mut view = view(10, 4, 50.0);
        let mut surface = RecordingSurface::new(200, 120);
        view.tick(&mut surface);
        surface.resize(150, 120);
        assert!(view.tick(&mut surface).painted());
    }

    #[test]
    fn test_edit_outside_window_does_not_repaint() {
        let mut view = view(50, 4, 50.0);
        let mut surface = RecordingSurface::new(200, 120);
        view.tick(&mut surface);

        let mut rows = view.data().rows().to_vec();
        rows[40][0] = "changed".into();
        view.set_data(GridData::new(rows.clone()));
        assert_eq!(view.tick(&mut surface), FrameOutcome::Skipped);

        rows[1][1] = "changed".into();
        view.set_data(GridData::new(rows));
        assert!(view.tick(&mut surface).painted());
    }

    #[test]
    fn test_empty_grid_paints_nothing() {
        let mut view = GridView::new();
        let mut surface = RecordingSurface::new(200, 120);
        assert_eq!(view.tick(&mut surface), FrameOutcome::Painted { cells: 0 });
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn test_out_of_range_scroll_is_clamped() {
        let mut view = view(10, 4, 50.0);
        let mut surface = RecordingSurface::new(100, 120);
        view.set_scroll_offset(-20.0, 1e6);
        view.tick(&mut surface);
        assert_eq!(view.scroll_offset(), (0.0, 180.0));
    }
}
