//! Main grid viewer state - the platform-independent core.
//!
//! This module provides `GridView`, which owns:
//! - Grid content, column widths and the frozen column count
//! - Viewport state (scroll offset, surface size)
//! - Selection and active cell
//! - Pointer/drag state and the "cell clicked" signal
//! - The per-frame render scheduler
//!
//! Everything is single-threaded: input handlers and frame ticks each run to
//! completion, and a tick reads the view-state once at its start. On wasm32
//! the `GridCanvas` export wires a `GridView` to a canvas element, DOM
//! events and `requestAnimationFrame`.

mod events;
mod frame;
mod scroll;

#[cfg(target_arch = "wasm32")]
mod animation;
#[cfg(target_arch = "wasm32")]
mod web;

use std::rc::Rc;

use crate::config::GridConfig;
use crate::error::Result;
use crate::layout::{FrameOrigin, GridLayout, Viewport, VisibleWindow};
use crate::signal::Signal;
use crate::types::{CellCoord, GridData, Selection};

pub use events::{dispatch_pointer_down, DragState, InputState, PointerButton};
pub use frame::{FrameOutcome, FrameScheduler, FrameSnapshot};
pub use scroll::{drag_offset, wheel_step};

#[cfg(target_arch = "wasm32")]
pub use web::GridCanvas;

/// The grid viewer core
#[derive(Debug)]
pub struct GridView {
    data: GridData,
    column_widths: Vec<f32>,
    frozen_cols: u32,
    viewport: Viewport,
    selection: Selection,
    active_cell: Option<CellCoord>,
    config: GridConfig,
    input: InputState,
    /// Where the last tick placed the movable window
    origin: FrameOrigin,
    scheduler: FrameScheduler,
    cell_clicked: Rc<Signal<CellCoord>>,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

impl GridView {
    /// Create an empty viewer with the default configuration
    pub fn new() -> Self {
        Self {
            data: GridData::default(),
            column_widths: Vec::new(),
            frozen_cols: 0,
            viewport: Viewport::new(),
            selection: Selection::default(),
            active_cell: None,
            config: GridConfig::default(),
            input: InputState::Idle,
            origin: FrameOrigin::default(),
            scheduler: FrameScheduler::new(),
            cell_clicked: Rc::new(Signal::new()),
        }
    }

    /// Create an empty viewer with a custom configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn with_config(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    // ---------------------------------------------------------------------
    // Host-mutable state
    // ---------------------------------------------------------------------

    /// Replace the grid content.
    pub fn set_data(&mut self, data: GridData) {
        self.data = data;
    }

    pub fn data(&self) -> &GridData {
        &self.data
    }

    /// Replace the column widths, one per column.
    ///
    /// Forces a repaint: widths are not part of the frame snapshot.
    pub fn set_column_widths(&mut self, widths: Vec<f32>) {
        self.column_widths = widths;
        self.invalidate();
    }

    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    /// Pin the first `count` columns. Values past the column count are
    /// clamped when the layout is built.
    pub fn set_frozen_column_count(&mut self, count: u32) {
        self.frozen_cols = count;
    }

    pub fn frozen_column_count(&self) -> u32 {
        self.frozen_cols
    }

    /// Set the scroll offset. Bounds are enforced by the next tick.
    pub fn set_scroll_offset(&mut self, x: f32, y: f32) {
        self.viewport.set_scroll(x, y);
    }

    /// Current scroll offset as `(x, y)`.
    pub fn scroll_offset(&self) -> (f32, f32) {
        (self.viewport.scroll_x, self.viewport.scroll_y)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_active_cell(&mut self, cell: Option<CellCoord>) {
        self.active_cell = cell;
    }

    pub fn active_cell(&self) -> Option<CellCoord> {
        self.active_cell
    }

    /// True iff `(col, row)` appears in the selection.
    pub fn is_cell_selected(&self, col: u32, row: u32) -> bool {
        self.selection.contains(col, row)
    }

    /// True iff `(col, row)` is the active cell.
    pub fn is_cell_active(&self, col: u32, row: u32) -> bool {
        self.active_cell
            .is_some_and(|active| active.col == col && active.row == row)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the configuration and force a repaint.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid; the old one is kept.
    pub fn set_config(&mut self, config: GridConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.invalidate();
        Ok(())
    }

    /// Repaint on the next tick even if the snapshot is unchanged.
    pub fn invalidate(&mut self) {
        self.scheduler.invalidate();
    }

    /// Signal fired with the resolved cell on a valid primary-button press.
    pub fn cell_clicked(&self) -> &Rc<Signal<CellCoord>> {
        &self.cell_clicked
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    /// Layout for the current content, widths and frozen count.
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(
            &self.column_widths,
            self.data.row_count(),
            self.frozen_cols,
            self.config.row_height,
        )
    }

    /// Visible movable window as computed by the last tick.
    pub fn visible_window(&self) -> VisibleWindow {
        self.origin.window
    }

    /// Window and pixel origin used by the last tick.
    pub fn frame_origin(&self) -> FrameOrigin {
        self.origin
    }

    /// Resolve a surface-local point against the last painted frame.
    pub fn local_point_to_cell(&self, x: f32, y: f32) -> (Option<u32>, Option<u32>) {
        self.layout().local_point_to_cell(x, y, &self.origin)
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }
}
