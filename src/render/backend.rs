//! Drawing surface trait for pluggable rendering targets.
//!
//! This module defines the `DrawSurface` trait that abstracts the handful of
//! 2D operations the paint engine needs, allowing the browser canvas and the
//! in-memory recording surface to be used interchangeably.

use crate::config::GridConfig;
use crate::layout::GridLayout;
use crate::types::{CellCoord, GridRegion, Selection};

/// Rectangular pixel surface with Canvas 2D style path semantics.
///
/// `rect` accumulates into the current path; `stroke` strokes the whole
/// path with the current stroke style and line width; `begin_path` starts a
/// new empty path.
pub trait DrawSurface {
    /// Current surface width in pixels
    fn width(&self) -> u32;

    /// Current surface height in pixels
    fn height(&self) -> u32;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn set_fill_style(&mut self, color: &str);

    fn set_stroke_style(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    fn set_font(&mut self, font: &str);
}

/// Paint parameters for one region of cells.
pub struct PaintParams<'a> {
    /// Cell text for the region, row-major, already sliced to what is visible
    pub region: GridRegion<'a>,
    pub layout: &'a GridLayout,
    /// Surface x of the region's left edge
    pub origin_x: f64,
    /// Surface y of the region's top edge
    pub origin_y: f64,
    /// Logical column of the region's first column
    pub start_col: u32,
    /// Logical row of the region's first row
    pub start_row: u32,
    pub selection: &'a Selection,
    pub active_cell: Option<CellCoord>,
    pub config: &'a GridConfig,
}
