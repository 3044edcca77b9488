//! Common test utilities for building grids and driving frames.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridcanvas::render::RecordingSurface;
use gridcanvas::{FrameOutcome, GridData, GridView};

/// Grid whose cells hold `row * cols + col`.
#[must_use]
pub fn numbered_grid(rows: u32, cols: u32) -> GridData {
    GridData::new(
        (0..rows)
            .map(|r| (0..cols).map(|c| (r * cols + c).to_string()).collect())
            .collect(),
    )
}

/// View over a numbered grid with one column per width.
#[must_use]
pub fn view_with(rows: u32, widths: &[f32], frozen: u32) -> GridView {
    let cols = u32::try_from(widths.len()).unwrap();
    let mut view = GridView::new();
    view.set_data(numbered_grid(rows, cols));
    view.set_column_widths(widths.to_vec());
    view.set_frozen_column_count(frozen);
    view
}

/// Tick once and return the outcome together with the commands it produced.
pub fn tick(view: &mut GridView, surface: &mut RecordingSurface) -> FrameOutcome {
    surface.take_commands();
    view.tick(surface)
}

/// Texts drawn by the last tick, without positions.
#[must_use]
pub fn drawn_texts(surface: &RecordingSurface) -> Vec<String> {
    surface.texts().into_iter().map(|(text, _, _)| text).collect()
}
