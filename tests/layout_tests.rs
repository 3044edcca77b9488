//! Geometry resolver tests
//!
//! Column edges, visible window selection, frame origin and hit-testing
//! against the frozen and movable regions.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridcanvas::layout::{GridLayout, Viewport, VisibleWindow};
use test_case::test_case;

const WIDTHS: [f32; 5] = [80.0, 90.0, 100.0, 110.0, 120.0];

fn layout(frozen: u32) -> GridLayout {
    GridLayout::new(&WIDTHS, 20, frozen, 30.0)
}

fn viewport(scroll_x: f32, scroll_y: f32) -> Viewport {
    let mut viewport = Viewport::with_size(300.0, 200.0);
    viewport.set_scroll(scroll_x, scroll_y);
    viewport
}

#[test]
fn test_column_edges_accumulate() {
    let layout = layout(0);
    assert_eq!(layout.col_positions, vec![0.0, 80.0, 170.0, 270.0, 380.0, 500.0]);
    assert_eq!(layout.total_width(), 500.0);
    assert_eq!(layout.total_height(), 600.0);
}

#[test]
fn test_frozen_width_is_prefix_sum() {
    assert_eq!(layout(0).frozen_cols_width(), 0.0);
    assert_eq!(layout(2).frozen_cols_width(), 170.0);
    // Frozen count past the column count is clamped
    assert_eq!(GridLayout::new(&WIDTHS, 20, 9, 30.0).frozen_cols, 5);
}

#[test_case(0.0, 0, 2 ; "at origin")]
#[test_case(99.0, 0, 3 ; "first column partially visible")]
#[test_case(100.0, 0, 3 ; "right edge touching the view box keeps the column")]
#[test_case(101.0, 1, 4 ; "first column scrolled out")]
#[test_case(200.0, 1, 4 ; "scrolled to the end")]
fn test_visible_cols_without_frozen(scroll_x: f32, start: u32, end: u32) {
    let layout = GridLayout::new(&[100.0; 5], 20, 0, 30.0);
    assert_eq!(viewport(scroll_x, 0.0).visible_cols(&layout), (start, end));
}

#[test]
fn test_visible_cols_with_frozen_shrinks_view_box() {
    let layout = layout(2);
    let viewport = viewport(0.0, 0.0);
    let view_box = viewport.view_box(&layout);
    assert_eq!(view_box.end_x, 130.0);
    assert_eq!(viewport.visible_cols(&layout), (2, 3));
}

#[test]
fn test_visible_cols_start_after_frozen_when_scrolled() {
    let layout = layout(2);
    assert_eq!(viewport(150.0, 0.0).visible_cols(&layout), (3, 4));
}

#[test]
fn test_narrow_columns_scenario() {
    // Frozen first column, movable widths 90 and 100 on a 200px surface
    let layout = GridLayout::new(&[80.0, 90.0, 100.0], 10, 1, 30.0);
    let viewport = Viewport::with_size(200.0, 300.0);
    assert_eq!(viewport.visible_cols(&layout), (1, 2));
}

#[test_case(0.0, 0, 6 ; "top")]
#[test_case(45.0, 1, 8 ; "mid row offset")]
#[test_case(400.0, 13, 20 ; "bottom, end unclamped")]
fn test_visible_rows(scroll_y: f32, start: u32, end: u32) {
    assert_eq!(viewport(0.0, scroll_y).visible_rows(&layout(0)), (start, end));
}

#[test]
fn test_frame_origin_tracks_scroll() {
    let layout = layout(2);
    let viewport = viewport(150.0, 45.0);
    let origin = viewport.frame_origin(&layout, viewport.visible_window(&layout));
    assert_eq!(origin.window.start_col, 3);
    assert_eq!(origin.window.start_row, 1);
    // col_left(3) = 270, minus the scroll
    assert_eq!(origin.origin_x, 120.0);
    assert_eq!(origin.origin_y, -15.0);
}

#[test]
fn test_frozen_hit_ignores_horizontal_scroll() {
    let layout = layout(2);
    for scroll_x in [0.0, 75.0, 200.0] {
        let viewport = viewport(scroll_x, 0.0);
        let origin = viewport.frame_origin(&layout, viewport.visible_window(&layout));
        assert_eq!(layout.col_at(10.0, &origin), Some(0));
        assert_eq!(layout.col_at(100.0, &origin), Some(1));
        // Right edge of the frozen span is inclusive
        assert_eq!(layout.col_at(170.0, &origin), Some(1));
    }
}

#[test]
fn test_movable_hit_uses_scrolled_origin() {
    let layout = layout(2);
    let viewport = viewport(150.0, 0.0);
    let origin = viewport.frame_origin(&layout, viewport.visible_window(&layout));
    // Column 3 spans 120..230 on the surface, column 4 spans 230..350
    assert_eq!(layout.col_at(200.0, &origin), Some(3));
    assert_eq!(layout.col_at(240.0, &origin), Some(4));
    assert_eq!(layout.col_at(360.0, &origin), None);
}

#[test]
fn test_row_hit_with_partial_top_row() {
    let layout = layout(0);
    let viewport = viewport(0.0, 45.0);
    let origin = viewport.frame_origin(&layout, viewport.visible_window(&layout));
    assert_eq!(layout.row_at(0.0, &origin), Some(1));
    assert_eq!(layout.row_at(14.0, &origin), Some(1));
    assert_eq!(layout.row_at(15.0, &origin), Some(2));
}

#[test]
fn test_row_hit_past_last_row_is_none() {
    let layout = GridLayout::new(&WIDTHS, 3, 0, 30.0);
    let origin = Viewport::with_size(300.0, 200.0).frame_origin(
        &layout,
        VisibleWindow {
            start_col: 0,
            end_col: 2,
            start_row: 0,
            end_row: 6,
        },
    );
    assert_eq!(layout.row_at(89.0, &origin), Some(2));
    assert_eq!(layout.row_at(90.0, &origin), None);
    assert_eq!(layout.local_point_to_cell(10.0, 120.0, &origin), (Some(0), None));
}

#[test]
fn test_degenerate_widths_are_flattened() {
    let layout = GridLayout::new(&[f32::NAN, -5.0, 40.0], 1, 0, 30.0);
    assert_eq!(layout.col_widths, vec![0.0, 0.0, 40.0]);
    assert_eq!(layout.total_width(), 40.0);
}
