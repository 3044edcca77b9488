//! Property tests for geometry and state invariants.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::view_with;
use gridcanvas::layout::clamp_axis;
use gridcanvas::render::RecordingSurface;
use gridcanvas::{CellCoord, Selection};
use proptest::prelude::*;

fn widths() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec((20u16..200).prop_map(f32::from), 1..16)
}

proptest! {
    #[test]
    fn clamp_is_idempotent_and_in_range(
        offset in -1e5f32..1e5,
        content in 0f32..1e4,
        viewport in 1f32..2e3,
    ) {
        let once = clamp_axis(offset, content, viewport);
        prop_assert_eq!(clamp_axis(once, content, viewport), once);
        prop_assert!(once >= 0.0);
        prop_assert!(once <= (content - viewport).max(0.0));
    }

    #[test]
    fn tick_leaves_scroll_in_bounds(
        widths in widths(),
        rows in 0u32..80,
        scroll_x in -5e3f32..5e3,
        scroll_y in -5e3f32..5e3,
    ) {
        let mut view = view_with(rows, &widths, 0);
        let mut surface = RecordingSurface::new(400, 300);
        view.set_scroll_offset(scroll_x, scroll_y);
        view.tick(&mut surface);

        let layout = view.layout();
        let (max_x, max_y) = view.viewport().max_scroll(&layout);
        let (x, y) = view.scroll_offset();
        prop_assert!((0.0..=max_x).contains(&x));
        prop_assert!((0.0..=max_y).contains(&y));
    }

    #[test]
    fn cell_centres_hit_their_cell(
        widths in widths(),
        rows in 1u32..80,
        frozen_seed in 0u32..4,
        scroll_x in 0f32..3e3,
        scroll_y in 0f32..3e3,
    ) {
        let frozen = frozen_seed.min(u32::try_from(widths.len()).unwrap());
        let mut view = view_with(rows, &widths, frozen);
        let mut surface = RecordingSurface::new(400, 300);
        view.set_scroll_offset(scroll_x, scroll_y);
        view.tick(&mut surface);

        let layout = view.layout();
        let origin = view.frame_origin();
        let window = origin.window;
        let frozen_width = layout.frozen_cols_width();
        let last_col = window.end_col.min(layout.col_count() - 1);
        let last_row = window.end_row.min(rows - 1);
        let start_left = layout.col_left(window.start_col);
        let row_centre = |row: u32| {
            origin.origin_y + (row - window.start_row) as f32 * layout.row_height + layout.row_height / 2.0
        };

        for row in window.start_row..=last_row {
            let y = row_centre(row);
            for col in window.start_col..=last_col {
                let x = origin.origin_x + (layout.col_left(col) - start_left) + layout.col_width(col).unwrap() / 2.0;
                // Pinned columns cover this part of the movable region
                if frozen > 0 && x <= frozen_width {
                    continue;
                }
                prop_assert_eq!(view.hit_test(x, y), Some(CellCoord::new(col, row)));
            }
            for col in 0..frozen {
                let x = layout.col_left(col) + layout.col_width(col).unwrap() / 2.0;
                prop_assert_eq!(view.hit_test(x, y), Some(CellCoord::new(col, row)));
            }
        }
    }

    #[test]
    fn frozen_span_always_resolves_to_frozen_column(
        widths in widths(),
        frozen_seed in 1u32..16,
        scroll_x in 0f32..3e3,
        fraction in 0f32..=1.0,
    ) {
        let col_count = u32::try_from(widths.len()).unwrap();
        let frozen = 1 + frozen_seed % col_count;
        let mut view = view_with(10, &widths, frozen);
        let mut surface = RecordingSurface::new(400, 300);
        view.set_scroll_offset(scroll_x, 0.0);
        view.tick(&mut surface);

        let frozen_width = view.layout().frozen_cols_width();
        let (col, _) = view.local_point_to_cell(frozen_width * fraction, 5.0);
        prop_assert!(col.is_some_and(|c| c < frozen));
    }

    #[test]
    fn selection_membership_matches_input(
        pairs in prop::collection::vec((0u32..30, 0u32..30), 0..20),
        query in (0u32..30, 0u32..30),
    ) {
        let flat: Vec<u32> = pairs.iter().flat_map(|&(c, r)| [c, r]).collect();
        let selection = Selection::from_flat(&flat);
        prop_assert_eq!(selection.contains(query.0, query.1), pairs.contains(&query));
        prop_assert_eq!(selection.to_flat(), flat);
    }
}
