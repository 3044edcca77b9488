//! Frozen column compositing.
//!
//! The frozen slice is painted last, over an opaque fill, so it hides
//! whatever the movable region drew beneath it while scrolled.

use super::backend::{DrawSurface, PaintParams};
use super::paint::paint_cells;

/// Fill the frozen pixel span and paint the frozen cells over it.
///
/// `params.origin_x` is expected to be 0: frozen columns never scroll
/// horizontally. Returns the number of cells painted.
pub fn paint_frozen_columns<S: DrawSurface + ?Sized>(surface: &mut S, params: &PaintParams<'_>) -> usize {
    let frozen_width = f64::from(params.layout.frozen_cols_width());
    if params.layout.frozen_cols == 0 || frozen_width <= 0.0 {
        return 0;
    }

    surface.begin_path();
    surface.set_fill_style(&params.config.frozen_background);
    surface.fill_rect(0.0, 0.0, frozen_width, f64::from(surface.height()));

    paint_cells(surface, params)
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
    use crate::config::GridConfig;
    use crate::layout::GridLayout;
    use crate::render::paint::OutlineRect;
    use crate::render::recording::{DrawCommand, RecordingSurface};
    use crate::types::{GridData, Selection};

    #[test]
    fn test_background_precedes_frozen_cells() {
        let data = GridData::new(vec![vec!["x".into(), "y".into()]]);
        let layout = GridLayout::new(&[80.0, 90.0], 1, 1, 30.0);
        let config = GridConfig::default();
        let selection = Selection::default();
        let params = PaintParams {
            region: data.region(0, 0, 0, 0),
            layout: &layout,
            origin_x: 0.0,
            origin_y: 0.0,
            start_col: 0,
            start_row: 0,
            selection: &selection,
            active_cell: None,
            config: &config,
        };

        let mut surface = RecordingSurface::new(200, 120);
        assert_eq!(paint_frozen_columns(&mut surface, &params), 1);

        let fills = surface.fills();
        assert_eq!(fills, vec![(OutlineRect { x: 0.0, y: 0.0, w: 80.0, h: 120.0 }, "#FFFFFF")]);

        // Text is drawn in the text color again, not the background
        let text = surface
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillText { color, .. } => Some(color.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(text, "#000000");
    }

    #[test]
    fn test_no_frozen_columns_paints_nothing() {
        let data = GridData::new(vec![vec!["x".into()]]);
        let layout = GridLayout::new(&[80.0], 1, 0, 30.0);
        let config = GridConfig::default();
        let selection = Selection::default();
        let params = PaintParams {
            region: data.region(0, 0, 0, 0),
            layout: &layout,
            origin_x: 0.0,
            origin_y: 0.0,
            start_col: 0,
            start_row: 0,
            selection: &selection,
            active_cell: None,
            config: &config,
        };
        let mut surface = RecordingSurface::new(200, 120);
        assert_eq!(paint_frozen_columns(&mut surface, &params), 0);
        assert!(surface.commands().is_empty());
    }
}
