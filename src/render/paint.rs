//! Cell painting: text, border grid, selection and active-cell outlines.
//!
//! Outlines are collected while the base grid is laid down and stroked in a
//! second pass, so no later grid line can cover them.

use super::backend::{DrawSurface, PaintParams};

/// Pixel rectangle of a single cell outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Deferred outline draw lists for one painted region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    pub selection: Vec<OutlineRect>,
    pub active: Option<OutlineRect>,
}

/// Walk the region's cells, yielding logical position, pixel rect and text.
///
/// A row stops at the first column that has no width.
fn cells<'p>(
    params: &'p PaintParams<'_>,
) -> impl Iterator<Item = (u32, u32, OutlineRect, &'p str)> + 'p {
    let row_height = f64::from(params.layout.row_height);
    params
        .region
        .iter_rows()
        .zip(params.start_row..)
        .enumerate()
        .flat_map(move |(i, (row_cells, row))| {
            let y = params.origin_y + row_height * i as f64;
            let mut x = params.origin_x;
            row_cells
                .iter()
                .zip(params.start_col..)
                .map_while(move |(text, col)| {
                    let w = f64::from(params.layout.col_width(col)?);
                    let rect = OutlineRect {
                        x,
                        y,
                        w,
                        h: row_height,
                    };
                    x += w;
                    Some((col, row, rect, text.as_str()))
                })
        })
}

/// Compute outline rectangles without painting anything.
pub fn overlay_rects(params: &PaintParams<'_>) -> Overlays {
    let mut overlays = Overlays::default();
    for (col, row, rect, _) in cells(params) {
        collect_overlay(&mut overlays, params, col, row, rect);
    }
    overlays
}

fn collect_overlay(overlays: &mut Overlays, params: &PaintParams<'_>, col: u32, row: u32, rect: OutlineRect) {
    if params.selection.contains(col, row) {
        overlays.selection.push(rect);
    }
    if params
        .active_cell
        .is_some_and(|active| active.col == col && active.row == row)
    {
        overlays.active = Some(rect);
    }
}

/// Paint a region of cells and its outlines.
///
/// Returns the number of cells painted.
pub fn paint_cells<S: DrawSurface + ?Sized>(surface: &mut S, params: &PaintParams<'_>) -> usize {
    let config = params.config;
    let padding = f64::from(config.padding());
    let row_height = f64::from(params.layout.row_height);

    surface.set_fill_style(&config.text_color);
    surface.begin_path();
    surface.set_stroke_style(&config.border_color);
    surface.set_line_width(config.border_width);

    let mut overlays = Overlays::default();
    let mut painted = 0;

    for (col, row, rect, text) in cells(params) {
        surface.fill_text(text, rect.x + padding, rect.y + row_height - padding);
        surface.rect(rect.x, rect.y, rect.w, rect.h);
        collect_overlay(&mut overlays, params, col, row, rect);
        painted += 1;
    }

    surface.stroke();

    // Selection outlines share one path
    surface.begin_path();
    surface.set_line_width(config.overlay_width);
    surface.set_stroke_style(&config.selection_color);
    for rect in &overlays.selection {
        surface.rect(rect.x, rect.y, rect.w, rect.h);
    }
    surface.stroke();

    if let Some(rect) = overlays.active {
        surface.begin_path();
        surface.set_line_width(config.overlay_width);
        surface.set_stroke_style(&config.active_color);
        surface.rect(rect.x, rect.y, rect.w, rect.h);
        surface.stroke();
    }

    painted
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
    use crate::render::recording::{DrawCommand, RecordingSurface};
    use crate::types::{CellCoord, GridData, Selection};

    fn data() -> GridData {
        GridData::new(vec![
            vec!["a".into(), "b".into(), "c".into()],
            vec!["d".into(), "e".into(), "f".into()],
        ])
    }

    #[test]
    fn test_cell_text_and_borders() {
        let data = data();
        let layout = GridLayout::new(&[80.0, 90.0, 100.0], 2, 0, 30.0);
        let config = GridConfig::default();
        let selection = Selection::default();
        let params = PaintParams {
            region: data.region(0, 1, 0, 2),
            layout: &layout,
            origin_x: 0.0,
            origin_y: 0.0,
            start_col: 0,
            start_row: 0,
            selection: &selection,
            active_cell: None,
            config: &config,
        };

        let mut surface = RecordingSurface::new(300, 100);
        assert_eq!(paint_cells(&mut surface, &params), 6);

        let texts = surface.texts();
        assert_eq!(texts.len(), 6);
        assert_eq!(texts[0], ("a".to_string(), 10.0, 20.0));
        assert_eq!(texts[4], ("e".to_string(), 90.0, 50.0));

        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 2, "grid + (empty) selection pass");
        assert_eq!(strokes[0].rects.len(), 6);
        assert_eq!(strokes[0].width, 2.0);
        assert!(strokes[1].rects.is_empty());
    }

    #[test]
    fn test_outlines_use_logical_coordinates() {
        let data = data();
        let layout = GridLayout::new(&[80.0, 90.0, 100.0], 2, 0, 30.0);
        let config = GridConfig::default();
        let selection = Selection::from_flat(&[2, 1, 1, 0, 9, 9]);
        // Region starts at logical (1, 0)
        let params = PaintParams {
            region: data.region(0, 1, 1, 2),
            layout: &layout,
            origin_x: 5.0,
            origin_y: -10.0,
            start_col: 1,
            start_row: 0,
            selection: &selection,
            active_cell: Some(CellCoord::new(2, 0)),
            config: &config,
        };

        let overlays = overlay_rects(&params);
        assert_eq!(
            overlays.selection,
            vec![
                OutlineRect { x: 5.0, y: -10.0, w: 90.0, h: 30.0 },
                OutlineRect { x: 95.0, y: 20.0, w: 100.0, h: 30.0 },
            ]
        );
        assert_eq!(overlays.active, Some(OutlineRect { x: 95.0, y: -10.0, w: 100.0, h: 30.0 }));
    }

    #[test]
    fn test_outlines_stroked_after_grid() {
        let data = data();
        let layout = GridLayout::new(&[80.0, 90.0, 100.0], 2, 0, 30.0);
        let config = GridConfig::default();
        let selection = Selection::from_flat(&[0, 0, 1, 1]);
        let params = PaintParams {
            region: data.region(0, 1, 0, 2),
            layout: &layout,
            origin_x: 0.0,
            origin_y: 0.0,
            start_col: 0,
            start_row: 0,
            selection: &selection,
            active_cell: Some(CellCoord::new(2, 1)),
            config: &config,
        };

        let mut surface = RecordingSurface::new(300, 100);
        paint_cells(&mut surface, &params);

        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[1].color, "#0000FF");
        assert_eq!(strokes[1].width, 3.0);
        assert_eq!(strokes[1].rects.len(), 2);
        assert_eq!(strokes[2].color, "#00FF00");
        assert_eq!(strokes[2].rects.len(), 1);

        let last_text = surface
            .commands()
            .iter()
            .rposition(|c| matches!(c, DrawCommand::FillText { .. }))
            .unwrap();
        let first_overlay = surface
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::Stroke { color, .. } if color == "#0000FF"))
            .unwrap();
        assert!(last_text < first_overlay);
    }

    #[test]
    fn test_missing_width_stops_row() {
        let data = data();
        // Only two widths for three columns of data
        let layout = GridLayout::new(&[80.0, 90.0], 2, 0, 30.0);
        let config = GridConfig::default();
        let selection = Selection::default();
        let params = PaintParams {
            region: data.region(0, 1, 0, 2),
            layout: &layout,
            origin_x: 0.0,
            origin_y: 0.0,
            start_col: 0,
            start_row: 0,
            selection: &selection,
            active_cell: None,
            config: &config,
        };
        let mut surface = RecordingSurface::new(300, 100);
        assert_eq!(paint_cells(&mut surface, &params), 4);
    }
}
