//! Pointer handling for `GridView`.
//!
//! The primary button resolves a cell and notifies `cell_clicked`; the
//! secondary button drags the content. The state machine is
//! `Idle -> Dragging` on secondary press and back on secondary release.

use std::cell::RefCell;
use std::rc::Rc;

use super::GridView;
use crate::types::CellCoord;

/// Mouse button as reported by DOM `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Pointer position and scroll offset captured when a drag began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub start_x: f32,
    pub start_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    #[default]
    Idle,
    Dragging(DragState),
}

impl GridView {
    /// Resolve a surface-local point to a cell, if both axes land on one.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<CellCoord> {
        match self.local_point_to_cell(x, y) {
            (Some(col), Some(row)) => Some(CellCoord::new(col, row)),
            _ => None,
        }
    }

    /// Handle a button press at a surface-local point.
    ///
    /// Returns the clicked cell for a primary press that hit one. The caller
    /// is responsible for dispatching it; see [`dispatch_pointer_down`].
    pub fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton) -> Option<CellCoord> {
        match button {
            PointerButton::Primary => {
                let hit = self.hit_test(x, y);
                tracing::debug!(x, y, ?hit, "primary press");
                hit
            }
            PointerButton::Secondary => {
                let (offset_x, offset_y) = self.scroll_offset();
                self.input = InputState::Dragging(DragState {
                    start_x: x,
                    start_y: y,
                    offset_x,
                    offset_y,
                });
                tracing::debug!(x, y, "drag started");
                None
            }
            PointerButton::Other(_) => None,
        }
    }

    /// Handle pointer motion anywhere on the page.
    ///
    /// Returns whether the scroll offset was updated.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.drag_to(x, y)
    }

    /// Handle a button release anywhere on the page.
    pub fn pointer_up(&mut self, button: PointerButton) {
        if button == PointerButton::Secondary && self.is_dragging() {
            self.input = InputState::Idle;
            tracing::debug!("drag ended");
        }
    }

    pub fn input_state(&self) -> InputState {
        self.input
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.input, InputState::Dragging(_))
    }
}

/// Deliver a press to a shared view and notify click listeners.
///
/// The view is released before listeners run, so they may freely read or
/// mutate it (typically to set the active cell).
pub fn dispatch_pointer_down(
    view: &Rc<RefCell<GridView>>,
    x: f32,
    y: f32,
    button: PointerButton,
) -> Option<CellCoord> {
    let (hit, signal) = {
        let mut v = view.borrow_mut();
        let hit = v.pointer_down(x, y, button)?;
        (hit, Rc::clone(v.cell_clicked()))
    };
    signal.dispatch(&hit);
    Some(hit)
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
    use crate::signal::{Propagation, Signal};
    use crate::types::GridData;

    fn view() -> GridView {
        let rows = (0..20)
            .map(|r| (0..5).map(|c| format!("{r}:{c}")).collect())
            .collect();
        let mut view = GridView::new();
        view.set_data(GridData::new(rows));
        view.set_column_widths(vec![100.0; 5]);
        let mut surface = RecordingSurface::new(300, 200);
        view.tick(&mut surface);
        view
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom(1), PointerButton::Other(1));
    }

    #[test]
    fn test_primary_press_hits_cell() {
        let mut view = view();
        let hit = view.pointer_down(150.0, 45.0, PointerButton::Primary);
        assert_eq!(hit, Some(CellCoord::new(1, 1)));
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_primary_press_outside_rows_is_ignored() {
        let mut view = view();
        view.set_data(GridData::new(vec![vec!["only".into()]]));
        let mut surface = RecordingSurface::new(300, 200);
        view.tick(&mut surface);
        assert_eq!(view.pointer_down(10.0, 100.0, PointerButton::Primary), None);
    }

    #[test]
    fn test_secondary_drag_cycle() {
        let mut view = view();
        view.set_scroll_offset(50.0, 40.0);
        assert_eq!(view.pointer_down(100.0, 100.0, PointerButton::Secondary), None);
        assert!(view.is_dragging());

        assert!(view.pointer_move(80.0, 80.0));
        assert_eq!(view.scroll_offset(), (70.0, 60.0));

        // Primary release does not end the drag
        view.pointer_up(PointerButton::Primary);
        assert!(view.is_dragging());

        view.pointer_up(PointerButton::Secondary);
        assert_eq!(view.input_state(), InputState::Idle);
        assert!(!view.pointer_move(0.0, 0.0));
        assert_eq!(view.scroll_offset(), (70.0, 60.0));
    }

    #[test]
    fn test_dispatch_releases_view_before_listeners() {
        let view = Rc::new(RefCell::new(view()));
        let listener = {
            let view = Rc::clone(&view);
            Signal::listener(move |cell: &CellCoord| {
                view.borrow_mut().set_active_cell(Some(*cell));
                Propagation::Continue
            })
        };
        view.borrow().cell_clicked().add(&listener, 0).unwrap();

        let hit = dispatch_pointer_down(&view, 10.0, 10.0, PointerButton::Primary);
        assert_eq!(hit, Some(CellCoord::new(0, 0)));
        assert_eq!(view.borrow().active_cell(), Some(CellCoord::new(0, 0)));
    }
}
