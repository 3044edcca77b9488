//! Input controller tests
//!
//! Primary clicks resolve cells and notify listeners; the secondary button
//! is reserved for dragging and never clicks.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{tick, view_with};
use gridcanvas::render::RecordingSurface;
use gridcanvas::viewer::{dispatch_pointer_down, InputState};
use gridcanvas::{CellCoord, GridView, PointerButton, Propagation, Signal};

fn shared_view(frozen: u32, scroll_x: f32) -> Rc<RefCell<GridView>> {
    let mut view = view_with(20, &[80.0, 90.0, 100.0, 110.0, 120.0], frozen);
    view.set_scroll_offset(scroll_x, 0.0);
    let mut surface = RecordingSurface::new(300, 200);
    tick(&mut view, &mut surface);
    Rc::new(RefCell::new(view))
}

fn record_clicks(view: &Rc<RefCell<GridView>>) -> Rc<RefCell<Vec<CellCoord>>> {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let listener = {
        let clicks = Rc::clone(&clicks);
        Signal::listener(move |cell: &CellCoord| {
            clicks.borrow_mut().push(*cell);
            Propagation::Continue
        })
    };
    view.borrow().cell_clicked().add(&listener, 0).unwrap();
    clicks
}

#[test]
fn test_click_dispatches_cell() {
    let view = shared_view(0, 0.0);
    let clicks = record_clicks(&view);
    dispatch_pointer_down(&view, 100.0, 40.0, PointerButton::Primary);
    assert_eq!(*clicks.borrow(), vec![CellCoord::new(1, 1)]);
}

#[test]
fn test_click_on_frozen_column_while_scrolled() {
    let view = shared_view(2, 150.0);
    let clicks = record_clicks(&view);
    dispatch_pointer_down(&view, 100.0, 10.0, PointerButton::Primary);
    dispatch_pointer_down(&view, 200.0, 10.0, PointerButton::Primary);
    assert_eq!(*clicks.borrow(), vec![CellCoord::new(1, 0), CellCoord::new(3, 0)]);
}

#[test]
fn test_click_outside_content_is_not_dispatched() {
    let view = shared_view(0, 0.0);
    view.borrow_mut().set_data(common::numbered_grid(2, 5));
    let mut surface = RecordingSurface::new(300, 200);
    view.borrow_mut().tick(&mut surface);

    let clicks = record_clicks(&view);
    // Below the last row
    assert_eq!(dispatch_pointer_down(&view, 10.0, 150.0, PointerButton::Primary), None);
    assert!(clicks.borrow().is_empty());
}

#[test]
fn test_secondary_and_other_buttons_never_click() {
    let view = shared_view(0, 0.0);
    let clicks = record_clicks(&view);
    dispatch_pointer_down(&view, 10.0, 10.0, PointerButton::Other(1));
    assert_eq!(view.borrow().input_state(), InputState::Idle);
    dispatch_pointer_down(&view, 10.0, 10.0, PointerButton::Secondary);
    assert!(view.borrow().is_dragging());
    assert!(clicks.borrow().is_empty());
}

#[test]
fn test_listener_sets_active_cell() {
    let view = shared_view(0, 0.0);
    let listener = {
        let view = Rc::clone(&view);
        Signal::listener(move |cell: &CellCoord| {
            view.borrow_mut().set_active_cell(Some(*cell));
            Propagation::Continue
        })
    };
    view.borrow().cell_clicked().add(&listener, 0).unwrap();

    dispatch_pointer_down(&view, 250.0, 70.0, PointerButton::Primary);
    assert_eq!(view.borrow().active_cell(), Some(CellCoord::new(2, 2)));
    assert!(view.borrow().is_cell_active(2, 2));
}

#[test]
fn test_click_uses_last_painted_frame() {
    let view = shared_view(0, 0.0);
    let clicks = record_clicks(&view);
    // Scrolled but not yet painted: hits still resolve against frame zero
    view.borrow_mut().set_scroll_offset(100.0, 60.0);
    dispatch_pointer_down(&view, 10.0, 10.0, PointerButton::Primary);

    let mut surface = RecordingSurface::new(300, 200);
    view.borrow_mut().tick(&mut surface);
    dispatch_pointer_down(&view, 10.0, 10.0, PointerButton::Primary);

    assert_eq!(*clicks.borrow(), vec![CellCoord::new(0, 0), CellCoord::new(1, 2)]);
}
