//! Signal tests
//!
//! Priority ordering, once listeners, propagation control and mode
//! conflicts, exercised through the grid's click signal.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use gridcanvas::{CellCoord, GridError, GridView, Listener, Propagation, Signal};
use test_case::test_case;

type Log = Rc<RefCell<Vec<String>>>;

fn named(log: &Log, name: &'static str, result: Propagation) -> Listener<CellCoord> {
    let log = Rc::clone(log);
    Signal::listener(move |cell: &CellCoord| {
        log.borrow_mut().push(format!("{name}@{},{}", cell.col, cell.row));
        result
    })
}

#[test_case(&[("low", -1), ("high", 10), ("mid", 0)], &["high", "mid", "low"] ; "priority order")]
#[test_case(&[("a", 0), ("b", 0), ("c", 0)], &["a", "b", "c"] ; "registration order on ties")]
#[test_case(&[("a", 1), ("b", 0), ("c", 1)], &["a", "c", "b"] ; "ties within a priority")]
fn test_dispatch_order(listeners: &[(&'static str, i32)], expected: &[&str]) {
    let log: Log = Rc::default();
    let signal = Signal::new();
    let handles: Vec<_> = listeners
        .iter()
        .map(|&(name, priority)| {
            let listener = named(&log, name, Propagation::Continue);
            signal.add(&listener, priority).unwrap();
            listener
        })
        .collect();

    signal.dispatch(&CellCoord::new(0, 0));
    let names: Vec<String> = log
        .borrow()
        .iter()
        .map(|entry| entry.split('@').next().unwrap().to_string())
        .collect();
    assert_eq!(names, expected);
    assert_eq!(signal.len(), handles.len());
}

#[test]
fn test_click_signal_delivers_coordinates() {
    let log: Log = Rc::default();
    let view = GridView::new();
    let listener = named(&log, "click", Propagation::Continue);
    view.cell_clicked().add(&listener, 0).unwrap();
    view.cell_clicked().dispatch(&CellCoord::new(4, 9));
    assert_eq!(*log.borrow(), vec!["click@4,9"]);
}

#[test]
fn test_stop_skips_lower_priorities() {
    let log: Log = Rc::default();
    let signal = Signal::new();
    let guard = named(&log, "guard", Propagation::Stop);
    let rest = named(&log, "rest", Propagation::Continue);
    signal.add(&rest, 0).unwrap();
    signal.add(&guard, 5).unwrap();

    signal.dispatch(&CellCoord::new(1, 1));
    assert_eq!(*log.borrow(), vec!["guard@1,1"]);
}

#[test]
fn test_once_fires_a_single_time() {
    let log: Log = Rc::default();
    let signal = Signal::new();
    let once = named(&log, "once", Propagation::Continue);
    let always = named(&log, "always", Propagation::Continue);
    signal.add_once(&once, 1).unwrap();
    signal.add(&always, 0).unwrap();

    signal.dispatch(&CellCoord::new(0, 0));
    signal.dispatch(&CellCoord::new(0, 1));
    assert_eq!(
        *log.borrow(),
        vec!["once@0,0", "always@0,0", "always@0,1"]
    );
    assert!(!signal.has(&once));
}

#[test]
fn test_conflicting_modes_are_rejected() {
    let log: Log = Rc::default();
    let signal = Signal::new();
    let listener = named(&log, "l", Propagation::Continue);
    signal.add_once(&listener, 0).unwrap();

    let err = signal.add(&listener, 0).unwrap_err();
    assert!(matches!(err, GridError::ListenerMode { .. }));
    assert!(err.to_string().contains("add_once"));
    // Same-mode re-registration is a no-op
    signal.add_once(&listener, 3).unwrap();
    assert_eq!(signal.len(), 1);
}

#[test]
fn test_remove_all_and_dispose() {
    let log: Log = Rc::default();
    let signal = Signal::new();
    let a = named(&log, "a", Propagation::Continue);
    signal.add(&a, 0).unwrap();
    signal.dispose();
    signal.dispatch(&CellCoord::new(0, 0));
    assert!(log.borrow().is_empty());
    assert!(signal.is_empty());
}

#[test]
fn test_listener_added_during_dispatch_waits_for_next() {
    let log: Log = Rc::default();
    let signal = Rc::new(Signal::new());
    let late = named(&log, "late", Propagation::Continue);
    let adder = {
        let weak = Rc::downgrade(&signal);
        let late = Rc::clone(&late);
        Signal::listener(move |_: &CellCoord| {
            if let Some(signal) = weak.upgrade() {
                signal.add(&late, 0).unwrap();
            }
            Propagation::Continue
        })
    };
    signal.add(&adder, 1).unwrap();

    signal.dispatch(&CellCoord::new(0, 0));
    assert!(log.borrow().is_empty());
    signal.dispatch(&CellCoord::new(2, 3));
    assert_eq!(*log.borrow(), vec!["late@2,3"]);
}
