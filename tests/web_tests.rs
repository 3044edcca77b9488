//! Browser tests for the canvas-bound grid.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use gridcanvas::GridCanvas;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, HtmlCanvasElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_width(300);
    canvas.set_height(200);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn rows() -> wasm_bindgen::JsValue {
    let rows: Vec<Vec<String>> = (0..10)
        .map(|r| (0..4).map(|c| (r * 4 + c).to_string()).collect())
        .collect();
    serde_wasm_bindgen::to_value(&rows).unwrap()
}

/// Primary press at a canvas-local point.
fn press(canvas: &HtmlCanvasElement, x: f64, y: f64) {
    let rect = canvas.get_bounding_client_rect();
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x((rect.left() + x) as i32);
    init.set_client_y((rect.top() + y) as i32);
    init.set_button(0);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousedown", &init).unwrap();
    canvas.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn renders_then_skips_unchanged_frame() {
    let mut grid = GridCanvas::new(canvas()).unwrap();
    grid.set_data(rows()).unwrap();
    grid.set_column_widths(vec![100.0; 4]);
    assert!(grid.render());
    assert!(!grid.render());

    grid.set_active_cell(Some(vec![1, 2]));
    assert!(grid.render());
    assert_eq!(grid.get_active_cell(), Some(vec![1, 2]));
}

#[wasm_bindgen_test]
fn hit_test_after_render() {
    let mut grid = GridCanvas::new(canvas()).unwrap();
    grid.set_data(rows()).unwrap();
    grid.set_column_widths(vec![100.0; 4]);
    grid.render();
    assert_eq!(grid.cell_at(150.0, 45.0), Some(vec![1, 1]));
    assert_eq!(grid.cell_at(150.0, 400.0), None);
}

#[wasm_bindgen_test]
fn destroy_is_idempotent() {
    let mut grid = GridCanvas::new(canvas()).unwrap();
    let callback = js_sys::Function::new_no_args("");
    grid.on_cell_click(callback.clone(), 0, false).unwrap();
    assert!(grid.on_cell_click(callback.clone(), 0, true).is_err());
    grid.destroy();
    grid.destroy();
    assert!(!grid.off_cell_click(&callback));
}

#[wasm_bindgen_test]
fn rejects_invalid_config() {
    let config = js_sys::Object::new();
    js_sys::Reflect::set(&config, &"row_height".into(), &(-1.0).into()).unwrap();
    assert!(GridCanvas::new_with_config(canvas(), config.into()).is_err());
}

#[wasm_bindgen_test]
fn fired_once_callbacks_are_released() {
    let canvas = canvas();
    let mut grid = GridCanvas::new(canvas.clone()).unwrap();
    grid.set_data(rows()).unwrap();
    grid.set_column_widths(vec![100.0; 4]);
    grid.render();

    let callbacks: Vec<js_sys::Function> = (0..5)
        .map(|_| js_sys::Function::new_with_args("col, row", "return true;"))
        .collect();
    for callback in &callbacks {
        grid.on_cell_click(callback.clone(), 0, true).unwrap();
        press(&canvas, 150.0, 45.0);
    }

    assert_eq!(grid.cell_click_callback_count(), 0);
    for callback in &callbacks {
        assert!(!grid.off_cell_click(callback));
    }
}

#[wasm_bindgen_test]
fn rejected_callback_is_not_kept() {
    let mut grid = GridCanvas::new(canvas()).unwrap();
    let persistent = js_sys::Function::new_no_args("");
    grid.on_cell_click(persistent.clone(), 0, false).unwrap();
    assert!(grid.on_cell_click(persistent.clone(), 0, true).is_err());
    assert_eq!(grid.cell_click_callback_count(), 1);

    assert!(grid.off_cell_click(&persistent));
    assert_eq!(grid.cell_click_callback_count(), 0);
}

#[wasm_bindgen_test]
fn persistent_callback_survives_clicks() {
    let canvas = canvas();
    let mut grid = GridCanvas::new(canvas.clone()).unwrap();
    grid.set_data(rows()).unwrap();
    grid.set_column_widths(vec![100.0; 4]);
    grid.render();

    let callback = js_sys::Function::new_no_args("");
    grid.on_cell_click(callback.clone(), 0, false).unwrap();
    press(&canvas, 150.0, 45.0);
    press(&canvas, 50.0, 15.0);
    assert_eq!(grid.cell_click_callback_count(), 1);
}

#[wasm_bindgen_test]
fn context_menu_is_cancelled() {
    let canvas = canvas();
    let _grid = GridCanvas::new(canvas.clone()).unwrap();
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("contextmenu", &init).unwrap();
    assert!(!canvas.dispatch_event(&event).unwrap());
    assert!(event.default_prevented());
}
