//! `GridCanvas`: the wasm-exported grid bound to a canvas element.
//!
//! Owns the DOM listeners and the animation loop for one `GridView`, and
//! removes all of them on `destroy()` or when dropped.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::animation::AnimationLoop;
use super::{dispatch_pointer_down, GridView, PointerButton};
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::render::{CanvasSurface, DrawSurface};
use crate::signal::{Listener, Propagation, Signal};
use crate::types::{CellCoord, GridData, Selection};

/// A registered DOM event listener. Unregisters itself when dropped.
struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    fn attach(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|_| GridError::Render(format!("Failed to listen for {event}")))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
            .ok();
    }
}

/// Event position relative to the canvas' top-left corner.
#[allow(clippy::cast_possible_truncation)]
fn local_point(event: &MouseEvent, canvas: &HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        (f64::from(event.client_x()) - rect.left()) as f32,
        (f64::from(event.client_y()) - rect.top()) as f32,
    )
}

/// JS click callbacks and the listener handles wrapping them.
type ClickCallbacks = Rc<RefCell<Vec<(Function, Listener<CellCoord>)>>>;

/// Drop callbacks the signal no longer holds, such as fired `once` callbacks.
fn prune_click_callbacks(callbacks: &ClickCallbacks, signal: &Signal<CellCoord>) {
    if let Ok(mut callbacks) = callbacks.try_borrow_mut() {
        callbacks.retain(|(_, listener)| signal.has(listener));
    }
}

fn config_from_js(config: JsValue) -> Result<GridConfig> {
    let config: GridConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| GridError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Wrap a JS callback as a click listener. Returning `false` stops delivery.
fn js_listener(callback: Function) -> Listener<CellCoord> {
    Signal::listener(move |cell: &CellCoord| {
        let result = callback.call2(&JsValue::NULL, &JsValue::from(cell.col), &JsValue::from(cell.row));
        if result.ok().and_then(|v| v.as_bool()) == Some(false) {
            Propagation::Stop
        } else {
            Propagation::Continue
        }
    })
}

/// Canvas-backed spreadsheet grid
#[wasm_bindgen]
pub struct GridCanvas {
    view: Rc<RefCell<GridView>>,
    surface: Rc<RefCell<CanvasSurface>>,
    animation: Option<AnimationLoop>,
    listeners: Vec<DomListener>,
    click_callbacks: ClickCallbacks,
}

#[wasm_bindgen]
impl GridCanvas {
    /// Bind a grid to `canvas` with the default configuration.
    ///
    /// Starts listening for pointer input and begins the frame loop.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> std::result::Result<GridCanvas, JsValue> {
        console_error_panic_hook::set_once();
        Ok(Self::attach(canvas, GridView::new())?)
    }

    /// Bind a grid to `canvas` with a partial configuration object.
    #[wasm_bindgen(js_name = "newWithConfig")]
    pub fn new_with_config(canvas: HtmlCanvasElement, config: JsValue) -> std::result::Result<GridCanvas, JsValue> {
        console_error_panic_hook::set_once();
        let view = GridView::with_config(config_from_js(config)?)?;
        Ok(Self::attach(canvas, view)?)
    }

    /// Replace the grid content with an array of rows of strings.
    pub fn set_data(&mut self, data: JsValue) -> std::result::Result<(), JsValue> {
        let rows: Vec<Vec<String>> =
            serde_wasm_bindgen::from_value(data).map_err(|e| GridError::Config(e.to_string()))?;
        self.view.borrow_mut().set_data(GridData::new(rows));
        Ok(())
    }

    pub fn set_column_widths(&mut self, widths: Vec<f32>) {
        self.view.borrow_mut().set_column_widths(widths);
    }

    pub fn set_frozen_column_count(&mut self, count: u32) {
        self.view.borrow_mut().set_frozen_column_count(count);
    }

    pub fn frozen_column_count(&self) -> u32 {
        self.view.borrow().frozen_column_count()
    }

    pub fn set_scroll_offset(&mut self, x: f32, y: f32) {
        self.view.borrow_mut().set_scroll_offset(x, y);
    }

    /// Current scroll offset as `[x, y]`.
    pub fn get_scroll_offset(&self) -> Vec<f32> {
        let (x, y) = self.view.borrow().scroll_offset();
        vec![x, y]
    }

    /// Replace the selection with a flat `[col0, row0, col1, row1, ...]` array.
    pub fn set_selection(&mut self, cells: Vec<u32>) {
        self.view
            .borrow_mut()
            .set_selection(Selection::from_flat(&cells));
    }

    pub fn get_selection(&self) -> Vec<u32> {
        self.view.borrow().selection().to_flat()
    }

    /// Set the active cell as `[col, row]`, or clear it with `undefined`.
    pub fn set_active_cell(&mut self, cell: Option<Vec<u32>>) {
        let cell = cell.as_deref().and_then(CellCoord::from_pair);
        self.view.borrow_mut().set_active_cell(cell);
    }

    pub fn get_active_cell(&self) -> Option<Vec<u32>> {
        self.view
            .borrow()
            .active_cell()
            .map(|cell| cell.to_pair().to_vec())
    }

    pub fn is_cell_selected(&self, col: u32, row: u32) -> bool {
        self.view.borrow().is_cell_selected(col, row)
    }

    pub fn is_cell_active(&self, col: u32, row: u32) -> bool {
        self.view.borrow().is_cell_active(col, row)
    }

    /// Cell under a canvas-local point as `[col, row]`, as of the last frame.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Vec<u32>> {
        self.view
            .borrow()
            .hit_test(x, y)
            .map(|cell| cell.to_pair().to_vec())
    }

    /// Replace the configuration. Missing fields take their defaults.
    pub fn set_config(&mut self, config: JsValue) -> std::result::Result<(), JsValue> {
        let config = config_from_js(config)?;
        self.surface.borrow_mut().set_font(&config.font());
        self.view.borrow_mut().set_config(config)?;
        Ok(())
    }

    /// Repaint on the next frame even if nothing visible changed.
    pub fn invalidate(&mut self) {
        self.view.borrow_mut().invalidate();
    }

    /// Run a frame now instead of waiting for the next animation frame.
    ///
    /// Returns whether the canvas was repainted.
    pub fn render(&mut self) -> bool {
        let mut view = self.view.borrow_mut();
        let mut surface = self.surface.borrow_mut();
        view.tick(&mut *surface).painted()
    }

    /// Listen for primary-button presses on a cell.
    ///
    /// `callback(col, row)` runs highest `priority` first; returning `false`
    /// stops delivery to lower-priority callbacks. With `once`, the callback
    /// is removed after its first call.
    pub fn on_cell_click(&mut self, callback: Function, priority: i32, once: bool) -> std::result::Result<(), JsValue> {
        let signal = Rc::clone(self.view.borrow().cell_clicked());
        prune_click_callbacks(&self.click_callbacks, &signal);

        let (listener, is_new) = match self.known_listener(&callback) {
            Some(listener) => (listener, false),
            None => (js_listener(callback.clone()), true),
        };
        if once {
            signal.add_once(&listener, priority)?;
        } else {
            signal.add(&listener, priority)?;
        }
        // Only callbacks the signal accepted are kept alive
        if is_new {
            self.click_callbacks.borrow_mut().push((callback, listener));
        }
        Ok(())
    }

    /// Number of click callbacks still registered.
    pub fn cell_click_callback_count(&self) -> usize {
        let signal = Rc::clone(self.view.borrow().cell_clicked());
        prune_click_callbacks(&self.click_callbacks, &signal);
        self.click_callbacks.borrow().len()
    }

    /// Remove a callback added with `on_cell_click`. Returns whether it was registered.
    pub fn off_cell_click(&mut self, callback: &Function) -> bool {
        let mut callbacks = self.click_callbacks.borrow_mut();
        let Some(index) = callbacks.iter().position(|(f, _)| Object::is(f, callback)) else {
            return false;
        };
        let (_, listener) = callbacks.swap_remove(index);
        self.view.borrow().cell_clicked().remove(&listener)
    }

    /// Stop the frame loop, remove every DOM listener and drop all click
    /// callbacks. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl GridCanvas {
    fn attach(canvas: HtmlCanvasElement, view: GridView) -> Result<Self> {
        let window = web_sys::window().ok_or("No window")?;

        let mut surface = CanvasSurface::new(canvas.clone())?;
        surface.set_font(&view.config().font());

        let view = Rc::new(RefCell::new(view));
        let surface = Rc::new(RefCell::new(surface));
        let click_callbacks: ClickCallbacks = Rc::default();
        let mut listeners = Vec::with_capacity(5);

        // Press on the canvas: click or drag start
        {
            let view = Rc::clone(&view);
            let click_callbacks = Rc::clone(&click_callbacks);
            let canvas_ref = canvas.clone();
            listeners.push(DomListener::attach(&canvas, "mousedown", move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = local_point(event, &canvas_ref);
                dispatch_pointer_down(&view, x, y, PointerButton::from_dom(event.button()));
                if let Ok(view) = view.try_borrow() {
                    prune_click_callbacks(&click_callbacks, view.cell_clicked());
                }
            })?);
        }

        // Wheel on the canvas: fixed step per axis
        {
            let view = Rc::clone(&view);
            listeners.push(DomListener::attach(&canvas, "wheel", move |event: Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                #[allow(clippy::cast_possible_truncation)]
                let (dx, dy) = (event.delta_x() as f32, event.delta_y() as f32);
                view.borrow_mut().wheel(dx, dy);
            })?);
        }

        // Moves and releases are tracked on the window so a drag survives
        // the pointer leaving the canvas
        {
            let view = Rc::clone(&view);
            let canvas_ref = canvas.clone();
            listeners.push(DomListener::attach(&window, "mousemove", move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if !view.borrow().is_dragging() {
                    return;
                }
                let (x, y) = local_point(event, &canvas_ref);
                view.borrow_mut().pointer_move(x, y);
            })?);
        }
        {
            let view = Rc::clone(&view);
            listeners.push(DomListener::attach(&window, "mouseup", move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    view.borrow_mut()
                        .pointer_up(PointerButton::from_dom(event.button()));
                }
            })?);
        }
        // The secondary button pans, so its context menu never opens
        listeners.push(DomListener::attach(&window, "contextmenu", |event: Event| {
            event.prevent_default();
        })?);

        let animation = {
            let view = Rc::clone(&view);
            let surface = Rc::clone(&surface);
            AnimationLoop::start(move || {
                if let (Ok(mut view), Ok(mut surface)) = (view.try_borrow_mut(), surface.try_borrow_mut()) {
                    view.tick(&mut *surface);
                }
            })?
        };

        tracing::debug!("grid canvas attached");
        Ok(Self {
            view,
            surface,
            animation: Some(animation),
            listeners,
            click_callbacks,
        })
    }

    /// Listener handle already wrapping `callback`, if any.
    fn known_listener(&self, callback: &Function) -> Option<Listener<CellCoord>> {
        self.click_callbacks
            .borrow()
            .iter()
            .find(|(f, _)| Object::is(f, callback))
            .map(|(_, listener)| Rc::clone(listener))
    }

    fn teardown(&mut self) {
        let Some(animation) = self.animation.take() else {
            return;
        };
        animation.cancel();
        self.listeners.clear();
        if let Ok(view) = self.view.try_borrow() {
            view.cell_clicked().remove_all();
        }
        self.click_callbacks.borrow_mut().clear();
        tracing::debug!("grid canvas destroyed");
    }
}

impl Drop for GridCanvas {
    fn drop(&mut self) {
        self.teardown();
    }
}
