//! `requestAnimationFrame` loop with a cancel handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::Result;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running frame loop. Dropping it does not stop the loop; call
/// [`AnimationLoop::cancel`].
pub(crate) struct AnimationLoop {
    frame_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
    callback: FrameCallback,
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

impl AnimationLoop {
    /// Start calling `on_frame` once per display frame.
    ///
    /// The next frame is requested before `on_frame` runs, so a frame that
    /// panics does not stop the loop.
    pub(crate) fn start(mut on_frame: impl FnMut() + 'static) -> Result<Self> {
        let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let closure = {
            let frame_id = Rc::clone(&frame_id);
            let running = Rc::clone(&running);
            let next = Rc::clone(&callback);
            Closure::wrap(Box::new(move |_timestamp: f64| {
                if !running.get() {
                    return;
                }
                if let Some(cb) = next.borrow().as_ref() {
                    frame_id.set(request_frame(cb));
                }
                on_frame();
            }) as Box<dyn FnMut(f64)>)
        };

        let first = request_frame(&closure).ok_or("Failed to request animation frame")?;
        frame_id.set(Some(first));
        *callback.borrow_mut() = Some(closure);

        Ok(Self {
            frame_id,
            running,
            callback,
        })
    }

    /// Cancel the pending frame and release the callback.
    pub(crate) fn cancel(&self) {
        self.running.set(false);
        if let (Some(window), Some(id)) = (web_sys::window(), self.frame_id.take()) {
            window.cancel_animation_frame(id).ok();
        }
        // Breaks the closure's reference cycle back to its own slot
        self.callback.borrow_mut().take();
    }
}
