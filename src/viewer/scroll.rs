//! Wheel and drag scrolling for `GridView`.
//!
//! Neither path clamps: the next frame tick pulls the offset back into
//! range, so a fast wheel burst never fights the bounds check.

use super::{DragState, GridView, InputState};

/// Signed scroll step for one wheel delta on one axis.
///
/// Only the sign of `delta` matters; zero and NaN do not scroll.
pub fn wheel_step(delta: f32, step: f32) -> f32 {
    if delta > 0.0 {
        step
    } else if delta < 0.0 {
        -step
    } else {
        0.0
    }
}

/// Scroll offset for a drag that has moved to `(x, y)`.
///
/// Moving the pointer right or down pulls the content with it, so the
/// offset shrinks.
pub fn drag_offset(drag: &DragState, x: f32, y: f32) -> (f32, f32) {
    (
        drag.offset_x - (x - drag.start_x),
        drag.offset_y - (y - drag.start_y),
    )
}

impl GridView {
    /// Apply one wheel event.
    ///
    /// Each axis moves by a fixed step in the direction of its delta,
    /// regardless of the delta's magnitude or delta mode.
    pub fn wheel(&mut self, delta_x: f32, delta_y: f32) {
        let step = self.config.wheel_step();
        let dx = wheel_step(delta_x, step);
        let dy = wheel_step(delta_y, step);
        self.viewport.scroll_by(dx, dy);
    }

    /// Update the offset from an in-progress drag.
    ///
    /// Returns false when no drag is active.
    pub(crate) fn drag_to(&mut self, x: f32, y: f32) -> bool {
        let InputState::Dragging(drag) = self.input else {
            return false;
        };
        let (scroll_x, scroll_y) = drag_offset(&drag, x, y);
        self.viewport.set_scroll(scroll_x, scroll_y);
        true
    }
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

    #[test]
    fn test_wheel_step_ignores_magnitude() {
        assert_eq!(wheel_step(3.0, 45.0), 45.0);
        assert_eq!(wheel_step(800.0, 45.0), 45.0);
        assert_eq!(wheel_step(-0.5, 45.0), -45.0);
        assert_eq!(wheel_step(0.0, 45.0), 0.0);
        assert_eq!(wheel_step(f32::NAN, 45.0), 0.0);
    }

    #[test]
    fn test_drag_offset_follows_pointer() {
        let drag = DragState {
            start_x: 100.0,
            start_y: 100.0,
            offset_x: 50.0,
            offset_y: 40.0,
        };
        assert_eq!(drag_offset(&drag, 80.0, 80.0), (70.0, 60.0));
        assert_eq!(drag_offset(&drag, 100.0, 100.0), (50.0, 40.0));
    }

    #[test]
    fn test_wheel_accumulates_without_clamping() {
        let mut view = GridView::new();
        view.wheel(0.0, 10.0);
        view.wheel(0.0, 10.0);
        view.wheel(-1.0, 0.0);
        assert_eq!(view.scroll_offset(), (-45.0, 90.0));
    }
}
