//! Layout engine mapping between pixel space and logical cell coordinates.
//!
//! This module handles:
//! - Pre-computing column edges from column widths
//! - Managing viewport state (scroll offset, surface size, visible window)
//! - Hit-testing surface-local points against the frozen and movable regions

mod grid_layout;
mod viewport;

pub use grid_layout::{GridLayout, DEFAULT_ROW_HEIGHT};
pub use viewport::{clamp_axis, FrameOrigin, ViewBox, Viewport, VisibleWindow};
