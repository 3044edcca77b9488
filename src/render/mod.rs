//! Paint engine with pluggable drawing surfaces.
//!
//! This module provides:
//! - The backend-agnostic `DrawSurface` trait and paint parameters
//! - Cell, outline and frozen-column painting
//! - A recording surface for headless use and tests
//! - The Canvas 2D surface (wasm32 only)

pub mod backend;
pub mod colors;
pub mod frozen;
pub mod paint;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

// Re-export commonly used types
pub use backend::{DrawSurface, PaintParams};
pub use colors::{palette, CssColor};
pub use frozen::paint_frozen_columns;
pub use paint::{overlay_rects, paint_cells, OutlineRect, Overlays};
pub use recording::{DrawCommand, RecordingSurface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
