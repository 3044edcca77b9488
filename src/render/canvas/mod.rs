//! Canvas 2D drawing surface.
//!
//! This module provides the `DrawSurface` implementation over the HTML
//! Canvas 2D API via web-sys.

mod surface;

pub use surface::CanvasSurface;
