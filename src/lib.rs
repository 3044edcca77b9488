//! gridcanvas - canvas spreadsheet grid for the web
//!
//! Renders a large grid of text cells on an HTML canvas via WebAssembly:
//! - Only the visible window is painted, at any scroll offset
//! - Frozen leading columns stay pinned while the rest scrolls
//! - Wheel and secondary-button drag scrolling
//! - Selection and active-cell outlines
//! - Frames are skipped when nothing visible changed
//!
//! The geometry, input and paint stages are platform independent and can
//! be driven headlessly through `GridView` and `RecordingSurface`.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridCanvas } from 'gridcanvas';
//! await init();
//! const grid = new GridCanvas(canvas);
//! grid.set_data(rows);
//! grid.set_column_widths(widths);
//! grid.on_cell_click((col, row) => grid.set_active_cell([col, row]), 0, false);
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod signal;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use signal::{Listener, Propagation, Signal};
pub use viewer::{FrameOutcome, GridView, PointerButton};

#[cfg(target_arch = "wasm32")]
pub use viewer::GridCanvas;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
