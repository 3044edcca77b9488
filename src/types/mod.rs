//! Data types for the grid viewer.

mod cell;
mod grid;
mod selection;

pub use cell::*;
pub use grid::*;
pub use selection::*;
