//! Default colors used by the paint engine.
//!
//! All colors are CSS color strings, directly usable by Canvas 2D.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Default palette
pub mod palette {
    pub const WHITE: &str = "#FFFFFF";
    pub const BLACK: &str = "#000000";

    /// Outline around selected cells
    pub const SELECTION: &str = "#0000FF";

    /// Outline around the active cell
    pub const ACTIVE_CELL: &str = "#00FF00";
}
