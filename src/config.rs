//! Grid appearance and input configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::render::colors::{palette, CssColor};

/// Configuration shared by the layout, input and paint stages.
///
/// Every field has a default, so a host may pass a partial object
/// (`{ "row_height": 24 }`) and keep the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed height of every row in pixels
    pub row_height: f32,
    /// Horizontal and baseline text padding; defaults to a third of the row height
    pub padding: Option<f32>,
    /// Font family used for cell text
    pub font_family: String,
    /// Font size as a fraction of the row height
    pub font_scale: f32,
    /// Wheel step in rows per wheel event
    pub wheel_step_rows: f32,
    /// Cell border grid color
    pub border_color: CssColor,
    /// Cell border grid stroke width
    pub border_width: f64,
    /// Cell text color
    pub text_color: CssColor,
    /// Selection outline color
    pub selection_color: CssColor,
    /// Active cell outline color
    pub active_color: CssColor,
    /// Stroke width for selection and active outlines
    pub overlay_width: f64,
    /// Opaque fill painted under the frozen columns
    pub frozen_background: CssColor,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: 30.0,
            padding: None,
            font_family: "Arial".to_string(),
            font_scale: 0.6,
            wheel_step_rows: 1.5,
            border_color: palette::BLACK.to_string(),
            border_width: 2.0,
            text_color: palette::BLACK.to_string(),
            selection_color: palette::SELECTION.to_string(),
            active_color: palette::ACTIVE_CELL.to_string(),
            overlay_width: 3.0,
            frozen_background: palette::WHITE.to_string(),
        }
    }
}

impl GridConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the geometry degenerate.
    pub fn validate(&self) -> Result<()> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(GridError::Config(format!(
                "row_height must be a positive number, got {}",
                self.row_height
            )));
        }
        if !self.wheel_step_rows.is_finite() {
            return Err(GridError::Config("wheel_step_rows must be finite".into()));
        }
        Ok(())
    }

    /// Text padding in pixels.
    pub fn padding(&self) -> f32 {
        self.padding.unwrap_or(self.row_height / 3.0)
    }

    /// Scroll distance applied per wheel event on each axis.
    pub fn wheel_step(&self) -> f32 {
        self.row_height * self.wheel_step_rows
    }

    /// CSS font shorthand, e.g. `18px Arial`.
    pub fn font(&self) -> String {
        let size = (self.row_height * self.font_scale).round();
        format!("{size}px {}", self.font_family)
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
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.row_height, 30.0);
        assert_eq!(config.padding(), 10.0);
        assert_eq!(config.wheel_step(), 45.0);
        assert_eq!(config.font(), "18px Arial");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{"row_height": 20, "font_family": "Inter"}"#).unwrap();
        assert_eq!(config.row_height, 20.0);
        assert_eq!(config.font(), "12px Inter");
        assert_eq!(config.selection_color, "#0000FF");
    }

    #[test]
    fn test_rejects_zero_row_height() {
        let err = GridConfig::from_json(r#"{"row_height": 0}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GridConfig::from_json("{row_height").unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }
}
