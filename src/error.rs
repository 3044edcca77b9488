//! Structured error types for gridcanvas.
//!
//! Geometry and painting never fail; errors only surface at the edges
//! (surface acquisition, configuration decoding, listener registration).

/// All errors that can occur while wiring up or configuring a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A listener was re-registered with a different once/persistent mode.
    #[error("Listener mode conflict: cannot {attempted}() a listener already registered with {registered}()")]
    ListenerMode {
        registered: &'static str,
        attempted: &'static str,
    },

    /// Drawing surface or context acquisition failure.
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid configuration or grid content payload.
    #[error("Config error: {0}")]
    Config(String),

    /// JSON decoding error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
