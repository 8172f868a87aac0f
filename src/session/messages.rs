//! Input messages for the preview session
//!
//! Messages can be built directly or deserialized from a JSON event list:
//!
//! ```json
//! [
//!   { "type": "pointer_down", "x": 100, "y": 80 },
//!   { "type": "pointer_move", "x": 140, "y": 80 },
//!   { "type": "pointer_up" },
//!   { "type": "wheel", "delta_y": -120, "fine": true }
//! ]
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// All messages the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    /// Pointer pressed over the preview at (x, y) preview pixels
    PointerDown { x: f64, y: f64 },
    /// Pointer moved over the preview
    PointerMove { x: f64, y: f64 },
    /// Pointer released
    PointerUp,
    /// Pointer left the preview
    PointerLeave,
    /// Wheel scrolled; negative `delta_y` zooms in
    Wheel {
        delta_y: f64,
        /// Fine-zoom modifier held
        #[serde(default)]
        fine: bool,
    },
    /// Return to scale 1 and zero offset
    ResetView,
}

/// Parse a JSON list of input events
pub fn parse_events(json: &str) -> anyhow::Result<Vec<Msg>> {
    serde_json::from_str(json).context("Invalid input event list")
}

/// Read and parse an input event file
pub fn load_events(path: &Path) -> anyhow::Result<Vec<Msg>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {}", path.display()))?;
    parse_events(&json).with_context(|| format!("Failed to parse event file: {}", path.display()))
}
