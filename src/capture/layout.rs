//! Layout load collaborator: parses monitor layout descriptions
//!
//! The accepted format is a JSON array of records:
//!
//! ```json
//! [{ "name": "left", "offset": [0, 0], "mm": [600, 340], "px": [1920, 1080] }]
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::domain::{MonitorSpec, PixelSize, Point, Size};

/// One record as it appears in the layout file
#[derive(Debug, Clone, Deserialize)]
struct MonitorRecord {
    name: String,
    /// Top-left corner in millimeters
    offset: [f64; 2],
    /// Physical size in millimeters
    mm: [f64; 2],
    /// Target resolution in pixels
    px: [u32; 2],
}

impl MonitorRecord {
    fn into_spec(self, index: usize) -> anyhow::Result<MonitorSpec> {
        let spec = MonitorSpec::new(
            self.name,
            Point::new(self.offset[0], self.offset[1]),
            Size::new(self.mm[0], self.mm[1]),
            PixelSize::new(self.px[0], self.px[1]),
        );
        if !spec.offset_mm.x.is_finite() || !spec.offset_mm.y.is_finite() {
            bail!("Monitor #{} ({:?}) has a non-finite offset", index + 1, spec.name);
        }
        if !spec.has_positive_geometry() || !spec.size_mm.width.is_finite() || !spec.size_mm.height.is_finite() {
            bail!(
                "Monitor #{} ({:?}) needs positive mm and px sizes, got mm {:?} px {:?}",
                index + 1,
                spec.name,
                [spec.size_mm.width, spec.size_mm.height],
                [spec.target_px.width, spec.target_px.height]
            );
        }
        Ok(spec)
    }
}

/// Parse a layout description, keeping file order
pub fn parse_layout(json: &str) -> anyhow::Result<Vec<MonitorSpec>> {
    let records: Vec<MonitorRecord> =
        serde_json::from_str(json).context("Layout is not a valid monitor list")?;
    let monitors = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_spec(index))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut names: Vec<&str> = monitors.iter().map(|m| m.name.as_str()).collect();
    names.sort_unstable();
    if names.windows(2).any(|pair| pair[0] == pair[1]) {
        log::warn!("Layout contains duplicate monitor names; labels will be ambiguous");
    }
    Ok(monitors)
}

/// Read and parse a layout file
pub fn load_layout(path: &Path) -> anyhow::Result<Vec<MonitorSpec>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
    let monitors = parse_layout(&json)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))?;
    log::info!("Loaded {} monitors from {}", monitors.len(), path.display());
    Ok(monitors)
}
