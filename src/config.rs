//! Configuration persistence for wallsplit settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable RGBA color for overlay drawing (components 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl OverlayColor {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Where exported archives go when no explicit path is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

impl SaveLocation {
    /// Resolve the folder, falling back to a folder of the same name in $HOME
    pub fn dir(self) -> Option<PathBuf> {
        match self {
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallsplitConfig {
    /// Zoom factor per wheel notch
    #[serde(default = "default_coarse_zoom_step")]
    pub coarse_zoom_step: f64,
    /// Zoom factor per wheel notch while the fine-zoom modifier is held
    #[serde(default = "default_fine_zoom_step")]
    pub fine_zoom_step: f64,
    /// Preview canvas width in pixels (height follows the image aspect)
    #[serde(default = "default_preview_width")]
    pub preview_width: u32,
    #[serde(default = "default_outline_color")]
    pub outline_color: OverlayColor,
    #[serde(default = "default_fill_color")]
    pub fill_color: OverlayColor,
    #[serde(default = "default_label_color")]
    pub label_color: OverlayColor,
    /// Monitor outline thickness in preview pixels
    #[serde(default = "default_outline_width")]
    pub outline_width: f32,
    /// File name of the exported archive
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
    #[serde(default)]
    pub save_location: SaveLocation,
}

fn default_coarse_zoom_step() -> f64 {
    1.05
}

fn default_fine_zoom_step() -> f64 {
    1.01
}

fn default_preview_width() -> u32 {
    1600
}

fn default_outline_color() -> OverlayColor {
    OverlayColor::rgba(1.0, 0.0, 0.0, 1.0)
}

fn default_fill_color() -> OverlayColor {
    OverlayColor::rgba(1.0, 0.0, 0.0, 0.25)
}

fn default_label_color() -> OverlayColor {
    OverlayColor::rgba(1.0, 1.0, 1.0, 1.0)
}

fn default_outline_width() -> f32 {
    2.0
}

fn default_archive_name() -> String {
    "wallpaper_monitors.zip".to_string()
}

impl Default for WallsplitConfig {
    fn default() -> Self {
        Self {
            coarse_zoom_step: default_coarse_zoom_step(),
            fine_zoom_step: default_fine_zoom_step(),
            preview_width: default_preview_width(),
            outline_color: default_outline_color(),
            fill_color: default_fill_color(),
            label_color: default_label_color(),
            outline_width: default_outline_width(),
            archive_name: default_archive_name(),
            save_location: SaveLocation::default(),
        }
    }
}

impl WallsplitConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "wallsplit";

    /// Default config file location
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Load from an explicit file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Replace values that would break the interaction invariants
    fn sanitized(mut self) -> Self {
        if !(self.coarse_zoom_step.is_finite() && self.coarse_zoom_step > 1.0) {
            log::warn!(
                "Ignoring invalid coarse_zoom_step {}, using {}",
                self.coarse_zoom_step,
                default_coarse_zoom_step()
            );
            self.coarse_zoom_step = default_coarse_zoom_step();
        }
        if !(self.fine_zoom_step.is_finite() && self.fine_zoom_step > 1.0) {
            log::warn!(
                "Ignoring invalid fine_zoom_step {}, using {}",
                self.fine_zoom_step,
                default_fine_zoom_step()
            );
            self.fine_zoom_step = default_fine_zoom_step();
        }
        if self.preview_width == 0 {
            self.preview_width = default_preview_width();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WallsplitConfig::load_from(&dir.path().join("nope.json"));
        assert_eq!(config, WallsplitConfig::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(WallsplitConfig::load_from(&path), WallsplitConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "preview_width": 800, "fine_zoom_step": 0.5 }"#).unwrap();
        let config = WallsplitConfig::load_from(&path);
        assert_eq!(config.preview_width, 800);
        assert_eq!(config.coarse_zoom_step, 1.05);
        // a step <= 1 would make zoom-in shrink the view
        assert_eq!(config.fine_zoom_step, 1.01);
        assert_eq!(config.archive_name, "wallpaper_monitors.zip");
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = WallsplitConfig {
            preview_width: 1024,
            save_location: SaveLocation::Documents,
            ..WallsplitConfig::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(WallsplitConfig::load_from(&path), config);
    }

    #[test]
    fn test_overlay_color_to_rgba_u8() {
        assert_eq!(default_fill_color().to_rgba_u8(), [255, 0, 0, 64]);
        assert_eq!(OverlayColor::rgba(2.0, -1.0, 0.5, 1.0).to_rgba_u8(), [255, 0, 128, 255]);
    }
}
