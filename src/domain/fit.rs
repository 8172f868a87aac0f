//! Fit annotation types

use std::fmt;

use super::geometry::PixelSize;

/// Whether a selection holds enough source pixels for its target resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitStatus {
    Ok,
    Warn,
}

impl FitStatus {
    pub fn symbol(self) -> &'static str {
        match self {
            FitStatus::Ok => "✓",
            FitStatus::Warn => "⚠️",
        }
    }
}

/// Per-monitor fit annotation shown next to the preview
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FitReport {
    pub name: String,
    /// Rounded source pixels covered by the selection (may be negative
    /// for degenerate geometry)
    pub effective_px: (i64, i64),
    pub target_px: PixelSize,
    pub status: FitStatus,
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Selection {}×{}px → Monitor {}×{}px {}",
            self.name,
            self.effective_px.0,
            self.effective_px.1,
            self.target_px.width,
            self.target_px.height,
            self.status.symbol()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let report = FitReport {
            name: "left".into(),
            effective_px: (240, 136),
            target_px: PixelSize::new(1920, 1080),
            status: FitStatus::Warn,
        };
        assert_eq!(
            report.to_string(),
            "left: Selection 240×136px → Monitor 1920×1080px ⚠️"
        );
    }
}
