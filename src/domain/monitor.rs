//! Physical monitor descriptions

use super::geometry::{PixelSize, Point, Size};

/// One physical monitor of a layout
///
/// All geometry is layout-relative and in millimeters, except the target
/// resolution. Specs are replaced as a whole on layout load and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorSpec {
    /// Display label, expected to be unique within a layout
    pub name: String,
    /// Top-left corner relative to the layout origin (mm)
    pub offset_mm: Point,
    /// Physical extent (mm)
    pub size_mm: Size,
    /// Output resolution (px)
    pub target_px: PixelSize,
}

impl MonitorSpec {
    pub fn new(name: impl Into<String>, offset_mm: Point, size_mm: Size, target_px: PixelSize) -> Self {
        Self {
            name: name.into(),
            offset_mm,
            size_mm,
            target_px,
        }
    }

    /// Whether both physical axes and both target axes are strictly positive
    pub fn has_positive_geometry(&self) -> bool {
        self.size_mm.width > 0.0
            && self.size_mm.height > 0.0
            && self.target_px.dimensions().is_some()
    }
}

/// Copy of `monitors` ordered left to right by `offset_mm.x`
///
/// The sort is stable, so monitors sharing an x offset keep layout order.
pub fn sorted_left_to_right(monitors: &[MonitorSpec]) -> Vec<MonitorSpec> {
    let mut sorted = monitors.to_vec();
    sorted.sort_by(|a, b| a.offset_mm.x.total_cmp(&b.offset_mm.x));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(name: &str, x: f64) -> MonitorSpec {
        MonitorSpec::new(
            name,
            Point::new(x, 0.0),
            Size::new(600.0, 340.0),
            PixelSize::new(1920, 1080),
        )
    }

    #[test]
    fn test_sorted_left_to_right() {
        let input = vec![monitor("right", 600.0), monitor("left", 0.0), monitor("mid", 300.0)];
        let names: Vec<_> = sorted_left_to_right(&input)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["left", "mid", "right"]);
        // input untouched
        assert_eq!(input[0].name, "right");
    }

    #[test]
    fn test_sort_is_stable_for_equal_offsets() {
        let input = vec![monitor("a", 100.0), monitor("b", 100.0), monitor("c", -50.0)];
        let names: Vec<_> = sorted_left_to_right(&input)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn test_has_positive_geometry() {
        let mut m = monitor("m", 0.0);
        assert!(m.has_positive_geometry());
        m.size_mm.height = 0.0;
        assert!(!m.has_positive_geometry());
        m.size_mm.height = 340.0;
        m.target_px.width = 0;
        assert!(!m.has_positive_geometry());
    }
}
