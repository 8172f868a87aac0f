//! Interactive view state (zoom and pan of the monitor overlay)

use super::geometry::Point;

/// Smallest zoom factor the view accepts
pub const MIN_SCALE: f64 = 1e-3;

/// Zoom and pan applied to the whole layout before projecting onto the image
///
/// `scale` is strictly positive at all times. Only the interaction
/// controller mutates it, and it goes through [`ViewTransform::set_scale`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    /// Pan translation in millimeters applied to every monitor offset
    pub group_offset_mm: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            group_offset_mm: Point::ORIGIN,
        }
    }
}

impl ViewTransform {
    /// Build a view, rejecting non-finite or non-positive scales
    pub fn new(scale: f64, group_offset_mm: Point) -> Option<Self> {
        let mut view = Self {
            group_offset_mm,
            ..Self::default()
        };
        view.set_scale(scale).then_some(view)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom factor, raised to at least `MIN_SCALE`
    ///
    /// Returns false (and leaves the view untouched) if `scale` is not a
    /// finite positive number.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        self.scale = scale.max(MIN_SCALE);
        true
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}
