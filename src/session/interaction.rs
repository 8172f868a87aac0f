//! Interaction controller: pointer drags pan, wheel input zooms
//!
//! The controller only ever touches the [`ViewTransform`]; monitor geometry
//! is never modified. Every method that changes the view returns `true` so
//! the caller can redraw once per event.

use crate::config::WallsplitConfig;
use crate::domain::{PixelSize, Point, Size, ViewTransform};
use crate::render::geometry;

/// Pan gesture state
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging; `last` is the preview position of the previous pointer event
    Panning { last: Point },
}

/// Multiplicative zoom factors per wheel event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSteps {
    pub coarse: f64,
    pub fine: f64,
}

impl Default for ZoomSteps {
    fn default() -> Self {
        Self::from(&WallsplitConfig::default())
    }
}

impl From<&WallsplitConfig> for ZoomSteps {
    fn from(config: &WallsplitConfig) -> Self {
        Self {
            coarse: config.coarse_zoom_step,
            fine: config.fine_zoom_step,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drag: DragState,
    steps: ZoomSteps,
}

impl InteractionController {
    pub fn new(steps: ZoomSteps) -> Self {
        Self {
            drag: DragState::Idle,
            steps,
        }
    }

    /// Start a pan gesture anchored at `at` (preview pixels)
    pub fn pointer_down(&mut self, at: Point) {
        self.drag = DragState::Panning { last: at };
    }

    /// Continue a pan gesture, shifting the group offset by the drag delta
    pub fn pointer_move(
        &mut self,
        at: Point,
        view: &mut ViewTransform,
        preview: Size,
        image: PixelSize,
    ) -> bool {
        let DragState::Panning { last } = self.drag else {
            return false;
        };
        let delta_mm = geometry::preview_px_delta_to_mm_delta(at - last, view, preview, image);
        view.group_offset_mm += delta_mm;
        self.drag = DragState::Panning { last: at };
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Zoom factor for a wheel event
    ///
    /// Scrolling up (negative `delta_y`) zooms in by the step. Anything else,
    /// including a zero delta from a horizontal-only scroll, divides by it.
    pub fn zoom_factor(&self, delta_y: f64, fine: bool) -> f64 {
        let step = if fine { self.steps.fine } else { self.steps.coarse };
        if delta_y < 0.0 { step } else { 1.0 / step }
    }

    /// Apply a wheel event to the zoom, anchored at the layout origin
    pub fn wheel(&mut self, delta_y: f64, fine: bool, view: &mut ViewTransform) -> bool {
        let factor = self.zoom_factor(delta_y, fine);
        let before = view.scale();
        if !view.set_scale(before * factor) {
            log::warn!("Rejected zoom to scale {}", before * factor);
            return false;
        }
        view.scale() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MIN_SCALE;

    fn is_dragging(ctl: &InteractionController) -> bool {
        matches!(ctl.drag, DragState::Panning { .. })
    }

    const PREVIEW: Size = Size {
        width: 1000.0,
        height: 750.0,
    };
    const IMAGE: PixelSize = PixelSize {
        width: 4000,
        height: 3000,
    };

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_move_without_drag_does_nothing() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::default();
        assert!(!ctl.pointer_move(Point::new(50.0, 50.0), &mut view, PREVIEW, IMAGE));
        assert!(view.is_identity());
    }

    #[test]
    fn test_drag_pans_by_incremental_deltas() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::default();
        ctl.pointer_down(Point::new(100.0, 100.0));
        assert!(is_dragging(&ctl));

        // 1000px preview over a 4000px image at 0.4 px/mm: 1 preview px = 10 mm
        assert!(ctl.pointer_move(Point::new(110.0, 95.0), &mut view, PREVIEW, IMAGE));
        assert!(approx_eq(view.group_offset_mm.x, 100.0));
        assert!(approx_eq(view.group_offset_mm.y, -50.0));

        assert!(ctl.pointer_move(Point::new(111.0, 95.0), &mut view, PREVIEW, IMAGE));
        assert!(approx_eq(view.group_offset_mm.x, 110.0));
        assert_eq!(ctl.drag, DragState::Panning { last: Point::new(111.0, 95.0) });
    }

    #[test]
    fn test_pan_delta_shrinks_with_zoom() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::new(2.0, Point::ORIGIN).unwrap();
        ctl.pointer_down(Point::ORIGIN);
        ctl.pointer_move(Point::new(10.0, 0.0), &mut view, PREVIEW, IMAGE);
        assert!(approx_eq(view.group_offset_mm.x, 50.0));
        assert_eq!(view.scale(), 2.0);
    }

    #[test]
    fn test_up_and_leave_end_drag() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::default();
        ctl.pointer_down(Point::ORIGIN);
        ctl.pointer_up();
        assert!(!ctl.pointer_move(Point::new(5.0, 5.0), &mut view, PREVIEW, IMAGE));

        ctl.pointer_down(Point::ORIGIN);
        ctl.pointer_leave();
        assert!(!is_dragging(&ctl));
        assert!(view.is_identity());
    }

    #[test]
    fn test_wheel_direction_and_modifier() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::default();
        assert!(ctl.wheel(-120.0, false, &mut view));
        assert!(approx_eq(view.scale(), 1.05));
        assert!(ctl.wheel(120.0, false, &mut view));
        assert!(approx_eq(view.scale(), 1.0));
        assert!(ctl.wheel(-1.0, true, &mut view));
        assert!(approx_eq(view.scale(), 1.01));
        assert!(ctl.wheel(3.0, true, &mut view));
        assert!(approx_eq(view.scale(), 1.0));
    }

    #[test]
    fn test_zero_wheel_delta_zooms_out() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::default();
        assert!(ctl.wheel(0.0, false, &mut view));
        assert!(approx_eq(view.scale(), 1.0 / 1.05));
        assert!(ctl.wheel(0.0, true, &mut view));
        assert!(approx_eq(view.scale(), 1.0 / (1.05 * 1.01)));
    }

    #[test]
    fn test_wheel_does_not_move_offset() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::new(1.0, Point::new(30.0, 40.0)).unwrap();
        ctl.wheel(-1.0, false, &mut view);
        assert_eq!(view.group_offset_mm, Point::new(30.0, 40.0));
    }

    #[test]
    fn test_zoom_stays_positive_and_finite() {
        let mut ctl = InteractionController::default();
        let mut view = ViewTransform::default();
        for _ in 0..100_000 {
            ctl.wheel(1.0, false, &mut view);
        }
        assert_eq!(view.scale(), MIN_SCALE);
        assert!(!ctl.wheel(1.0, false, &mut view));

        // Zooming in has no upper bound until the scale would overflow
        for _ in 0..100_000 {
            ctl.wheel(-1.0, false, &mut view);
        }
        assert!(view.scale().is_finite());
        assert!(view.scale() > 1e300);
        assert!(!ctl.wheel(-1.0, false, &mut view));
    }
}
