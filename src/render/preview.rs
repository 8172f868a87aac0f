//! Preview composition: base image, monitor overlay and fit annotations

use crate::capture::image::SourceImage;
use crate::config::{OverlayColor, WallsplitConfig};
use crate::domain::{FitReport, FitStatus, MonitorSpec, PixelSize, Point, Rect, Size, ViewTransform};

use super::geometry::{self, overlay};
use super::surface::DrawingSurface;

/// Colors and stroke used for the monitor overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub outline: OverlayColor,
    pub fill: OverlayColor,
    pub label: OverlayColor,
    pub outline_width: f32,
}

impl From<&WallsplitConfig> for OverlayStyle {
    fn from(config: &WallsplitConfig) -> Self {
        Self {
            outline: config.outline_color,
            fill: config.fill_color,
            label: config.label_color,
            outline_width: config.outline_width,
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&WallsplitConfig::default())
    }
}

/// Preview canvas extent for a given width, keeping the image aspect ratio
///
/// Dimensions are truncated to whole pixels, never below 1.
pub fn preview_canvas_size(width: u32, image: PixelSize) -> PixelSize {
    let width = width.max(1);
    let height = f64::from(width) * f64::from(image.height) / f64::from(image.width.max(1));
    PixelSize::new(width, (height.floor() as u32).max(1))
}

/// Compute the fit annotation of one monitor
pub fn fit_report(monitor: &MonitorSpec, view: &ViewTransform, image: PixelSize) -> FitReport {
    let effective_px = geometry::effective_px(monitor, view, image);
    let ok = effective_px.0 >= i64::from(monitor.target_px.width)
        && effective_px.1 >= i64::from(monitor.target_px.height);
    FitReport {
        name: monitor.name.clone(),
        effective_px,
        target_px: monitor.target_px,
        status: if ok { FitStatus::Ok } else { FitStatus::Warn },
    }
}

/// Fit annotations for every monitor, in layout order
pub fn fit_reports(monitors: &[MonitorSpec], view: &ViewTransform, image: PixelSize) -> Vec<FitReport> {
    monitors
        .iter()
        .map(|monitor| fit_report(monitor, view, image))
        .collect()
}

/// Draw the preview and return the fit annotations
///
/// Without a source image this is a no-op and returns no annotations.
/// The base image always fills the surface; only the overlay follows `view`.
pub fn render<S: DrawingSurface>(
    image: Option<&SourceImage>,
    monitors: &[MonitorSpec],
    view: &ViewTransform,
    style: &OverlayStyle,
    surface: &mut S,
) -> Vec<FitReport> {
    let Some(image) = image else {
        return Vec::new();
    };

    let preview = surface.size();
    let image_size = image.size();

    surface.clear();
    surface.draw_image(
        image,
        Rect::from_origin_size(Point::ORIGIN, image_size.as_size()),
        Rect::from_origin_size(Point::ORIGIN, preview),
    );

    for monitor in monitors {
        draw_monitor(surface, monitor, view, preview, image_size, style);
    }

    fit_reports(monitors, view, image_size)
}

fn draw_monitor<S: DrawingSurface>(
    surface: &mut S,
    monitor: &MonitorSpec,
    view: &ViewTransform,
    preview: Size,
    image: PixelSize,
    style: &OverlayStyle,
) {
    let rect = geometry::monitor_preview_rect(monitor, view, preview, image);
    surface.stroke_rect(rect, style.outline, style.outline_width);
    surface.fill_rect(rect, style.fill);
    surface.draw_text(
        &monitor.name,
        Point::new(
            rect.left + overlay::LABEL_OFFSET_X,
            rect.top + overlay::LABEL_OFFSET_Y,
        ),
        style.label,
    );
}
