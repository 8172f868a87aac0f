//! Coordinate transforms shared by the preview and the export pipeline
//!
//! Three spaces are involved:
//! - millimeter space: layout-relative physical positions of monitors
//! - image space: pixels of the decoded source image
//! - preview space: pixels of the on-screen preview canvas
//!
//! Rendering and export both project monitors through [`monitor_image_rect`],
//! so the crop written to disk is the rectangle drawn on screen.

use crate::domain::{MonitorSpec, PixelSize, Point, Rect, Size, ViewTransform};

/// Physical width (mm) the source image is assumed to span at scale 1
pub const REFERENCE_MM_WIDTH: f64 = 10_000.0;

/// Overlay drawing constants (preview pixels)
pub mod overlay {
    /// Offset of the label anchor from the monitor's top-left corner
    pub const LABEL_OFFSET_X: f64 = 6.0;
    /// Baseline offset of the label (the glyph top sits one font height above)
    pub const LABEL_OFFSET_Y: f64 = 16.0;
    /// Height of the bitmap label font in pixels
    pub const FONT_HEIGHT: f64 = 8.0;
    /// Advance of one bitmap label glyph in pixels
    pub const GLYPH_WIDTH: f64 = 8.0;
}

/// Millimeter to image-pixel ratio at scale 1
#[inline]
pub fn base_mm_to_image_px(image: PixelSize) -> f64 {
    f64::from(image.width) / REFERENCE_MM_WIDTH
}

/// Millimeter to image-pixel ratio under the current zoom
#[inline]
pub fn effective_ratio(view: &ViewTransform, image: PixelSize) -> f64 {
    base_mm_to_image_px(image) * view.scale()
}

/// Project a layout point (mm) into source-image pixels
pub fn mm_to_image_px(point_mm: Point, view: &ViewTransform, image: PixelSize) -> Point {
    (point_mm + view.group_offset_mm).scale(effective_ratio(view, image))
}

/// Per-axis stretch from image space to preview space
///
/// The image always fills the preview exactly, so the two factors differ
/// whenever the preview aspect ratio differs from the image's.
#[inline]
pub fn preview_scale(preview: Size, image: PixelSize) -> (f64, f64) {
    (
        preview.width / f64::from(image.width),
        preview.height / f64::from(image.height),
    )
}

/// Map an image-space point into preview space
pub fn image_px_to_preview_px(point: Point, preview: Size, image: PixelSize) -> Point {
    let (sx, sy) = preview_scale(preview, image);
    point.scale_xy(sx, sy)
}

/// Map a preview-space displacement back into image space
pub fn preview_px_delta_to_image_px_delta(delta: Point, preview: Size, image: PixelSize) -> Point {
    let (sx, sy) = preview_scale(preview, image);
    Point::new(delta.x / sx, delta.y / sy)
}

/// Map a preview-space displacement (a drag) into a millimeter displacement
///
/// `view.scale()` is strictly positive, so the division is always defined.
pub fn preview_px_delta_to_mm_delta(
    delta: Point,
    view: &ViewTransform,
    preview: Size,
    image: PixelSize,
) -> Point {
    let ratio = effective_ratio(view, image);
    let image_delta = preview_px_delta_to_image_px_delta(delta, preview, image);
    Point::new(image_delta.x / ratio, image_delta.y / ratio)
}

/// Source rectangle covered by a monitor, in image pixels
pub fn monitor_image_rect(monitor: &MonitorSpec, view: &ViewTransform, image: PixelSize) -> Rect {
    let origin = mm_to_image_px(monitor.offset_mm, view, image);
    let ratio = effective_ratio(view, image);
    let size = Size::new(monitor.size_mm.width * ratio, monitor.size_mm.height * ratio);
    Rect::from_origin_size(origin, size)
}

/// Map an image-space rectangle into preview space corner by corner
pub fn image_rect_to_preview_rect(rect: Rect, preview: Size, image: PixelSize) -> Rect {
    let corners = rect
        .corners()
        .map(|corner| image_px_to_preview_px(corner, preview, image));
    Rect::bounding(&corners).unwrap_or_default()
}

/// Rectangle drawn for a monitor on the preview canvas
pub fn monitor_preview_rect(
    monitor: &MonitorSpec,
    view: &ViewTransform,
    preview: Size,
    image: PixelSize,
) -> Rect {
    image_rect_to_preview_rect(monitor_image_rect(monitor, view, image), preview, image)
}

/// Rounded number of source pixels the monitor selection covers per axis
pub fn effective_px(monitor: &MonitorSpec, view: &ViewTransform, image: PixelSize) -> (i64, i64) {
    let ratio = effective_ratio(view, image);
    (
        (monitor.size_mm.width * ratio).round() as i64,
        (monitor.size_mm.height * ratio).round() as i64,
    )
}
