//! Export pipeline: one resampled, PNG-encoded buffer per monitor
//!
//! Monitors are processed left to right (by `offset_mm.x`), strictly one at
//! a time, each on the blocking pool. The crop rectangle comes from
//! [`geometry::monitor_image_rect`], the same projection the preview draws.

pub mod archive;
pub mod deliver;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;

use crate::capture::image::SourceImage;
use crate::domain::{MonitorSpec, Point, Rect, ViewTransform, sorted_left_to_right};
use crate::render::geometry;
use crate::render::surface::{DrawingSurface, PixmapSurface};

/// File extension of exported images
pub const IMAGE_EXTENSION: &str = "png";

/// One named, encoded export result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub png: Vec<u8>,
}

/// Deterministic output name for the monitor at 1-based `index`
///
/// Path separators in the monitor name become `_` so every entry lands at
/// the archive root.
pub fn export_filename(index: usize, monitor: &MonitorSpec) -> String {
    let name = monitor.name.replace(['/', '\\'], "_");
    format!(
        "wallpaper_{:02}_{}_{}x{}.{}",
        index, name, monitor.target_px.width, monitor.target_px.height, IMAGE_EXTENSION
    )
}

/// Resample the monitor's selection into a buffer of exactly its target size
///
/// Parts of the selection outside the source image come out transparent.
pub fn render_monitor(
    image: &SourceImage,
    monitor: &MonitorSpec,
    view: &ViewTransform,
) -> anyhow::Result<RgbaImage> {
    let dims = monitor.target_px.dimensions().with_context(|| {
        format!(
            "Monitor {:?} has an empty target resolution {}x{}",
            monitor.name, monitor.target_px.width, monitor.target_px.height
        )
    })?;
    let mut surface = PixmapSurface::new(dims.width(), dims.height()).with_context(|| {
        format!(
            "Cannot allocate a {}x{} buffer for monitor {:?}",
            dims.width(),
            dims.height(),
            monitor.name
        )
    })?;

    let src = geometry::monitor_image_rect(monitor, view, image.size());
    let dest = Rect::from_origin_size(Point::ORIGIN, monitor.target_px.as_size());
    surface.draw_image(image, src, dest);
    Ok(surface.to_rgba())
}

/// Encode a buffer losslessly as 8-bit RGBA PNG
pub fn encode_png(img: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, img)?;
    Ok(buffer)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Produce every monitor's named PNG, in left-to-right order
///
/// Without an image or without monitors nothing is produced. The first
/// failure aborts the remaining monitors.
pub async fn export(
    image: Option<Arc<SourceImage>>,
    monitors: &[MonitorSpec],
    view: ViewTransform,
) -> anyhow::Result<Vec<ExportedImage>> {
    let Some(image) = image else {
        log::debug!("Export skipped: no image loaded");
        return Ok(Vec::new());
    };
    if monitors.is_empty() {
        log::debug!("Export skipped: no monitors loaded");
        return Ok(Vec::new());
    }

    let sorted = sorted_left_to_right(monitors);
    let mut exported = Vec::with_capacity(sorted.len());
    for (i, monitor) in sorted.into_iter().enumerate() {
        let filename = export_filename(i + 1, &monitor);
        let image = Arc::clone(&image);
        let png = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<u8>> {
            let buffer = render_monitor(&image, &monitor, &view)?;
            encode_png(&buffer)
        })
        .await
        .context("Export worker failed")?
        .with_context(|| format!("Failed to export {filename}"))?;

        log::debug!("Exported {} ({} bytes)", filename, png.len());
        exported.push(ExportedImage { filename, png });
    }
    Ok(exported)
}

/// Run the export and package the result into one archive blob
///
/// Returns `None` when there is nothing to export.
pub async fn export_archive(
    image: Option<Arc<SourceImage>>,
    monitors: &[MonitorSpec],
    view: ViewTransform,
) -> anyhow::Result<Option<Vec<u8>>> {
    let files = export(image, monitors, view).await?;
    if files.is_empty() {
        return Ok(None);
    }
    let blob = tokio::task::spawn_blocking(move || archive::package(&files))
        .await
        .context("Archive worker failed")??;
    Ok(Some(blob))
}
