//! Source image type and the image load collaborator

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::domain::PixelSize;
use crate::render::surface::pixmap_from_rgba;

/// A decoded source image, held as a premultiplied drawable pixmap
///
/// Immutable once built. A new load replaces it wholesale.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub pixmap: Pixmap,
}

impl SourceImage {
    /// Convert an already decoded image; the RGBA buffer is not kept
    pub fn new(rgba: RgbaImage) -> anyhow::Result<Self> {
        let pixmap = pixmap_from_rgba(&rgba).with_context(|| {
            format!(
                "Image of {}x{} pixels cannot be drawn",
                rgba.width(),
                rgba.height()
            )
        })?;
        log::debug!(
            "SourceImage loaded: {}x{} pixels",
            rgba.width(),
            rgba.height()
        );
        Ok(Self { pixmap })
    }

    /// Decode an image file of any format the `image` crate recognises
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let decoded = image::ImageReader::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("Failed to detect image format: {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode image: {}", path.display()))?;
        Self::new(decoded.to_rgba8())
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::rgba_from_pixmap;

    #[test]
    fn test_load_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        RgbaImage::from_pixel(40, 30, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let img = SourceImage::load(&path).unwrap();
        assert_eq!(img.size(), PixelSize::new(40, 30));
        assert_eq!(img.pixmap.width(), 40);
        assert_eq!(rgba_from_pixmap(&img.pixmap).get_pixel(5, 5).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(SourceImage::load(&path).is_err());
    }

    #[test]
    fn test_empty_image_is_rejected() {
        assert!(SourceImage::new(RgbaImage::new(0, 10)).is_err());
    }
}
