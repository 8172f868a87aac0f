//! 2D drawing surface used by the preview and by export resampling
//!
//! [`PixmapSurface`] is backed by tiny-skia. Both the preview composition
//! and the per-monitor export buffers are produced by blitting through
//! [`DrawingSurface::draw_image`], so they share one resampling filter.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::capture::image::SourceImage;
use crate::config::OverlayColor;
use crate::domain::{Point, Rect, Size};

use super::geometry::overlay::{FONT_HEIGHT, GLYPH_WIDTH};

/// Drawing primitives the render and export pipelines need
pub trait DrawingSurface {
    /// Surface extent in pixels
    fn size(&self) -> Size;

    /// Reset every pixel to transparent
    fn clear(&mut self);

    /// Resample the `src` region of `image` into the `dest` region of the surface
    fn draw_image(&mut self, image: &SourceImage, src: Rect, dest: Rect);

    /// Outline a rectangle, the stroke centered on its edges
    fn stroke_rect(&mut self, rect: Rect, color: OverlayColor, width: f32);

    /// Fill a rectangle, blending over existing pixels
    fn fill_rect(&mut self, rect: Rect, color: OverlayColor);

    /// Draw a single line of text whose baseline starts at `baseline`
    fn draw_text(&mut self, text: &str, baseline: Point, color: OverlayColor);
}

/// Build a premultiplied pixmap from a straight-alpha image
///
/// Returns `None` for empty or oversized images.
pub fn pixmap_from_rgba(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Convert a premultiplied pixmap back into a straight-alpha image
pub fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    img
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(
        rect.left as f32,
        rect.top as f32,
        rect.right as f32,
        rect.bottom as f32,
    )
}

fn paint_for(color: OverlayColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Raster surface backed by a tiny-skia pixmap
#[derive(Clone, Debug)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Create a transparent surface, `None` if either dimension is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    /// Straight-alpha copy of the surface contents
    pub fn to_rgba(&self) -> RgbaImage {
        rgba_from_pixmap(&self.pixmap)
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size())
    }

    /// Clip mask for `dest`, `None` when `dest` covers the whole surface
    fn clip_mask(&self, dest: Rect) -> Option<Mask> {
        if dest.intersect(self.bounds()) == Some(self.bounds()) {
            return None;
        }
        let path = PathBuilder::from_rect(to_skia_rect(dest)?);
        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
        mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
        Some(mask)
    }
}

impl DrawingSurface for PixmapSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.pixmap.width()), f64::from(self.pixmap.height()))
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn draw_image(&mut self, image: &SourceImage, src: Rect, dest: Rect) {
        // Degenerate selections produce nothing rather than a mirrored image
        let positive = |r: Rect| r.width() > 0.0 && r.height() > 0.0;
        if !(positive(src) && positive(dest)) {
            log::debug!("Skipping blit of degenerate rect {:?} -> {:?}", src, dest);
            return;
        }

        let sx = dest.width() / src.width();
        let sy = dest.height() / src.height();
        let (tx, ty) = (dest.left - src.left * sx, dest.top - src.top * sy);
        if ![sx, sy, tx, ty].iter().all(|v| v.is_finite()) {
            log::debug!("Skipping blit with non-finite transform {:?} -> {:?}", src, dest);
            return;
        }
        let transform = Transform::from_row(
            sx as f32,
            0.0,
            0.0,
            sy as f32,
            tx as f32,
            ty as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let mask = self.clip_mask(dest);
        self.pixmap
            .draw_pixmap(0, 0, image.pixmap.as_ref(), &paint, transform, mask.as_ref());
    }

    fn stroke_rect(&mut self, rect: Rect, color: OverlayColor, width: f32) {
        let Some(skia_rect) = to_skia_rect(rect) else {
            return;
        };
        let path = PathBuilder::from_rect(skia_rect);
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
    }

    fn fill_rect(&mut self, rect: Rect, color: OverlayColor) {
        if let Some(skia_rect) = to_skia_rect(rect) {
            self.pixmap
                .fill_rect(skia_rect, &paint_for(color), Transform::identity(), None);
        }
    }

    fn draw_text(&mut self, text: &str, baseline: Point, color: OverlayColor) {
        // Labels entirely off the surface are skipped, which also keeps the
        // pixel cursor within i32 range
        if !(baseline.x.is_finite() && baseline.y.is_finite()) {
            return;
        }
        let extent = GLYPH_WIDTH * text.chars().count() as f64;
        let label = Rect::new(baseline.x, baseline.y - FONT_HEIGHT, baseline.x + extent, baseline.y);
        if label.intersect(self.bounds()).is_none() {
            return;
        }

        let mut paint = paint_for(color);
        paint.anti_alias = false;

        let advance = GLYPH_WIDTH as i32;
        let top = label.top.round() as i32;
        let mut cursor_x = label.left.round() as i32;
        for ch in text.chars() {
            let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
                cursor_x += advance;
                continue;
            };
            for (row_idx, row_bits) in glyph.iter().enumerate() {
                for col_idx in 0..advance {
                    if (row_bits >> col_idx) & 1 == 0 {
                        continue;
                    }
                    let x = cursor_x + col_idx;
                    let y = top + row_idx as i32;
                    if let Some(px) = tiny_skia::Rect::from_xywh(x as f32, y as f32, 1.0, 1.0) {
                        self.pixmap.fill_rect(px, &paint, Transform::identity(), None);
                    }
                }
            }
            cursor_x += advance;
        }
    }
}
