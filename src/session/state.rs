//! Session state: the single owner of image, layout and view

use std::sync::Arc;

use anyhow::{Context, bail};

use crate::capture::image::SourceImage;
use crate::config::WallsplitConfig;
use crate::domain::{FitReport, MonitorSpec, PixelSize, Point, ViewTransform};
use crate::export;
use crate::render::preview::{self, OverlayStyle};
use crate::render::surface::{DrawingSurface, PixmapSurface};

use super::interaction::{InteractionController, ZoomSteps};
use super::messages::Msg;

/// Everything a preview/export session owns
///
/// Render and export only read this state. It is mutated through the load
/// operations and through [`Session::update`].
#[derive(Clone, Debug)]
pub struct Session {
    image: Option<Arc<SourceImage>>,
    monitors: Vec<MonitorSpec>,
    view: ViewTransform,
    preview_width: u32,
    preview: Option<PixelSize>,
    interaction: InteractionController,
    style: OverlayStyle,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&WallsplitConfig::default())
    }
}

impl Session {
    pub fn new(config: &WallsplitConfig) -> Self {
        Self {
            image: None,
            monitors: Vec::new(),
            view: ViewTransform::default(),
            preview_width: config.preview_width,
            preview: None,
            interaction: InteractionController::new(ZoomSteps::from(config)),
            style: OverlayStyle::from(config),
        }
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_deref()
    }

    pub fn monitors(&self) -> &[MonitorSpec] {
        &self.monitors
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Replace the source image and reset the view; monitors are kept
    pub fn load_image(&mut self, image: SourceImage) {
        log::info!("Loaded image {}x{}", image.width(), image.height());
        self.image = Some(Arc::new(image));
        self.interaction.pointer_up();
        self.resize_preview();
        self.reset_view();
    }

    /// Replace the monitor list wholesale; the view is kept
    pub fn load_layout(&mut self, monitors: Vec<MonitorSpec>) {
        log::info!("Loaded layout with {} monitors", monitors.len());
        self.monitors = monitors;
    }

    pub fn reset_view(&mut self) {
        self.view = ViewTransform::default();
    }

    /// Change the preview canvas width, recomputing its height
    pub fn set_preview_width(&mut self, width: u32) {
        self.preview_width = width.max(1);
        self.resize_preview();
    }

    fn resize_preview(&mut self) {
        self.preview = self
            .image
            .as_ref()
            .map(|image| preview::preview_canvas_size(self.preview_width, image.size()));
    }

    /// Set zoom and pan directly, rejecting a non-positive or non-finite scale
    pub fn set_view(&mut self, scale: f64, group_offset_mm: Point) -> anyhow::Result<()> {
        if !group_offset_mm.x.is_finite() || !group_offset_mm.y.is_finite() {
            bail!("Offset must be finite, got {:?}", group_offset_mm);
        }
        self.view = ViewTransform::new(scale, group_offset_mm)
            .with_context(|| format!("Scale must be a positive number, got {scale}"))?;
        Ok(())
    }

    /// Apply one input message; returns whether a redraw is needed
    pub fn update(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::PointerDown { x, y } => {
                self.interaction.pointer_down(Point::new(x, y));
                false
            }
            Msg::PointerMove { x, y } => {
                let (Some(image), Some(preview)) = (self.image.as_ref(), self.preview) else {
                    return false;
                };
                self.interaction.pointer_move(
                    Point::new(x, y),
                    &mut self.view,
                    preview.as_size(),
                    image.size(),
                )
            }
            Msg::PointerUp => {
                self.interaction.pointer_up();
                false
            }
            Msg::PointerLeave => {
                self.interaction.pointer_leave();
                false
            }
            Msg::Wheel { delta_y, fine } => self.interaction.wheel(delta_y, fine, &mut self.view),
            Msg::ResetView => {
                let changed = !self.view.is_identity();
                self.reset_view();
                changed
            }
        }
    }

    /// Apply a message and redraw into `surface` if the view changed
    ///
    /// Returns the fresh fit annotations when a redraw happened.
    pub fn handle<S: DrawingSurface>(&mut self, msg: Msg, surface: &mut S) -> Option<Vec<FitReport>> {
        self.update(msg).then(|| self.render(surface))
    }

    pub fn fit_reports(&self) -> Vec<FitReport> {
        match self.image.as_ref() {
            Some(image) => preview::fit_reports(&self.monitors, &self.view, image.size()),
            None => Vec::new(),
        }
    }

    /// Draw the current composition into `surface`
    pub fn render<S: DrawingSurface>(&self, surface: &mut S) -> Vec<FitReport> {
        preview::render(self.image(), &self.monitors, &self.view, &self.style, surface)
    }

    /// A surface of the preview canvas size, `None` before an image is loaded
    pub fn preview_surface(&self) -> Option<PixmapSurface> {
        let size = self.preview?;
        PixmapSurface::new(size.width, size.height)
    }

    pub async fn export_archive(&self) -> anyhow::Result<Option<Vec<u8>>> {
        export::export_archive(self.image.clone(), &self.monitors, self.view).await
    }
}
