//! Designer state for the badge editing session.
//! Owns the edit state, the live preview and the design queue, and
//! applies user actions to them.

use std::path::Path;

use image::RgbaImage;
use uuid::Uuid;

use badgekit_core::{DesignerError, RenderError, Resolution, Result};

use crate::commands::QueueCommand;
use crate::export::{DocumentEncoder, ExportOptions, ExportPipeline, ExportedDocument};
use crate::geometry::{CanvasGeometry, ImagePlacement};
use crate::pdf::PdfEncoder;
use crate::queue::{DesignQueue, QueueItem};
use crate::renderer::{MaskRenderer, RenderStyle, SourceImage};
use crate::templates::{BadgeTemplate, TemplateCatalog};
use crate::viewport::{DragTracker, Viewport};

/// Session-wide settings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DesignerOptions {
    pub resolution: Resolution,
    pub style: RenderStyle,
    pub export: ExportOptions,
}

/// Designer state: one editing session
#[derive(Clone, Debug)]
pub struct DesignerState {
    options: DesignerOptions,
    template: BadgeTemplate,
    geometry: CanvasGeometry,
    viewport: Viewport,
    renderer: MaskRenderer,
    source: Option<SourceImage>,
    preview: Option<RgbaImage>,
    drag: DragTracker,
    queue: DesignQueue,
}

impl DesignerState {
    /// Creates a new session on the default template.
    pub fn new(options: DesignerOptions) -> Result<Self> {
        let template = *TemplateCatalog::default_template();
        let geometry = CanvasGeometry::new(&template, options.resolution)?;
        let viewport = Viewport::new(geometry.width(), geometry.height());
        Ok(Self {
            renderer: MaskRenderer::new(options.style),
            options,
            template,
            geometry,
            viewport,
            source: None,
            preview: None,
            drag: DragTracker::new(),
            queue: DesignQueue::new(),
        })
    }

    pub fn options(&self) -> &DesignerOptions {
        &self.options
    }

    pub fn template(&self) -> &BadgeTemplate {
        &self.template
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn queue(&self) -> &DesignQueue {
        &self.queue
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn show_mask(&self) -> bool {
        self.renderer.style().show_mask
    }

    /// The most recent editor preview, if an image is loaded
    pub fn preview(&self) -> Option<&RgbaImage> {
        self.preview.as_ref()
    }

    /// Where the image currently lands on the canvas
    pub fn placement(&self) -> Option<ImagePlacement> {
        self.viewport.placement()
    }

    fn require_image(&self) -> Result<()> {
        if self.source.is_none() {
            return Err(DesignerError::NoImageLoaded.into());
        }
        Ok(())
    }

    /// Installs a decoded image, fitting it to the canvas.
    pub fn load_image(&mut self, image: SourceImage) -> Result<()> {
        let (width, height) = image.size();
        tracing::info!("Loaded {}x{} image", width, height);
        self.viewport.set_image_size(width, height);
        self.source = Some(image);
        self.reset_view()
    }

    /// Decodes and installs an encoded image.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let image = SourceImage::decode(bytes)?;
        self.load_image(image)
    }

    /// Opens, decodes and installs an image file.
    pub fn open_image(&mut self, path: &Path) -> Result<()> {
        let image = SourceImage::open(path)?;
        self.load_image(image)
    }

    /// Switches template. The view is reset to a fresh cover-fit.
    pub fn select_template(&mut self, key: &str) -> Result<()> {
        let template = *TemplateCatalog::lookup(key)?;
        let geometry = CanvasGeometry::new(&template, self.options.resolution)?;
        self.viewport.set_canvas_size(geometry.width(), geometry.height());
        self.template = template;
        self.geometry = geometry;
        tracing::info!("Selected template {}", template);

        if self.source.is_some() {
            self.reset_view()?;
        }
        Ok(())
    }

    /// Sets the user zoom (clamped to the supported range).
    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        self.require_image()?;
        self.viewport.set_zoom(zoom);
        self.redraw()
    }

    /// Pans by a delta in canvas pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.require_image()?;
        self.viewport.pan_by(dx, dy);
        self.redraw()
    }

    /// Sets the pan offset from the canvas center.
    pub fn set_pan(&mut self, x: f64, y: f64) -> Result<()> {
        self.require_image()?;
        self.viewport.set_pan(x, y);
        self.redraw()
    }

    /// Starts a drag at a display position.
    pub fn start_drag(&mut self, x: f64, y: f64) -> Result<()> {
        self.require_image()?;
        self.drag.start(x, y);
        Ok(())
    }

    /// Moves an active drag. `displayed_width` is how wide the canvas is
    /// shown on screen. Without an active drag this does nothing.
    pub fn drag_to(&mut self, x: f64, y: f64, displayed_width: f64) -> Result<()> {
        if self.source.is_none() {
            return Ok(());
        }
        if let Some((dx, dy)) = self.drag.move_to(x, y) {
            self.viewport.pan_by_display(dx, dy, displayed_width);
            self.redraw()?;
        }
        Ok(())
    }

    /// Ends the active drag.
    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    /// Centers the image, keeping the zoom.
    pub fn center_image(&mut self) -> Result<()> {
        self.require_image()?;
        self.viewport.center();
        self.redraw()
    }

    /// Clears pan and zoom and refits the image.
    pub fn reset_view(&mut self) -> Result<()> {
        self.require_image()?;
        self.viewport.reset();
        self.redraw()
    }

    /// Toggles the preview overlay.
    pub fn set_show_mask(&mut self, show: bool) -> Result<()> {
        self.renderer.style_mut().show_mask = show;
        if self.source.is_some() {
            self.redraw()?;
        }
        Ok(())
    }

    /// Re-renders the editor preview.
    pub fn redraw(&mut self) -> Result<()> {
        self.preview =
            self.renderer
                .render_preview(&self.geometry, &self.viewport, self.source.as_ref())?;
        Ok(())
    }

    /// Renders the current design for print.
    pub fn render_export(&self) -> Result<Vec<u8>> {
        self.require_image()?;
        self.renderer
            .render_export(&self.geometry, &self.viewport, self.source.as_ref())?
            .ok_or_else(|| DesignerError::NoImageLoaded.into())
    }

    /// Renders the current design for print and queues it.
    ///
    /// The export raster is drawn on its own pixmap, so the editor preview
    /// is left as it was whether or not the render succeeds. A render
    /// failure is reported as [`DesignerError::QueueAdd`].
    pub fn add_to_queue(&mut self) -> Result<Uuid> {
        self.require_image()?;

        let raster = self.export_raster().map_err(|e| {
            tracing::error!("Queue error: {}", e);
            DesignerError::QueueAdd {
                message: e.to_string(),
            }
        })?;

        let id = self.queue.push(QueueItem::new(raster, self.template));
        tracing::info!(
            "Queued {} design ({} in queue)",
            self.template.key,
            self.queue.len()
        );
        Ok(id)
    }

    fn export_raster(&self) -> std::result::Result<Vec<u8>, RenderError> {
        self.renderer
            .render_export(&self.geometry, &self.viewport, self.source.as_ref())?
            .ok_or_else(|| RenderError::InvalidSource {
                reason: "no source image".to_string(),
            })
    }

    /// Applies a queue command.
    pub fn dispatch(&mut self, command: QueueCommand) -> Result<usize> {
        Ok(self.queue.apply(command)?)
    }

    /// Removes a queued design by id.
    pub fn remove_from_queue(&mut self, id: Uuid) -> Result<()> {
        self.dispatch(QueueCommand::Remove { id }).map(|_| ())
    }

    /// Removes every queued design.
    pub fn clear_queue(&mut self) {
        let count = self.queue.len();
        self.queue.clear();
        tracing::info!("Cleared {} design(s) from the queue", count);
    }

    /// Packs the queue and encodes it. An empty queue takes the current
    /// design first; with no image either, nothing is exported.
    pub fn export<E: DocumentEncoder>(&mut self, encoder: &mut E) -> Result<ExportedDocument> {
        if self.queue.is_empty() {
            if self.source.is_none() {
                return Err(DesignerError::NothingToExport.into());
            }
            self.add_to_queue()?;
        }
        ExportPipeline::new(self.options.export.clone()).export(&self.queue, encoder)
    }

    /// Exports the queue as PDF.
    pub fn export_pdf(&mut self) -> Result<ExportedDocument> {
        let mut encoder = PdfEncoder::new();
        self.export(&mut encoder)
    }
}
