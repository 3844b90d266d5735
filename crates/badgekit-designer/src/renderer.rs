//! Badge canvas renderer
//! Composites the positioned source image against a template using tiny-skia.
//!
//! Two modes:
//! - Preview: translucent overlay outside the visible area, dashed visible
//!   outline and a thin canvas edge
//! - Export: hard white mask outside the bleed area and a faint cut guide,
//!   serialized as PNG

use std::io::Cursor;
use std::path::Path as FsPath;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use lyon::path::{Event, Path};
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect,
    Stroke, StrokeDash, Transform,
};

use badgekit_core::constants::{MASK_EPSILON_PX, OVERLAY_ALPHA};
use badgekit_core::{DesignerError, RenderError};

use crate::geometry::{CanvasGeometry, ImagePlacement};
use crate::shapes::BoundaryPath;
use crate::viewport::Viewport;

const VISIBLE_OUTLINE_WIDTH: f32 = 2.0;
const VISIBLE_OUTLINE_DASH: [f32; 2] = [10.0, 8.0];
const CANVAS_EDGE_WIDTH: f32 = 1.0;
const CUT_GUIDE_WIDTH: f32 = 0.5;

fn background_color() -> Color {
    Color::WHITE
}
fn visible_outline_color() -> Color {
    Color::from_rgba8(16, 185, 129, 255)
}
fn canvas_edge_color() -> Color {
    Color::from_rgba8(239, 68, 68, 255)
}
fn cut_guide_color() -> Color {
    Color::from_rgba8(150, 150, 150, 128)
}

/// A decoded source bitmap ready to be drawn.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixmap: Pixmap,
}

impl SourceImage {
    /// Wraps an RGBA bitmap.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self, RenderError> {
        let (width, height) = image.dimensions();
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| RenderError::InvalidSource {
            reason: format!("cannot allocate {}x{} bitmap", width, height),
        })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self { pixmap })
    }

    /// Wraps any decoded image.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, RenderError> {
        Self::from_rgba(&image.to_rgba8())
    }

    /// Decodes an encoded image (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> Result<Self, DesignerError> {
        let image = image::load_from_memory(bytes).map_err(|e| DesignerError::ImageDecode {
            reason: e.to_string(),
        })?;
        Self::from_dynamic(&image).map_err(|e| DesignerError::ImageDecode {
            reason: e.to_string(),
        })
    }

    /// Opens and decodes an image file.
    pub fn open(path: &FsPath) -> Result<Self, DesignerError> {
        let image = image::open(path).map_err(|e| DesignerError::ImageDecode {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_dynamic(&image).map_err(|e| DesignerError::ImageDecode {
            reason: e.to_string(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Size as `(width, height)` in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }
}

/// Which raster to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Live editor view
    Preview,
    /// Print raster
    Export,
}

/// Tunables for both render modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Opacity of the preview overlay outside the visible area
    pub overlay_alpha: f32,
    /// Pixels the bleed shape is grown by before masking
    pub mask_epsilon_px: f32,
    /// Draw the preview overlay and outlines
    pub show_mask: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            overlay_alpha: OVERLAY_ALPHA,
            mask_epsilon_px: MASK_EPSILON_PX,
            show_mask: true,
        }
    }
}

/// Renders badge canvases in preview or export mode
#[derive(Debug, Clone, Default)]
pub struct MaskRenderer {
    style: RenderStyle,
}

impl MaskRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut RenderStyle {
        &mut self.style
    }

    /// Render the canvas. Returns `Ok(None)` when no source image is given.
    pub fn render(
        &self,
        geometry: &CanvasGeometry,
        viewport: &Viewport,
        source: Option<&SourceImage>,
        mode: RenderMode,
    ) -> Result<Option<Pixmap>, RenderError> {
        let Some(source) = source else {
            return Ok(None);
        };

        let (width, height) = geometry.size();
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidCanvasSize { width, height })?;
        pixmap.fill(background_color());

        let placement = ImagePlacement::compute(
            geometry.size(),
            source.size(),
            (viewport.pan_x(), viewport.pan_y()),
            viewport.effective_scale(),
        );
        draw_source(&mut pixmap, source, &placement);

        match mode {
            RenderMode::Preview => {
                if self.style.show_mask {
                    self.draw_preview_overlay(&mut pixmap, geometry)?;
                }
            }
            RenderMode::Export => self.draw_export_mask(&mut pixmap, geometry)?,
        }

        tracing::debug!(
            "Rendered {:?} canvas {}x{} (scale {:.4}, pan {:.1},{:.1})",
            mode,
            width,
            height,
            placement.scale,
            viewport.pan_x(),
            viewport.pan_y()
        );

        Ok(Some(pixmap))
    }

    /// Editor preview as an RGBA bitmap
    pub fn render_preview(
        &self,
        geometry: &CanvasGeometry,
        viewport: &Viewport,
        source: Option<&SourceImage>,
    ) -> Result<Option<RgbaImage>, RenderError> {
        Ok(self
            .render(geometry, viewport, source, RenderMode::Preview)?
            .map(|pixmap| pixmap_to_rgba(&pixmap)))
    }

    /// Export raster as an RGBA bitmap
    pub fn render_export_image(
        &self,
        geometry: &CanvasGeometry,
        viewport: &Viewport,
        source: Option<&SourceImage>,
    ) -> Result<Option<RgbaImage>, RenderError> {
        Ok(self
            .render(geometry, viewport, source, RenderMode::Export)?
            .map(|pixmap| pixmap_to_rgba(&pixmap)))
    }

    /// Export raster encoded as PNG
    pub fn render_export(
        &self,
        geometry: &CanvasGeometry,
        viewport: &Viewport,
        source: Option<&SourceImage>,
    ) -> Result<Option<Vec<u8>>, RenderError> {
        match self.render_export_image(geometry, viewport, source)? {
            Some(image) => encode_png(&image).map(Some),
            None => Ok(None),
        }
    }

    fn draw_preview_overlay(
        &self,
        pixmap: &mut Pixmap,
        geometry: &CanvasGeometry,
    ) -> Result<(), RenderError> {
        let visible = geometry.visible_boundary();

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color_rgba8(255, 255, 255, alpha_u8(self.style.overlay_alpha));
        let hole = hole_path(pixmap.width(), pixmap.height(), visible)?;
        pixmap.fill_path(&hole, &paint, FillRule::EvenOdd, Transform::identity(), None);

        let outline = to_skia_path(visible.path()).ok_or_else(|| path_error(visible))?;
        paint.set_color(visible_outline_color());
        let stroke = Stroke {
            width: VISIBLE_OUTLINE_WIDTH,
            dash: StrokeDash::new(VISIBLE_OUTLINE_DASH.to_vec(), 0.0),
            ..Default::default()
        };
        pixmap.stroke_path(&outline, &paint, &stroke, Transform::identity(), None);

        let inset = CANVAS_EDGE_WIDTH / 2.0;
        if let Some(rect) = Rect::from_xywh(
            inset,
            inset,
            pixmap.width() as f32 - CANVAS_EDGE_WIDTH,
            pixmap.height() as f32 - CANVAS_EDGE_WIDTH,
        ) {
            let edge = PathBuilder::from_rect(rect);
            paint.set_color(canvas_edge_color());
            let stroke = Stroke {
                width: CANVAS_EDGE_WIDTH,
                ..Default::default()
            };
            pixmap.stroke_path(&edge, &paint, &stroke, Transform::identity(), None);
        }
        Ok(())
    }

    fn draw_export_mask(
        &self,
        pixmap: &mut Pixmap,
        geometry: &CanvasGeometry,
    ) -> Result<(), RenderError> {
        let bleed = geometry.bleed_boundary();
        let grown = bleed.inflated(self.style.mask_epsilon_px)?;

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(background_color());
        let hole = hole_path(pixmap.width(), pixmap.height(), &grown)?;
        pixmap.fill_path(&hole, &paint, FillRule::EvenOdd, Transform::identity(), None);

        let guide = to_skia_path(bleed.path()).ok_or_else(|| path_error(bleed))?;
        paint.set_color(cut_guide_color());
        let stroke = Stroke {
            width: CUT_GUIDE_WIDTH,
            ..Default::default()
        };
        pixmap.stroke_path(&guide, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }
}

fn draw_source(pixmap: &mut Pixmap, source: &SourceImage, placement: &ImagePlacement) {
    let scale = placement.scale as f32;
    let transform =
        Transform::from_scale(scale, scale).post_translate(placement.left() as f32, placement.top() as f32);
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, source.pixmap.as_ref(), &paint, transform, None);
}

fn alpha_u8(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn path_error(boundary: &BoundaryPath) -> RenderError {
    RenderError::PathBuild {
        shape: boundary.kind().to_string(),
    }
}

fn push_lyon_path(pb: &mut PathBuilder, path: &Path) {
    for event in path.iter() {
        match event {
            Event::Begin { at } => pb.move_to(at.x, at.y),
            Event::Line { to, .. } => pb.line_to(to.x, to.y),
            Event::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
}

/// Convert a lyon path to a tiny-skia path
pub fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    push_lyon_path(&mut pb, path);
    pb.finish()
}

/// Canvas rectangle plus the shape as one path. Filled even-odd, it covers
/// exactly the canvas area outside the shape.
fn hole_path(width: u32, height: u32, shape: &BoundaryPath) -> Result<tiny_skia::Path, RenderError> {
    let rect = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .ok_or(RenderError::InvalidCanvasSize { width, height })?;
    let mut pb = PathBuilder::new();
    pb.push_rect(rect);
    push_lyon_path(&mut pb, shape.path());
    pb.finish().ok_or_else(|| path_error(shape))
}

/// Copy a pixmap into a straight-alpha RGBA bitmap
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let color = pixels[(y * width + x) as usize].demultiply();
        Rgba([color.red(), color.green(), color.blue(), color.alpha()])
    })
}

/// Encode a bitmap as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| RenderError::Encode {
            reason: e.to_string(),
        })?;
    Ok(bytes.into_inner())
}
