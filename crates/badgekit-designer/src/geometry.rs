//! Canvas geometry for a badge template.
//!
//! Derives everything the renderer needs from a template and a print
//! resolution: the canvas size in pixels, the visible and bleed outlines,
//! and where the source image lands for a given pan and scale.

use badgekit_core::{RenderError, Resolution};

use crate::shapes::BoundaryPath;
use crate::templates::BadgeTemplate;

/// Canvas size and badge outlines for one template at one resolution.
#[derive(Debug, Clone)]
pub struct CanvasGeometry {
    template: BadgeTemplate,
    resolution: Resolution,
    width_px: u32,
    height_px: u32,
    visible: BoundaryPath,
    bleed: BoundaryPath,
}

impl CanvasGeometry {
    /// Compute the canvas for `template` at `resolution`.
    ///
    /// Canvas pixels are the bleed size times pixels-per-mm, each dimension
    /// rounded independently. Both outlines are centered on the canvas.
    pub fn new(template: &BadgeTemplate, resolution: Resolution) -> Result<Self, RenderError> {
        let width_px = resolution.mm_to_px_rounded(template.bleed_width_mm);
        let height_px = resolution.mm_to_px_rounded(template.bleed_height_mm);
        if width_px == 0 || height_px == 0 {
            return Err(RenderError::InvalidCanvasSize {
                width: width_px,
                height: height_px,
            });
        }

        let center_x = width_px as f32 / 2.0;
        let center_y = height_px as f32 / 2.0;
        let visible = template.kind.boundary(
            center_x,
            center_y,
            resolution.mm_to_px(template.visible_width_mm) as f32,
        )?;
        let bleed = template.kind.boundary(
            center_x,
            center_y,
            resolution.mm_to_px(template.bleed_width_mm) as f32,
        )?;

        tracing::debug!(
            "Canvas for {} at {}: {}x{} px",
            template.key,
            resolution,
            width_px,
            height_px
        );

        Ok(Self {
            template: *template,
            resolution,
            width_px,
            height_px,
            visible,
            bleed,
        })
    }

    /// Template this canvas was derived from
    pub fn template(&self) -> &BadgeTemplate {
        &self.template
    }

    /// Resolution this canvas was derived at
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.width_px
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.height_px
    }

    /// Canvas size as `(width, height)` in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Canvas center in pixels
    pub fn center(&self) -> (f64, f64) {
        (self.width_px as f64 / 2.0, self.height_px as f64 / 2.0)
    }

    /// Outline of the area guaranteed to stay visible
    pub fn visible_boundary(&self) -> &BoundaryPath {
        &self.visible
    }

    /// Outline of the cut (bleed) area
    pub fn bleed_boundary(&self) -> &BoundaryPath {
        &self.bleed
    }
}

/// Scale at which an image fully covers a canvas (cover-fit).
///
/// Returns 1.0 for degenerate image sizes.
pub fn cover_fit_scale(canvas_width: u32, canvas_height: u32, image_width: u32, image_height: u32) -> f64 {
    if image_width == 0 || image_height == 0 {
        return 1.0;
    }
    let scale_x = canvas_width as f64 / image_width as f64;
    let scale_y = canvas_height as f64 / image_height as f64;
    scale_x.max(scale_y)
}

/// Where the source image is drawn on the canvas.
///
/// The image is centered on `(center_x, center_y)` and drawn
/// `draw_width x draw_height` pixels large.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
    pub draw_width: f64,
    pub draw_height: f64,
}

impl ImagePlacement {
    /// Place an image of `image_size` on a canvas of `canvas_size`, offset
    /// from the canvas center by `pan` and scaled uniformly by `scale`.
    pub fn compute(
        canvas_size: (u32, u32),
        image_size: (u32, u32),
        pan: (f64, f64),
        scale: f64,
    ) -> Self {
        let center_x = canvas_size.0 as f64 / 2.0 + pan.0;
        let center_y = canvas_size.1 as f64 / 2.0 + pan.1;
        Self {
            center_x,
            center_y,
            scale,
            draw_width: image_size.0 as f64 * scale,
            draw_height: image_size.1 as f64 * scale,
        }
    }

    /// Left edge of the drawn image
    pub fn left(&self) -> f64 {
        self.center_x - self.draw_width / 2.0
    }

    /// Top edge of the drawn image
    pub fn top(&self) -> f64 {
        self.center_y - self.draw_height / 2.0
    }

    /// Whether the drawn image covers the whole `width x height` canvas
    pub fn covers(&self, width: u32, height: u32) -> bool {
        const EPS: f64 = 1e-6;
        self.left() <= EPS
            && self.top() <= EPS
            && self.left() + self.draw_width >= width as f64 - EPS
            && self.top() + self.draw_height >= height as f64 - EPS
    }
}
