//! Viewport state for positioning the source image on the badge canvas.
//!
//! Pan is kept in canvas pixels relative to the canvas center. Zoom is a
//! user multiplier on top of the cover-fit scale, so zoom 1.0 always means
//! "the image just covers the canvas".

use std::fmt;

use badgekit_core::constants::{MAX_ZOOM, MIN_ZOOM};
use badgekit_core::format_zoom_percent;

use crate::geometry::{cover_fit_scale, ImagePlacement};

/// Represents the image transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    base_fit_scale: f64,
    canvas_width: u32,
    canvas_height: u32,
    image_size: Option<(u32, u32)>,
}

impl Viewport {
    /// Creates a new viewport for a canvas with no image.
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            base_fit_scale: 1.0,
            canvas_width,
            canvas_height,
            image_size: None,
        }
    }

    /// Gets the canvas size in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Sets the canvas dimensions (called when the template changes) and
    /// recomputes the fit scale.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.refit();
    }

    /// Gets the loaded image size, if any.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    /// Sets the image dimensions (called after a decode) and recomputes the
    /// fit scale.
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.refit();
    }

    /// Forgets the image.
    pub fn clear_image(&mut self) {
        self.image_size = None;
        self.base_fit_scale = 1.0;
    }

    fn refit(&mut self) {
        self.base_fit_scale = match self.image_size {
            Some((w, h)) => cover_fit_scale(self.canvas_width, self.canvas_height, w, h),
            None => 1.0,
        };
    }

    /// Gets the current user zoom (1.0 = cover-fit).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the user zoom, clamped to the supported range.
    ///
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            tracing::warn!("Ignoring non-finite zoom {}", zoom);
            return;
        }
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if clamped != zoom {
            tracing::warn!("Zoom {} clamped to {}", zoom, clamped);
        }
        self.zoom = clamped;
    }

    /// Zoom as a whole percent string.
    pub fn zoom_percent(&self) -> String {
        format_zoom_percent(self.zoom)
    }

    /// Scale that makes the image cover the canvas.
    pub fn base_fit_scale(&self) -> f64 {
        self.base_fit_scale
    }

    /// Scale the image is actually drawn at.
    pub fn effective_scale(&self) -> f64 {
        self.base_fit_scale * self.zoom
    }

    /// Gets the pan offset (X coordinate).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pan_x = x;
            self.pan_y = y;
        }
    }

    /// Pans by a delta in canvas pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.pan_x += dx;
            self.pan_y += dy;
        }
    }

    /// Pans by a delta measured on a display where the canvas is shown
    /// `displayed_width` pixels wide.
    pub fn pan_by_display(&mut self, dx: f64, dy: f64, displayed_width: f64) {
        let ratio = self.display_ratio(displayed_width);
        self.pan_by(dx * ratio, dy * ratio);
    }

    /// Canvas pixels per displayed pixel.
    pub fn display_ratio(&self, displayed_width: f64) -> f64 {
        if displayed_width.is_finite() && displayed_width > 0.0 {
            self.canvas_width as f64 / displayed_width
        } else {
            1.0
        }
    }

    /// Centers the image, keeping the zoom.
    pub fn center(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Resets viewport to default state (no pan, zoom 1.0, fresh fit).
    pub fn reset(&mut self) {
        self.center();
        self.zoom = 1.0;
        self.refit();
    }

    /// Where the image lands on the canvas, if one is loaded.
    pub fn placement(&self) -> Option<ImagePlacement> {
        self.image_size.map(|image_size| {
            ImagePlacement::compute(
                self.canvas_size(),
                image_size,
                (self.pan_x, self.pan_y),
                self.effective_scale(),
            )
        })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {} | Pan: ({:.1}, {:.1})",
            self.zoom_percent(),
            self.pan_x,
            self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(780, 780)
    }
}

/// Turns a stream of pointer positions into pan deltas.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    last: Option<(f64, f64)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag at a display position.
    pub fn start(&mut self, x: f64, y: f64) {
        self.last = Some((x, y));
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Moves the pointer and returns the display delta since the last
    /// position. Returns `None` when no drag is in progress.
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (last_x, last_y) = self.last?;
        self.last = Some((x, y));
        Some((x - last_x, y - last_y))
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.last = None;
    }
}
