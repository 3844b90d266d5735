//! Shared constants for print geometry and editor behavior.

/// Default print resolution in dots per inch
pub const DEFAULT_DPI: f64 = 300.0;

/// A4 page width in millimeters
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 page height in millimeters
pub const A4_HEIGHT_MM: f64 = 297.0;
/// Default page margin in millimeters
pub const PAGE_MARGIN_MM: f64 = 10.0;
/// Default gap between packed items in millimeters
pub const ITEM_GAP_MM: f64 = 2.0;

/// Smallest user zoom multiplier
pub const MIN_ZOOM: f64 = 0.1;
/// Largest user zoom multiplier
pub const MAX_ZOOM: f64 = 3.0;

/// Pixels added to the bleed shape before masking so no unmasked
/// anti-aliasing rim is left at the cut edge
pub const MASK_EPSILON_PX: f32 = 1.0;

/// Opacity of the editor overlay outside the visible area
pub const OVERLAY_ALPHA: f32 = 0.7;
