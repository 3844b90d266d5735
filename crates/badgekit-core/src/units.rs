//! Unit conversion utilities
//!
//! Handles conversion between physical units (millimeters, PDF points) and
//! raster pixels at a given print resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Print resolution, stored as dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    dpi: f64,
}

impl Resolution {
    /// Create a resolution from dots per inch. Non-positive or non-finite
    /// values fall back to the default print resolution.
    pub fn from_dpi(dpi: f64) -> Self {
        if dpi.is_finite() && dpi > 0.0 {
            Self { dpi }
        } else {
            Self::default()
        }
    }

    /// Dots per inch
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Pixels per millimeter (about 11.811 at 300 DPI)
    pub fn px_per_mm(&self) -> f64 {
        self.dpi / MM_PER_INCH
    }

    /// Convert a physical length to fractional pixels
    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm * self.px_per_mm()
    }

    /// Convert a physical length to whole pixels, rounded to nearest
    pub fn mm_to_px_rounded(&self, mm: f64) -> u32 {
        self.mm_to_px(mm).round().max(0.0) as u32
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            dpi: crate::constants::DEFAULT_DPI,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} DPI", self.dpi)
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix("dpi")
            .or_else(|| trimmed.strip_suffix("DPI"))
            .unwrap_or(trimmed)
            .trim();
        let dpi = number
            .parse::<f64>()
            .map_err(|e| format!("Invalid resolution '{}': {}", s, e))?;
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(format!("Resolution must be positive: {}", s));
        }
        Ok(Self { dpi })
    }
}

/// Convert millimeters to PDF points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Format a zoom multiplier as a whole percentage ("100%")
pub fn format_zoom_percent(zoom: f64) -> String {
    format!("{}%", (zoom * 100.0).round() as i64)
}
