//! # BadgeKit Core
//!
//! Core types and utilities shared by the BadgeKit crates:
//! the error taxonomy, physical/pixel unit conversion and
//! print-geometry constants.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{DesignerError, Error, ExportError, LayoutError, RenderError, Result};
pub use units::{format_zoom_percent, mm_to_pt, Resolution};
