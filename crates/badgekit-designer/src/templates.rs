//! # Badge Template Catalog
//!
//! Static registry of the die-cut badge blanks the designer supports.
//!
//! Each template pairs a shape kind with two physical sizes:
//! - the **visible** area, guaranteed to stay unobstructed once the badge
//!   is mounted
//! - the **bleed** area, the outer boundary the cutter works on; the image
//!   must cover it completely
//!
//! Bleed is never smaller than visible in either dimension.

use serde::Serialize;
use std::fmt;

use crate::shapes::ShapeKind;
use badgekit_core::DesignerError;

/// Key of the template selected when a session starts
pub const DEFAULT_TEMPLATE_KEY: &str = "circle60";

/// An immutable badge template
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeTemplate {
    /// Catalog key used for lookups and job files
    pub key: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Shape of the cut
    pub kind: ShapeKind,
    /// Visible area width (mm)
    pub visible_width_mm: f64,
    /// Visible area height (mm)
    pub visible_height_mm: f64,
    /// Bleed area width (mm)
    pub bleed_width_mm: f64,
    /// Bleed area height (mm)
    pub bleed_height_mm: f64,
}

impl BadgeTemplate {
    /// Physical bleed size as `(width, height)` in millimeters
    pub fn bleed_size_mm(&self) -> (f64, f64) {
        (self.bleed_width_mm, self.bleed_height_mm)
    }

    /// Physical visible size as `(width, height)` in millimeters
    pub fn visible_size_mm(&self) -> (f64, f64) {
        (self.visible_width_mm, self.visible_height_mm)
    }
}

impl fmt::Display for BadgeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): visible {}x{}mm, bleed {}x{}mm",
            self.name,
            self.key,
            self.visible_width_mm,
            self.visible_height_mm,
            self.bleed_width_mm,
            self.bleed_height_mm
        )
    }
}

const CATALOG: [BadgeTemplate; 3] = [
    BadgeTemplate {
        key: "circle60",
        name: "Circle 60mm",
        kind: ShapeKind::Circle,
        visible_width_mm: 60.0,
        visible_height_mm: 60.0,
        bleed_width_mm: 66.0,
        bleed_height_mm: 66.0,
    },
    BadgeTemplate {
        key: "circle45",
        name: "Circle 45mm",
        kind: ShapeKind::Circle,
        visible_width_mm: 45.0,
        visible_height_mm: 45.0,
        bleed_width_mm: 51.0,
        bleed_height_mm: 51.0,
    },
    BadgeTemplate {
        key: "heart",
        name: "Heart",
        kind: ShapeKind::Heart,
        visible_width_mm: 55.0,
        visible_height_mm: 50.0,
        bleed_width_mm: 61.0,
        bleed_height_mm: 56.0,
    },
];

/// Read-only access to the built-in templates
pub struct TemplateCatalog;

impl TemplateCatalog {
    /// All templates in display order
    pub fn all() -> &'static [BadgeTemplate] {
        &CATALOG
    }

    /// Look up a template by key
    pub fn get(key: &str) -> Option<&'static BadgeTemplate> {
        CATALOG.iter().find(|t| t.key == key)
    }

    /// Look up a template by key, reporting unknown keys as an error
    pub fn lookup(key: &str) -> Result<&'static BadgeTemplate, DesignerError> {
        Self::get(key).ok_or_else(|| DesignerError::UnknownTemplate {
            key: key.to_string(),
        })
    }

    /// The template a new session starts with
    pub fn default_template() -> &'static BadgeTemplate {
        &CATALOG[0]
    }

    /// All catalog keys
    pub fn keys() -> Vec<&'static str> {
        CATALOG.iter().map(|t| t.key).collect()
    }

    /// Templates of one shape kind
    pub fn by_kind(kind: ShapeKind) -> Vec<&'static BadgeTemplate> {
        CATALOG.iter().filter(|t| t.kind == kind).collect()
    }
}
