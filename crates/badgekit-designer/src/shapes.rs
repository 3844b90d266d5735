//! Boundary paths for badge shapes.
//!
//! Every caller that needs the outline of a badge (geometry, preview
//! overlay, export mask, cut guide) asks [`ShapeKind::boundary`] for it, so
//! the editor and the printed raster can never disagree on the shape.
//!
//! Paths are built with lyon in canvas pixel space (origin top-left, +Y down).

use lyon::algorithms::aabb::bounding_box;
use lyon::algorithms::hit_test::hit_test_path;
use lyon::math::{point, vector, Point, Transform};
use lyon::path::iterator::PathIterator;
use lyon::path::{FillRule, Path, PathEvent, Winding};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use badgekit_core::RenderError;

/// Width of the heart contour in its own reference units (x from 2 to 22).
pub const HEART_REFERENCE_WIDTH: f32 = 20.0;

// Reference point that lands on the requested center.
const HEART_ANCHOR_X: f32 = 12.0;
const HEART_ANCHOR_Y: f32 = 11.0;

const HIT_TOLERANCE: f32 = 0.01;
const FLATTEN_TOLERANCE: f32 = 0.05;

/// Shape of a die-cut badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Heart,
}

impl ShapeKind {
    /// Get kind as string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Heart => "heart",
        }
    }

    /// Build the outline of this shape, `size` pixels wide, centered on
    /// `(center_x, center_y)`.
    pub fn boundary(
        &self,
        center_x: f32,
        center_y: f32,
        size: f32,
    ) -> Result<BoundaryPath, RenderError> {
        if !size.is_finite() || size <= 0.0 || !center_x.is_finite() || !center_y.is_finite() {
            return Err(RenderError::PathBuild {
                shape: self.as_str().to_string(),
            });
        }

        let path = match self {
            ShapeKind::Circle => circle_path(center_x, center_y, size),
            ShapeKind::Heart => heart_path(center_x, center_y, size),
        };

        Ok(BoundaryPath {
            kind: *self,
            center_x,
            center_y,
            size,
            path,
        })
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "heart" => Ok(ShapeKind::Heart),
            _ => Err(format!("Unknown shape kind: {}", s)),
        }
    }
}

fn circle_path(center_x: f32, center_y: f32, diameter: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_circle(
        point(center_x, center_y),
        diameter / 2.0,
        Winding::Positive,
    );
    builder.build()
}

/// The heart glyph in reference units. Its horizontal extent is exactly
/// [`HEART_REFERENCE_WIDTH`].
fn heart_contour() -> Path {
    let mut builder = Path::builder();
    builder.begin(point(12.0, 21.35));
    builder.line_to(point(10.55, 20.03));
    builder.cubic_bezier_to(point(5.4, 15.36), point(2.0, 12.28), point(2.0, 8.5));
    builder.cubic_bezier_to(point(2.0, 5.42), point(4.42, 3.0), point(7.5, 3.0));
    builder.cubic_bezier_to(point(9.24, 3.0), point(10.91, 3.81), point(12.0, 5.09));
    builder.cubic_bezier_to(point(13.09, 3.81), point(14.76, 3.0), point(16.5, 3.0));
    builder.cubic_bezier_to(point(19.58, 3.0), point(22.0, 5.42), point(22.0, 8.5));
    builder.cubic_bezier_to(point(22.0, 12.28), point(18.6, 15.36), point(13.45, 20.03));
    builder.line_to(point(12.0, 21.35));
    builder.end(true);
    builder.build()
}

fn heart_path(center_x: f32, center_y: f32, width: f32) -> Path {
    let scale = width / HEART_REFERENCE_WIDTH;
    // Reference (2, 0) maps to (cx - width/2, cy - 11/20 * width).
    let transform = Transform::scale(scale, scale).then_translate(vector(
        center_x - HEART_ANCHOR_X * scale,
        center_y - HEART_ANCHOR_Y * scale,
    ));
    heart_contour().transformed(&transform)
}

/// A closed shape outline in canvas pixel space.
#[derive(Debug, Clone)]
pub struct BoundaryPath {
    kind: ShapeKind,
    center_x: f32,
    center_y: f32,
    size: f32,
    path: Path,
}

impl BoundaryPath {
    /// Shape kind of this outline
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Requested width in pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Point the outline is centered on
    pub fn center(&self) -> (f32, f32) {
        (self.center_x, self.center_y)
    }

    /// Underlying lyon path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let bb = bounding_box(self.path.iter());
        (bb.min.x, bb.min.y, bb.max.x, bb.max.y)
    }

    /// Horizontal extent of the outline
    pub fn width(&self) -> f32 {
        let (min_x, _, max_x, _) = self.bounds();
        max_x - min_x
    }

    /// Vertical extent of the outline
    pub fn height(&self) -> f32 {
        let (_, min_y, _, max_y) = self.bounds();
        max_y - min_y
    }

    /// Even-odd containment test
    pub fn contains(&self, x: f32, y: f32) -> bool {
        hit_test_path(
            &point(x, y),
            self.path.iter(),
            FillRule::EvenOdd,
            HIT_TOLERANCE,
        )
    }

    /// The same shape rebuilt `epsilon` pixels larger on every side
    pub fn inflated(&self, epsilon: f32) -> Result<BoundaryPath, RenderError> {
        self.kind
            .boundary(self.center_x, self.center_y, self.size + 2.0 * epsilon)
    }

    /// Outline flattened to line segments
    pub fn polyline(&self) -> Vec<(Point, Point)> {
        let mut segments = Vec::new();
        for event in self.path.iter().flattened(FLATTEN_TOLERANCE) {
            match event {
                PathEvent::Line { from, to } => segments.push((from, to)),
                PathEvent::End {
                    last,
                    first,
                    close: true,
                } if last != first => segments.push((last, first)),
                _ => {}
            }
        }
        segments
    }

    /// Distance from a point to the nearest part of the outline
    pub fn distance_to_edge(&self, x: f32, y: f32) -> f32 {
        let p = point(x, y);
        self.polyline()
            .into_iter()
            .map(|(a, b)| distance_to_segment(p, a, b))
            .fold(f32::INFINITY, f32::min)
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len_sq = ab.square_length();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}
