use kurbo::Shape;

use crate::foundation::core::{BezPath, Rect};
use crate::foundation::error::{CaseforgeError, CaseforgeResult};

/// A primitive vector shape as authored in a template document.
///
/// Every variant reduces to a single closed path-command string (SVG `d`
/// syntax) and an exact axis-aligned bounding box. Path output sticks to
/// move/line/arc primitives so downstream consumers that only understand
/// line/arc segments stay compatible.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ShapeGeometry {
    /// Axis-aligned rectangle with optional per-axis corner radius.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Horizontal extent, must be > 0.
        width: f64,
        /// Vertical extent, must be > 0.
        height: f64,
        /// Corner radius along x; 0 means square corners.
        rx: f64,
        /// Corner radius along y; 0 means square corners.
        ry: f64,
    },
    /// Circle.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius, must be > 0.
        r: f64,
    },
    /// Ellipse.
    Ellipse {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius along x, must be > 0.
        rx: f64,
        /// Radius along y, must be > 0.
        ry: f64,
    },
    /// An already-path-encoded shape (SVG `d` attribute data).
    Path {
        /// Raw path-command string.
        d: String,
    },
}

impl ShapeGeometry {
    /// Reject shapes with zero or negative extent.
    pub fn validate(&self) -> CaseforgeResult<()> {
        let bad = |what: &str| {
            Err(CaseforgeError::degenerate_shape(format!(
                "{what} must be finite and > 0"
            )))
        };
        match self {
            Self::Rect { width, height, rx, ry, .. } => {
                if !width.is_finite() || *width <= 0.0 {
                    return bad("rect width");
                }
                if !height.is_finite() || *height <= 0.0 {
                    return bad("rect height");
                }
                if !rx.is_finite() || *rx < 0.0 || !ry.is_finite() || *ry < 0.0 {
                    return Err(CaseforgeError::degenerate_shape(
                        "rect corner radius must be finite and >= 0",
                    ));
                }
                Ok(())
            }
            Self::Circle { r, .. } => {
                if !r.is_finite() || *r <= 0.0 {
                    return bad("circle radius");
                }
                Ok(())
            }
            Self::Ellipse { rx, ry, .. } => {
                if !rx.is_finite() || *rx <= 0.0 {
                    return bad("ellipse rx");
                }
                if !ry.is_finite() || *ry <= 0.0 {
                    return bad("ellipse ry");
                }
                Ok(())
            }
            Self::Path { d } => {
                if d.trim().is_empty() {
                    return Err(CaseforgeError::degenerate_shape(
                        "path data must be non-empty",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Convert to a single closed SVG path-command string.
    ///
    /// - Plain rect: 4-segment closed polygon.
    /// - Rounded rect: 8-segment contour alternating straight edges and
    ///   quarter-round corners; the radius is clamped to half of the shorter
    ///   side.
    /// - Circle/ellipse: 4 quarter-arc contour, not a single ellipse command.
    pub fn to_path_d(&self) -> CaseforgeResult<String> {
        self.validate()?;
        match *self {
            Self::Rect { x, y, width, height, rx, ry } => {
                if rx == 0.0 && ry == 0.0 {
                    return Ok(format!(
                        "M {x} {y} L {lx} {y} L {lx} {ly} L {x} {ly} Z",
                        lx = x + width,
                        ly = y + height,
                    ));
                }
                let clamp = (width.min(height)) / 2.0;
                let rx = if rx == 0.0 { ry } else { rx }.min(clamp);
                let ry = if ry == 0.0 { rx } else { ry }.min(clamp);
                let (x1, y1) = (x + width, y + height);
                // Clockwise from the top-left corner's end point.
                Ok(format!(
                    "M {mx} {y} \
                     L {ex} {y} A {rx} {ry} 0 0 1 {x1} {ty} \
                     L {x1} {by} A {rx} {ry} 0 0 1 {ex} {y1} \
                     L {mx} {y1} A {rx} {ry} 0 0 1 {x} {by} \
                     L {x} {ty} A {rx} {ry} 0 0 1 {mx} {y} Z",
                    mx = x + rx,
                    ex = x1 - rx,
                    ty = y + ry,
                    by = y1 - ry,
                ))
            }
            Self::Circle { cx, cy, r } => Ok(quarter_arc_contour(cx, cy, r, r)),
            Self::Ellipse { cx, cy, rx, ry } => Ok(quarter_arc_contour(cx, cy, rx, ry)),
            Self::Path { ref d } => {
                // Round-trip through kurbo to reject malformed data early.
                parse_path_d(d)?;
                Ok(d.trim().to_string())
            }
        }
    }

    /// Exact axis-aligned bounding box of the shape.
    ///
    /// Rect/circle/ellipse boxes are analytic. Path data is evaluated through
    /// kurbo, which accounts for true curvature extrema (arcs are lowered to
    /// cubics at parse time), not control-point hulls.
    pub fn bounding_box(&self) -> CaseforgeResult<Rect> {
        self.validate()?;
        match *self {
            Self::Rect { x, y, width, height, .. } => {
                Ok(Rect::new(x, y, x + width, y + height))
            }
            Self::Circle { cx, cy, r } => Ok(Rect::new(cx - r, cy - r, cx + r, cy + r)),
            Self::Ellipse { cx, cy, rx, ry } => {
                Ok(Rect::new(cx - rx, cy - ry, cx + rx, cy + ry))
            }
            Self::Path { ref d } => Ok(parse_path_d(d)?.bounding_box()),
        }
    }
}

/// Closed 4-arc contour for a circle or ellipse, starting at the rightmost
/// point and sweeping clockwise (in y-down template coordinates).
fn quarter_arc_contour(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    format!(
        "M {sx} {cy} \
         A {rx} {ry} 0 0 1 {cx} {by} \
         A {rx} {ry} 0 0 1 {ex} {cy} \
         A {rx} {ry} 0 0 1 {cx} {ty} \
         A {rx} {ry} 0 0 1 {sx} {cy} Z",
        sx = cx + rx,
        ex = cx - rx,
        ty = cy - ry,
        by = cy + ry,
    )
}

/// Parse a path-command string into a [`BezPath`].
pub fn parse_path_d(d: &str) -> CaseforgeResult<BezPath> {
    let d = d.trim();
    if d.is_empty() {
        return Err(CaseforgeError::path_conversion("path data must be non-empty"));
    }
    BezPath::from_svg(d)
        .map_err(|e| CaseforgeError::path_conversion(format!("invalid path data: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
