use crate::foundation::core::Rgba8;
use crate::foundation::error::{CaseforgeError, CaseforgeResult};
use crate::template::document::TemplateShape;

/// Semantic role assigned to a template shape by color convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeClass {
    /// The case's physical boundary.
    Outline,
    /// Camera bump or other cutout, drawn opaque on top, never clipped.
    Cutout,
    /// Manufacturing safe zone, advisory only.
    SafeZone,
}

/// Canonical and alternate hex value accepted per class.
///
/// Matching is an exact RGB comparison with zero tolerance by default; see
/// [`ClassifyOptions::color_tolerance`] for the opt-in fallback.
const CLASS_COLORS: [(ShapeClass, Rgba8, Rgba8); 3] = [
    (
        ShapeClass::Outline,
        Rgba8::opaque(0xff, 0x00, 0x00),
        Rgba8::opaque(0xe3, 0x06, 0x13),
    ),
    (
        ShapeClass::Cutout,
        Rgba8::opaque(0x00, 0x00, 0xff),
        Rgba8::opaque(0x2e, 0x31, 0x92),
    ),
    (
        ShapeClass::SafeZone,
        Rgba8::opaque(0x00, 0xff, 0x00),
        Rgba8::opaque(0x00, 0xa6, 0x51),
    ),
];

/// Options controlling classification.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassifyOptions {
    /// When set, shapes whose colors fail the exact match are assigned to the
    /// nearest class color within this max per-channel distance. Off by
    /// default; exact matching is the documented behavior.
    pub color_tolerance: Option<u8>,
}

/// The outline candidates found in a document.
///
/// More than one outline-class match is an authoring ambiguity; it is
/// surfaced as data so callers can warn or hard-fail instead of silently
/// picking a winner.
#[derive(Clone, Debug, PartialEq)]
pub enum OutlineCandidates {
    /// Exactly one outline-class shape matched.
    Single(TemplateShape),
    /// Multiple outline-class shapes matched, in document order.
    Ambiguous(Vec<TemplateShape>),
}

impl OutlineCandidates {
    /// Default compatibility policy: the last candidate in document order
    /// wins, earlier matches are discarded with a warning.
    pub fn into_last_wins(self) -> TemplateShape {
        match self {
            Self::Single(shape) => shape,
            Self::Ambiguous(mut shapes) => {
                tracing::warn!(
                    candidates = shapes.len(),
                    "multiple outline-class shapes; keeping the last in document order"
                );
                shapes.remove(shapes.len() - 1)
            }
        }
    }
}

/// Result of classifying a template's shape list.
#[derive(Clone, Debug)]
pub struct Classification {
    /// Outline candidates (exactly-one-winner class).
    pub outline: OutlineCandidates,
    /// All cutout-class shapes, in document order.
    pub cutouts: Vec<TemplateShape>,
    /// All safe-zone-class shapes, in document order.
    pub safe_zones: Vec<TemplateShape>,
}

/// Partition a flat shape list into outline / cutouts / safe zones by the
/// three-color convention.
///
/// The first color in {fill, stroke} that matches any class wins for that
/// shape; unmatched shapes are ignored. Zero outline matches is fatal.
#[tracing::instrument(skip(shapes, opts), fields(shapes = shapes.len()))]
pub fn classify(
    shapes: &[TemplateShape],
    opts: ClassifyOptions,
) -> CaseforgeResult<Classification> {
    let mut outlines = Vec::new();
    let mut cutouts = Vec::new();
    let mut safe_zones = Vec::new();

    for shape in shapes {
        let Some(class) = class_for_shape(shape, opts) else {
            continue;
        };
        match class {
            ShapeClass::Outline => outlines.push(shape.clone()),
            ShapeClass::Cutout => cutouts.push(shape.clone()),
            ShapeClass::SafeZone => safe_zones.push(shape.clone()),
        }
    }

    tracing::debug!(
        outlines = outlines.len(),
        cutouts = cutouts.len(),
        safe_zones = safe_zones.len(),
        "classified template shapes"
    );

    let outline = match outlines.len() {
        0 => {
            return Err(CaseforgeError::missing_outline(format!(
                "no shape carries the outline color convention ({} or {})",
                CLASS_COLORS[0].1, CLASS_COLORS[0].2
            )));
        }
        1 => OutlineCandidates::Single(outlines.remove(0)),
        _ => OutlineCandidates::Ambiguous(outlines),
    };

    Ok(Classification {
        outline,
        cutouts,
        safe_zones,
    })
}

/// Class for one shape: first of {fill, stroke} that matches any class.
fn class_for_shape(shape: &TemplateShape, opts: ClassifyOptions) -> Option<ShapeClass> {
    [shape.fill, shape.stroke]
        .into_iter()
        .flatten()
        .find_map(|color| class_for_color(color, opts))
}

fn class_for_color(color: Rgba8, opts: ClassifyOptions) -> Option<ShapeClass> {
    for (class, canonical, alternate) in CLASS_COLORS {
        if color.rgb_eq(canonical) || color.rgb_eq(alternate) {
            return Some(class);
        }
    }

    let tolerance = opts.color_tolerance?;
    CLASS_COLORS
        .iter()
        .flat_map(|(class, canonical, alternate)| {
            [(*class, *canonical), (*class, *alternate)]
        })
        .map(|(class, reference)| (class, color.rgb_distance(reference)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by_key(|(_, distance)| *distance)
        .map(|(class, _)| class)
}

#[cfg(test)]
#[path = "../../tests/unit/template/classify.rs"]
mod tests;
