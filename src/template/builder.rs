use crate::foundation::error::CaseforgeResult;
use crate::geometry::shape::ShapeGeometry;
use crate::template::classify::Classification;
use crate::template::document::TemplateShape;
use crate::template::model::PhoneModel;

/// Fraction of each outline dimension inset from the matching edges when the
/// safe zone has to be synthesized. An approximation over the bounding box,
/// not a geometric erosion of the outline.
pub const SAFE_ZONE_INSET_RATIO: f64 = 0.05;

/// Identity metadata accompanying a template import.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateMeta {
    /// Stable template identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Source brand or category label.
    pub brand: String,
}

/// Assemble a [`PhoneModel`] from a classification outcome.
///
/// The outline's bounding box becomes the box of the whole model; cutout and
/// safe-zone paths are unioned textually (space-joined), not merged
/// geometrically. Construction is all-or-nothing: any shape that fails path
/// conversion rejects the template.
#[tracing::instrument(skip(classification), fields(model = %meta.id))]
pub fn build_model(
    meta: TemplateMeta,
    classification: Classification,
) -> CaseforgeResult<PhoneModel> {
    let outline = classification.outline.into_last_wins();
    let bbox = outline.geometry.bounding_box()?;
    let outline_path = outline.geometry.to_path_d()?;

    let (width, height) = (bbox.width(), bbox.height());
    let cutout_path = join_paths(&classification.cutouts)?;

    let (safe_zone_path, safe_zone_synthesized) = if classification.safe_zones.is_empty() {
        let inset_x = SAFE_ZONE_INSET_RATIO * width;
        let inset_y = SAFE_ZONE_INSET_RATIO * height;
        let synthesized = ShapeGeometry::Rect {
            x: bbox.x0 + inset_x,
            y: bbox.y0 + inset_y,
            width: width - 2.0 * inset_x,
            height: height - 2.0 * inset_y,
            rx: 0.0,
            ry: 0.0,
        };
        tracing::debug!(inset_x, inset_y, "synthesized safe zone from outline bounds");
        (synthesized.to_path_d()?, true)
    } else {
        (join_paths(&classification.safe_zones)?, false)
    };

    let model = PhoneModel {
        id: meta.id,
        name: meta.name,
        brand: meta.brand,
        width,
        height,
        min_x: bbox.x0,
        min_y: bbox.y0,
        screen_ratio: width / height,
        outline_path,
        cutout_path,
        safe_zone_path,
        safe_zone_synthesized,
    };
    model.validate()?;
    Ok(model)
}

fn join_paths(shapes: &[TemplateShape]) -> CaseforgeResult<String> {
    let mut parts = Vec::with_capacity(shapes.len());
    for shape in shapes {
        parts.push(shape.geometry.to_path_d()?);
    }
    Ok(parts.join(" "))
}

#[cfg(test)]
#[path = "../../tests/unit/template/builder.rs"]
mod tests;
