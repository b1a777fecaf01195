use crate::design::state::{DesignState, LayerTransform};
use crate::foundation::core::{Affine, BezPath, Vec2};
use crate::foundation::error::{CaseforgeError, CaseforgeResult};
use crate::geometry::shape::parse_path_d;
use crate::template::model::PhoneModel;

/// Natural (untransformed) sizes of the drawable layers, measured by the
/// compositor's asset-preparation stage.
///
/// Keeping measurement out of the planner keeps it a pure function: the same
/// `PhoneModel` + `DesignState` + metrics always produce the same plan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerMetrics {
    /// Natural pixel size of the image layer, if present.
    pub image: Option<(f64, f64)>,
    /// Natural layout size of each text layer, in `text_elements` order.
    pub texts: Vec<(f64, f64)>,
}

/// One draw operation, annotated with an absolute affine in template-native
/// coordinates.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Draw the image layer at its natural size under `transform`.
    Image {
        /// Absolute layer transform.
        transform: Affine,
    },
    /// Draw text layer `element` at its natural layout size under `transform`.
    Text {
        /// Index into `DesignState::text_elements`.
        element: usize,
        /// Absolute layer transform.
        transform: Affine,
    },
}

/// Ordered drawing instructions for one composite, resolution-independent.
///
/// Every coordinate is expressed in template-native units; the compositor
/// applies the supersampling factor as one global scale on top.
#[derive(Clone, Debug)]
pub struct CompositePlan {
    /// Outline clip applied to the image and all text layers.
    pub clip: BezPath,
    /// Cutout overlay painted opaque after all layers, never clipped.
    pub cutout: Option<BezPath>,
    /// Layer draws: image first (if any), then text layers in list order.
    pub ops: Vec<DrawOp>,
    /// Template-native width of the drawing frame.
    pub width: f64,
    /// Template-native height of the drawing frame.
    pub height: f64,
    /// Left edge of the template bounding box (the frame is not re-originated
    /// to zero; path strings keep their authored coordinates).
    pub min_x: f64,
    /// Top edge of the template bounding box.
    pub min_y: f64,
}

/// Compose the absolute affine for one layer.
///
/// Order is load-bearing and not commutative: translate to the case center,
/// translate by the layer offset, rotate (clockwise-positive degrees), scale
/// uniformly, then translate by minus half the natural size so the asset's
/// own center lands on the transformed pivot.
pub fn layer_affine(
    center: (f64, f64),
    transform: &LayerTransform,
    natural: (f64, f64),
) -> Affine {
    Affine::translate(Vec2::new(center.0, center.1))
        * Affine::translate(Vec2::new(transform.x, transform.y))
        * Affine::rotate(transform.rotation_deg.to_radians())
        * Affine::scale(transform.scale)
        * Affine::translate(Vec2::new(-natural.0 / 2.0, -natural.1 / 2.0))
}

/// Map a `PhoneModel` + `DesignState` into ordered draw operations.
#[tracing::instrument(skip(model, state, metrics), fields(model = %model.id))]
pub fn plan_composite(
    model: &PhoneModel,
    state: &DesignState,
    metrics: &LayerMetrics,
) -> CaseforgeResult<CompositePlan> {
    state.validate()?;
    if state.model_id != model.id {
        return Err(CaseforgeError::validation(format!(
            "design targets model '{}', not '{}'",
            state.model_id, model.id
        )));
    }
    if metrics.texts.len() != state.text_elements.len() {
        return Err(CaseforgeError::validation(
            "layer metrics do not match the design's text layers",
        ));
    }
    if state.image.is_some() != metrics.image.is_some() {
        return Err(CaseforgeError::validation(
            "layer metrics do not match the design's image layer",
        ));
    }

    let clip = parse_path_d(&model.outline_path)?;
    let cutout = if model.cutout_path.trim().is_empty() {
        None
    } else {
        Some(parse_path_d(&model.cutout_path)?)
    };

    let center = model.center();
    let mut ops = Vec::with_capacity(1 + state.text_elements.len());

    if let (Some(image), Some(natural)) = (&state.image, metrics.image) {
        ops.push(DrawOp::Image {
            transform: layer_affine(center, &image.transform, natural),
        });
    }

    for (element, (text, natural)) in state
        .text_elements
        .iter()
        .zip(metrics.texts.iter().copied())
        .enumerate()
    {
        ops.push(DrawOp::Text {
            element,
            transform: layer_affine(center, &text.transform, natural),
        });
    }

    Ok(CompositePlan {
        clip,
        cutout,
        ops,
        width: model.width,
        height: model.height,
        min_x: model.min_x,
        min_y: model.min_y,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
