use crate::foundation::core::Rgba8;
use crate::foundation::error::{CaseforgeError, CaseforgeResult};
use crate::template::model::PhoneModel;

/// A 2D similarity transform: uniform scale, rotation, and an offset from the
/// template's bounding-box center.
///
/// Offsets are center-relative on purpose: the same transform applies
/// unchanged across templates with different `min_x`/`min_y`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees, clockwise-positive.
    pub rotation_deg: f64,
    /// Horizontal offset from the template bbox center, in template units.
    pub x: f64,
    /// Vertical offset from the template bbox center, in template units.
    pub y: f64,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_deg: 0.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl LayerTransform {
    fn validate(&self, what: &str) -> CaseforgeResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CaseforgeError::validation(format!(
                "{what} scale must be finite and > 0"
            )));
        }
        for (name, v) in [
            ("rotation_deg", self.rotation_deg),
            ("x", self.x),
            ("y", self.y),
        ] {
            if !v.is_finite() {
                return Err(CaseforgeError::validation(format!(
                    "{what} {name} must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// The user-uploaded image layer of a design.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageLayer {
    /// Reference to the uploaded raster (relative path or opaque handle).
    /// Stripped when the design is frozen for submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Natural pixel width after upload preparation.
    pub natural_width: u32,
    /// Natural pixel height after upload preparation.
    pub natural_height: u32,
    /// The layer's similarity transform.
    pub transform: LayerTransform,
}

/// One independent text layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextElement {
    /// UTF-8 text content.
    pub content: String,
    /// Relative path to the font file backing this element.
    pub font_source: String,
    /// Base font size in template units.
    pub size_px: f32,
    /// Font weight (CSS scale, 400 = regular).
    #[serde(default = "default_weight")]
    pub weight: u16,
    /// Fill color.
    pub color: Rgba8,
    /// The layer's similarity transform.
    pub transform: LayerTransform,
}

fn default_weight() -> u16 {
    400
}

/// The mutable in-memory model of one active customization session.
///
/// Each session owns its `DesignState` exclusively; there is no shared
/// mutation. Every mutator bumps `revision`, and composites echo the revision
/// they were built from so callers can discard results that outlived the
/// state they came from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DesignState {
    /// Identity of the template this design targets.
    pub model_id: String,
    /// Optional image layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageLayer>,
    /// Ordered text layers; list order is draw order (later on top).
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
    /// Monotonic session revision, bumped on every mutation.
    #[serde(default)]
    pub revision: u64,
}

impl DesignState {
    /// Fresh all-identity state for a newly selected template.
    pub fn new_for_model(model: &PhoneModel) -> Self {
        Self {
            model_id: model.id.clone(),
            image: None,
            text_elements: Vec::new(),
            revision: 0,
        }
    }

    /// Attach (or replace) the image layer, resetting its transform to
    /// identity.
    pub fn set_image(&mut self, source: impl Into<String>, natural_width: u32, natural_height: u32) {
        self.image = Some(ImageLayer {
            source: Some(source.into()),
            natural_width,
            natural_height,
            transform: LayerTransform::default(),
        });
        self.revision += 1;
    }

    /// Mutate the image transform in place.
    pub fn set_image_transform(&mut self, transform: LayerTransform) -> CaseforgeResult<()> {
        let Some(image) = self.image.as_mut() else {
            return Err(CaseforgeError::validation("design has no image layer"));
        };
        transform.validate("image layer")?;
        image.transform = transform;
        self.revision += 1;
        Ok(())
    }

    /// Append a text layer; returns its index in the draw order.
    pub fn push_text(&mut self, element: TextElement) -> usize {
        self.text_elements.push(element);
        self.revision += 1;
        self.text_elements.len() - 1
    }

    /// Mutate one text layer's transform in place.
    pub fn set_text_transform(
        &mut self,
        index: usize,
        transform: LayerTransform,
    ) -> CaseforgeResult<()> {
        let Some(element) = self.text_elements.get_mut(index) else {
            return Err(CaseforgeError::validation(format!(
                "no text element at index {index}"
            )));
        };
        transform.validate("text layer")?;
        element.transform = transform;
        self.revision += 1;
        Ok(())
    }

    /// Cover-fit the image to the case: scale so the image fully covers the
    /// outline bounding box (cropping excess, never letterboxing), and reset
    /// offset and rotation. Applying it twice is the same as applying it once.
    pub fn fit_image_to_case(&mut self, model: &PhoneModel) -> CaseforgeResult<()> {
        let Some(image) = self.image.as_mut() else {
            return Err(CaseforgeError::validation("design has no image layer"));
        };
        let scale = cover_fit_scale(model, image.natural_width, image.natural_height)?;
        image.transform = LayerTransform {
            scale,
            ..LayerTransform::default()
        };
        self.revision += 1;
        Ok(())
    }

    /// Frozen form persisted with a submission: the image reference is
    /// stripped, all transforms are kept.
    pub fn stripped_for_submission(&self) -> Self {
        let mut out = self.clone();
        if let Some(image) = out.image.as_mut() {
            image.source = None;
        }
        out
    }

    /// Validate all layer invariants.
    pub fn validate(&self) -> CaseforgeResult<()> {
        if self.model_id.trim().is_empty() {
            return Err(CaseforgeError::validation("design model_id must be non-empty"));
        }
        if let Some(image) = &self.image {
            if image.natural_width == 0 || image.natural_height == 0 {
                return Err(CaseforgeError::validation(
                    "image natural dimensions must be > 0",
                ));
            }
            image.transform.validate("image layer")?;
        }
        for (i, element) in self.text_elements.iter().enumerate() {
            if element.content.is_empty() {
                return Err(CaseforgeError::validation(format!(
                    "text element {i} content must be non-empty"
                )));
            }
            if !element.size_px.is_finite() || element.size_px <= 0.0 {
                return Err(CaseforgeError::validation(format!(
                    "text element {i} size_px must be finite and > 0"
                )));
            }
            element.transform.validate("text layer")?;
        }
        Ok(())
    }
}

/// Cover-fit scale for an asset against a model's outline box:
/// `max(width / natural_width, height / natural_height)`. Guarantees no gap
/// between asset and case edges at the cost of possible cropping.
pub fn cover_fit_scale(
    model: &PhoneModel,
    natural_width: u32,
    natural_height: u32,
) -> CaseforgeResult<f64> {
    if natural_width == 0 || natural_height == 0 {
        return Err(CaseforgeError::validation(
            "cover fit requires natural dimensions > 0",
        ));
    }
    let sx = model.width / f64::from(natural_width);
    let sy = model.height / f64::from(natural_height);
    Ok(sx.max(sy))
}

#[cfg(test)]
#[path = "../../tests/unit/design/state.rs"]
mod tests;
