use crate::foundation::error::{CaseforgeError, CaseforgeResult};
use crate::geometry::shape::parse_path_d;

/// An immutable case template: semantic geometry derived from one uploaded
/// vector document.
///
/// A `PhoneModel` is created once per template import by
/// [`crate::build_model`], never mutated in place, and replaced wholesale on
/// re-import. Its bounding box `(min_x, min_y, width, height)` is the box of
/// the outline shape in the template's native coordinate units; the origin is
/// not assumed to be `(0, 0)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhoneModel {
    /// Stable template identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Source brand or category label.
    pub brand: String,
    /// Outline bounding-box width in template units.
    pub width: f64,
    /// Outline bounding-box height in template units.
    pub height: f64,
    /// Left edge of the outline bounding box.
    pub min_x: f64,
    /// Top edge of the outline bounding box.
    pub min_y: f64,
    /// Aspect ratio `width / height`, kept consistent with the extents.
    pub screen_ratio: f64,
    /// Closed path-command string describing the case outline.
    pub outline_path: String,
    /// Union of cutout path strings (space-concatenated); possibly empty.
    #[serde(default)]
    pub cutout_path: String,
    /// Path-command string of the manufacturing safe zone. Always present:
    /// authored, or synthesized as an inset rectangle.
    pub safe_zone_path: String,
    /// True when `safe_zone_path` was synthesized rather than authored.
    ///
    /// The synthesized zone is a bounding-box inset rectangle that ignores
    /// outline concavity; consumers may want a visibly different warning
    /// state for it.
    #[serde(default)]
    pub safe_zone_synthesized: bool,
}

impl PhoneModel {
    /// Validate model invariants; used on construction and catalog import.
    pub fn validate(&self) -> CaseforgeResult<()> {
        if self.id.trim().is_empty() {
            return Err(CaseforgeError::validation("model id must be non-empty"));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(CaseforgeError::validation(
                "model width must be finite and > 0",
            ));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(CaseforgeError::validation(
                "model height must be finite and > 0",
            ));
        }
        if !self.min_x.is_finite() || !self.min_y.is_finite() {
            return Err(CaseforgeError::validation("model origin must be finite"));
        }
        let ratio = self.width / self.height;
        if (self.screen_ratio - ratio).abs() > 1e-9 {
            return Err(CaseforgeError::validation(
                "model screen_ratio is inconsistent with width/height",
            ));
        }
        parse_path_d(&self.outline_path)?;
        if !self.cutout_path.trim().is_empty() {
            parse_path_d(&self.cutout_path)?;
        }
        parse_path_d(&self.safe_zone_path)?;
        Ok(())
    }

    /// Bounding-box center, the pivot every design layer offsets from.
    pub fn center(&self) -> (f64, f64) {
        (self.min_x + self.width / 2.0, self.min_y + self.height / 2.0)
    }
}

/// Serialize a template catalog to JSON for external persistence.
pub fn export_catalog(models: &[PhoneModel]) -> CaseforgeResult<String> {
    serde_json::to_string_pretty(models)
        .map_err(|e| CaseforgeError::serde(format!("export catalog: {e}")))
}

/// Deserialize and validate a template catalog from JSON.
///
/// Import replaces the catalog wholesale; there is no merge. Any invalid
/// model rejects the whole import.
pub fn import_catalog(json: &str) -> CaseforgeResult<Vec<PhoneModel>> {
    let models: Vec<PhoneModel> = serde_json::from_str(json)
        .map_err(|e| CaseforgeError::serde(format!("import catalog: {e}")))?;
    for model in &models {
        model.validate()?;
    }
    Ok(models)
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
