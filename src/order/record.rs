use crate::design::state::DesignState;
use crate::foundation::error::{CaseforgeError, CaseforgeResult};

/// A frozen submission, handed to the external persistence collaborator.
///
/// The embedded design is stored in stripped form (image reference removed);
/// `print_file_url` is where the collaborator parked the compositor's output.
/// How it is stored or synced is not this crate's concern.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrderRecord {
    /// Stable order identity.
    pub id: String,
    /// Identity of the template the design targets.
    pub model_id: String,
    /// Display name of that template at submission time.
    pub model_name: String,
    /// The frozen design (image reference stripped).
    pub design: DesignState,
    /// Submission timestamp, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Location of the print-ready raster.
    pub print_file_url: String,
}

impl OrderRecord {
    /// Freeze a design into a submission record.
    pub fn new(
        id: impl Into<String>,
        model_id: impl Into<String>,
        model_name: impl Into<String>,
        design: &DesignState,
        timestamp_ms: u64,
        print_file_url: impl Into<String>,
    ) -> CaseforgeResult<Self> {
        design.validate()?;
        let record = Self {
            id: id.into(),
            model_id: model_id.into(),
            model_name: model_name.into(),
            design: design.stripped_for_submission(),
            timestamp_ms,
            print_file_url: print_file_url.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Validate record invariants.
    pub fn validate(&self) -> CaseforgeResult<()> {
        if self.id.trim().is_empty() {
            return Err(CaseforgeError::validation("order id must be non-empty"));
        }
        if self.model_id.trim().is_empty() {
            return Err(CaseforgeError::validation("order model_id must be non-empty"));
        }
        if let Some(image) = &self.design.image
            && image.source.is_some()
        {
            return Err(CaseforgeError::validation(
                "order design must not carry an image reference",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/order/record.rs"]
mod tests;
