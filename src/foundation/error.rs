/// Convenience result type used across Caseforge.
pub type CaseforgeResult<T> = Result<T, CaseforgeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is a local-operation failure: it aborts the one construction
/// or composite in progress and never leaves a `PhoneModel`, `DesignState`, or
/// `RenderTarget` half-built.
#[derive(thiserror::Error, Debug)]
pub enum CaseforgeError {
    /// A primitive shape with zero or negative extent.
    #[error("degenerate shape: {0}")]
    DegenerateShape(String),

    /// No outline-class shape was found in a template document.
    #[error("missing outline: {0}")]
    MissingOutline(String),

    /// An outline shape could not be reduced to a path-command string.
    #[error("path conversion error: {0}")]
    PathConversion(String),

    /// An image or template document failed to parse or decode.
    #[error("asset decode error: {0}")]
    AssetDecode(String),

    /// An uploaded asset is below the minimum pixel floor.
    #[error("resolution too low: {width}x{height} (minimum {min_width}x{min_height})")]
    ResolutionTooLow {
        /// Natural width of the rejected asset.
        width: u32,
        /// Natural height of the rejected asset.
        height: u32,
        /// Required minimum width.
        min_width: u32,
        /// Required minimum height.
        min_height: u32,
    },

    /// Invalid user-provided or session data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaseforgeError {
    /// Build a [`CaseforgeError::DegenerateShape`] value.
    pub fn degenerate_shape(msg: impl Into<String>) -> Self {
        Self::DegenerateShape(msg.into())
    }

    /// Build a [`CaseforgeError::MissingOutline`] value.
    pub fn missing_outline(msg: impl Into<String>) -> Self {
        Self::MissingOutline(msg.into())
    }

    /// Build a [`CaseforgeError::PathConversion`] value.
    pub fn path_conversion(msg: impl Into<String>) -> Self {
        Self::PathConversion(msg.into())
    }

    /// Build a [`CaseforgeError::AssetDecode`] value.
    pub fn asset_decode(msg: impl Into<String>) -> Self {
        Self::AssetDecode(msg.into())
    }

    /// Build a [`CaseforgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaseforgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
