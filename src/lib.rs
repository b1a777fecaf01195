//! Caseforge turns a color-conventioned vector case template plus a user's
//! design session into a print-ready raster.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: raw SVG bytes -> flat primitives with resolved paint
//!    ([`parse_template`])
//! 2. **Classify**: primitives -> outline / cutouts / safe zones by color
//!    convention ([`classify`])
//! 3. **Build**: classification -> one immutable [`PhoneModel`]
//!    ([`build_model`])
//! 4. **Design**: a session mutates its own [`DesignState`] (image layer +
//!    independent text layers, all offsets relative to the template's
//!    bounding-box center)
//! 5. **Plan**: model + state -> ordered draw ops with absolute affines
//!    ([`plan_composite`]), resolution-independent
//! 6. **Composite**: execute the plan on a supersampled surface, clipped to
//!    the outline, and encode the print JPEG ([`Compositor`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Zero drift**: the compositor applies the supersampling factor as one
//!   global scale, so the plan's math is identical on screen and in print.
//! - **All-or-nothing construction**: no half-built `PhoneModel`,
//!   `DesignState`, or `RenderTarget` ever escapes a failed operation.
//! - **No IO in the planner**: asset IO is front-loaded in the compositor's
//!   preparation stage; classification and planning are pure.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod design;
mod foundation;
mod geometry;
mod order;
mod render;
mod template;

pub use assets::decode::{
    DOWNSAMPLE_BOUND, DOWNSAMPLE_THRESHOLD, MIN_UPLOAD_HEIGHT, MIN_UPLOAD_WIDTH, PreparedImage,
    decode_image, prepare_upload,
};
pub use assets::text::TextLayoutEngine;
pub use design::state::{
    DesignState, ImageLayer, LayerTransform, TextElement, cover_fit_scale,
};
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Shape, Vec2};
pub use foundation::error::{CaseforgeError, CaseforgeResult};
pub use geometry::shape::{ShapeGeometry, parse_path_d};
pub use order::record::OrderRecord;
pub use render::compositor::{Compositor, JPEG_QUALITY, RenderTarget, SUPERSAMPLE_FACTOR};
pub use render::plan::{CompositePlan, DrawOp, LayerMetrics, layer_affine, plan_composite};
pub use template::builder::{SAFE_ZONE_INSET_RATIO, TemplateMeta, build_model};
pub use template::classify::{
    Classification, ClassifyOptions, OutlineCandidates, ShapeClass, classify,
};
pub use template::document::{TemplateShape, parse_template};
pub use template::model::{PhoneModel, export_catalog, import_catalog};
