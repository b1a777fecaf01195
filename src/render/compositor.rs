use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::assets::decode::decode_image;
use crate::assets::text::TextLayoutEngine;
use crate::design::state::DesignState;
use crate::foundation::core::{Affine, BezPath, Vec2};
use crate::foundation::error::{CaseforgeError, CaseforgeResult};
use crate::render::plan::{CompositePlan, DrawOp, LayerMetrics, plan_composite};
use crate::template::model::PhoneModel;

/// Fixed multiplier between template-native units and final raster pixels.
pub const SUPERSAMPLE_FACTOR: f64 = 2.5;

/// JPEG quality of the encoded print file.
pub const JPEG_QUALITY: u8 = 80;

/// The print-ready raster produced by one composite.
///
/// Never mutated; consumed once by the submission/export path. `revision`
/// echoes the `DesignState` revision the composite was built from so callers
/// can discard results keyed to a session that has since been reset.
#[derive(Clone, Debug)]
pub struct RenderTarget {
    /// Identity of the template the composite was rendered against.
    pub model_id: String,
    /// Output width in pixels (`ceil(model.width · k)`).
    pub width: u32,
    /// Output height in pixels (`ceil(model.height · k)`).
    pub height: u32,
    /// Encoded JPEG bytes.
    pub jpeg: Vec<u8>,
    /// Completion timestamp, milliseconds since the Unix epoch.
    pub completed_at_ms: u64,
    /// `DesignState::revision` at composite time.
    pub revision: u64,
}

struct PreparedLayers {
    image: Option<PreparedImagePaint>,
    texts: Vec<PreparedTextRun>,
    metrics: LayerMetrics,
}

struct PreparedImagePaint {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

struct PreparedTextRun {
    layout: parley::Layout<crate::foundation::core::Rgba8>,
    font: vello_cpu::peniko::FontData,
}

/// Offline compositor: executes a [`CompositePlan`] against a supersampled
/// raster surface, clipped to the case outline, and encodes the result.
///
/// IO (image bytes, font bytes) is front-loaded into layer preparation; the
/// drawing stage itself is deterministic and IO-free.
pub struct Compositor {
    assets_root: PathBuf,
    text_engine: TextLayoutEngine,
}

impl Compositor {
    /// Create a compositor resolving relative asset references against `root`.
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
            text_engine: TextLayoutEngine::new(),
        }
    }

    /// Rasterize one design against its template and encode the print file.
    ///
    /// Any asset that fails to decode aborts the whole composite; partial
    /// composites are never returned.
    #[tracing::instrument(skip(self, model, state), fields(model = %model.id, revision = state.revision))]
    pub fn composite(
        &mut self,
        model: &PhoneModel,
        state: &DesignState,
    ) -> CaseforgeResult<RenderTarget> {
        model.validate()?;
        let layers = self.prepare_layers(state)?;
        let plan = plan_composite(model, state, &layers.metrics)?;

        let width = (plan.width * SUPERSAMPLE_FACTOR).ceil() as u32;
        let height = (plan.height * SUPERSAMPLE_FACTOR).ceil() as u32;
        let width_u16: u16 = width.try_into().map_err(|_| {
            CaseforgeError::validation("supersampled width exceeds raster surface limit")
        })?;
        let height_u16: u16 = height.try_into().map_err(|_| {
            CaseforgeError::validation("supersampled height exceeds raster surface limit")
        })?;

        // One global scale up front; everything downstream stays in
        // template-native units. The view also maps the template's own origin
        // onto the surface without rewriting any authored path string.
        let view = Affine::scale(SUPERSAMPLE_FACTOR)
            * Affine::translate(Vec2::new(-plan.min_x, -plan.min_y));

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        // Print stock base: opaque white, outside the outline included.
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        // The outline clip gates the image and every text layer. The safe
        // zone is advisory only and never enforced here.
        let clip = bezpath_to_cpu(&(view * plan.clip.clone()));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&clip);

        for op in &plan.ops {
            match *op {
                DrawOp::Image { transform } => {
                    let Some(image) = layers.image.as_ref() else {
                        return Err(CaseforgeError::validation(
                            "plan contains an image op but no image was prepared",
                        ));
                    };
                    ctx.set_transform(affine_to_cpu(view * transform));
                    ctx.set_paint(image.paint.clone());
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(image.width),
                        f64::from(image.height),
                    ));
                }
                DrawOp::Text { element, transform } => {
                    let Some(text) = layers.texts.get(element) else {
                        return Err(CaseforgeError::validation(
                            "plan references a text layer that was not prepared",
                        ));
                    };
                    ctx.set_transform(affine_to_cpu(view * transform));
                    for line in text.layout.lines() {
                        for item in line.items() {
                            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                                continue;
                            };
                            let brush = run.style().brush;
                            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                                brush.r, brush.g, brush.b, brush.a,
                            ));
                            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            });
                            ctx.glyph_run(&text.font)
                                .font_size(run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                }
            }
        }

        ctx.pop_layer();

        // Cutouts paint opaque on top of everything and are never clipped.
        if let Some(cutout) = &plan.cutout {
            ctx.set_transform(affine_to_cpu(view));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(&bezpath_to_cpu(cutout));
        }

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let jpeg = encode_jpeg(pixmap.data_as_u8_slice(), width, height)?;
        let completed_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        tracing::debug!(width, height, bytes = jpeg.len(), "composite complete");
        Ok(RenderTarget {
            model_id: model.id.clone(),
            width,
            height,
            jpeg,
            completed_at_ms,
            revision: state.revision,
        })
    }

    fn prepare_layers(&mut self, state: &DesignState) -> CaseforgeResult<PreparedLayers> {
        let mut metrics = LayerMetrics::default();

        let image = match &state.image {
            None => None,
            Some(layer) => {
                let Some(source) = &layer.source else {
                    return Err(CaseforgeError::validation(
                        "image layer has no source reference (already stripped?)",
                    ));
                };
                let bytes = self.read_bytes(source)?;
                let prepared = decode_image(&bytes)?;
                let paint = image_paint(&prepared.rgba8_premul, prepared.width, prepared.height)?;
                metrics.image = Some((f64::from(prepared.width), f64::from(prepared.height)));
                Some(PreparedImagePaint {
                    paint,
                    width: prepared.width,
                    height: prepared.height,
                })
            }
        };

        let mut texts = Vec::with_capacity(state.text_elements.len());
        for element in &state.text_elements {
            let font_bytes = self.read_bytes(&element.font_source)?;
            let layout = self.text_engine.layout_plain(
                &element.content,
                &font_bytes,
                element.size_px,
                element.weight,
                element.color,
            )?;
            metrics
                .texts
                .push((f64::from(layout.width()), f64::from(layout.height())));
            let font =
                vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
            texts.push(PreparedTextRun { layout, font });
        }

        Ok(PreparedLayers {
            image,
            texts,
            metrics,
        })
    }

    fn read_bytes(&self, rel: &str) -> CaseforgeResult<Vec<u8>> {
        let path = self.assets_root.join(Path::new(rel));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(CaseforgeError::from)
    }
}

fn encode_jpeg(rgba_premul: &[u8], width: u32, height: u32) -> CaseforgeResult<Vec<u8>> {
    use image::ImageEncoder;

    // The surface is flattened onto opaque white before drawing, so alpha is
    // 255 everywhere and premultiplied equals straight RGB.
    let mut rgb = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for px in rgba_premul.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut out = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder
        .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| CaseforgeError::asset_decode(format!("encode print file: {e}")))?;
    Ok(out)
}

fn image_paint(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> CaseforgeResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CaseforgeError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CaseforgeError::validation("image height exceeds u16"))?;
    if bytes_premul.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CaseforgeError::validation("image byte length mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes_premul.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
