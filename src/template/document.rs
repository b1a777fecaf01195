use crate::foundation::core::Rgba8;
use crate::foundation::error::{CaseforgeError, CaseforgeResult};
use crate::geometry::shape::ShapeGeometry;

/// One primitive lifted out of a template document, with resolved paint.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateShape {
    /// The shape's geometry.
    pub geometry: ShapeGeometry,
    /// Resolved fill color, `None` for `fill="none"` or unparseable paint.
    pub fill: Option<Rgba8>,
    /// Resolved stroke color, `None` for `stroke="none"` or unparseable paint.
    pub stroke: Option<Rgba8>,
}

/// Parse a raw SVG template document into a flat, document-ordered list of
/// primitives.
///
/// Walks `path`, `rect`, `circle`, and `ellipse` elements at any nesting
/// depth. Fill and stroke are resolved per element: inline `style`
/// declarations win over presentation attributes, then the nearest ancestor
/// (group inheritance). Elements of other kinds are skipped.
pub fn parse_template(bytes: &[u8]) -> CaseforgeResult<Vec<TemplateShape>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CaseforgeError::asset_decode(format!("template is not valid UTF-8: {e}")))?;
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| CaseforgeError::asset_decode(format!("template is not valid XML: {e}")))?;

    let root = doc.root_element();
    if !root.tag_name().name().eq_ignore_ascii_case("svg") {
        return Err(CaseforgeError::asset_decode(format!(
            "template root element is <{}>, expected <svg>",
            root.tag_name().name()
        )));
    }

    let mut shapes = Vec::new();
    for node in root.descendants().filter(|n| n.is_element()) {
        let Some(geometry) = geometry_for(&node)? else {
            continue;
        };
        shapes.push(TemplateShape {
            geometry,
            fill: resolved_paint(&node, "fill"),
            stroke: resolved_paint(&node, "stroke"),
        });
    }

    tracing::debug!(shapes = shapes.len(), "parsed template document");
    Ok(shapes)
}

fn geometry_for(node: &roxmltree::Node<'_, '_>) -> CaseforgeResult<Option<ShapeGeometry>> {
    let geometry = match node.tag_name().name() {
        "rect" => ShapeGeometry::Rect {
            x: length(node, "x"),
            y: length(node, "y"),
            width: length(node, "width"),
            height: length(node, "height"),
            rx: length(node, "rx"),
            ry: length(node, "ry"),
        },
        "circle" => ShapeGeometry::Circle {
            cx: length(node, "cx"),
            cy: length(node, "cy"),
            r: length(node, "r"),
        },
        "ellipse" => ShapeGeometry::Ellipse {
            cx: length(node, "cx"),
            cy: length(node, "cy"),
            rx: length(node, "rx"),
            ry: length(node, "ry"),
        },
        "path" => {
            let d = node.attribute("d").unwrap_or("").trim();
            if d.is_empty() {
                return Err(CaseforgeError::asset_decode(
                    "template <path> element has no path data",
                ));
            }
            ShapeGeometry::Path { d: d.to_string() }
        }
        _ => return Ok(None),
    };
    Ok(Some(geometry))
}

fn length(node: &roxmltree::Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name)
        .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Resolve `fill` or `stroke` for an element, honoring group inheritance.
fn resolved_paint(node: &roxmltree::Node<'_, '_>, name: &str) -> Option<Rgba8> {
    for ancestor in node.ancestors().filter(|n| n.is_element()) {
        let value = style_declaration(&ancestor, name).or_else(|| ancestor.attribute(name));
        if let Some(value) = value {
            return paint_color(value);
        }
    }
    None
}

/// Pull one property out of an inline `style` attribute.
fn style_declaration<'a>(node: &roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    let style = node.attribute("style")?;
    for decl in style.split(';') {
        let mut parts = decl.splitn(2, ':');
        let key = parts.next()?.trim();
        if key.eq_ignore_ascii_case(name) {
            return Some(parts.next().unwrap_or("").trim());
        }
    }
    None
}

fn paint_color(value: &str) -> Option<Rgba8> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return None;
    }
    match Rgba8::from_hex(value) {
        Ok(c) => Some(c),
        Err(_) => {
            // Gradients, url() references, and named colors never take part in
            // classification; an unmatched shape is ignored, not an error.
            tracing::debug!(paint = value, "ignoring non-hex paint value");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/document.rs"]
mod tests;
