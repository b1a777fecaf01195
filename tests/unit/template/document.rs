use super::*;

#[test]
fn parses_flat_primitives_in_document_order() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg">
        <rect x="0" y="0" width="100" height="200" fill="#ff0000"/>
        <circle cx="80" cy="40" r="10" fill="#0000ff"/>
        <path d="M 0 0 L 10 0 L 10 10 Z" fill="#00ff00"/>
    </svg>"##;
    let shapes = parse_template(svg).unwrap();
    assert_eq!(shapes.len(), 3);
    assert_eq!(
        shapes[0].geometry,
        ShapeGeometry::Rect { x: 0.0, y: 0.0, width: 100.0, height: 200.0, rx: 0.0, ry: 0.0 }
    );
    assert_eq!(shapes[0].fill, Some(Rgba8::opaque(255, 0, 0)));
    assert_eq!(
        shapes[1].geometry,
        ShapeGeometry::Circle { cx: 80.0, cy: 40.0, r: 10.0 }
    );
    assert!(matches!(shapes[2].geometry, ShapeGeometry::Path { .. }));
}

#[test]
fn nested_groups_inherit_paint() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg">
        <g fill="#ff0000">
            <g><rect x="1" y="2" width="3" height="4"/></g>
        </g>
    </svg>"##;
    let shapes = parse_template(svg).unwrap();
    assert_eq!(shapes[0].fill, Some(Rgba8::opaque(255, 0, 0)));
    assert_eq!(shapes[0].stroke, None);
}

#[test]
fn style_attribute_wins_over_presentation_attribute() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg">
        <rect width="1" height="1" fill="#00ff00" style="fill: #ff0000; stroke:#0000ff"/>
    </svg>"##;
    let shapes = parse_template(svg).unwrap();
    assert_eq!(shapes[0].fill, Some(Rgba8::opaque(255, 0, 0)));
    assert_eq!(shapes[0].stroke, Some(Rgba8::opaque(0, 0, 255)));
}

#[test]
fn fill_none_resolves_to_no_paint() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg">
        <rect width="1" height="1" fill="none" stroke="#E30613"/>
    </svg>"##;
    let shapes = parse_template(svg).unwrap();
    assert_eq!(shapes[0].fill, None);
    assert_eq!(shapes[0].stroke, Some(Rgba8::opaque(0xe3, 0x06, 0x13)));
}

#[test]
fn non_hex_paint_is_ignored_not_fatal() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg">
        <rect width="1" height="1" fill="url(#grad)"/>
    </svg>"##;
    let shapes = parse_template(svg).unwrap();
    assert_eq!(shapes[0].fill, None);
}

#[test]
fn px_suffix_and_missing_lengths_default_sanely() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg">
        <rect width="10px" height="20px" fill="#ff0000"/>
    </svg>"##;
    let shapes = parse_template(svg).unwrap();
    assert_eq!(
        shapes[0].geometry,
        ShapeGeometry::Rect { x: 0.0, y: 0.0, width: 10.0, height: 20.0, rx: 0.0, ry: 0.0 }
    );
}

#[test]
fn malformed_xml_is_a_decode_error() {
    let err = parse_template(b"<svg><rect").unwrap_err();
    assert!(matches!(err, CaseforgeError::AssetDecode(_)));
}

#[test]
fn non_svg_root_is_a_decode_error() {
    let err = parse_template(b"<html></html>").unwrap_err();
    assert!(matches!(err, CaseforgeError::AssetDecode(_)));
}

#[test]
fn path_without_data_is_a_decode_error() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#ff0000"/></svg>"##;
    assert!(matches!(
        parse_template(svg).unwrap_err(),
        CaseforgeError::AssetDecode(_)
    ));
}
