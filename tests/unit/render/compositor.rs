use super::*;

use crate::foundation::core::Point;

fn model() -> PhoneModel {
    PhoneModel {
        id: "mk-one".to_string(),
        name: "Mark One".to_string(),
        brand: "Acme".to_string(),
        width: 100.0,
        height: 200.0,
        min_x: 0.0,
        min_y: 0.0,
        screen_ratio: 0.5,
        outline_path: "M 0 0 L 100 0 L 100 200 L 0 200 Z".to_string(),
        cutout_path: "M 70 30 L 90 30 L 90 50 L 70 50 Z".to_string(),
        safe_zone_path: "M 5 10 L 95 10 L 95 190 L 5 190 Z".to_string(),
        safe_zone_synthesized: true,
    }
}

#[test]
fn empty_design_composites_to_a_white_supersampled_jpeg() {
    let m = model();
    let state = DesignState::new_for_model(&m);
    let mut compositor = Compositor::new(std::env::temp_dir());

    let target = compositor.composite(&m, &state).unwrap();
    assert_eq!(target.model_id, "mk-one");
    assert_eq!(target.width, 250); // ceil(100 * 2.5)
    assert_eq!(target.height, 500); // ceil(200 * 2.5)
    assert_eq!(target.revision, 0);

    let decoded = image::load_from_memory(&target.jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (250, 500));
    let rgb = decoded.to_rgb8();
    let px = rgb.get_pixel(125, 250);
    for c in px.0 {
        assert!(c > 240, "surface should be near-white, got {px:?}");
    }
}

#[test]
fn stripped_image_source_aborts_the_composite() {
    let m = model();
    let mut state = DesignState::new_for_model(&m);
    state.set_image("uploads/cat.png", 800, 600);
    let state = state.stripped_for_submission();

    let mut compositor = Compositor::new(std::env::temp_dir());
    let err = compositor.composite(&m, &state).unwrap_err();
    assert!(matches!(err, CaseforgeError::Validation(_)));
}

#[test]
fn missing_asset_bytes_surface_the_path_in_the_error() {
    let m = model();
    let mut state = DesignState::new_for_model(&m);
    state.set_image("uploads/does-not-exist.png", 800, 600);

    let mut compositor = Compositor::new(std::env::temp_dir());
    let err = compositor.composite(&m, &state).unwrap_err();
    assert!(err.to_string().contains("does-not-exist.png"));
}

#[test]
fn encode_jpeg_emits_a_decodable_jfif_stream() {
    let rgba = vec![255u8; 4 * 4 * 4];
    let jpeg = encode_jpeg(&rgba, 4, 4).unwrap();
    assert_eq!(&jpeg[..2], &[0xff, 0xd8]); // SOI marker
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn image_paint_rejects_byte_length_mismatch() {
    let err = image_paint(&[0u8; 12], 2, 2).unwrap_err();
    assert!(matches!(err, CaseforgeError::Validation(_)));
}

#[test]
fn bezpath_conversion_preserves_every_element() {
    let mut path = BezPath::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(10.0, 0.0));
    path.quad_to(Point::new(15.0, 5.0), Point::new(10.0, 10.0));
    path.curve_to(
        Point::new(5.0, 12.0),
        Point::new(2.0, 12.0),
        Point::new(0.0, 10.0),
    );
    path.close_path();

    let converted = bezpath_to_cpu(&path);
    assert_eq!(converted.elements().len(), path.elements().len());
}
