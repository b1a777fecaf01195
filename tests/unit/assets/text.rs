use super::*;

#[test]
fn non_positive_size_is_rejected() {
    let mut engine = TextLayoutEngine::new();
    for size in [0.0_f32, -4.0, f32::NAN] {
        let err = engine
            .layout_plain("hi", &[0u8; 4], size, 400, Rgba8::opaque(0, 0, 0))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, CaseforgeError::Validation(_)));
    }
}

#[test]
fn bytes_that_are_not_a_font_register_no_families() {
    let mut engine = TextLayoutEngine::new();
    let err = engine
        .layout_plain("hi", b"not a font", 16.0, 400, Rgba8::opaque(0, 0, 0))
        .map(|_| ())
        .unwrap_err();
    assert!(err.to_string().contains("font"));
}
