use super::*;

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
        cutout_path: String::new(),
        safe_zone_path: "M 5 10 L 95 10 L 95 190 L 5 190 Z".to_string(),
        safe_zone_synthesized: true,
    }
}

#[test]
fn new_state_is_all_identity() {
    let state = DesignState::new_for_model(&model());
    assert_eq!(state.model_id, "mk-one");
    assert!(state.image.is_none());
    assert!(state.text_elements.is_empty());
    assert_eq!(state.revision, 0);
}

#[test]
fn set_image_resets_transform_and_bumps_revision() {
    let mut state = DesignState::new_for_model(&model());
    state.set_image("uploads/cat.png", 800, 600);
    state
        .set_image_transform(LayerTransform { scale: 2.0, rotation_deg: 45.0, x: 3.0, y: 4.0 })
        .unwrap();
    let rev = state.revision;

    state.set_image("uploads/dog.png", 640, 640);
    let image = state.image.as_ref().unwrap();
    assert_eq!(image.transform, LayerTransform::default());
    assert_eq!(image.natural_width, 640);
    assert!(state.revision > rev);
}

#[test]
fn cover_fit_uses_the_larger_axis_ratio() {
    // 100/400 = 0.25, 200/400 = 0.5 -> cover picks 0.5 (crops horizontally).
    assert_eq!(cover_fit_scale(&model(), 400, 400).unwrap(), 0.5);
    // Wide image: 100/50 = 2.0 wins over 200/400 = 0.5.
    assert_eq!(cover_fit_scale(&model(), 50, 400).unwrap(), 2.0);
}

#[test]
fn fit_image_to_case_is_idempotent() {
    let mut state = DesignState::new_for_model(&model());
    state.set_image("uploads/cat.png", 400, 400);
    state
        .set_image_transform(LayerTransform { scale: 3.0, rotation_deg: 10.0, x: 7.0, y: -2.0 })
        .unwrap();

    state.fit_image_to_case(&model()).unwrap();
    let once = state.image.clone().unwrap();
    state.fit_image_to_case(&model()).unwrap();
    let twice = state.image.clone().unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.transform.scale, 0.5);
    assert_eq!(once.transform.rotation_deg, 0.0);
    assert_eq!(once.transform.x, 0.0);
    assert_eq!(once.transform.y, 0.0);
}

#[test]
fn rotate_there_and_back_restores_the_transform() {
    let mut state = DesignState::new_for_model(&model());
    state.push_text(TextElement {
        content: "hello".to_string(),
        font_source: "fonts/inter.ttf".to_string(),
        size_px: 24.0,
        weight: 400,
        color: Rgba8::opaque(0, 0, 0),
        transform: LayerTransform { scale: 1.5, rotation_deg: 30.0, x: 5.0, y: 6.0 },
    });
    let original = state.text_elements[0].transform;

    let mut t = original;
    t.rotation_deg += 90.0;
    state.set_text_transform(0, t).unwrap();
    let mut t = state.text_elements[0].transform;
    t.rotation_deg += -90.0;
    state.set_text_transform(0, t).unwrap();

    let back = state.text_elements[0].transform;
    assert!((back.rotation_deg - original.rotation_deg).abs() < 1e-9);
    assert_eq!(back.scale, original.scale);
    assert_eq!(back.x, original.x);
    assert_eq!(back.y, original.y);
}

#[test]
fn stripped_form_drops_only_the_image_reference() {
    let mut state = DesignState::new_for_model(&model());
    state.set_image("uploads/cat.png", 800, 600);
    state
        .set_image_transform(LayerTransform { scale: 2.0, rotation_deg: 15.0, x: 1.0, y: 2.0 })
        .unwrap();

    let frozen = state.stripped_for_submission();
    let image = frozen.image.as_ref().unwrap();
    assert_eq!(image.source, None);
    assert_eq!(image.natural_width, 800);
    assert_eq!(image.transform, state.image.as_ref().unwrap().transform);
    // The live state keeps its reference.
    assert!(state.image.as_ref().unwrap().source.is_some());
}

#[test]
fn transform_mutations_validate_inputs() {
    let mut state = DesignState::new_for_model(&model());
    state.set_image("uploads/cat.png", 800, 600);
    assert!(
        state
            .set_image_transform(LayerTransform { scale: 0.0, ..LayerTransform::default() })
            .is_err()
    );
    assert!(
        state
            .set_image_transform(LayerTransform { x: f64::NAN, ..LayerTransform::default() })
            .is_err()
    );
    assert!(state.set_text_transform(0, LayerTransform::default()).is_err());
}

#[test]
fn serde_round_trip_preserves_the_session() {
    let mut state = DesignState::new_for_model(&model());
    state.set_image("uploads/cat.png", 800, 600);
    state.push_text(TextElement {
        content: "yo".to_string(),
        font_source: "fonts/inter.ttf".to_string(),
        size_px: 18.0,
        weight: 700,
        color: Rgba8::opaque(30, 30, 30),
        transform: LayerTransform::default(),
    });

    let json = serde_json::to_string(&state).unwrap();
    let back: DesignState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
