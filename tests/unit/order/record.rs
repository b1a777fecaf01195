use super::*;

fn design() -> DesignState {
    let mut state = DesignState {
        model_id: "mk-one".to_string(),
        image: None,
        text_elements: Vec::new(),
        revision: 0,
    };
    state.set_image("uploads/cat.png", 800, 600);
    state
}

#[test]
fn new_strips_the_image_reference() {
    let record =
        OrderRecord::new("ord-1", "mk-one", "Mark One", &design(), 1_700_000_000_000, "prints/ord-1.jpg")
            .unwrap();
    assert_eq!(record.design.image.as_ref().unwrap().source, None);
    assert_eq!(record.design.image.as_ref().unwrap().natural_width, 800);
    assert_eq!(record.model_name, "Mark One");
}

#[test]
fn empty_order_id_is_rejected() {
    assert!(OrderRecord::new("  ", "mk-one", "Mark One", &design(), 0, "p.jpg").is_err());
}

#[test]
fn invalid_design_is_rejected_before_freezing() {
    let mut bad = design();
    bad.model_id = String::new();
    assert!(OrderRecord::new("ord-1", "mk-one", "Mark One", &bad, 0, "p.jpg").is_err());
}

#[test]
fn validate_catches_a_surviving_image_reference() {
    let mut record =
        OrderRecord::new("ord-1", "mk-one", "Mark One", &design(), 0, "p.jpg").unwrap();
    record.design.image.as_mut().unwrap().source = Some("uploads/cat.png".to_string());
    assert!(record.validate().is_err());
}

#[test]
fn serde_round_trip_is_lossless() {
    let record =
        OrderRecord::new("ord-1", "mk-one", "Mark One", &design(), 42, "prints/ord-1.jpg").unwrap();
    let json = serde_json::to_string(&record).unwrap();
    let back: OrderRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
