use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CaseforgeError::degenerate_shape("x")
            .to_string()
            .contains("degenerate shape:")
    );
    assert!(
        CaseforgeError::missing_outline("x")
            .to_string()
            .contains("missing outline:")
    );
    assert!(
        CaseforgeError::path_conversion("x")
            .to_string()
            .contains("path conversion error:")
    );
    assert!(
        CaseforgeError::asset_decode("x")
            .to_string()
            .contains("asset decode error:")
    );
    assert!(
        CaseforgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CaseforgeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn resolution_too_low_names_both_extents() {
    let err = CaseforgeError::ResolutionTooLow {
        width: 120,
        height: 80,
        min_width: 300,
        min_height: 500,
    };
    let msg = err.to_string();
    assert!(msg.contains("120x80"));
    assert!(msg.contains("300x500"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CaseforgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
