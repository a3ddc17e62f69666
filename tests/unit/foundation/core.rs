use super::*;

#[test]
fn defaults_match_classic_spacing() {
    let cfg = LayoutConfig::default();
    assert_eq!(cfg.outer_space, Vec2::new(8.0, 8.0));
    assert_eq!(cfg.default_space, Vec2::new(8.0, 8.0));
    assert_eq!(cfg.root_autoresize, Autoresize::FILL);
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = LayoutConfig::from_json_str(r#"{ "outer_space": { "x": 4.0, "y": 2.0 } }"#).unwrap();
    assert_eq!(cfg.outer_space, Vec2::new(4.0, 2.0));
    assert_eq!(cfg.default_space, Vec2::new(8.0, 8.0));
    assert!(cfg.root_autoresize.height);
}

#[test]
fn negative_spacing_is_rejected() {
    let err = LayoutConfig::from_json_str(r#"{ "default_space": { "x": -1.0, "y": 0.0 } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("default_space must be >= 0"));
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = LayoutConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, ReflowError::Validation(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = LayoutConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
