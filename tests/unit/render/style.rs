use super::*;

#[test]
fn invalid_line_style_draws_nothing() {
    assert!(!LineStyle::invalid().is_valid());
    assert!(LineStyle::with_width(3.0).is_valid());

    let transparent = LineStyle {
        color: Color::BLACK.with_alpha(0.0),
        ..LineStyle::default()
    };
    assert!(!transparent.is_valid());
}

#[test]
fn corner_radius_fraction_and_absolute() {
    assert_eq!(corner_radius_px(0.1, 200.0, 100.0), 10.0);
    assert_eq!(corner_radius_px(8.0, 200.0, 100.0), 8.0);
    assert_eq!(corner_radius_px(500.0, 200.0, 100.0), 50.0);
    assert_eq!(corner_radius_px(0.0, 200.0, 100.0), 0.0);
    assert_eq!(corner_radius_px(-1.0, 200.0, 100.0), 0.0);
}

#[test]
fn text_style_validation_rejects_bad_sizes() {
    assert!(TextStyle::default().validate().is_ok());
    let bad = TextStyle {
        size: 0.0,
        ..TextStyle::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn arrow_style_flattens_line_fields() {
    let a: ArrowStyle = serde_json::from_str(r#"{"width": 2.0, "tip_closed": false}"#).unwrap();
    assert_eq!(a.line.width, 2.0);
    assert!(!a.tip_closed);
    assert_eq!(a.tip_angle, 20.0);
}

