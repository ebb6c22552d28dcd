use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn parses_named_colors_with_alpha_suffix() {
    let c: Color = "white!70".parse().unwrap();
    assert_eq!(&c.to_rgba8()[..3], &[255u8, 255, 255][..]);
    assert!((c.a - 0.7).abs() < 1e-9);

    let c: Color = serde_json::from_value(json!("Navy Blue")).unwrap();
    assert_eq!(c.to_rgba8(), [0, 0, 128, 255]);

    assert!("not-a-color".parse::<Color>().is_err());
    assert!("white!abc".parse::<Color>().is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));

    assert!(serde_json::from_value::<Color>(json!([0.1, 0.2])).is_err());
}

#[test]
fn parses_hsla_object() {
    let c: Color = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    // Pure red.
    assert!((c.r - 1.0).abs() < 1e-9);
    assert!((c.g - 0.0).abs() < 1e-9);
    assert!((c.b - 0.0).abs() < 1e-9);
}

#[test]
fn serialized_colors_parse_back() {
    let c = Color::rgba(0.1, 0.2, 0.3, 0.4);
    let v = serde_json::to_value(c).unwrap();
    let back: Color = serde_json::from_value(v).unwrap();
    assert_eq!(back, c);
}

#[test]
fn object_colors_are_deterministic() {
    assert_eq!(Color::from_object_id(3), Color::from_object_id(3));
    assert_ne!(Color::from_object_id(0), Color::from_object_id(1));
    assert_eq!(
        Color::from_object_category("Person"),
        Color::from_object_category("person")
    );
    assert_eq!(
        Color::from_object_category("unlisted thing"),
        Color::from_object_category("unlisted thing")
    );
    assert!(Color::object_category_names().contains(&"car"));
}

#[test]
fn axis_colors_are_distinct() {
    let x = Color::axis(Axis::X);
    let y = Color::axis(Axis::Y);
    let z = Color::axis(Axis::Z);
    assert!(x.r > x.g && x.r > x.b);
    assert!(y.g > y.r && y.g > y.b);
    assert!(z.b > z.r && z.b > z.g);
}
