use super::*;
use crate::test_support::{Call, RecordingPainter};

fn recorded_boxes(p: &RecordingPainter) -> Vec<(Rect, BoundingBoxStyle, BoxLabels)> {
    p.calls
        .iter()
        .filter_map(|c| match c {
            Call::BoundingBox {
                rect,
                style,
                labels,
                ..
            } => Some((*rect, style.clone(), labels.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn named_classes_use_category_colors() {
    let b = create_bounding_box("person", 10.0, 20.0, 30.0, 40.0, 0.873);
    assert_eq!(b.label_top(), &["person".to_owned()][..]);
    assert_eq!(b.label_bottom(), &["C: 0.87".to_owned()][..]);
    assert!(b.label_left().is_empty() && b.label_right().is_empty());
    assert_eq!(b.color(), Color::from_object_category("person"));
    assert_eq!(b.rect(), Rect::new(10.0, 20.0, 40.0, 60.0));
}

#[test]
fn numeric_classes_use_id_colors() {
    let b = create_bounding_box(3u64, 0.0, 0.0, 1.0, 1.0, 0.5);
    assert_eq!(b.label_top(), &["Class #3".to_owned()][..]);
    assert_eq!(b.label_bottom(), &["C: 0.50".to_owned()][..]);
    assert_eq!(b.color(), Color::from_object_id(3));
}

#[test]
fn label_padding_scales_with_each_box() {
    let overlay = BoundingBoxOverlay::default();
    let mut p = RecordingPainter::bound(640, 480);
    let boxes = vec![
        BoundingBox::from_ltwh(0.0, 0.0, 200.0, 100.0, Color::WHITE),
        BoundingBox::from_ltwh(0.0, 0.0, 20.0, 40.0, Color::WHITE),
    ];
    assert!(overlay.apply(&mut p, Some(&OverlayInput::BoundingBoxes(boxes))));

    let drawn = recorded_boxes(&p);
    assert_eq!(drawn.len(), 2);
    assert_eq!(drawn[0].1.label_padding, Vec2::new(10.0, 5.0));
    assert_eq!(drawn[1].1.label_padding, Vec2::new(1.0, 2.0));
}

#[test]
fn absolute_label_padding_is_kept() {
    let overlay = BoundingBoxOverlay {
        label_padding: Vec2::new(4.0, 3.0),
        ..BoundingBoxOverlay::default()
    };
    let mut p = RecordingPainter::bound(64, 64);
    let boxes = vec![BoundingBox::from_ltwh(1.0, 1.0, 50.0, 50.0, Color::WHITE)];
    overlay.draw(&mut p, &boxes);
    assert_eq!(recorded_boxes(&p)[0].1.label_padding, Vec2::new(4.0, 3.0));
}

#[test]
fn box_color_drives_outline_and_fill() {
    let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
    let overlay = BoundingBoxOverlay::default();
    let mut p = RecordingPainter::bound(64, 64);
    overlay.draw(&mut p, &[BoundingBox::from_ltwh(1.0, 1.0, 10.0, 10.0, red)]);

    let (_, style, labels) = recorded_boxes(&p).remove(0);
    assert_eq!(style.line_style.color, red);
    assert_eq!(style.line_style.width, 3.0);
    assert_eq!(style.box_fill_color, Some(red.with_alpha(0.3)));
    assert_eq!(style.text_fill_color, Some(Color::WHITE.with_alpha(0.7)));
    assert!(!labels.left_t2b);
    assert!(labels.right_t2b);
}

#[test]
fn boxes_are_drawn_in_order_and_failures_aggregate() {
    let overlay = BoundingBoxOverlay::default();
    let mut p = RecordingPainter::bound(64, 64);
    p.fail_boxes = true;
    let boxes = vec![
        BoundingBox::from_ltwh(1.0, 1.0, 10.0, 10.0, Color::WHITE).with_label_top("first"),
        BoundingBox::from_ltwh(2.0, 2.0, 10.0, 10.0, Color::WHITE).with_label_top("second"),
    ];
    assert!(!overlay.draw(&mut p, &boxes));

    let tops: Vec<_> = recorded_boxes(&p)
        .into_iter()
        .map(|(_, _, l)| l.top)
        .collect();
    assert_eq!(tops, vec![vec!["first".to_owned()], vec!["second".to_owned()]]);
}

#[test]
fn no_boxes_is_success() {
    let mut p = RecordingPainter::bound(8, 8);
    let input = OverlayInput::BoundingBoxes(Vec::new());
    assert!(BoundingBoxOverlay::default().apply(&mut p, Some(&input)));
    assert!(p.calls.is_empty());
}

#[test]
fn wrong_input_fails_without_drawing() {
    let mut p = RecordingPainter::bound(8, 8);
    let overlay = BoundingBoxOverlay::default();
    assert!(!overlay.apply(&mut p, None));
    assert!(!overlay.apply(&mut p, Some(&OverlayInput::from("text"))));
    assert!(p.calls.is_empty());
}

#[test]
fn box_fill_parses_keywords_and_colors() {
    assert_eq!("none".parse::<BoxFill>().unwrap(), BoxFill::None);
    assert_eq!(
        "same!30".parse::<BoxFill>().unwrap(),
        BoxFill::SameAsBox { alpha: 0.3 }
    );
    assert_eq!(
        "same".parse::<BoxFill>().unwrap(),
        BoxFill::SameAsBox { alpha: 1.0 }
    );
    assert_eq!(
        "white".parse::<BoxFill>().unwrap(),
        BoxFill::Solid(Color::WHITE)
    );
    assert!("same!lots".parse::<BoxFill>().is_err());
}

#[test]
fn box_fill_deserializes_null_and_objects() {
    let none: BoxFill = serde_json::from_str("null").unwrap();
    assert_eq!(none, BoxFill::None);
    let solid: BoxFill = serde_json::from_str(r#"{"r": 0, "g": 0, "b": 1}"#).unwrap();
    assert_eq!(solid, BoxFill::Solid(Color::rgba(0.0, 0.0, 1.0, 1.0)));
}

#[test]
fn box_fill_alpha_serializes_as_whole_percent() {
    let json = serde_json::to_string(&BoxFill::SameAsBox { alpha: 0.3 }).unwrap();
    assert_eq!(json, r#""same!30""#);
    let back: BoxFill = serde_json::from_str(&json).unwrap();
    assert_eq!(back, BoxFill::SameAsBox { alpha: 0.3 });

    let json = serde_json::to_string(&BoxFill::SameAsBox { alpha: 0.255 }).unwrap();
    assert_eq!(json, r#""same!25.5""#);
}

#[test]
fn boxes_deserialize_with_flexible_labels() {
    let b: BoundingBox = serde_json::from_str(
        r#"{"left": 1, "top": 2, "width": 3, "height": 4, "color": "red",
            "label_top": "car", "label_bottom": ["a", "b"], "label_left": null}"#,
    )
    .unwrap();
    assert_eq!(b.label_top(), &["car".to_owned()][..]);
    assert_eq!(b.label_bottom().len(), 2);
    assert!(b.label_left().is_empty());
    assert!(b.label_right().is_empty());
}

#[test]
fn overlay_config_uses_defaults_for_missing_fields() {
    let o: BoundingBoxOverlay =
        serde_json::from_str(r#"{"clip_label": true, "box_fill_color": "none"}"#).unwrap();
    assert!(o.clip_label);
    assert_eq!(o.box_fill_color, BoxFill::None);
    assert_eq!(o.corner_radius, 0.1);
    assert_eq!(o.label_padding, Vec2::new(0.05, 0.05));
}

#[test]
fn invalid_text_style_is_rejected() {
    let mut o = BoundingBoxOverlay::default();
    assert!(o.validate().is_ok());
    o.text_style.size = 0.0;
    assert!(o.validate().is_err());
}
