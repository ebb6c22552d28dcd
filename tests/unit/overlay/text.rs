use super::*;
use crate::foundation::core::Point;
use crate::test_support::{Call, RecordingPainter};
use chrono::{NaiveDate, Utc};

fn text_box(call: &Call) -> (&[String], Point, Anchor, &TextBoxStyle) {
    match call {
        Call::TextBox {
            lines,
            position,
            anchor,
            style,
        } => (lines, *position, *anchor, style),
        other => panic!("expected text box, got {other:?}"),
    }
}

#[test]
fn dynamic_text_resolves_position_against_canvas() {
    let mut p = RecordingPainter::bound(200, 100);
    let overlay = DynamicTextOverlay::default();
    assert!(overlay.apply(&mut p, Some(&OverlayInput::from("frame 1"))));

    let (lines, position, anchor, style) = text_box(&p.calls[0]);
    assert_eq!(lines, &["frame 1".to_owned()][..]);
    assert_eq!(position, Point::new(100.0, 10.0));
    assert_eq!(anchor, Anchor::Top);
    assert_eq!(style.text_style.family, "monospace");
    assert_eq!(style.fill_color, Some(Color::WHITE.with_alpha(0.8)));
    assert!(!style.line_style.is_valid());
}

#[test]
fn dynamic_text_needs_text_input() {
    let mut p = RecordingPainter::bound(10, 10);
    let overlay = DynamicTextOverlay::default();
    assert!(!overlay.apply(&mut p, None));
    assert!(p.calls.is_empty());
}

#[test]
fn draw_failures_are_reported() {
    let mut p = RecordingPainter::bound(10, 10);
    p.fail_text = true;
    assert!(!DynamicTextOverlay::default().draw(&mut p, &["x".to_owned()]));
}

#[test]
fn static_text_draws_its_own_text() {
    let mut p = RecordingPainter::bound(200, 100);
    let overlay = StaticTextOverlay::default();
    assert!(overlay.apply(&mut p, Some(&OverlayInput::from("ignored"))));

    let (lines, position, anchor, _) = text_box(&p.calls[0]);
    assert_eq!(lines, &["Static Text".to_owned()][..]);
    assert_eq!(position, Point::new(190.0, 10.0));
    assert_eq!(anchor, Anchor::TopRight);
}

#[test]
fn static_text_with_lines() {
    let mut p = RecordingPainter::bound(50, 50);
    let overlay = StaticTextOverlay::new(vec!["cam0".to_owned(), "left".to_owned()]);
    assert!(overlay.apply(&mut p, None));
    assert_eq!(text_box(&p.calls[0]).0.len(), 2);
}

#[test]
fn static_text_keeps_its_placement_when_deserialized() {
    let o: StaticTextOverlay =
        serde_json::from_str(r#"{"text": "cam0", "rotation": 15, "fill_color": null}"#).unwrap();
    assert_eq!(o.text, TextContent::from("cam0"));
    assert_eq!(o.position, Vec2::new(-10.0, 10.0));
    assert_eq!(o.anchor, Anchor::TopRight);
    assert_eq!(o.look.rotation, 15.0);
    assert_eq!(o.look.fill_color, None);
    assert_eq!(o.look.padding, Vec2::new(5.0, 5.0));
}

#[test]
fn validation_catches_unusable_configs() {
    assert!(DynamicTextOverlay::default().validate().is_ok());
    assert!(StaticTextOverlay::default().validate().is_ok());

    let bad_position = DynamicTextOverlay {
        position: Vec2::new(f64::NAN, 0.0),
        ..DynamicTextOverlay::default()
    };
    assert!(bad_position.validate().is_err());

    let empty = StaticTextOverlay::new(Vec::<String>::new());
    assert!(empty.validate().is_err());

    let mut negative_padding = DynamicTextOverlay::default();
    negative_padding.look.padding = Vec2::new(-1.0, 0.0);
    assert!(negative_padding.validate().is_err());
}

#[test]
fn frame_label_formats_all_parts() {
    let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_milli_opt(7, 8, 9, 42)
        .unwrap()
        .and_utc();
    let fmt = FrameLabelFormat::default();
    assert_eq!(
        frame_label("cam", Some(17), Some(&ts), &fmt),
        "cam #00017, 2024-03-05 07:08:09.042"
    );

    let short = FrameLabelFormat {
        num_digits: 3,
        include_date: false,
    };
    assert_eq!(
        frame_label("cam", Some(12345), Some(&ts), &short),
        "cam #12345, 07:08:09.042"
    );
}

#[test]
fn frame_label_omits_missing_parts() {
    let fmt = FrameLabelFormat::default();
    assert_eq!(frame_label::<Utc>("cam", None, None, &fmt), "cam");
    assert_eq!(frame_label::<Utc>("cam", Some(3), None, &fmt), "cam #00003");
}
