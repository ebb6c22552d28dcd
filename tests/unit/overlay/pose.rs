use super::*;
use crate::foundation::core::Point;
use crate::test_support::{Call, RecordingPainter};

fn camera(t: Vec3, label: Option<&str>) -> CameraPose {
    CameraPose {
        intrinsics: Mat3::intrinsics(100.0, 100.0, 32.0, 32.0),
        rotation: Mat3::IDENTITY,
        translation: t,
        label: label.map(str::to_owned),
    }
}

fn overlay() -> CameraPoseOverlay {
    CameraPoseOverlay {
        arrow_lengths: Vec3::splat(1.0),
        ..CameraPoseOverlay::default()
    }
}

#[test]
fn label_is_anchored_at_projected_origin() {
    let mut p = RecordingPainter::bound(64, 64);
    let input = OverlayInput::from(camera(Vec3::new(0.0, 0.0, 10.0), Some("world")));
    assert!(overlay().apply(&mut p, Some(&input)));

    assert!(matches!(p.calls[0], Call::Axes { .. }));
    match &p.calls[1] {
        Call::TextBox {
            lines,
            position,
            anchor,
            style,
        } => {
            assert_eq!(lines, &vec!["world".to_owned()]);
            assert_eq!(*position, Point::new(32.0, 32.0));
            assert_eq!(*anchor, Anchor::Top);
            assert_eq!(style.rotation, 0.0);
        }
        other => panic!("expected label, got {other:?}"),
    }
}

#[test]
fn axes_use_configured_style() {
    let mut p = RecordingPainter::bound(64, 64);
    let o = overlay();
    o.draw_pose(&mut p, &Mat3::IDENTITY, &Mat3::IDENTITY, Vec3::new(0.0, 0.0, 5.0), None);
    let Call::Axes { style, .. } = &p.calls[0] else {
        panic!("expected axes call");
    };
    assert_eq!(style.lengths, Vec3::splat(1.0));
    assert_eq!(style.color_x, Color::axis(Axis::X));
    assert_eq!(style.arrow.line.width, 5.0);
    assert!(style.arrow.tip_closed);
}

#[test]
fn empty_labels_are_skipped() {
    let mut p = RecordingPainter::bound(64, 64);
    let input = OverlayInput::from(camera(Vec3::new(0.0, 0.0, 10.0), Some("")));
    assert!(overlay().apply(&mut p, Some(&input)));
    assert!(p.text_calls().is_empty());
}

#[test]
fn failed_projection_skips_label() {
    let mut p = RecordingPainter::bound(64, 64);
    let input = OverlayInput::from(camera(Vec3::new(0.0, 0.0, -10.0), Some("behind")));
    assert!(!overlay().apply(&mut p, Some(&input)));
    assert!(p.text_calls().is_empty());
}

#[test]
fn label_failure_fails_the_pose() {
    let mut p = RecordingPainter::bound(64, 64);
    p.fail_text = true;
    let input = OverlayInput::from(camera(Vec3::new(0.0, 0.0, 10.0), Some("world")));
    assert!(!overlay().apply(&mut p, Some(&input)));
}

#[test]
fn tags_are_all_drawn_even_after_a_failure() {
    let mut p = RecordingPainter::bound(64, 64);
    let tags = TagPoses {
        intrinsics: Mat3::intrinsics(100.0, 100.0, 32.0, 32.0),
        tags: vec![
            TagPose {
                rotation: Mat3::IDENTITY,
                translation: Vec3::new(0.0, 0.0, -3.0),
                label: Some("tag 0".to_owned()),
            },
            TagPose {
                rotation: Mat3::IDENTITY,
                translation: Vec3::new(0.0, 0.0, 8.0),
                label: Some("tag 1".to_owned()),
            },
        ],
    };
    let o = TagPoseOverlay { style: overlay() };
    assert!(!o.apply(&mut p, Some(&OverlayInput::from(tags))));

    let axes = p
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Axes { .. }))
        .count();
    assert_eq!(axes, 2);
    assert_eq!(p.text_calls().len(), 1);
}

#[test]
fn tag_overlay_rejects_single_camera_pose() {
    let mut p = RecordingPainter::bound(8, 8);
    let input = OverlayInput::from(camera(Vec3::new(0.0, 0.0, 1.0), None));
    assert!(!TagPoseOverlay::default().apply(&mut p, Some(&input)));
}

#[test]
fn tag_overlay_config_is_the_camera_style() {
    let o: TagPoseOverlay =
        serde_json::from_str(r#"{"arrow_lengths": [1, 2, 3], "text_anchor": "bottom-left"}"#)
            .unwrap();
    assert_eq!(o.style.arrow_lengths, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(o.style.text_anchor, Anchor::BottomLeft);
    assert_eq!(o.style.text_padding, Vec2::new(5.0, 5.0));
}

#[test]
fn poses_deserialize_from_matrices() {
    let pose: CameraPose = serde_json::from_str(
        r#"{"intrinsics": [[500, 0, 320], [0, 500, 240], [0, 0, 1]],
            "rotation": [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
            "translation": [0, 0, 2]}"#,
    )
    .unwrap();
    assert_eq!(pose.intrinsics, Mat3::intrinsics(500.0, 500.0, 320.0, 240.0));
    assert_eq!(pose.label, None);
}

#[test]
fn arrow_width_is_validated() {
    let mut o = CameraPoseOverlay::default();
    assert!(o.validate().is_ok());
    o.arrow_style.line.width = 0.0;
    assert!(o.validate().is_err());
}
