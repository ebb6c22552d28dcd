use super::*;
use crate::foundation::core::Mat3;

fn pose(t: Vec3) -> PinholePose {
    PinholePose {
        intrinsics: Mat3::intrinsics(100.0, 100.0, 320.0, 240.0),
        rotation: Mat3::IDENTITY,
        translation: t,
    }
}

#[test]
fn point_on_optical_axis_hits_principal_point() {
    let p = project_point(&pose(Vec3::new(0.0, 0.0, 5.0)), Vec3::default()).unwrap();
    assert_eq!(p, Point::new(320.0, 240.0));
}

#[test]
fn offsets_scale_with_focal_length_over_depth() {
    let p = project_point(&pose(Vec3::new(0.0, 0.0, 2.0)), Vec3::new(1.0, -1.0, 0.0)).unwrap();
    assert_eq!(p, Point::new(370.0, 190.0));
}

#[test]
fn points_behind_camera_are_rejected() {
    assert!(project_point(&pose(Vec3::new(0.0, 0.0, -1.0)), Vec3::default()).is_none());
    assert!(project_point(&pose(Vec3::default()), Vec3::default()).is_none());
}

#[test]
fn axes_project_all_tips() {
    let axes = project_axes(
        &pose(Vec3::new(0.0, 0.0, 10.0)),
        Vec3::default(),
        Vec3::splat(1.0),
    )
    .unwrap();
    assert_eq!(axes.origin, Point::new(320.0, 240.0));
    assert_eq!(axes.x, Point::new(330.0, 240.0));
    assert_eq!(axes.y, Point::new(320.0, 250.0));
    // z tip moves away along the optical axis and stays on the principal point.
    assert_eq!(axes.z, Point::new(320.0, 240.0));
}

#[test]
fn axes_fail_when_a_tip_is_behind_camera() {
    let err = project_axes(
        &pose(Vec3::new(0.0, 0.0, 1.0)),
        Vec3::default(),
        Vec3::new(1.0, 1.0, -5.0),
    )
    .unwrap_err();
    assert!(matches!(err, VizError::Draw(_)));
}

#[test]
fn axes_reject_non_finite_pose() {
    let mut p = pose(Vec3::new(0.0, 0.0, 1.0));
    p.translation.x = f64::NAN;
    assert!(project_axes(&p, Vec3::default(), Vec3::splat(1.0)).is_err());
}
