use super::*;

#[test]
fn anchor_offsets_cover_corners_and_center() {
    assert_eq!(Anchor::TopLeft.offset(10.0, 20.0), Vec2::new(0.0, 0.0));
    assert_eq!(Anchor::Center.offset(10.0, 20.0), Vec2::new(5.0, 10.0));
    assert_eq!(Anchor::BottomRight.offset(10.0, 20.0), Vec2::new(10.0, 20.0));
    assert_eq!(Anchor::Top.offset(10.0, 20.0), Vec2::new(5.0, 0.0));
    assert_eq!(Anchor::Left.offset(10.0, 20.0), Vec2::new(0.0, 10.0));
}

#[test]
fn anchor_parses_common_spellings() {
    assert_eq!("top".parse::<Anchor>().unwrap(), Anchor::Top);
    assert_eq!("Top-Right".parse::<Anchor>().unwrap(), Anchor::TopRight);
    assert_eq!("bottom_left".parse::<Anchor>().unwrap(), Anchor::BottomLeft);
    assert!("middle-ish".parse::<Anchor>().is_err());
}

#[test]
fn anchor_serde_is_kebab_case() {
    let a: Anchor = serde_json::from_str("\"bottom-right\"").unwrap();
    assert_eq!(a, Anchor::BottomRight);
    assert_eq!(serde_json::to_string(&Anchor::TopLeft).unwrap(), "\"top-left\"");
}

#[test]
fn mat3_mul_vec_applies_intrinsics() {
    let k = Mat3::intrinsics(100.0, 200.0, 50.0, 60.0);
    let p = k.mul_vec(Vec3::new(1.0, 2.0, 1.0));
    assert_eq!(p, Vec3::new(150.0, 460.0, 1.0));
}

#[test]
fn mat3_identity_is_neutral() {
    let v = Vec3::new(1.5, -2.0, 7.0);
    assert_eq!(Mat3::IDENTITY.mul_vec(v), v);
}

#[test]
fn vec3_serializes_as_array() {
    let v: Vec3 = serde_json::from_str("[1.0, 2.5, -3.0]").unwrap();
    assert_eq!(v, Vec3::new(1.0, 2.5, -3.0));
    assert_eq!(serde_json::to_string(&v).unwrap(), "[1.0,2.5,-3.0]");
}
