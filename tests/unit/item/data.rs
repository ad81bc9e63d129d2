use super::*;

#[test]
fn item_data_lerp_is_fieldwise() {
    let a = ItemData::default();
    let b = ItemData {
        transform: Transform2D {
            translate: Vec2::new(10.0, 20.0),
            ..Transform2D::default()
        },
        opacity: 0.0,
        depth: 4.0,
        ..ItemData::default()
    };
    let mid = ItemData::lerp(&a, &b, 0.5);
    assert_eq!(mid.transform.translate, Vec2::new(5.0, 10.0));
    assert_eq!(mid.opacity, 0.5);
    assert_eq!(mid.depth, 2.0);
    assert_eq!(mid.color, a.color);
}

#[test]
fn color_lerp_rounds_and_clamps() {
    let a = Rgba8Premul::transparent();
    let b = Rgba8Premul::white();
    let c = Rgba8Premul::lerp(&a, &b, 0.5);
    assert_eq!(c.a, 128);
    assert_eq!(Rgba8Premul::lerp(&a, &b, 1.0), b);
}

#[test]
fn prop_read_write_roundtrip() {
    let mut d = ItemData::default();
    Prop::Position
        .write(&mut d, PropValue::Vec2(Vec2::new(1.0, 2.0)))
        .unwrap();
    assert_eq!(Prop::Position.read(&d), PropValue::Vec2(Vec2::new(1.0, 2.0)));

    Prop::Opacity.write(&mut d, PropValue::Scalar(3.0)).unwrap();
    assert_eq!(d.opacity, 1.0);
}

#[test]
fn prop_rejects_mismatched_values() {
    let mut d = ItemData::default();
    assert!(Prop::Color.write(&mut d, PropValue::Scalar(1.0)).is_err());
    assert!(!Prop::Rotation.accepts(&PropValue::Vec2(Vec2::ZERO)));
    assert!(Prop::Scale.accepts(&PropValue::Vec2(Vec2::ZERO)));
    assert!(
        PropValue::lerp(&PropValue::Scalar(0.0), &PropValue::Vec2(Vec2::ZERO), 0.5).is_err()
    );
}

#[test]
fn groups_are_not_drawable() {
    assert!(!ItemKind::Group.is_drawable());
    assert!(ItemKind::Shape.is_drawable());
}
