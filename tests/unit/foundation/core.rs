use super::*;

#[test]
fn time_range_contains_is_half_open() {
    let r = TimeRange::new(1.0, 2.0).unwrap();
    assert!(!r.contains(0.999));
    assert!(r.contains(1.0));
    assert!(r.contains(1.5));
    assert!(!r.contains(2.0));
    assert_eq!(r.duration(), 1.0);
}

#[test]
fn time_range_rejects_inverted_and_nan() {
    assert!(TimeRange::new(2.0, 1.0).is_err());
    assert!(TimeRange::new(f64::NAN, 1.0).is_err());
    assert!(TimeRange::new(0.0, f64::NAN).is_err());
    assert!(TimeRange::new(0.0, FOREVER).is_ok());
}

#[test]
fn forever_range_never_ends() {
    let r = TimeRange::forever(3.0);
    assert!(r.is_forever());
    assert!(r.contains(1e12));
    assert!(r.duration().is_infinite());
    assert!(r.shift(1.0).is_forever());
}

#[test]
fn fps_frame_math() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frames_to_secs(15), 0.5);
    assert_eq!(fps.frames_covering(2.0), 60);
    assert_eq!(fps.frames_covering(0.0), 1);
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps::new(0, 1).is_err());
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D {
        translate: Vec2::new(10.0, -2.5),
        ..Transform2D::default()
    };
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}
