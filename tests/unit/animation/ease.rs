use super::*;

const MONOTONIC: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::Smooth,
    Ease::RushInto,
    Ease::RushFrom,
];

#[test]
fn endpoints_are_stable() {
    for ease in MONOTONIC {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in MONOTONIC {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn smooth_is_symmetric() {
    assert!((Ease::Smooth.apply(0.5) - 0.5).abs() < 1e-12);
    let lo = Ease::Smooth.apply(0.2);
    let hi = Ease::Smooth.apply(0.8);
    assert!((lo + hi - 1.0).abs() < 1e-12);
}

#[test]
fn there_and_back_returns_to_start() {
    assert_eq!(Ease::ThereAndBack.apply(0.0), 0.0);
    assert_eq!(Ease::ThereAndBack.apply(0.5), 1.0);
    assert_eq!(Ease::ThereAndBack.apply(1.0), 0.0);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-3.0), 0.0);
    assert_eq!(Ease::Linear.apply(3.0), 1.0);
}
