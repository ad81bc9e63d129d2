use super::*;
use crate::foundation::core::{Rgba8Premul, Vec2};

fn tween(prop: Prop, from: PropValue, to: PropValue, at: f64, end: f64) -> ItemAnimation {
    ItemAnimation {
        item: ItemId(0),
        source: None,
        range: TimeRange::new(at, end).unwrap(),
        rate: Ease::Linear,
        warps: Vec::new(),
        holds: true,
        effect: ItemEffect::Tween { prop, from, to },
    }
}

#[test]
fn progress_clamps_outside_range() {
    let a = tween(
        Prop::Opacity,
        PropValue::Scalar(0.0),
        PropValue::Scalar(1.0),
        1.0,
        3.0,
    );
    assert_eq!(a.progress(0.0), 0.0);
    assert_eq!(a.progress(2.0), 0.5);
    assert_eq!(a.progress(10.0), 1.0);
}

#[test]
fn zero_duration_jumps_at_start() {
    let a = tween(
        Prop::Depth,
        PropValue::Scalar(0.0),
        PropValue::Scalar(1.0),
        1.0,
        1.0,
    );
    assert_eq!(a.progress(0.999), 0.0);
    assert_eq!(a.progress(1.0), 1.0);
}

#[test]
fn tween_only_touches_its_component() {
    let a = tween(
        Prop::Position,
        PropValue::Vec2(Vec2::ZERO),
        PropValue::Vec2(Vec2::new(4.0, 0.0)),
        0.0,
        1.0,
    );
    let mut data = ItemData {
        color: Rgba8Premul::transparent(),
        ..ItemData::default()
    };
    a.apply(&mut data, 0.25).unwrap();
    assert_eq!(data.transform.translate, Vec2::new(1.0, 0.0));
    assert_eq!(data.color, Rgba8Premul::transparent());
}

#[test]
fn display_and_interpolate_cover() {
    let shown = ItemData {
        depth: 3.0,
        ..ItemData::default()
    };
    let d = ItemAnimation::display(ItemId(1), 2.0, shown.clone());
    assert!(d.covers());
    assert!(d.footprint().is_forever());

    let mut data = ItemData::default();
    d.apply(&mut data, 5.0).unwrap();
    assert_eq!(data, shown);
}

#[test]
fn non_holding_footprint_is_active_range() {
    let mut a = tween(
        Prop::Opacity,
        PropValue::Scalar(0.0),
        PropValue::Scalar(1.0),
        1.0,
        2.0,
    );
    a.holds = false;
    assert_eq!(a.footprint(), TimeRange::new(1.0, 2.0).unwrap());
    assert!(!a.covers());
}

#[test]
fn warp_remaps_time_inside_its_range() {
    let w = TimeWarp {
        range: TimeRange::new(0.0, 2.0).unwrap(),
        rate: Ease::InQuad,
    };
    assert_eq!(w.apply(1.0), 0.5);
    assert_eq!(w.apply(0.0), 0.0);
    assert_eq!(w.apply(3.0), 3.0);

    let mut a = tween(
        Prop::Opacity,
        PropValue::Scalar(0.0),
        PropValue::Scalar(1.0),
        0.0,
        2.0,
    );
    a.warps.push(w);
    assert_eq!(a.progress(1.0), 0.25);
}

#[test]
fn spin_accumulates_elapsed_time() {
    let a = ItemAnimation {
        item: ItemId(0),
        source: None,
        range: TimeRange::forever(1.0),
        rate: Ease::Linear,
        warps: Vec::new(),
        holds: false,
        effect: ItemEffect::Spin {
            radians_per_sec: 2.0,
        },
    };
    let mut data = ItemData::default();
    a.apply(&mut data, 3.0).unwrap();
    assert_eq!(data.transform.rotation_rad, 4.0);
}

#[test]
fn bounded_spin_stops_at_its_end() {
    let a = ItemAnimation {
        item: ItemId(0),
        source: None,
        range: TimeRange::new(0.0, 1.5).unwrap(),
        rate: Ease::Linear,
        warps: Vec::new(),
        holds: true,
        effect: ItemEffect::Spin {
            radians_per_sec: 2.0,
        },
    };
    let mut data = ItemData::default();
    a.apply(&mut data, 10.0).unwrap();
    assert_eq!(data.transform.rotation_rad, 3.0);
}
