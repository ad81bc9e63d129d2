use super::*;
use crate::foundation::ids::ItemId;

fn waits(durations: &[f64]) -> Vec<Animation> {
    durations.iter().map(|&d| Animation::wait(d)).collect()
}

#[test]
fn lag_zero_runs_children_together() {
    let plan = plan_staggered(&waits(&[1.0, 1.0, 2.0, 1.0]), 0.0, 0.0).unwrap();
    assert_eq!(plan.natural_end, 2.0);
    assert!(plan.slots.iter().all(|s| s.start == 0.0));
}

#[test]
fn lag_one_chains_children() {
    let plan = plan_staggered(&waits(&[1.0, 1.0, 2.0, 1.0]), 1.0, 0.0).unwrap();
    assert_eq!(plan.natural_end, 5.0);
    let starts: Vec<f64> = plan.slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, [0.0, 1.0, 2.0, 4.0]);
}

#[test]
fn fractional_lag_and_offset_stagger_starts() {
    let plan = plan_staggered(&waits(&[2.0, 2.0, 2.0]), 0.5, 0.25).unwrap();
    let starts: Vec<f64> = plan.slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, [0.0, 1.25, 2.5]);
    assert_eq!(plan.natural_end, 4.5);
}

#[test]
fn child_delay_shifts_its_slot() {
    let children = vec![Animation::wait(1.0), Animation::wait(1.0).at(0.5)];
    let plan = plan_staggered(&children, 1.0, 0.0).unwrap();
    assert_eq!(plan.slots[1].start, 1.5);
    assert_eq!(plan.natural_end, 2.5);
}

#[test]
fn aligned_children_share_the_longest_interval() {
    let plan = plan_aligned(&waits(&[1.0, 3.0, 2.0])).unwrap();
    assert_eq!(plan.natural_end, 3.0);
    assert!(plan.slots.iter().all(|s| *s == ChildSlot { start: 0.0, duration: 3.0 }));
}

#[test]
fn scaling_is_linear() {
    let plan = plan_staggered(&waits(&[1.0, 3.0]), 1.0, 0.0)
        .unwrap()
        .scaled_to(2.0);
    assert_eq!(plan.natural_end, 2.0);
    assert_eq!(plan.slots[0], ChildSlot { start: 0.0, duration: 0.5 });
    assert_eq!(plan.slots[1], ChildSlot { start: 0.5, duration: 1.5 });
}

#[test]
fn no_children_means_zero_duration() {
    let plan = plan_children(CompositeMode::Sequential, &[], 1.0, 0.0).unwrap();
    assert_eq!(plan.natural_end, 0.0);
    assert!(plan.slots.is_empty());
}

#[test]
fn open_ended_child_is_rejected() {
    let children = vec![Animation::wait(1.0), Animation::spin(ItemId(0), 1.0)];
    let err = plan_staggered(&children, 1.0, 0.0).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn negative_offset_before_start_is_rejected() {
    let err = plan_staggered(&waits(&[1.0, 1.0]), 0.0, -0.5).unwrap_err();
    assert!(matches!(err, TimelineError::Validation(_)));
}

#[test]
fn default_lag_per_mode() {
    assert_eq!(CompositeMode::Sequential.default_lag_ratio(), 1.0);
    assert_eq!(CompositeMode::Parallel.default_lag_ratio(), 0.0);
    assert_eq!(CompositeMode::Aligned.default_lag_ratio(), 0.0);
}
