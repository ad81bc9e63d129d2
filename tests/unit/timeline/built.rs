use super::*;
use crate::{
    foundation::core::Vec2,
    timeline::{builder::Timeline, config::TimelineConfig},
};

fn sample() -> (BuiltTimeline, ItemId, ItemId, ItemId) {
    let mut ids = (ItemId(0), ItemId(0), ItemId(0));
    let built = Timeline::run(TimelineConfig::default(), |tl| {
        let back = tl.spawn(
            "back",
            ItemKind::Shape,
            ItemData {
                depth: 5.0,
                ..ItemData::default()
            },
        );
        let front = tl.spawn("front", ItemKind::Text, ItemData::default());
        let group = tl.spawn("group", ItemKind::Group, ItemData::default());
        tl.add_children(group, &[back, front])?;
        tl.show(&[group, back, front])?;
        tl.play(Animation::move_to(front, Vec2::new(10.0, 0.0)).duration(2.0))?;
        tl.hide(&[back])?;
        tl.forward(1.0)?;
        ids = (back, front, group);
        Ok(())
    })
    .unwrap();
    (built, ids.0, ids.1, ids.2)
}

#[test]
fn duration_and_range_checks() {
    let (built, _, front, _) = sample();
    assert_eq!(built.duration(), 3.0);
    assert!(built.query_right(front, 3.0).is_ok());
    assert!(built.query_right(front, -0.1).unwrap_err().is_consistency());
    assert!(built.query_right(front, 3.5).unwrap_err().is_consistency());
    assert!(built.query_right(front, 3.0 + 1e-9).is_ok());
}

#[test]
fn unknown_items_are_usage_errors() {
    let (built, ..) = sample();
    assert!(built.query_right(ItemId(99), 0.0).unwrap_err().is_usage());
}

#[test]
fn frame_orders_back_to_front_and_skips_groups() {
    let (built, back, front, _) = sample();
    let frame = built.frame(1.0).unwrap();
    let order: Vec<ItemId> = frame.items.iter().map(|d| d.item).collect();
    assert_eq!(order, [back, front]);
    assert_eq!(frame.items[0].depth, 5.0);

    let later = built.frame(2.5).unwrap();
    let order: Vec<ItemId> = later.items.iter().map(|d| d.item).collect();
    assert_eq!(order, [front]);
    assert_eq!(
        later.items[0].affine,
        Affine::translate(Vec2::new(10.0, 0.0))
    );
}

#[test]
fn visibility_is_right_biased() {
    let (built, back, ..) = sample();
    assert!(built.is_visible(back, 1.9).unwrap());
    assert!(!built.is_visible(back, 2.0).unwrap());
}

#[test]
fn left_visibility_matches_left_queries() {
    let (built, back, ..) = sample();
    assert!(built.is_visible_left(back, 2.0).unwrap());
    assert!(!built.is_visible_left(back, 2.5).unwrap());
    assert!(!built.is_visible_left(back, 0.0).unwrap());
    assert!(built.is_visible(back, 0.0).unwrap());
    assert!(built.is_visible_left(back, 4.0).unwrap_err().is_consistency());
}

#[test]
fn segments_partition_the_duration() {
    let (built, back, front, group) = sample();
    for item in [back, front, group] {
        let segs = built.segments(item).unwrap();
        assert_eq!(segs[0].at, 0.0);
        assert_eq!(segs.last().unwrap().end, built.duration());
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].at);
        }
    }
}

#[test]
fn frame_times_cover_the_duration() {
    let (built, ..) = sample();
    let times = built.frame_times(Fps::new(2, 1).unwrap());
    assert_eq!(times, [0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
}

#[test]
fn parallel_render_matches_serial_frames() {
    let (built, ..) = sample();
    let fps = Fps::new(4, 1).unwrap();
    let frames = built.render_frames(fps, Some(2)).unwrap();
    assert_eq!(frames.len(), 12);
    for frame in &frames {
        assert_eq!(frame, &built.frame(frame.t).unwrap());
    }
    assert!(built.render_frames(fps, Some(0)).is_err());
}

#[test]
fn lines_map_back_to_construction_calls() {
    let (built, ..) = sample();
    let site = built.line_at(2.5).unwrap();
    assert!(site.file.ends_with("built.rs"));
    assert!(built.line_at(0.0).is_some());
}

#[test]
fn built_timeline_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BuiltTimeline>();
}
