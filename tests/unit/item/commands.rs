use super::*;

#[test]
fn replay_applies_in_recording_order() {
    let cmds = ItemCommands::new()
        .move_to(Vec2::new(1.0, 1.0))
        .shift(Vec2::new(2.0, 0.0))
        .scale(2.0);
    let before = ItemData::default();
    let after = cmds.replay(&before);

    assert_eq!(after.transform.translate, Vec2::new(3.0, 1.0));
    assert_eq!(after.transform.scale, Vec2::new(2.0, 2.0));
    assert_eq!(before, ItemData::default());
}

#[test]
fn order_matters_for_non_commuting_commands() {
    let a = ItemCommands::new()
        .shift(Vec2::new(1.0, 0.0))
        .move_to(Vec2::ZERO);
    let b = ItemCommands::new()
        .move_to(Vec2::ZERO)
        .shift(Vec2::new(1.0, 0.0));
    let base = ItemData::default();
    assert_ne!(a.replay(&base), b.replay(&base));
}

#[test]
fn names_are_recorded() {
    let cmds = ItemCommands::new()
        .set_color(Rgba8Premul::transparent())
        .set_opacity(0.5)
        .then("nudge_depth", |d| d.depth += 1.0);
    let names: Vec<_> = cmds.names().collect();
    assert_eq!(names, ["set_color", "set_opacity", "nudge_depth"]);
    assert_eq!(cmds.len(), 3);
    assert_eq!(format!("{cmds:?}"), r#"["set_color", "set_opacity", "nudge_depth"]"#);
}
