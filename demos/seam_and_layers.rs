use wavyte_timeline::{
    Animation, Ease, Fps, ItemCommands, ItemData, ItemKind, Rgba8Premul, Timeline,
    TimelineConfig, Vec2,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = TimelineConfig::from_json_str(r#"{ "fps": { "num": 12, "den": 1 } }"#)?;
    let fps = config.fps;

    let built = Timeline::run(config, |tl| {
        let scene = tl.spawn("scene", ItemKind::Group, ItemData::default());
        let title = tl.spawn(
            "title",
            ItemKind::Text,
            ItemData {
                depth: 1.0,
                ..ItemData::default()
            },
        );
        let badge = tl.spawn(
            "badge",
            ItemKind::Shape,
            ItemData {
                color: Rgba8Premul::from_straight_rgba(40, 40, 40, 255),
                ..ItemData::default()
            },
        );
        tl.add_children(scene, &[title, badge])?;

        tl.play(Animation::fade_in(scene).duration(0.5))?;
        tl.prepare(Animation::spin(badge, std::f64::consts::FRAC_PI_2))?;

        tl.prepare(Animation::color_to(
            badge,
            Rgba8Premul::from_straight_rgba(220, 60, 20, 255),
        ))?;
        tl.prepare(Animation::move_to(badge, Vec2::new(120.0, 0.0)).at(0.5))?;

        tl.schedule(1.0, move |tl| {
            tl.prepare(Animation::indicate(title, 1.3).duration(0.4))?;
            Ok(())
        })?;

        tl.play(
            Animation::succession(vec![
                Animation::transform(title, ItemCommands::new().shift(Vec2::new(0.0, -40.0)))
                    .duration(0.7),
                Animation::wait(0.3),
                Animation::transform(title, ItemCommands::new().scale(1.5)),
            ])
            .rate_func(Ease::InOutCubic),
        )?;
        tl.play(Animation::fade_out(scene))?;
        Ok(())
    })?;

    println!("duration: {:.3}s", built.duration());
    for frame in built.render_frames(fps, None)? {
        let line = built
            .line_at(frame.t)
            .map_or_else(|| "-".to_string(), |site| site.to_string());
        println!(
            "t={:.3} drawn={} line={line}",
            frame.t,
            frame.items.len()
        );
    }

    Ok(())
}
