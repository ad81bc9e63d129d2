use std::{collections::BTreeSet, panic::Location};

use crate::{
    animation::{
        anim::{Animation, AnimationKind, LeafEffect},
        ease::Ease,
        item_anim::{ItemAnimation, ItemEffect, TimeWarp},
    },
    foundation::{
        core::TimeRange,
        error::{TimelineError, TimelineResult},
        ids::{AnimationId, ItemId},
    },
    graph::relation::RelationGraph,
    item::data::{ItemData, ItemKind, Prop, PropValue},
    stack::appearance::Appearance,
    timeline::{
        built::{BuiltItem, BuiltTimeline},
        config::TimelineConfig,
        lines::{ConstructionSite, LineLog},
        schedule::TaskQueue,
    },
    timing::aligner::TimeAligner,
};

#[derive(Clone, Debug)]
struct LiveItem {
    name: String,
    kind: ItemKind,
    data: ItemData,
}

/// Mutable construction context.
///
/// The construction clock starts at 0 and only moves through [`forward`](Self::forward). Every
/// `play`/`prepare` fans an animation out into per-item stack entries; direct edits of item data
/// are picked up by change detection on the next `forward`. [`build`](Self::build) freezes the
/// result into a [`BuiltTimeline`].
pub struct Timeline {
    config: TimelineConfig,
    current_time: f64,
    aligner: TimeAligner,
    graph: RelationGraph,
    items: Vec<LiveItem>,
    appearances: Vec<Appearance>,
    tasks: TaskQueue<Timeline>,
    consumed: BTreeSet<AnimationId>,
    played: Vec<Animation>,
    lines: LineLog,
    in_task: bool,
    poisoned: Option<String>,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("current_time", &self.current_time)
            .field("items", &self.items.len())
            .field("played", &self.played.len())
            .field("pending_tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

fn usage_at(site: ConstructionSite, msg: impl std::fmt::Display) -> TimelineError {
    TimelineError::usage(format!("{msg} (at {site})"))
}

fn with_site(site: ConstructionSite, err: TimelineError) -> TimelineError {
    match err {
        TimelineError::Usage(msg) => usage_at(site, msg),
        other => other,
    }
}

#[track_caller]
fn caller_site() -> ConstructionSite {
    ConstructionSite::from_location(Location::caller())
}

impl Timeline {
    /// Create an empty timeline with the clock at 0.
    pub fn new(config: TimelineConfig) -> TimelineResult<Self> {
        config.validate()?;
        let mut aligner = TimeAligner::new(config.align_epsilon)?;
        aligner.align_t(0.0);
        Ok(Self {
            config,
            current_time: 0.0,
            aligner,
            graph: RelationGraph::new(),
            items: Vec::new(),
            appearances: Vec::new(),
            tasks: TaskQueue::default(),
            consumed: BTreeSet::new(),
            played: Vec::new(),
            lines: LineLog::default(),
            in_task: false,
            poisoned: None,
        })
    }

    fn ensure_usable(&self) -> TimelineResult<()> {
        match &self.poisoned {
            Some(cause) => Err(TimelineError::usage(format!(
                "timeline was left incomplete by an earlier failed call: {cause}"
            ))),
            None => Ok(()),
        }
    }

    /// Run a construction procedure on a fresh timeline and build it.
    pub fn run(
        config: TimelineConfig,
        construct: impl FnOnce(&mut Timeline) -> TimelineResult<()>,
    ) -> TimelineResult<BuiltTimeline> {
        let mut tl = Self::new(config)?;
        construct(&mut tl)?;
        tl.build()
    }

    /// Construction clock in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Configuration this timeline was created with.
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    // ---------------------------------------------------------------------------------------------
    // Items
    // ---------------------------------------------------------------------------------------------

    /// Register a new item, initially hidden, whose data reads as `data` until animated.
    #[track_caller]
    pub fn spawn(&mut self, name: impl Into<String>, kind: ItemKind, data: ItemData) -> ItemId {
        let site = caller_site();
        let id = self.graph.insert_node();
        self.appearances.push(Appearance::new(data.clone()));
        self.items.push(LiveItem {
            name: name.into(),
            kind,
            data,
        });
        self.lines.record(self.current_time, site);
        id
    }

    /// Number of spawned items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn live(&self, id: ItemId) -> TimelineResult<&LiveItem> {
        self.items
            .get(id.index())
            .ok_or_else(|| TimelineError::usage(format!("unknown item {}", id.0)))
    }

    /// Name given at spawn.
    pub fn name(&self, id: ItemId) -> TimelineResult<&str> {
        Ok(&self.live(id)?.name)
    }

    /// Kind given at spawn.
    pub fn kind(&self, id: ItemId) -> TimelineResult<ItemKind> {
        Ok(self.live(id)?.kind)
    }

    /// Current (construction-time) data of an item.
    pub fn data(&self, id: ItemId) -> TimelineResult<&ItemData> {
        Ok(&self.live(id)?.data)
    }

    /// Mutable access to an item's data.
    ///
    /// Edits are not animated; the next `forward` records the new data as a snapshot at the
    /// clock value it runs at.
    pub fn data_mut(&mut self, id: ItemId) -> TimelineResult<&mut ItemData> {
        self.items
            .get_mut(id.index())
            .map(|item| &mut item.data)
            .ok_or_else(|| TimelineError::usage(format!("unknown item {}", id.0)))
    }

    /// Apply `f` to an item's data (see [`data_mut`](Self::data_mut)).
    pub fn update(&mut self, id: ItemId, f: impl FnOnce(&mut ItemData)) -> TimelineResult<()> {
        f(self.data_mut(id)?);
        Ok(())
    }

    /// Whether `id` is shown at the current clock value.
    pub fn is_visible(&self, id: ItemId) -> TimelineResult<bool> {
        self.live(id)?;
        Ok(self.appearances[id.index()].is_visible(self.current_time))
    }

    /// Attach `child` under `parent`.
    #[track_caller]
    pub fn add_child(&mut self, parent: ItemId, child: ItemId) -> TimelineResult<()> {
        let site = caller_site();
        self.graph
            .add_child(parent, child)
            .map_err(|e| with_site(site, e))?;
        self.lines.record(self.current_time, site);
        Ok(())
    }

    /// Attach several children under `parent`, in order.
    #[track_caller]
    pub fn add_children(&mut self, parent: ItemId, children: &[ItemId]) -> TimelineResult<()> {
        let site = caller_site();
        self.graph
            .add_children(parent, children)
            .map_err(|e| with_site(site, e))?;
        self.lines.record(self.current_time, site);
        Ok(())
    }

    /// Detach `child` from `parent`.
    #[track_caller]
    pub fn remove_child(&mut self, parent: ItemId, child: ItemId) -> TimelineResult<()> {
        let site = caller_site();
        self.graph
            .remove_child(parent, child)
            .map_err(|e| with_site(site, e))?;
        self.lines.record(self.current_time, site);
        Ok(())
    }

    /// Detach several children from `parent`.
    #[track_caller]
    pub fn remove_children(&mut self, parent: ItemId, children: &[ItemId]) -> TimelineResult<()> {
        let site = caller_site();
        self.graph
            .remove_children(parent, children)
            .map_err(|e| with_site(site, e))?;
        self.lines.record(self.current_time, site);
        Ok(())
    }

    /// Direct children of an item.
    pub fn children(&self, id: ItemId) -> &[ItemId] {
        self.graph.children(id)
    }

    /// Direct parents of an item.
    pub fn parents(&self, id: ItemId) -> &[ItemId] {
        self.graph.parents(id)
    }

    /// All ancestors, depth-first, nearest first.
    pub fn ancestors(&mut self, id: ItemId) -> TimelineResult<Vec<ItemId>> {
        self.live(id)?;
        Ok(self.graph.ancestors(id))
    }

    /// All descendants, depth-first pre-order.
    pub fn descendants(&mut self, id: ItemId) -> TimelineResult<Vec<ItemId>> {
        self.live(id)?;
        Ok(self.graph.descendants(id))
    }

    /// Descendants of the given kind.
    pub fn find_descendants(&self, id: ItemId, kind: ItemKind) -> TimelineResult<Vec<ItemId>> {
        self.live(id)?;
        Ok(self
            .graph
            .walk_descendants(id, |n| self.items[n.index()].kind == kind))
    }

    /// Closest descendants of the given kind; nothing below a match is visited.
    pub fn find_nearest(&self, id: ItemId, kind: ItemKind) -> TimelineResult<Vec<ItemId>> {
        self.live(id)?;
        Ok(self
            .graph
            .walk_nearest(id, |n| self.items[n.index()].kind == kind))
    }

    // ---------------------------------------------------------------------------------------------
    // Visibility
    // ---------------------------------------------------------------------------------------------

    /// Show items at the current clock value. Showing a shown item is an error.
    #[track_caller]
    pub fn show(&mut self, items: &[ItemId]) -> TimelineResult<()> {
        self.set_visible(items, true, caller_site())
    }

    /// Hide items at the current clock value. Hiding a hidden item is an error.
    #[track_caller]
    pub fn hide(&mut self, items: &[ItemId]) -> TimelineResult<()> {
        self.set_visible(items, false, caller_site())
    }

    fn set_visible(
        &mut self,
        items: &[ItemId],
        visible: bool,
        site: ConstructionSite,
    ) -> TimelineResult<()> {
        for &id in items {
            self.live(id).map_err(|e| with_site(site, e))?;
            if self.appearances[id.index()].is_visible(self.current_time) == visible {
                let state = if visible { "shown" } else { "hidden" };
                return Err(usage_at(
                    site,
                    format!("item {} is already {state}", id.0),
                ));
            }
        }
        for &id in items {
            self.appearances[id.index()].set_visible(self.current_time, visible);
        }
        self.lines.record(self.current_time, site);
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // Clock
    // ---------------------------------------------------------------------------------------------

    /// Queue `task` to run when the clock reaches `at` (absolute seconds).
    ///
    /// Tasks due in the past run on the next `forward`. While a task runs the clock reads
    /// `max(current_time, at)`; tasks may `prepare` animations but may not `forward`.
    #[track_caller]
    pub fn schedule(
        &mut self,
        at: f64,
        task: impl FnOnce(&mut Timeline) -> anyhow::Result<()> + 'static,
    ) -> TimelineResult<()> {
        let site = caller_site();
        if at.is_nan() {
            return Err(TimelineError::validation("scheduled time must not be NaN"));
        }
        self.tasks.push(at, site, Box::new(task));
        self.lines.record(self.current_time, site);
        Ok(())
    }

    /// Number of tasks not yet run.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Capture pending edits, run due tasks and advance the clock by `dt`.
    #[track_caller]
    pub fn forward(&mut self, dt: f64) -> TimelineResult<()> {
        let site = caller_site();
        if self.in_task {
            return Err(usage_at(
                site,
                "forward cannot be called from inside a scheduled task",
            ));
        }
        if !dt.is_finite() || dt < 0.0 {
            return Err(usage_at(
                site,
                format!("forward needs a finite dt >= 0, got {dt}"),
            ));
        }
        self.ensure_usable().map_err(|e| with_site(site, e))?;
        self.lines.record(self.current_time, site);
        self.detect_changes()?;

        let start = self.current_time;
        let limit = start + dt;
        while let Some(task) = self.tasks.pop_due(limit) {
            self.current_time = self.aligner.align_t(start.max(task.at));
            tracing::debug!(at = task.at, site = %task.site, "run scheduled task");
            self.in_task = true;
            let result = (task.run)(self);
            self.in_task = false;
            result.map_err(|e| match e.downcast::<TimelineError>() {
                Ok(err) => err,
                Err(other) => TimelineError::Other(other.context(format!(
                    "scheduled task at t={} (scheduled at {})",
                    task.at, task.site
                ))),
            })?;
            self.detect_changes()?;
        }

        self.current_time = self.aligner.align_t(limit);
        tracing::debug!(from = start, to = self.current_time, "advance clock");
        Ok(())
    }

    /// Advance the clock to `t`.
    #[track_caller]
    pub fn forward_to(&mut self, t: f64) -> TimelineResult<()> {
        if t < self.current_time {
            return Err(usage_at(
                caller_site(),
                format!(
                    "cannot move the clock back from {} to {t}",
                    self.current_time
                ),
            ));
        }
        self.forward(t - self.current_time)
    }

    fn detect_changes(&mut self) -> TimelineResult<()> {
        let at = self.current_time;
        for (idx, (item, appearance)) in self.items.iter().zip(&mut self.appearances).enumerate()
        {
            if &item.data != appearance.stack().last_data() {
                tracing::trace!(item = idx, at, "record changed item data");
                let id = ItemId(idx as u32);
                appearance
                    .stack_mut()
                    .append(ItemAnimation::display(id, at, item.data.clone()))?;
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // Animations
    // ---------------------------------------------------------------------------------------------

    /// Place `anim` at `current_time + anim.at` and attach its effects, without moving the
    /// clock. Returns the placed animation.
    #[track_caller]
    pub fn prepare(&mut self, anim: Animation) -> TimelineResult<Animation> {
        let site = caller_site();
        self.prepare_at(anim, site)
    }

    /// [`prepare`](Self::prepare) several animations, all anchored at the current clock value.
    #[track_caller]
    pub fn prepare_all(
        &mut self,
        anims: impl IntoIterator<Item = Animation>,
    ) -> TimelineResult<Vec<Animation>> {
        let site = caller_site();
        anims
            .into_iter()
            .map(|anim| self.prepare_at(anim, site))
            .collect()
    }

    /// Prepare `anim`, then advance the clock to its end.
    #[track_caller]
    pub fn play(&mut self, anim: Animation) -> TimelineResult<Animation> {
        let site = caller_site();
        if anim.natural_duration().is_ok_and(|d| !d.is_finite()) {
            return Err(usage_at(
                site,
                "open-ended animations can only be prepared, not played",
            ));
        }
        let placed = self.prepare_at(anim, site)?;
        let end = placed.time_range().map_or(self.current_time, |r| r.end);
        self.forward_to(end)?;
        Ok(placed)
    }

    /// Play several animations together as one parallel group.
    #[track_caller]
    pub fn play_all(&mut self, anims: Vec<Animation>) -> TimelineResult<Animation> {
        self.play(Animation::group(anims))
    }

    /// Consume `duration` seconds.
    #[track_caller]
    pub fn wait(&mut self, duration: f64) -> TimelineResult<()> {
        self.play(Animation::wait(duration)).map(|_| ())
    }

    fn prepare_at(
        &mut self,
        mut anim: Animation,
        site: ConstructionSite,
    ) -> TimelineResult<Animation> {
        self.ensure_usable().map_err(|e| with_site(site, e))?;
        anim.validate().map_err(|e| with_site(site, e))?;

        let ids = anim.ids();
        let mut seen = BTreeSet::new();
        for id in &ids {
            if !seen.insert(*id) {
                return Err(usage_at(
                    site,
                    format!("animation {} appears twice in one tree", id.0),
                ));
            }
            if self.consumed.contains(id) {
                return Err(usage_at(
                    site,
                    format!("animation {} was already played or prepared", id.0),
                ));
            }
        }

        for target in anim.targets() {
            self.live(target).map_err(|e| with_site(site, e))?;
        }
        let duration = anim
            .natural_duration()
            .map_err(|e| with_site(site, e))?;

        if let Err(err) = self.place_and_attach(&mut anim, duration, site) {
            self.poisoned = Some(err.to_string());
            return Err(err);
        }

        self.consumed.extend(ids);
        self.played.push(anim.clone());
        self.lines.record(self.current_time, site);
        tracing::debug!(
            id = anim.id().0,
            range = ?anim.time_range(),
            %site,
            "prepared animation"
        );
        Ok(anim)
    }

    fn place_and_attach(
        &mut self,
        anim: &mut Animation,
        duration: f64,
        site: ConstructionSite,
    ) -> TimelineResult<()> {
        let start = self.current_time + anim.authored_at();
        anim.place(start, duration, &mut self.aligner, self.config.default_rate)?;
        self.detect_changes()?;
        let mut warps = Vec::new();
        self.fan_out(anim, &mut warps, site)
    }

    fn fan_out(
        &mut self,
        anim: &Animation,
        warps: &mut Vec<TimeWarp>,
        site: ConstructionSite,
    ) -> TimelineResult<()> {
        let Some(range) = anim.time_range() else {
            return Err(TimelineError::consistency("animation was not placed"));
        };
        let rate = anim.rate().unwrap_or(self.config.default_rate);

        match &anim.kind {
            AnimationKind::Composite { children, .. } => {
                let warped = !rate.is_linear() && range.duration() > 0.0;
                if warped {
                    warps.push(TimeWarp { range, rate });
                }
                for child in children {
                    self.fan_out(child, warps, site)?;
                }
                if warped {
                    warps.pop();
                }
                Ok(())
            }
            AnimationKind::Leaf {
                target,
                effect,
                root_only,
            } => {
                let Some(target) = *target else {
                    return Ok(());
                };
                self.live(target).map_err(|e| with_site(site, e))?;

                let mut targets = vec![target];
                if !*root_only && !matches!(effect, LeafEffect::Tween { .. }) {
                    targets.extend(self.graph.descendants(target));
                }
                for item in targets {
                    self.attach(item, anim.id(), range, rate, warps, effect)?;
                }
                Ok(())
            }
        }
    }

    fn attach(
        &mut self,
        item: ItemId,
        source: AnimationId,
        range: TimeRange,
        rate: Ease,
        warps: &[TimeWarp],
        effect: &LeafEffect,
    ) -> TimelineResult<()> {
        let before = &self.items[item.index()].data;
        let (item_effect, holds) = match effect {
            LeafEffect::Wait => return Ok(()),
            LeafEffect::Transform { commands } => (
                ItemEffect::Interpolate {
                    before: before.clone(),
                    after: commands.replay(before),
                },
                true,
            ),
            LeafEffect::Tween { prop, to } => (
                ItemEffect::Tween {
                    prop: *prop,
                    from: prop.read(before),
                    to: *to,
                },
                true,
            ),
            LeafEffect::FadeIn => (scalar_tween(Prop::Opacity, 0.0, before.opacity), false),
            LeafEffect::FadeOut => (scalar_tween(Prop::Opacity, before.opacity, 0.0), false),
            LeafEffect::Create => (scalar_tween(Prop::Reveal, 0.0, before.reveal), false),
            LeafEffect::Uncreate => (scalar_tween(Prop::Reveal, before.reveal, 0.0), false),
            LeafEffect::Indicate { factor } => (ItemEffect::Pulse { factor: *factor }, false),
            LeafEffect::Spin { radians_per_sec } => (
                ItemEffect::Spin {
                    radians_per_sec: *radians_per_sec,
                },
                !range.is_forever(),
            ),
        };

        let entry = ItemAnimation {
            item,
            source: Some(source),
            range,
            rate,
            warps: warps.to_vec(),
            holds,
            effect: item_effect,
        };
        let appearance = &mut self.appearances[item.index()];
        appearance.stack_mut().append(entry)?;
        if holds {
            self.items[item.index()].data = appearance.stack().last_data().clone();
        }

        match effect {
            LeafEffect::FadeIn | LeafEffect::Create => appearance.set_visible(range.at, true),
            LeafEffect::FadeOut | LeafEffect::Uncreate => appearance.set_visible(range.end, false),
            _ => {}
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // Build
    // ---------------------------------------------------------------------------------------------

    /// Freeze the construction into an immutable, queryable timeline covering
    /// `[0, current_time]`.
    #[tracing::instrument(skip(self), fields(duration = self.current_time))]
    pub fn build(mut self) -> TimelineResult<BuiltTimeline> {
        self.ensure_usable()?;
        self.detect_changes()?;
        if !self.tasks.is_empty() {
            tracing::warn!(
                pending = self.tasks.len(),
                next_at = ?self.tasks.next_at(),
                "dropping scheduled tasks that never came due"
            );
        }

        let duration = self.current_time;
        let root = Animation::placed_root(self.played, duration);
        let items = self
            .items
            .into_iter()
            .map(|item| BuiltItem {
                name: item.name,
                kind: item.kind,
            })
            .collect();

        Ok(BuiltTimeline::new(
            duration,
            self.aligner,
            root,
            items,
            self.appearances,
            self.lines,
            self.config.fps,
        ))
    }
}

fn scalar_tween(prop: Prop, from: f64, to: f64) -> ItemEffect {
    ItemEffect::Tween {
        prop,
        from: PropValue::Scalar(from),
        to: PropValue::Scalar(to),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
