use crate::{
    animation::{
        compose::{ChildSlot, CompositeMode, plan_children},
        ease::Ease,
    },
    foundation::{
        core::{FOREVER, Rgba8Premul, TimeRange, Vec2},
        error::{TimelineError, TimelineResult},
        ids::{AnimationId, ItemId},
    },
    item::{
        commands::ItemCommands,
        data::{Prop, PropValue},
    },
    timing::aligner::TimeAligner,
};

/// Duration of a leaf animation when none is given.
pub const DEFAULT_DURATION: f64 = 1.0;

/// What a leaf animation does to its target.
#[derive(Clone, Debug)]
pub enum LeafEffect {
    /// Only consumes time.
    Wait,
    /// Replays captured commands and interpolates the whole data before -> after.
    Transform {
        /// Captured operations.
        commands: ItemCommands,
    },
    /// Interpolates one component toward `to`.
    Tween {
        /// Animated component.
        prop: Prop,
        /// Target value.
        to: PropValue,
    },
    /// Opacity from 0; shows the items at the start.
    FadeIn,
    /// Opacity to 0; hides the items at the end.
    FadeOut,
    /// Reveal from 0; shows the items at the start.
    Create,
    /// Reveal to 0; hides the items at the end.
    Uncreate,
    /// Temporary scale pulse.
    Indicate {
        /// Peak scale multiplier.
        factor: f64,
    },
    /// Persistent rotation.
    Spin {
        /// Angular speed.
        radians_per_sec: f64,
    },
}

impl LeafEffect {
    fn default_duration(&self) -> f64 {
        match self {
            Self::Spin { .. } => FOREVER,
            _ => DEFAULT_DURATION,
        }
    }

    fn may_be_open_ended(&self) -> bool {
        matches!(self, Self::Spin { .. })
    }
}

#[derive(Clone, Debug)]
pub(crate) enum AnimationKind {
    Leaf {
        target: Option<ItemId>,
        effect: LeafEffect,
        root_only: bool,
    },
    Composite {
        mode: CompositeMode,
        children: Vec<Animation>,
        lag_ratio: f64,
        offset: f64,
    },
}

/// An effect (or a composition of effects) valid over a half-open time interval.
///
/// An animation is placed exactly once: the timeline assigns and aligns its
/// [`time_range`](Self::time_range) when it is prepared. Clones share the same [`AnimationId`],
/// so placing a clone of an already placed animation is rejected as reuse.
#[derive(Clone, Debug)]
pub struct Animation {
    id: AnimationId,
    at: f64,
    duration: Option<f64>,
    rate: Option<Ease>,
    pub(crate) kind: AnimationKind,
    range: Option<TimeRange>,
}

impl Animation {
    fn leaf(target: Option<ItemId>, effect: LeafEffect) -> Self {
        Self {
            id: AnimationId::fresh(),
            at: 0.0,
            duration: None,
            rate: None,
            kind: AnimationKind::Leaf {
                target,
                effect,
                root_only: false,
            },
            range: None,
        }
    }

    fn composite(mode: CompositeMode, children: Vec<Animation>) -> Self {
        Self {
            id: AnimationId::fresh(),
            at: 0.0,
            duration: None,
            rate: None,
            kind: AnimationKind::Composite {
                mode,
                children,
                lag_ratio: mode.default_lag_ratio(),
                offset: 0.0,
            },
            range: None,
        }
    }

    /// Consume `duration` seconds without affecting any item.
    pub fn wait(duration: f64) -> Self {
        Self::leaf(None, LeafEffect::Wait).duration(duration)
    }

    /// Replay `commands` on `item` (and its descendants unless [`root_only`](Self::root_only)).
    pub fn transform(item: ItemId, commands: ItemCommands) -> Self {
        Self::leaf(Some(item), LeafEffect::Transform { commands })
    }

    /// Tween one component of `item` toward `to`.
    pub fn tween(item: ItemId, prop: Prop, to: PropValue) -> TimelineResult<Self> {
        if !prop.accepts(&to) {
            return Err(TimelineError::validation(format!(
                "value {to:?} does not fit property {prop:?}"
            )));
        }
        Ok(Self::leaf(Some(item), LeafEffect::Tween { prop, to }))
    }

    /// Tween the position of `item`.
    pub fn move_to(item: ItemId, position: Vec2) -> Self {
        Self::leaf(
            Some(item),
            LeafEffect::Tween {
                prop: Prop::Position,
                to: PropValue::Vec2(position),
            },
        )
    }

    /// Tween the rotation of `item`.
    pub fn rotate_to(item: ItemId, radians: f64) -> Self {
        Self::leaf(
            Some(item),
            LeafEffect::Tween {
                prop: Prop::Rotation,
                to: PropValue::Scalar(radians),
            },
        )
    }

    /// Tween the scale of `item`.
    pub fn scale_to(item: ItemId, scale: Vec2) -> Self {
        Self::leaf(
            Some(item),
            LeafEffect::Tween {
                prop: Prop::Scale,
                to: PropValue::Vec2(scale),
            },
        )
    }

    /// Tween the color of `item`.
    pub fn color_to(item: ItemId, color: Rgba8Premul) -> Self {
        Self::leaf(
            Some(item),
            LeafEffect::Tween {
                prop: Prop::Color,
                to: PropValue::Color(color),
            },
        )
    }

    /// Tween the opacity of `item`.
    pub fn fade_to(item: ItemId, opacity: f64) -> Self {
        Self::leaf(
            Some(item),
            LeafEffect::Tween {
                prop: Prop::Opacity,
                to: PropValue::Scalar(opacity.clamp(0.0, 1.0)),
            },
        )
    }

    /// Show `item` and fade it in.
    pub fn fade_in(item: ItemId) -> Self {
        Self::leaf(Some(item), LeafEffect::FadeIn)
    }

    /// Fade `item` out and hide it.
    pub fn fade_out(item: ItemId) -> Self {
        Self::leaf(Some(item), LeafEffect::FadeOut)
    }

    /// Show `item` and draw it progressively.
    pub fn create(item: ItemId) -> Self {
        Self::leaf(Some(item), LeafEffect::Create)
    }

    /// Undraw `item` progressively and hide it.
    pub fn uncreate(item: ItemId) -> Self {
        Self::leaf(Some(item), LeafEffect::Uncreate)
    }

    /// Briefly scale `item` by `factor` and back.
    pub fn indicate(item: ItemId, factor: f64) -> Self {
        Self::leaf(Some(item), LeafEffect::Indicate { factor }).rate_func(Ease::ThereAndBack)
    }

    /// Rotate `item` continuously; open-ended unless a duration is set.
    pub fn spin(item: ItemId, radians_per_sec: f64) -> Self {
        Self::leaf(Some(item), LeafEffect::Spin { radians_per_sec }).rate_func(Ease::Linear)
    }

    /// Parallel group; children start together unless staggered.
    pub fn group(children: Vec<Animation>) -> Self {
        Self::composite(CompositeMode::Parallel, children)
    }

    /// Sequential chain; each child starts when the previous one ends.
    pub fn succession(children: Vec<Animation>) -> Self {
        Self::composite(CompositeMode::Sequential, children)
    }

    /// Synchronized group; every child spans the whole group interval.
    pub fn aligned(children: Vec<Animation>) -> Self {
        Self::composite(CompositeMode::Aligned, children)
    }

    /// Delay relative to the placement point (or the stagger cursor inside a composite).
    pub fn at(mut self, at: f64) -> Self {
        self.at = at;
        self
    }

    /// Explicit duration; composites rescale their children to fit it.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Rate function; for composites it warps the time seen by every descendant.
    pub fn rate_func(mut self, rate: Ease) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Stagger as a fraction of the previous child's duration. Ignored by leaves.
    pub fn lag_ratio(mut self, lag: f64) -> Self {
        if let AnimationKind::Composite { lag_ratio, .. } = &mut self.kind {
            *lag_ratio = lag;
        }
        self
    }

    /// Stagger in seconds added after each child. Ignored by leaves.
    pub fn offset(mut self, seconds: f64) -> Self {
        if let AnimationKind::Composite { offset, .. } = &mut self.kind {
            *offset = seconds;
        }
        self
    }

    /// Restrict a leaf to its target item, skipping descendants.
    pub fn root_only(mut self) -> Self {
        if let AnimationKind::Leaf { root_only, .. } = &mut self.kind {
            *root_only = true;
        }
        self
    }

    /// Identity shared by clones.
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Authored delay.
    pub fn authored_at(&self) -> f64 {
        self.at
    }

    /// Placed and aligned interval; `None` until the animation is prepared.
    pub fn time_range(&self) -> Option<TimeRange> {
        self.range
    }

    /// Whether the animation was already placed on a timeline.
    pub fn is_placed(&self) -> bool {
        self.range.is_some()
    }

    /// Resolved rate function (after placement) or the authored one.
    pub fn rate(&self) -> Option<Ease> {
        self.rate
    }

    /// Composite layout mode, if this is a composite.
    pub fn mode(&self) -> Option<CompositeMode> {
        match &self.kind {
            AnimationKind::Composite { mode, .. } => Some(*mode),
            AnimationKind::Leaf { .. } => None,
        }
    }

    /// Children of a composite; empty for leaves.
    pub fn children(&self) -> &[Animation] {
        match &self.kind {
            AnimationKind::Composite { children, .. } => children,
            AnimationKind::Leaf { .. } => &[],
        }
    }

    /// Target item of a leaf.
    pub fn target(&self) -> Option<ItemId> {
        match &self.kind {
            AnimationKind::Leaf { target, .. } => *target,
            AnimationKind::Composite { .. } => None,
        }
    }

    /// Effect of a leaf.
    pub fn effect(&self) -> Option<&LeafEffect> {
        match &self.kind {
            AnimationKind::Leaf { effect, .. } => Some(effect),
            AnimationKind::Composite { .. } => None,
        }
    }

    /// Duration this animation asks for when nothing rescales it.
    pub fn natural_duration(&self) -> TimelineResult<f64> {
        match &self.kind {
            AnimationKind::Leaf { effect, .. } => {
                Ok(self.duration.unwrap_or_else(|| effect.default_duration()))
            }
            AnimationKind::Composite {
                mode,
                children,
                lag_ratio,
                offset,
            } => match self.duration {
                Some(d) if d == FOREVER => Err(TimelineError::usage(
                    "composite animations cannot be open-ended",
                )),
                Some(d) => Ok(d),
                None => Ok(plan_children(*mode, children, *lag_ratio, *offset)?.natural_end),
            },
        }
    }

    /// Check authored parameters recursively.
    pub fn validate(&self) -> TimelineResult<()> {
        if !self.at.is_finite() || self.at < 0.0 {
            return Err(TimelineError::validation(format!(
                "animation delay must be finite and >= 0, got {}",
                self.at
            )));
        }
        if let Some(d) = self.duration
            && (d.is_nan() || d < 0.0)
        {
            return Err(TimelineError::validation(format!(
                "animation duration must be >= 0, got {d}"
            )));
        }

        match &self.kind {
            AnimationKind::Leaf { effect, .. } => {
                if self.duration == Some(FOREVER) && !effect.may_be_open_ended() {
                    return Err(TimelineError::validation(
                        "only persistent effects may be open-ended",
                    ));
                }
                if let LeafEffect::Indicate { factor } = effect
                    && !factor.is_finite()
                {
                    return Err(TimelineError::validation("indicate factor must be finite"));
                }
                if let LeafEffect::Spin { radians_per_sec } = effect
                    && !radians_per_sec.is_finite()
                {
                    return Err(TimelineError::validation("spin speed must be finite"));
                }
                Ok(())
            }
            AnimationKind::Composite {
                children,
                lag_ratio,
                offset,
                ..
            } => {
                if self.duration == Some(FOREVER) {
                    return Err(TimelineError::usage(
                        "composite animations cannot be open-ended",
                    ));
                }
                if !lag_ratio.is_finite() || *lag_ratio < 0.0 {
                    return Err(TimelineError::validation(format!(
                        "lag_ratio must be finite and >= 0, got {lag_ratio}"
                    )));
                }
                if !offset.is_finite() {
                    return Err(TimelineError::validation("offset must be finite"));
                }
                children.iter().try_for_each(Animation::validate)
            }
        }
    }

    /// Every animation id in this tree, pre-order.
    pub fn ids(&self) -> Vec<AnimationId> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    /// Target items of every leaf in the tree, in tree order.
    pub fn targets(&self) -> Vec<ItemId> {
        let mut out = Vec::new();
        self.collect_targets(&mut out);
        out
    }

    fn collect_targets(&self, out: &mut Vec<ItemId>) {
        out.extend(self.target());
        for child in self.children() {
            child.collect_targets(out);
        }
    }

    fn collect_ids(&self, out: &mut Vec<AnimationId>) {
        out.push(self.id);
        for child in self.children() {
            child.collect_ids(out);
        }
    }

    /// Assign aligned intervals to this tree, starting at `start` and lasting `duration`.
    pub(crate) fn place(
        &mut self,
        start: f64,
        duration: f64,
        aligner: &mut TimeAligner,
        default_rate: Ease,
    ) -> TimelineResult<()> {
        let range = aligner.align(TimeRange::new(start, start + duration)?);
        self.range = Some(range);

        match &mut self.kind {
            AnimationKind::Leaf { .. } => {
                self.rate = Some(self.rate.unwrap_or(default_rate));
            }
            AnimationKind::Composite {
                mode,
                children,
                lag_ratio,
                offset,
            } => {
                self.rate = Some(self.rate.unwrap_or(Ease::Linear));
                let slots: Vec<ChildSlot> = match mode {
                    CompositeMode::Aligned => children
                        .iter()
                        .map(|_| ChildSlot {
                            start: 0.0,
                            duration: range.duration(),
                        })
                        .collect(),
                    CompositeMode::Parallel | CompositeMode::Sequential => {
                        plan_children(*mode, children, *lag_ratio, *offset)?
                            .scaled_to(duration)
                            .slots
                    }
                };
                for (child, slot) in children.iter_mut().zip(slots) {
                    child.place(range.at + slot.start, slot.duration, aligner, default_rate)?;
                }
            }
        }
        Ok(())
    }

    /// Top-level composite wrapping already placed animations over `[0, duration]`.
    pub(crate) fn placed_root(children: Vec<Animation>, duration: f64) -> Self {
        let mut root = Self::composite(CompositeMode::Parallel, children);
        root.duration = Some(duration);
        root.rate = Some(Ease::Linear);
        root.range = Some(TimeRange {
            at: 0.0,
            end: duration,
        });
        root
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
