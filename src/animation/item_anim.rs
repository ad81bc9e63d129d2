use crate::{
    animation::ease::Ease,
    foundation::{
        core::TimeRange,
        error::TimelineResult,
        ids::{AnimationId, ItemId},
    },
    item::data::{ItemData, Lerp, Prop, PropValue},
};

/// Time remapping contributed by an enclosing composite with a non-linear rate function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWarp {
    /// The composite's placed interval.
    pub range: TimeRange,
    /// The composite's rate function.
    pub rate: Ease,
}

impl TimeWarp {
    /// Map global time onto the composite's warped time.
    pub fn apply(self, t: f64) -> f64 {
        let d = self.range.duration();
        if !d.is_finite() || d <= 0.0 {
            return t;
        }
        if t <= self.range.at || t >= self.range.end {
            return t;
        }
        self.range.at + self.rate.apply((t - self.range.at) / d) * d
    }
}

/// The effect one animation has on one item's data.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemEffect {
    /// Static snapshot: the item became this data. Covers lower layers.
    Display(ItemData),
    /// Whole-data interpolation between two snapshots. Covers lower layers.
    Interpolate {
        /// Data at progress 0.
        before: ItemData,
        /// Data at progress 1.
        after: ItemData,
    },
    /// Single-component interpolation layered over lower layers.
    Tween {
        /// Animated component.
        prop: Prop,
        /// Value at progress 0.
        from: PropValue,
        /// Value at progress 1.
        to: PropValue,
    },
    /// Scale multiplier growing toward `factor` as progress rises.
    Pulse {
        /// Peak scale multiplier.
        factor: f64,
    },
    /// Rotation accumulating with elapsed time.
    Spin {
        /// Angular speed.
        radians_per_sec: f64,
    },
}

/// One entry of an item's animation stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemAnimation {
    /// Affected item.
    pub item: ItemId,
    /// Originating animation; `None` for change-detection snapshots.
    pub source: Option<AnimationId>,
    /// Active interval driving progress.
    pub range: TimeRange,
    /// Rate function of the originating leaf animation.
    pub rate: Ease,
    /// Warps of enclosing composites, outermost first.
    pub warps: Vec<TimeWarp>,
    /// Whether the final state persists after `range.end`.
    pub holds: bool,
    /// What the entry does to the data.
    pub effect: ItemEffect,
}

impl ItemAnimation {
    /// Snapshot entry: `item` became `data` at `at`.
    pub fn display(item: ItemId, at: f64, data: ItemData) -> Self {
        Self {
            item,
            source: None,
            range: TimeRange::forever(at),
            rate: Ease::Linear,
            warps: Vec::new(),
            holds: true,
            effect: ItemEffect::Display(data),
        }
    }

    /// Whether this entry ignores the data produced by lower layers.
    pub fn covers(&self) -> bool {
        matches!(
            self.effect,
            ItemEffect::Display(_) | ItemEffect::Interpolate { .. }
        )
    }

    /// Interval this entry occupies in the stack.
    pub fn footprint(&self) -> TimeRange {
        if self.holds {
            TimeRange::forever(self.range.at)
        } else {
            self.range
        }
    }

    /// Global time after applying the enclosing composites' warps.
    pub fn local_time(&self, t: f64) -> f64 {
        self.warps.iter().fold(t, |t, w| w.apply(t))
    }

    /// Eased progress in `[0, 1]` at global time `t`.
    pub fn progress(&self, t: f64) -> f64 {
        let t = self.local_time(t);
        let d = self.range.duration();
        if !d.is_finite() {
            return 0.0;
        }
        if d <= 0.0 {
            return if t >= self.range.at { 1.0 } else { 0.0 };
        }
        self.rate.apply((t - self.range.at) / d)
    }

    /// Apply this layer to `data` at global time `t`.
    pub fn apply(&self, data: &mut ItemData, t: f64) -> TimelineResult<()> {
        match &self.effect {
            ItemEffect::Display(snapshot) => data.clone_from(snapshot),
            ItemEffect::Interpolate { before, after } => {
                *data = ItemData::lerp(before, after, self.progress(t));
            }
            ItemEffect::Tween { prop, from, to } => {
                let v = PropValue::lerp(from, to, self.progress(t))?;
                prop.write(data, v)?;
            }
            ItemEffect::Pulse { factor } => {
                let k = <f64 as Lerp>::lerp(&1.0, factor, self.progress(t));
                data.transform.scale *= k;
            }
            ItemEffect::Spin { radians_per_sec } => {
                let elapsed =
                    (self.local_time(t) - self.range.at).clamp(0.0, self.range.duration());
                data.transform.rotation_rad += radians_per_sec * elapsed;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/item_anim.rs"]
mod tests;
