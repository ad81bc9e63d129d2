use smallvec::SmallVec;

use crate::{
    animation::item_anim::ItemAnimation,
    foundation::{
        core::{FOREVER, TimeRange},
        error::{TimelineError, TimelineResult},
    },
    item::data::ItemData,
};

/// Indices into [`AnimationStack`]'s animation list, in application order.
pub type Layers = SmallVec<[usize; 4]>;

#[derive(Clone, Debug, PartialEq)]
struct Segment {
    start: f64,
    layers: Layers,
}

/// Time-partitioned history of one item's animations.
///
/// Segments are contiguous, sorted by start and cover `[0, FOREVER)`. Each segment lists the
/// animations active in it; evaluating a time replays that list over the base snapshot.
///
/// Layers replay in append order. A covering entry (display or whole-data interpolation) ignores
/// whatever lies beneath it, so it replaces the layers of every segment it occupies.
#[derive(Clone, Debug)]
pub struct AnimationStack {
    base: ItemData,
    anims: Vec<ItemAnimation>,
    segments: Vec<Segment>,
    last_data: ItemData,
}

impl AnimationStack {
    /// Create a stack whose items read as `base` until something is appended.
    pub fn new(base: ItemData) -> Self {
        Self {
            last_data: base.clone(),
            base,
            anims: Vec::new(),
            segments: vec![Segment {
                start: 0.0,
                layers: Layers::new(),
            }],
        }
    }

    /// Snapshot used when no animation is active.
    pub fn base(&self) -> &ItemData {
        &self.base
    }

    /// Steady state the most recent append leads to.
    pub fn last_data(&self) -> &ItemData {
        &self.last_data
    }

    /// Every appended animation, in append order.
    pub fn animations(&self) -> &[ItemAnimation] {
        &self.anims
    }

    /// Segment intervals in time order; the last one is open-ended.
    pub fn segments(&self) -> impl Iterator<Item = TimeRange> + '_ {
        self.segments.iter().enumerate().map(|(i, seg)| TimeRange {
            at: seg.start,
            end: self.segments.get(i + 1).map_or(FOREVER, |next| next.start),
        })
    }

    /// Layers of the segment containing `t` (right-biased).
    pub fn layers_at(&self, t: f64) -> &[usize] {
        &self.segments[self.right_index(t)].layers
    }

    /// Insert `anim` (already aligned), splitting segments at its footprint bounds.
    pub fn append(&mut self, anim: ItemAnimation) -> TimelineResult<()> {
        let footprint = anim.footprint();
        if footprint.at < 0.0 {
            return Err(TimelineError::validation(format!(
                "item animation starts before time 0 ({})",
                footprint.at
            )));
        }

        self.split_at(footprint.at);
        if footprint.end.is_finite() {
            self.split_at(footprint.end);
        }

        let idx = self.anims.len();
        let covers = anim.covers();
        for seg in self
            .segments
            .iter_mut()
            .filter(|seg| seg.start >= footprint.at && seg.start < footprint.end)
        {
            if covers {
                seg.layers.clear();
            }
            seg.layers.push(idx);
        }

        if anim.holds && anim.range.end.is_finite() {
            anim.apply(&mut self.last_data, anim.range.end)?;
        } else if anim.holds {
            anim.apply(&mut self.last_data, anim.range.at)?;
        }
        self.anims.push(anim);
        Ok(())
    }

    /// Data at `t`; an error when `t` sits exactly on an interior boundary.
    pub fn query(&self, t: f64) -> TimelineResult<ItemData> {
        let idx = self.right_index(t);
        if idx > 0 && self.segments[idx].start == t {
            return Err(TimelineError::consistency(format!(
                "t={t} lies on a segment boundary; use a left or right biased query"
            )));
        }
        self.replay(idx, t)
    }

    /// Data at `t` as approached from later times.
    pub fn query_right(&self, t: f64) -> TimelineResult<ItemData> {
        self.replay(self.right_index(t), t)
    }

    /// Data at `t` as approached from earlier times.
    pub fn query_left(&self, t: f64) -> TimelineResult<ItemData> {
        let idx = self
            .segments
            .partition_point(|seg| seg.start < t)
            .saturating_sub(1);
        self.replay(idx, t)
    }

    fn right_index(&self, t: f64) -> usize {
        self.segments
            .partition_point(|seg| seg.start <= t)
            .saturating_sub(1)
    }

    fn replay(&self, idx: usize, t: f64) -> TimelineResult<ItemData> {
        let mut data = self.base.clone();
        for &l in &self.segments[idx].layers {
            self.anims[l].apply(&mut data, t)?;
        }
        Ok(data)
    }

    fn split_at(&mut self, t: f64) {
        let idx = self.right_index(t);
        if self.segments[idx].start == t {
            return;
        }
        tracing::trace!(t, segment = idx, "split stack segment");
        let layers = self.segments[idx].layers.clone();
        self.segments.insert(idx + 1, Segment { start: t, layers });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stack/anim_stack.rs"]
mod tests;
