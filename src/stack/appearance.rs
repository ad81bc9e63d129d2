use crate::{
    item::data::ItemData,
    stack::anim_stack::AnimationStack,
};

/// Visibility history plus animation stack of one item.
#[derive(Clone, Debug)]
pub struct Appearance {
    visibility: Vec<(f64, bool)>,
    stack: AnimationStack,
}

impl Appearance {
    /// Hidden item whose data reads as `base`.
    pub fn new(base: ItemData) -> Self {
        Self {
            visibility: Vec::new(),
            stack: AnimationStack::new(base),
        }
    }

    /// The item's animation stack.
    pub fn stack(&self) -> &AnimationStack {
        &self.stack
    }

    pub(crate) fn stack_mut(&mut self) -> &mut AnimationStack {
        &mut self.stack
    }

    /// Alternating show/hide toggles, ascending; the first one (if any) is a show.
    pub fn visibility(&self) -> &[(f64, bool)] {
        &self.visibility
    }

    /// Visibility at `t`, counting a toggle at exactly `t`.
    pub fn is_visible(&self, t: f64) -> bool {
        let idx = self.visibility.partition_point(|(at, _)| *at <= t);
        idx > 0 && self.visibility[idx - 1].1
    }

    /// Visibility just before `t`.
    pub fn is_visible_left(&self, t: f64) -> bool {
        let idx = self.visibility.partition_point(|(at, _)| *at < t);
        idx > 0 && self.visibility[idx - 1].1
    }

    /// Record that the item becomes `visible` at `t`.
    ///
    /// A later record at the same time replaces an earlier one; records that do not change the
    /// state are dropped so the list keeps alternating.
    pub(crate) fn set_visible(&mut self, t: f64, visible: bool) {
        let pos = self.visibility.partition_point(|(at, _)| *at <= t);
        self.visibility.insert(pos, (t, visible));
        self.normalize();
    }

    fn normalize(&mut self) {
        let mut out: Vec<(f64, bool)> = Vec::with_capacity(self.visibility.len());
        for &(at, visible) in &self.visibility {
            if let Some(last) = out.last_mut()
                && last.0 == at
            {
                *last = (at, visible);
            } else {
                out.push((at, visible));
            }
        }

        let mut state = false;
        out.retain(|&(_, visible)| {
            let changes = visible != state;
            state = visible;
            changes
        });
        self.visibility = out;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stack/appearance.rs"]
mod tests;
