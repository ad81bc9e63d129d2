use crate::{
    animation::anim::Animation,
    foundation::error::{TimelineError, TimelineResult},
};

/// How a composite lays out its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompositeMode {
    /// Children start together (default `lag_ratio = 0`).
    Parallel,
    /// Each child starts when the previous one ends (default `lag_ratio = 1`).
    Sequential,
    /// Every child is stretched over the whole composite interval.
    Aligned,
}

impl CompositeMode {
    /// Default stagger for this mode.
    pub fn default_lag_ratio(self) -> f64 {
        match self {
            Self::Sequential => 1.0,
            Self::Parallel | Self::Aligned => 0.0,
        }
    }
}

/// Placement of one child relative to its composite's start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ChildSlot {
    pub(crate) start: f64,
    pub(crate) duration: f64,
}

/// Unscaled layout of a composite's children.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChildPlan {
    pub(crate) slots: Vec<ChildSlot>,
    /// Largest child end; the composite's natural duration.
    pub(crate) natural_end: f64,
}

impl ChildPlan {
    /// Rescale every slot linearly so the natural end lands on `duration`.
    pub(crate) fn scaled_to(mut self, duration: f64) -> Self {
        if self.natural_end > 0.0 && duration != self.natural_end {
            let k = duration / self.natural_end;
            for slot in &mut self.slots {
                slot.start *= k;
                slot.duration *= k;
            }
        }
        self.natural_end = duration;
        self
    }
}

fn finite_child_duration(child: &Animation) -> TimelineResult<f64> {
    let d = child.natural_duration()?;
    if !d.is_finite() {
        return Err(TimelineError::usage(
            "composite animations cannot contain open-ended children",
        ));
    }
    Ok(d)
}

/// Lay out children with the stagger rule
/// `start[i] = start[i-1] + lag_ratio * duration[i-1] + offset` (plus each child's own `at`).
pub(crate) fn plan_staggered(
    children: &[Animation],
    lag_ratio: f64,
    offset: f64,
) -> TimelineResult<ChildPlan> {
    let mut slots = Vec::with_capacity(children.len());
    let mut cursor = 0.0_f64;
    let mut natural_end = 0.0_f64;

    for child in children {
        let duration = finite_child_duration(child)?;
        let start = cursor + child.authored_at();
        if start < 0.0 {
            return Err(TimelineError::validation(format!(
                "stagger offset {offset} moves a child before its composite's start"
            )));
        }
        slots.push(ChildSlot { start, duration });
        natural_end = natural_end.max(start + duration);
        cursor = start + lag_ratio * duration + offset;
    }

    Ok(ChildPlan { slots, natural_end })
}

/// Lay out children over one shared interval, ignoring their own `at` and duration.
pub(crate) fn plan_aligned(children: &[Animation]) -> TimelineResult<ChildPlan> {
    let mut natural_end = 0.0_f64;
    for child in children {
        natural_end = natural_end.max(finite_child_duration(child)?);
    }
    let slots = children
        .iter()
        .map(|_| ChildSlot {
            start: 0.0,
            duration: natural_end,
        })
        .collect();
    Ok(ChildPlan { slots, natural_end })
}

pub(crate) fn plan_children(
    mode: CompositeMode,
    children: &[Animation],
    lag_ratio: f64,
    offset: f64,
) -> TimelineResult<ChildPlan> {
    match mode {
        CompositeMode::Parallel | CompositeMode::Sequential => {
            plan_staggered(children, lag_ratio, offset)
        }
        CompositeMode::Aligned => plan_aligned(children),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/compose.rs"]
mod tests;
