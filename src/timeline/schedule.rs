use std::fmt;

use crate::timeline::lines::ConstructionSite;

/// Deferred construction step.
pub type TaskFn<C> = Box<dyn FnOnce(&mut C) -> anyhow::Result<()>>;

pub(crate) struct ScheduledTask<C> {
    pub(crate) at: f64,
    pub(crate) site: ConstructionSite,
    pub(crate) run: TaskFn<C>,
}

impl<C> fmt::Debug for ScheduledTask<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("at", &self.at)
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

/// Tasks ordered by `at`; equal times keep insertion order.
pub(crate) struct TaskQueue<C> {
    tasks: Vec<ScheduledTask<C>>,
}

impl<C> Default for TaskQueue<C> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<C> fmt::Debug for TaskQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.tasks).finish()
    }
}

impl<C> TaskQueue<C> {
    pub(crate) fn push(&mut self, at: f64, site: ConstructionSite, run: TaskFn<C>) {
        let pos = self.tasks.partition_point(|task| task.at <= at);
        self.tasks.insert(pos, ScheduledTask { at, site, run });
    }

    /// Remove and return the earliest task due at or before `limit`.
    pub(crate) fn pop_due(&mut self, limit: f64) -> Option<ScheduledTask<C>> {
        match self.tasks.first() {
            Some(task) if task.at <= limit => Some(self.tasks.remove(0)),
            _ => None,
        }
    }

    pub(crate) fn next_at(&self) -> Option<f64> {
        self.tasks.first().map(|task| task.at)
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
