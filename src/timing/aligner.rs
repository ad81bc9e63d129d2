use crate::foundation::{
    core::TimeRange,
    error::{TimelineError, TimelineResult},
};

/// Default snapping tolerance in seconds.
pub const DEFAULT_ALIGN_EPSILON: f64 = 1e-6;

/// Snaps nearby time values onto one canonical value.
///
/// Canonical values live in a sorted registry that only grows. Lookups are binary searches over
/// that registry; only the two neighbours of the insertion point can be within tolerance.
#[derive(Clone, Debug)]
pub struct TimeAligner {
    epsilon: f64,
    registry: Vec<f64>,
}

impl Default for TimeAligner {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_ALIGN_EPSILON,
            registry: Vec::new(),
        }
    }
}

impl TimeAligner {
    /// Create an aligner with the given tolerance.
    pub fn new(epsilon: f64) -> TimelineResult<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(TimelineError::validation(
                "align epsilon must be finite and > 0",
            ));
        }
        Ok(Self {
            epsilon,
            registry: Vec::new(),
        })
    }

    /// Snapping tolerance in seconds.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Canonical values registered so far, ascending.
    pub fn registered(&self) -> &[f64] {
        &self.registry
    }

    /// Canonicalize `t`, registering it when no canonical value is close enough.
    ///
    /// Non-finite values (e.g. [`FOREVER`](crate::FOREVER)) pass through unregistered.
    pub fn align_t(&mut self, t: f64) -> f64 {
        if !t.is_finite() {
            return t;
        }
        let (pos, snapped) = self.lookup(t);
        if let Some(v) = snapped {
            return v;
        }
        self.registry.insert(pos, t);
        t
    }

    /// Canonicalize `t` without touching the registry.
    ///
    /// Playback uses this so queries never perturb alignment state.
    pub fn align_t_for_render(&self, t: f64) -> f64 {
        if !t.is_finite() {
            return t;
        }
        self.lookup(t).1.unwrap_or(t)
    }

    /// Canonicalize both ends of a range.
    pub fn align(&mut self, range: TimeRange) -> TimeRange {
        let at = self.align_t(range.at);
        let end = self.align_t(range.end);
        TimeRange {
            at,
            end: end.max(at),
        }
    }

    fn lookup(&self, t: f64) -> (usize, Option<f64>) {
        let pos = self.registry.partition_point(|&v| v < t);
        let below = pos.checked_sub(1).map(|i| self.registry[i]);
        let above = self.registry.get(pos).copied();

        let best = [below, above]
            .into_iter()
            .flatten()
            .filter(|v| (v - t).abs() < self.epsilon)
            .min_by(|a, b| (a - t).abs().total_cmp(&(b - t).abs()));
        (pos, best)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/aligner.rs"]
mod tests;
