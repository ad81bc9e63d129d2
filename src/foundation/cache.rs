use std::collections::BTreeMap;

/// Structural change notifications that invalidate memoized values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    /// The set of parents (and therefore ancestors) of an object changed.
    ParentsChanged,
    /// The set of children (and therefore descendants) of an object changed.
    ChildrenChanged,
}

/// Per-object memoization of derived values with explicit, name-based invalidation.
///
/// Values are recomputed lazily on the first read after they were marked stale. Nothing is
/// tracked automatically: a mutation that breaks a cached value's precondition must either
/// [`emit`](Self::emit) a subscribed [`Signal`] or call [`mark_stale`](Self::mark_stale).
#[derive(Clone, Debug)]
pub struct RefreshCache<V> {
    slots: BTreeMap<&'static str, V>,
    subscriptions: BTreeMap<Signal, Vec<&'static str>>,
    refreshes: u64,
}

impl<V> Default for RefreshCache<V> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
            subscriptions: BTreeMap::new(),
            refreshes: 0,
        }
    }
}

impl<V> RefreshCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate `name` whenever `signal` is emitted.
    pub fn subscribe(&mut self, signal: Signal, name: &'static str) {
        let names = self.subscriptions.entry(signal).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    /// Return the memoized value for `name`, computing it with `f` if stale.
    pub fn get_or_refresh(&mut self, name: &'static str, f: impl FnOnce() -> V) -> &V {
        if !self.slots.contains_key(name) {
            self.refreshes += 1;
        }
        self.slots.entry(name).or_insert_with(f)
    }

    /// Return the memoized value without recomputing.
    pub fn peek(&self, name: &'static str) -> Option<&V> {
        self.slots.get(name)
    }

    /// Return `true` when `name` holds a fresh value.
    pub fn is_fresh(&self, name: &'static str) -> bool {
        self.slots.contains_key(name)
    }

    /// Mark a single cached computation stale.
    pub fn mark_stale(&mut self, name: &'static str) {
        self.slots.remove(name);
    }

    /// Mark every cached computation subscribed to `signal` stale.
    pub fn emit(&mut self, signal: Signal) {
        if let Some(names) = self.subscriptions.get(&signal) {
            for name in names {
                self.slots.remove(name);
            }
        }
    }

    /// Drop every memoized value.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of recomputations performed so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/cache.rs"]
mod tests;
