use crate::foundation::{
    cache::{RefreshCache, Signal},
    error::{TimelineError, TimelineResult},
    ids::ItemId,
};

const ANCESTORS: &str = "ancestors";
const DESCENDANTS: &str = "descendants";

#[derive(Clone, Copy, Debug)]
enum Direction {
    Up,
    Down,
}

/// Parent/child ownership graph over items.
///
/// Adjacency is stored per node in both directions so an item may have several parents.
/// Walks are depth-first, exclude the starting node, never repeat a node and stay finite even if a
/// cycle slipped in.
#[derive(Clone, Debug, Default)]
pub struct RelationGraph {
    parents: Vec<Vec<ItemId>>,
    children: Vec<Vec<ItemId>>,
    caches: Vec<RefreshCache<Vec<ItemId>>>,
}

impl RelationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new node and return its id.
    pub fn insert_node(&mut self) -> ItemId {
        let id = ItemId(self.parents.len() as u32);
        self.parents.push(Vec::new());
        self.children.push(Vec::new());
        let mut cache = RefreshCache::new();
        cache.subscribe(Signal::ParentsChanged, ANCESTORS);
        cache.subscribe(Signal::ChildrenChanged, DESCENDANTS);
        self.caches.push(cache);
        id
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Return `true` when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Return `true` when `id` was registered in this graph.
    pub fn contains(&self, id: ItemId) -> bool {
        id.index() < self.parents.len()
    }

    /// Direct parents in insertion order.
    pub fn parents(&self, id: ItemId) -> &[ItemId] {
        self.parents.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: ItemId) -> &[ItemId] {
        self.children.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Add `child` under `parent`. Duplicate edges and self-edges are rejected.
    pub fn add_child(&mut self, parent: ItemId, child: ItemId) -> TimelineResult<()> {
        self.check_node(parent)?;
        self.check_node(child)?;
        if parent == child {
            return Err(TimelineError::usage(format!(
                "item {} cannot be its own child",
                parent.0
            )));
        }
        if self.children[parent.index()].contains(&child) {
            return Err(TimelineError::usage(format!(
                "item {} is already a child of item {}",
                child.0, parent.0
            )));
        }
        if self.walk(child, Direction::Down, |_| true, false).contains(&parent) {
            tracing::warn!(
                parent = parent.0,
                child = child.0,
                "relation edge introduces a cycle"
            );
        }

        self.children[parent.index()].push(child);
        self.parents[child.index()].push(parent);
        self.notify_edge(parent, child);
        Ok(())
    }

    /// Add several children under `parent`, in order.
    pub fn add_children(&mut self, parent: ItemId, children: &[ItemId]) -> TimelineResult<()> {
        for &child in children {
            self.add_child(parent, child)?;
        }
        Ok(())
    }

    /// Remove the `parent -> child` edge. Removing a missing edge is a usage error.
    pub fn remove_child(&mut self, parent: ItemId, child: ItemId) -> TimelineResult<()> {
        self.check_node(parent)?;
        self.check_node(child)?;
        let Some(pos) = self.children[parent.index()]
            .iter()
            .position(|&c| c == child)
        else {
            return Err(TimelineError::usage(format!(
                "item {} is not a child of item {}",
                child.0, parent.0
            )));
        };

        // Collect affected nodes while the edge still connects them.
        self.notify_edge(parent, child);
        self.children[parent.index()].remove(pos);
        self.parents[child.index()].retain(|&p| p != parent);
        Ok(())
    }

    /// Remove several children from `parent`, in order.
    pub fn remove_children(&mut self, parent: ItemId, children: &[ItemId]) -> TimelineResult<()> {
        for &child in children {
            self.remove_child(parent, child)?;
        }
        Ok(())
    }

    /// All ancestors in depth-first order (memoized).
    pub fn ancestors(&mut self, id: ItemId) -> Vec<ItemId> {
        self.cached(id, ANCESTORS, Direction::Up)
    }

    /// All descendants in depth-first pre-order (memoized).
    pub fn descendants(&mut self, id: ItemId) -> Vec<ItemId> {
        self.cached(id, DESCENDANTS, Direction::Down)
    }

    /// Descendants matching `filter`, continuing below matches.
    pub fn walk_descendants(&self, id: ItemId, filter: impl Fn(ItemId) -> bool) -> Vec<ItemId> {
        self.walk(id, Direction::Down, filter, false)
    }

    /// Descendants matching `filter`, without descending below a match.
    ///
    /// Selecting containers this way never also yields their contents.
    pub fn walk_nearest(&self, id: ItemId, filter: impl Fn(ItemId) -> bool) -> Vec<ItemId> {
        self.walk(id, Direction::Down, filter, true)
    }

    /// Whether the memoized walk for `id` is currently fresh.
    pub fn is_cached(&self, id: ItemId, ancestors: bool) -> bool {
        let name = if ancestors { ANCESTORS } else { DESCENDANTS };
        self.caches
            .get(id.index())
            .is_some_and(|c| c.is_fresh(name))
    }

    fn check_node(&self, id: ItemId) -> TimelineResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TimelineError::usage(format!("unknown item {}", id.0)))
        }
    }

    fn cached(&mut self, id: ItemId, name: &'static str, dir: Direction) -> Vec<ItemId> {
        if !self.contains(id) {
            return Vec::new();
        }
        if let Some(v) = self.caches[id.index()].peek(name) {
            return v.clone();
        }
        let computed = self.walk(id, dir, |_| true, false);
        self.caches[id.index()]
            .get_or_refresh(name, || computed)
            .clone()
    }

    fn notify_edge(&mut self, parent: ItemId, child: ItemId) {
        let mut below = self.walk(child, Direction::Down, |_| true, false);
        below.push(child);
        let mut above = self.walk(parent, Direction::Up, |_| true, false);
        above.push(parent);

        for id in below {
            self.caches[id.index()].emit(Signal::ParentsChanged);
        }
        for id in above {
            self.caches[id.index()].emit(Signal::ChildrenChanged);
        }
    }

    fn walk(
        &self,
        start: ItemId,
        dir: Direction,
        filter: impl Fn(ItemId) -> bool,
        stop_at_match: bool,
    ) -> Vec<ItemId> {
        let next = |id: ItemId| match dir {
            Direction::Up => self.parents(id),
            Direction::Down => self.children(id),
        };

        let mut out = Vec::new();
        let mut visited = vec![false; self.len()];
        if let Some(v) = visited.get_mut(start.index()) {
            *v = true;
        }
        let mut stack: Vec<ItemId> = next(start).iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(seen) = visited.get_mut(id.index()) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;

            let matched = filter(id);
            if matched {
                out.push(id);
            }
            if matched && stop_at_match {
                continue;
            }
            stack.extend(next(id).iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/relation.rs"]
mod tests;
