use std::sync::atomic::{AtomicU64, Ordering};

/// Arena index of an item; identity is the index, never the item's data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ItemId(pub u32);

impl ItemId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of one [`Animation`](crate::Animation) instance; clones share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

static NEXT_ANIMATION_ID: AtomicU64 = AtomicU64::new(1);

impl AnimationId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_ANIMATION_ID.fetch_add(1, Ordering::Relaxed))
    }
}
