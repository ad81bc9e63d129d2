use rayon::prelude::*;

use crate::{
    animation::anim::Animation,
    foundation::{
        core::{Affine, Fps, TimeRange},
        error::{TimelineError, TimelineResult},
        ids::ItemId,
    },
    item::data::{ItemData, ItemKind},
    stack::appearance::Appearance,
    timeline::lines::{ConstructionSite, LineLog},
    timing::aligner::TimeAligner,
};

#[derive(Clone, Debug)]
pub(crate) struct BuiltItem {
    pub(crate) name: String,
    pub(crate) kind: ItemKind,
}

/// One item to draw in a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawDirective {
    /// Drawn item.
    pub item: ItemId,
    /// Depth key; larger is further back.
    pub depth: f64,
    /// Composed transform of the item.
    pub affine: Affine,
    /// Item data at the frame time.
    pub data: ItemData,
}

/// Everything a renderer needs for one instant, ordered back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameDirectives {
    /// Frame time in seconds.
    pub t: f64,
    /// Visible drawable items, back to front.
    pub items: Vec<DrawDirective>,
}

/// Immutable, queryable result of a construction.
///
/// Every query is a pure function of the timeline and `t`; queries may run concurrently, in any
/// order, any number of times. Times are snapped with the construction's aligner before lookup,
/// without registering anything.
#[derive(Clone, Debug)]
pub struct BuiltTimeline {
    duration: f64,
    aligner: TimeAligner,
    root: Animation,
    items: Vec<BuiltItem>,
    appearances: Vec<Appearance>,
    lines: LineLog,
    fps: Fps,
}

impl BuiltTimeline {
    pub(crate) fn new(
        duration: f64,
        aligner: TimeAligner,
        root: Animation,
        items: Vec<BuiltItem>,
        appearances: Vec<Appearance>,
        lines: LineLog,
        fps: Fps,
    ) -> Self {
        Self {
            duration,
            aligner,
            root,
            items,
            appearances,
            lines,
            fps,
        }
    }

    /// Total duration in seconds; queries accept `t` in `[0, duration]`.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Frame rate from the construction config.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Top-level composite holding every played animation over `[0, duration]`.
    pub fn root(&self) -> &Animation {
        &self.root
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Name given at spawn.
    pub fn item_name(&self, item: ItemId) -> TimelineResult<&str> {
        Ok(&self.item(item)?.name)
    }

    /// Kind given at spawn.
    pub fn item_kind(&self, item: ItemId) -> TimelineResult<ItemKind> {
        Ok(self.item(item)?.kind)
    }

    /// Visibility history and animation stack of an item.
    pub fn appearance(&self, item: ItemId) -> TimelineResult<&Appearance> {
        self.appearances
            .get(item.index())
            .ok_or_else(|| TimelineError::usage(format!("unknown item {}", item.0)))
    }

    /// Stack segments of an item, clipped to `[0, duration]`.
    pub fn segments(&self, item: ItemId) -> TimelineResult<Vec<TimeRange>> {
        let mut out: Vec<TimeRange> = self
            .appearance(item)?
            .stack()
            .segments()
            .filter(|r| r.at < self.duration)
            .map(|r| TimeRange {
                at: r.at,
                end: r.end.min(self.duration),
            })
            .collect();
        if out.is_empty() {
            out.push(TimeRange {
                at: 0.0,
                end: self.duration,
            });
        }
        Ok(out)
    }

    /// Item data at `t`; fails exactly on a stack boundary.
    pub fn query(&self, item: ItemId, t: f64) -> TimelineResult<ItemData> {
        let t = self.resolve(t)?;
        self.appearance(item)?.stack().query(t)
    }

    /// Item data at `t` as approached from earlier times.
    pub fn query_left(&self, item: ItemId, t: f64) -> TimelineResult<ItemData> {
        let t = self.resolve(t)?;
        self.appearance(item)?.stack().query_left(t)
    }

    /// Item data at `t` as approached from later times.
    pub fn query_right(&self, item: ItemId, t: f64) -> TimelineResult<ItemData> {
        let t = self.resolve(t)?;
        self.appearance(item)?.stack().query_right(t)
    }

    /// Whether an item is shown at `t` (a toggle exactly at `t` counts).
    pub fn is_visible(&self, item: ItemId, t: f64) -> TimelineResult<bool> {
        let t = self.resolve(t)?;
        Ok(self.appearance(item)?.is_visible(t))
    }

    /// Whether an item is shown just before `t`; pairs with [`query_left`](Self::query_left).
    pub fn is_visible_left(&self, item: ItemId, t: f64) -> TimelineResult<bool> {
        let t = self.resolve(t)?;
        Ok(self.appearance(item)?.is_visible_left(t))
    }

    /// Construction call active at `t`.
    pub fn line_at(&self, t: f64) -> Option<ConstructionSite> {
        self.lines.at(self.aligner.align_t_for_render(t))
    }

    /// Draw directives for `t`.
    #[tracing::instrument(skip(self))]
    pub fn frame(&self, t: f64) -> TimelineResult<FrameDirectives> {
        let t = self.resolve(t)?;
        let mut items = Vec::new();
        for (idx, (item, appearance)) in self.items.iter().zip(&self.appearances).enumerate() {
            if !item.kind.is_drawable() || !appearance.is_visible(t) {
                continue;
            }
            let data = appearance.stack().query_right(t)?;
            items.push(DrawDirective {
                item: ItemId(idx as u32),
                depth: data.depth,
                affine: data.transform.to_affine(),
                data,
            });
        }
        items.sort_by(|a, b| b.depth.total_cmp(&a.depth).then(a.item.cmp(&b.item)));
        Ok(FrameDirectives { t, items })
    }

    /// Frame timestamps covering `[0, duration)` at `fps` (at least one frame).
    pub fn frame_times(&self, fps: Fps) -> Vec<f64> {
        let n = fps.frames_covering(self.duration);
        (0..n)
            .map(|f| fps.frames_to_secs(f))
            .filter(|&t| t <= self.duration)
            .collect()
    }

    /// Evaluate every frame in parallel. `threads = None` uses rayon's default pool size.
    #[tracing::instrument(skip(self))]
    pub fn render_frames(
        &self,
        fps: Fps,
        threads: Option<usize>,
    ) -> TimelineResult<Vec<FrameDirectives>> {
        let times = self.frame_times(fps);
        let pool = build_thread_pool(threads)?;
        let frames = pool.install(|| {
            times
                .par_iter()
                .map(|&t| self.frame(t))
                .collect::<TimelineResult<Vec<_>>>()
        })?;
        tracing::debug!(frames = frames.len(), "rendered frame directives");
        Ok(frames)
    }

    fn item(&self, item: ItemId) -> TimelineResult<&BuiltItem> {
        self.items
            .get(item.index())
            .ok_or_else(|| TimelineError::usage(format!("unknown item {}", item.0)))
    }

    fn resolve(&self, t: f64) -> TimelineResult<f64> {
        let t = self.aligner.align_t_for_render(t);
        if !(0.0..=self.duration).contains(&t) {
            return Err(TimelineError::consistency(format!(
                "t={t} is outside the timeline [0, {}]",
                self.duration
            )));
        }
        Ok(t)
    }
}

fn build_thread_pool(threads: Option<usize>) -> TimelineResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TimelineError::validation(
            "render threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TimelineError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/built.rs"]
mod tests;
