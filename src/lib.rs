//! Wavyte Timeline is the construction and playback core of a programmatic animation engine.
//!
//! A construction procedure drives a [`Timeline`] forward in time, playing [`Animation`]s on
//! items and editing item data directly. Building freezes the result into a [`BuiltTimeline`]
//! that answers "what does item X look like at time T" for any `T` in `[0, duration]`.
//!
//! # Pipeline overview
//!
//! 1. **Construct**: `spawn` items, `play`/`prepare` animations, `show`/`hide`, `schedule` tasks
//! 2. **Place**: composites lay out their children (parallel, sequential, aligned) and every
//!    boundary is snapped by the [`TimeAligner`] so adjacent animations share exact seams
//! 3. **Stack**: each animation fans out into per-item entries kept in an [`AnimationStack`]
//! 4. **Play back**: [`BuiltTimeline::frame`] replays the stacks into ordered [`DrawDirective`]s
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure playback**: a built timeline is immutable; queries never mutate shared state and can
//!   run in parallel.
//! - **Explicit context**: the construction context is passed as `&mut Timeline`, never read from
//!   global state.
//! - **Premultiplied RGBA8** item colors, as in the Wavyte renderer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod graph;
mod item;
mod stack;
mod timeline;
mod timing;

pub use animation::anim::{Animation, DEFAULT_DURATION, LeafEffect};
pub use animation::compose::CompositeMode;
pub use animation::ease::Ease;
pub use animation::item_anim::{ItemAnimation, ItemEffect, TimeWarp};
pub use foundation::cache::{RefreshCache, Signal};
pub use foundation::core::{Affine, FOREVER, Fps, Rgba8Premul, TimeRange, Transform2D, Vec2};
pub use foundation::error::{TimelineError, TimelineResult};
pub use foundation::ids::{AnimationId, ItemId};
pub use graph::relation::RelationGraph;
pub use item::commands::ItemCommands;
pub use item::data::{ItemData, ItemKind, Lerp, Prop, PropValue};
pub use stack::anim_stack::AnimationStack;
pub use stack::appearance::Appearance;
pub use timeline::builder::Timeline;
pub use timeline::built::{BuiltTimeline, DrawDirective, FrameDirectives};
pub use timeline::config::TimelineConfig;
pub use timeline::lines::ConstructionSite;
pub use timing::aligner::{DEFAULT_ALIGN_EPSILON, TimeAligner};
