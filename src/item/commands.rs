use std::{fmt, sync::Arc};

use crate::{
    foundation::core::{Rgba8Premul, Vec2},
    item::data::ItemData,
};

type CommandFn = Arc<dyn Fn(&mut ItemData) + Send + Sync>;

#[derive(Clone)]
struct Command {
    name: &'static str,
    op: CommandFn,
}

/// Ordered list of captured component operations.
///
/// Nothing runs when a command is recorded; [`replay`](Self::replay) applies the list to a
/// snapshot, which is how transform animations derive their "after" state.
#[derive(Clone, Default)]
pub struct ItemCommands {
    commands: Vec<Command>,
}

impl fmt::Debug for ItemCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ItemCommands {
    /// Create an empty command list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a custom named operation.
    pub fn then(
        mut self,
        name: &'static str,
        op: impl Fn(&mut ItemData) + Send + Sync + 'static,
    ) -> Self {
        self.commands.push(Command {
            name,
            op: Arc::new(op),
        });
        self
    }

    /// Translate by `delta`.
    pub fn shift(self, delta: Vec2) -> Self {
        self.then("shift", move |d| d.transform.translate += delta)
    }

    /// Move to an absolute position.
    pub fn move_to(self, position: Vec2) -> Self {
        self.then("move_to", move |d| d.transform.translate = position)
    }

    /// Rotate by `radians`.
    pub fn rotate(self, radians: f64) -> Self {
        self.then("rotate", move |d| d.transform.rotation_rad += radians)
    }

    /// Multiply the scale uniformly.
    pub fn scale(self, factor: f64) -> Self {
        self.then("scale", move |d| d.transform.scale *= factor)
    }

    /// Replace the fill color.
    pub fn set_color(self, color: Rgba8Premul) -> Self {
        self.then("set_color", move |d| d.color = color)
    }

    /// Replace the opacity.
    pub fn set_opacity(self, opacity: f64) -> Self {
        self.then("set_opacity", move |d| d.opacity = opacity.clamp(0.0, 1.0))
    }

    /// Replace the depth key.
    pub fn set_depth(self, depth: f64) -> Self {
        self.then("set_depth", move |d| d.depth = depth)
    }

    /// Names of the recorded operations, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }

    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Return `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply every operation, in recording order, to a copy of `before`.
    pub fn replay(&self, before: &ItemData) -> ItemData {
        let mut after = before.clone();
        for cmd in &self.commands {
            (cmd.op)(&mut after);
        }
        after
    }
}

#[cfg(test)]
#[path = "../../tests/unit/item/commands.rs"]
mod tests;
