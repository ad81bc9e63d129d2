use crate::foundation::error::{TimelineError, TimelineResult};

pub use kurbo::{Affine, Vec2};

/// Sentinel end time for open-ended (persistent) effects.
pub const FOREVER: f64 = f64::INFINITY;

/// Half-open time interval `[at, end)` in seconds.
///
/// `end` may be [`FOREVER`] for persistent effects; composites never accept that.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimeRange {
    /// Inclusive start.
    pub at: f64,
    /// Exclusive end, or [`FOREVER`].
    pub end: f64,
}

impl TimeRange {
    /// Create a validated range with finite `at` and `at <= end`.
    pub fn new(at: f64, end: f64) -> TimelineResult<Self> {
        if !at.is_finite() {
            return Err(TimelineError::validation("TimeRange start must be finite"));
        }
        if end.is_nan() || end < at {
            return Err(TimelineError::validation("TimeRange start must be <= end"));
        }
        Ok(Self { at, end })
    }

    /// Open-ended range starting at `at`.
    pub fn forever(at: f64) -> Self {
        Self { at, end: FOREVER }
    }

    /// Length of the range; infinite for open-ended ranges.
    pub fn duration(self) -> f64 {
        self.end - self.at
    }

    /// Return `true` when the range never ends.
    pub fn is_forever(self) -> bool {
        self.end == FOREVER
    }

    /// Return `true` when `t` is inside `[at, end)`.
    pub fn contains(self, t: f64) -> bool {
        self.at <= t && t < self.end
    }

    /// Shift both bounds by `dt` seconds.
    pub fn shift(self, dt: f64) -> Self {
        Self {
            at: self.at + dt,
            end: self.end + dt,
        }
    }
}

/// Frame rate as a rational `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> TimelineResult<Self> {
        if den == 0 {
            return Err(TimelineError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TimelineError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as `f64`.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timestamp of frame `frames`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Number of frames needed to cover `secs` seconds (at least one).
    pub fn frames_covering(self, secs: f64) -> u64 {
        ((secs * self.as_f64()).ceil().max(1.0)) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self::from_straight_rgba(255, 255, 255, 255)
    }

    /// Premultiply straight-alpha components.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Decomposed 2D transform of an item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation in canvas units.
    pub translate: Vec2,
    /// Rotation in radians.
    pub rotation_rad: f64,
    /// Non-uniform scale, default `(1, 1)`.
    pub scale: Vec2,
    /// Pivot in local space.
    pub anchor: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    /// Compose into an affine matrix.
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
