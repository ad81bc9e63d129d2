use crate::foundation::{
    core::{Rgba8Premul, Transform2D, Vec2},
    error::{TimelineError, TimelineResult},
};

/// Interpolation contract for animatable values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotation_rad: a.rotation_rad + (b.rotation_rad - a.rotation_rad) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            anchor: <Vec2 as Lerp>::lerp(&a.anchor, &b.anchor, t),
        }
    }
}

impl Lerp for Rgba8Premul {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Capability tag of an item, used by filtered graph walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ItemKind {
    /// Container; never drawn itself.
    Group,
    /// Vector shape.
    Shape,
    /// Text run.
    Text,
    /// Raster image.
    Image,
}

impl ItemKind {
    /// Whether items of this kind produce draw directives.
    pub fn is_drawable(self) -> bool {
        !matches!(self, Self::Group)
    }
}

/// Visual components of one item at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemData {
    /// Placement.
    pub transform: Transform2D,
    /// Fill color.
    pub color: Rgba8Premul,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Fraction of the item drawn, in `[0, 1]`.
    pub reveal: f64,
    /// Depth key; larger values are drawn further back.
    pub depth: f64,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            transform: Transform2D::default(),
            color: Rgba8Premul::white(),
            opacity: 1.0,
            reveal: 1.0,
            depth: 0.0,
        }
    }
}

impl Lerp for ItemData {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            transform: Transform2D::lerp(&a.transform, &b.transform, t),
            color: Rgba8Premul::lerp(&a.color, &b.color, t),
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            reveal: <f64 as Lerp>::lerp(&a.reveal, &b.reveal, t),
            depth: <f64 as Lerp>::lerp(&a.depth, &b.depth, t),
        }
    }
}

/// A single animatable component of [`ItemData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Prop {
    /// `transform.translate`.
    Position,
    /// `transform.rotation_rad`.
    Rotation,
    /// `transform.scale`.
    Scale,
    /// `color`.
    Color,
    /// `opacity`.
    Opacity,
    /// `reveal`.
    Reveal,
    /// `depth`.
    Depth,
}

/// Value of one [`Prop`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PropValue {
    /// Scalar components (rotation, opacity, reveal, depth).
    Scalar(f64),
    /// Vector components (position, scale).
    Vec2(Vec2),
    /// Color components.
    Color(Rgba8Premul),
}

impl PropValue {
    /// Interpolate two values of the same shape.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> TimelineResult<Self> {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => {
                Ok(Self::Scalar(<f64 as Lerp>::lerp(x, y, t)))
            }
            (Self::Vec2(x), Self::Vec2(y)) => Ok(Self::Vec2(<Vec2 as Lerp>::lerp(x, y, t))),
            (Self::Color(x), Self::Color(y)) => Ok(Self::Color(Rgba8Premul::lerp(x, y, t))),
            _ => Err(TimelineError::validation(
                "cannot interpolate property values of different kinds",
            )),
        }
    }
}

impl Prop {
    /// Read this component from `data`.
    pub fn read(self, data: &ItemData) -> PropValue {
        match self {
            Self::Position => PropValue::Vec2(data.transform.translate),
            Self::Rotation => PropValue::Scalar(data.transform.rotation_rad),
            Self::Scale => PropValue::Vec2(data.transform.scale),
            Self::Color => PropValue::Color(data.color),
            Self::Opacity => PropValue::Scalar(data.opacity),
            Self::Reveal => PropValue::Scalar(data.reveal),
            Self::Depth => PropValue::Scalar(data.depth),
        }
    }

    /// Write this component into `data`; the value kind must match the property.
    pub fn write(self, data: &mut ItemData, value: PropValue) -> TimelineResult<()> {
        match (self, value) {
            (Self::Position, PropValue::Vec2(v)) => data.transform.translate = v,
            (Self::Rotation, PropValue::Scalar(v)) => data.transform.rotation_rad = v,
            (Self::Scale, PropValue::Vec2(v)) => data.transform.scale = v,
            (Self::Color, PropValue::Color(v)) => data.color = v,
            (Self::Opacity, PropValue::Scalar(v)) => data.opacity = v.clamp(0.0, 1.0),
            (Self::Reveal, PropValue::Scalar(v)) => data.reveal = v.clamp(0.0, 1.0),
            (Self::Depth, PropValue::Scalar(v)) => data.depth = v,
            (prop, value) => {
                return Err(TimelineError::validation(format!(
                    "value {value:?} does not fit property {prop:?}"
                )));
            }
        }
        Ok(())
    }

    /// Check that `value` has the shape this property expects.
    pub fn accepts(self, value: &PropValue) -> bool {
        matches!(
            (self, value),
            (Self::Position | Self::Scale, PropValue::Vec2(_))
                | (Self::Color, PropValue::Color(_))
                | (
                    Self::Rotation | Self::Opacity | Self::Reveal | Self::Depth,
                    PropValue::Scalar(_)
                )
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/item/data.rs"]
mod tests;
