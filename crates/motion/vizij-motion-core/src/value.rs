//! Visual properties and the values hosts interpolate between.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Visual property a decorator may drive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Opacity,
    /// Vertical offset in layout units (positive = down).
    TranslateY,
    Scale,
    ClipPath,
    BoxShadow,
}

impl Property {
    /// CSS property name for hosts that style through the DOM.
    pub fn css_name(&self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::TranslateY => "translate",
            Property::Scale => "scale",
            Property::ClipPath => "clip-path",
            Property::BoxShadow => "box-shadow",
        }
    }
}

/// Left-anchored clip region covering `revealed` (0..=1) of the element width.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipInset {
    pub revealed: f32,
}

impl ClipInset {
    pub const HIDDEN: ClipInset = ClipInset { revealed: 0.0 };
    pub const FULL: ClipInset = ClipInset { revealed: 1.0 };

    pub fn css(&self) -> String {
        let pct = self.revealed.clamp(0.0, 1.0) * 100.0;
        format!("polygon(0 0, {pct}% 0, {pct}% 100%, 0% 100%)")
    }
}

/// Solid ring drawn outside the element (`0 0 0 <spread>px rgba(...)`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingShadow {
    pub spread: f32,
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl RingShadow {
    pub fn css(&self) -> String {
        let [r, g, b] = self.rgb;
        format!(
            "0 0 0 {}px rgba({r}, {g}, {b}, {})",
            self.spread, self.alpha
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PropertyValue {
    Scalar(f32),
    Clip(ClipInset),
    Shadow(RingShadow),
}

impl PropertyValue {
    #[inline]
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            PropertyValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn css(&self) -> String {
        match self {
            PropertyValue::Scalar(v) => format!("{v}"),
            PropertyValue::Clip(c) => c.css(),
            PropertyValue::Shadow(s) => s.css(),
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::Scalar(v)
    }
}

impl From<ClipInset> for PropertyValue {
    fn from(c: ClipInset) -> Self {
        PropertyValue::Clip(c)
    }
}

impl From<RingShadow> for PropertyValue {
    fn from(s: RingShadow) -> Self {
        PropertyValue::Shadow(s)
    }
}

/// Interpolation target: a final value or an ordered keyframe sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Value(PropertyValue),
    Keyframes(Vec<PropertyValue>),
}

impl Target {
    /// Value the property holds when the interpolation finishes.
    pub fn final_value(&self) -> Option<&PropertyValue> {
        match self {
            Target::Value(v) => Some(v),
            Target::Keyframes(frames) => frames.last(),
        }
    }
}

/// Ordered property → target mapping carried by an animation request.
pub type PropertySet = IndexMap<Property, Target>;

/// Ordered property → value mapping for immediate (non-interpolated) styles.
pub type PropertyValues = IndexMap<Property, PropertyValue>;
