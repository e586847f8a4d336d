//! Normalized scroll progress of an element through the viewport.

use serde::{Deserialize, Serialize};

/// Scroll progress in [0,1] over the `start end` → `end start` window:
/// 0 when the element's top reaches the viewport bottom, 1 when its bottom
/// reaches the viewport top.
///
/// Construction never fails: non-finite input (including the NaN a
/// zero-height measurement produces) becomes 0, everything else is clamped.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub const START: ScrollProgress = ScrollProgress(0.0);
    pub const END: ScrollProgress = ScrollProgress(1.0);

    pub fn new(raw: f32) -> Self {
        if raw.is_finite() {
            Self(raw.clamp(0.0, 1.0))
        } else {
            Self::START
        }
    }

    /// Missing measurements (element not in the document yet) read as 0.
    pub fn from_option(raw: Option<f32>) -> Self {
        raw.map_or(Self::START, Self::new)
    }

    /// Derive progress from geometry. `element_top` is the element's top edge
    /// relative to the viewport top; heights are in the same units.
    pub fn from_geometry(element_top: f32, element_height: f32, viewport_height: f32) -> Self {
        if element_height.is_nan()
            || element_height <= 0.0
            || !element_top.is_finite()
            || !viewport_height.is_finite()
        {
            return Self::START;
        }
        let travel = viewport_height + element_height;
        if travel <= 0.0 {
            return Self::START;
        }
        Self::new((viewport_height - element_top) / travel)
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for ScrollProgress {
    fn from(raw: f32) -> Self {
        Self::new(raw)
    }
}

impl From<ScrollProgress> for f32 {
    fn from(p: ScrollProgress) -> Self {
        p.0
    }
}
