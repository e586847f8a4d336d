//! Tunable constants for every decorator.
//!
//! Defaults reproduce the stock look; hosts may override any subset from JSON
//! (missing fields keep their defaults). Times are in seconds, distances in
//! layout units.

use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::host::ViewportMargin;
use crate::spring::SpringConfig;
use crate::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub reveal: RevealConfig,
    pub clip_reveal: ClipRevealConfig,
    pub pulse: PulseConfig,
    pub parallax: ParallaxConfig,
    pub pointer: PointerConfig,
}

/// Fade/slide-in on first viewport entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub duration: f32,
    /// Default per-instance delay before the reveal starts.
    pub delay: f32,
    /// Initial downward offset of the hidden state (ignored under reduced motion).
    pub distance: f32,
    pub margin: ViewportMargin,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration: 0.8,
            delay: 0.25,
            distance: 30.0,
            margin: ViewportMargin::default(),
        }
    }
}

/// Left-to-right clip reveal used by the `text-reveal` interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipRevealConfig {
    pub duration: f32,
    pub margin: ViewportMargin,
}

impl Default for ClipRevealConfig {
    fn default() -> Self {
        Self {
            duration: 0.8,
            margin: ViewportMargin::NONE,
        }
    }
}

/// Looping glow ring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub period: f32,
    /// Ring spread at the expanded keyframe.
    pub spread: f32,
    pub rgb: [u8; 3],
    /// Ring opacity at the first keyframe.
    pub alpha: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            period: 2.0,
            spread: 6.0,
            rgb: [0, 255, 157],
            alpha: 0.4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Upward travel at progress 1 for speed 1.
    pub distance: f32,
    pub default_speed: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            distance: 50.0,
            default_speed: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Upward lift while hovered.
    pub hover_lift: f32,
    pub hover_scale: f32,
    pub press_scale: f32,
    pub spring: SpringConfig,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            hover_lift: 2.0,
            hover_scale: 1.02,
            press_scale: 0.98,
            spring: SpringConfig::POINTER,
        }
    }
}

fn non_negative(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MotionError::invalid_config(field, value, "must be finite and >= 0"));
    }
    Ok(())
}

fn positive(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MotionError::invalid_config(field, value, "must be finite and > 0"));
    }
    Ok(())
}

impl MotionConfig {
    /// Parse and validate a JSON override document.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: MotionConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("reveal.duration", self.reveal.duration)?;
        non_negative("reveal.delay", self.reveal.delay)?;
        non_negative("reveal.distance", self.reveal.distance)?;
        non_negative("clip_reveal.duration", self.clip_reveal.duration)?;
        positive("pulse.period", self.pulse.period)?;
        non_negative("pulse.spread", self.pulse.spread)?;
        if !(0.0..=1.0).contains(&self.pulse.alpha) {
            return Err(MotionError::invalid_config(
                "pulse.alpha",
                self.pulse.alpha,
                "must be within [0, 1]",
            ));
        }
        non_negative("parallax.distance", self.parallax.distance)?;
        if !self.parallax.default_speed.is_finite() {
            return Err(MotionError::invalid_config(
                "parallax.default_speed",
                self.parallax.default_speed,
                "must be finite",
            ));
        }
        positive("pointer.hover_scale", self.pointer.hover_scale)?;
        positive("pointer.press_scale", self.pointer.press_scale)?;
        positive("pointer.spring.stiffness", self.pointer.spring.stiffness)?;
        positive("pointer.spring.mass", self.pointer.spring.mass)?;
        non_negative("pointer.spring.damping", self.pointer.spring.damping)?;
        if !self.reveal.margin.0.is_finite() || !self.clip_reveal.margin.0.is_finite() {
            return Err(MotionError::invalid_config(
                "margin",
                f32::NAN,
                "must be finite",
            ));
        }
        Ok(())
    }
}
