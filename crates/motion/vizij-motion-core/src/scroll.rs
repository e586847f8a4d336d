//! Scroll-linked interactions.
//!
//! One mode per instance:
//! - `parallax`: live progress -> upward offset, applied immediately on every update.
//! - `text-reveal`: one-shot left-to-right clip on first viewport entry.
//! - `hover`: same behaviour as [`PointerInteraction`], composed internally.
//! - `clip-reveal`, `marquee`, `sticky-progress`: reserved, render as passthrough.
//!
//! Unknown keys are passthrough as well.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::host::{MotionHost, ScrollWindow, ViewportMargin};
use crate::ids::ElementId;
use crate::interp::functions::lerp_f32;
use crate::interp::Easing;
use crate::pointer::{PointerEvent, PointerInteraction};
use crate::progress::ScrollProgress;
use crate::request::{AnimationHandle, AnimationRequest, Transition};
use crate::reveal::{RevealLatch, RevealPhase};
use crate::value::{ClipInset, Property, PropertyValue, PropertyValues};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    TextReveal,
    ClipReveal,
    Parallax,
    Marquee,
    StickyProgress,
    Hover,
}

impl InteractionMode {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "text-reveal" => Some(Self::TextReveal),
            "clip-reveal" => Some(Self::ClipReveal),
            "parallax" => Some(Self::Parallax),
            "marquee" => Some(Self::Marquee),
            "sticky-progress" => Some(Self::StickyProgress),
            "hover" => Some(Self::Hover),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::TextReveal => "text-reveal",
            Self::ClipReveal => "clip-reveal",
            Self::Parallax => "parallax",
            Self::Marquee => "marquee",
            Self::StickyProgress => "sticky-progress",
            Self::Hover => "hover",
        }
    }

    /// Declared but without behaviour; rendered as passthrough.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::ClipReveal | Self::Marquee | Self::StickyProgress)
    }
}

/// Offset for `progress` at `speed`: 0 at the window start, `-distance * speed` at its end.
#[inline]
pub fn parallax_offset(progress: ScrollProgress, speed: f32, distance: f32) -> f32 {
    lerp_f32(0.0, -distance * speed, progress.get())
}

#[derive(Debug)]
enum ModeState {
    Passthrough,
    Parallax { speed: f32, distance: f32 },
    TextReveal { duration: f32, latch: RevealLatch },
    Hover(PointerInteraction),
}

#[derive(Debug)]
pub struct ScrollLinkedEffect {
    element: ElementId,
    mode: Option<InteractionMode>,
    state: ModeState,
    margin: ViewportMargin,
    progress: ScrollProgress,
}

impl ScrollLinkedEffect {
    /// `speed` only matters for `parallax`; `None` or a non-finite value uses
    /// the configured default.
    pub fn new(
        element: ElementId,
        mode: Option<InteractionMode>,
        speed: Option<f32>,
        config: &MotionConfig,
    ) -> Self {
        let state = match mode {
            Some(InteractionMode::Parallax) => ModeState::Parallax {
                speed: speed
                    .filter(|s| s.is_finite())
                    .unwrap_or(config.parallax.default_speed),
                distance: config.parallax.distance,
            },
            Some(InteractionMode::TextReveal) => ModeState::TextReveal {
                duration: config.clip_reveal.duration,
                latch: RevealLatch::default(),
            },
            Some(InteractionMode::Hover) => {
                ModeState::Hover(PointerInteraction::new(element, config.pointer.clone()))
            }
            Some(reserved) => {
                debug!("scroll: {element} mode {} reserved, passthrough", reserved.key());
                ModeState::Passthrough
            }
            None => ModeState::Passthrough,
        };
        Self {
            element,
            mode,
            state,
            margin: config.clip_reveal.margin,
            progress: ScrollProgress::START,
        }
    }

    /// Build from an interaction key; unknown keys produce a passthrough.
    pub fn from_key(element: ElementId, key: &str, speed: Option<f32>, config: &MotionConfig) -> Self {
        let mode = InteractionMode::from_key(key);
        if mode.is_none() {
            debug!("scroll: {element} interaction {key:?} not recognized, passthrough");
        }
        Self::new(element, mode, speed, config)
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn mode(&self) -> Option<InteractionMode> {
        self.mode
    }

    #[inline]
    pub fn is_passthrough(&self) -> bool {
        matches!(self.state, ModeState::Passthrough)
    }

    /// Last sanitized progress seen (parallax only).
    #[inline]
    pub fn progress(&self) -> ScrollProgress {
        self.progress
    }

    /// Phase of the clip reveal, if this is a `text-reveal` instance.
    pub fn reveal_phase(&self) -> Option<RevealPhase> {
        match &self.state {
            ModeState::TextReveal { latch, .. } => Some(latch.phase()),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<&PointerInteraction> {
        match &self.state {
            ModeState::Hover(p) => Some(p),
            _ => None,
        }
    }

    pub fn mount(&mut self, host: &mut dyn MotionHost) {
        let element = self.element;
        match &mut self.state {
            ModeState::Passthrough => {}
            ModeState::Parallax { speed, distance } => {
                host.observe_scroll_progress(element, ScrollWindow::default());
                let offset = parallax_offset(self.progress, *speed, *distance);
                host.set_properties(element, translate(offset));
            }
            ModeState::TextReveal { latch, .. } => {
                host.observe_intersection(element, self.margin);
                if !latch.phase().has_triggered() {
                    let mut values = PropertyValues::new();
                    values.insert(Property::ClipPath, PropertyValue::Clip(ClipInset::HIDDEN));
                    host.set_properties(element, values);
                }
            }
            ModeState::Hover(pointer) => pointer.mount(host),
        }
    }

    /// Feed a raw progress report. Returns the applied offset in parallax mode.
    pub fn on_scroll_progress(&mut self, host: &mut dyn MotionHost, raw: f32) -> Option<f32> {
        let ModeState::Parallax { speed, distance } = self.state else {
            return None;
        };
        self.progress = ScrollProgress::new(raw);
        let offset = parallax_offset(self.progress, speed, distance);
        trace!(
            "parallax: {} progress {} -> offset {}",
            self.element,
            self.progress.get(),
            offset
        );
        host.set_properties(self.element, translate(offset));
        Some(offset)
    }

    /// Returns true if this report started the clip reveal.
    pub fn on_intersection(&mut self, host: &mut dyn MotionHost, entered: bool) -> bool {
        let ModeState::TextReveal { duration, latch } = &mut self.state else {
            return false;
        };
        if !latch.enter(entered) {
            return false;
        }
        let request = AnimationRequest::new(Transition::new(*duration, Easing::EASE_OUT_EMPHASIZED))
            .to(Property::ClipPath, ClipInset::FULL);
        let handle = host.apply_animation(self.element, request);
        latch.record(handle);
        debug!("text-reveal: {} unseen -> triggered", self.element);
        true
    }

    pub fn on_pointer(
        &mut self,
        host: &mut dyn MotionHost,
        event: PointerEvent,
        now: f64,
    ) -> Option<AnimationHandle> {
        match &mut self.state {
            ModeState::Hover(pointer) => pointer.on_pointer(host, event, now),
            _ => None,
        }
    }

    pub fn on_animation_complete(&mut self, handle: AnimationHandle) -> bool {
        match &mut self.state {
            ModeState::TextReveal { latch, .. } => latch.complete(handle),
            _ => false,
        }
    }

    pub fn unmount(&mut self, host: &mut dyn MotionHost) {
        match &mut self.state {
            ModeState::Passthrough => {}
            ModeState::Parallax { .. } => host.unobserve(self.element),
            ModeState::TextReveal { latch, .. } => {
                host.unobserve(self.element);
                if let Some(handle) = latch.in_flight() {
                    host.cancel_animation(self.element, handle);
                }
            }
            ModeState::Hover(pointer) => pointer.unmount(host),
        }
    }
}

fn translate(offset: f32) -> PropertyValues {
    let mut values = PropertyValues::new();
    values.insert(Property::TranslateY, PropertyValue::Scalar(offset));
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for mode in [
            InteractionMode::TextReveal,
            InteractionMode::ClipReveal,
            InteractionMode::Parallax,
            InteractionMode::Marquee,
            InteractionMode::StickyProgress,
            InteractionMode::Hover,
        ] {
            assert_eq!(InteractionMode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(InteractionMode::from_key("wobble"), None);
    }

    #[test]
    fn serde_names_match_keys() {
        let json = serde_json::to_value(InteractionMode::StickyProgress).unwrap();
        assert_eq!(json, "sticky-progress");
    }

    #[test]
    fn offset_endpoints() {
        assert_eq!(parallax_offset(ScrollProgress::START, 1.0, 50.0), 0.0);
        assert_eq!(parallax_offset(ScrollProgress::END, 1.0, 50.0), -50.0);
    }
}
