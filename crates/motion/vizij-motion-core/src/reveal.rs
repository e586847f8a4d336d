//! One-shot fade/slide reveal on first viewport entry.
//!
//! Lifecycle: `Unseen -> Triggered -> Settled`, strictly forward. The first
//! `entered = true` report issues the only animation request this element
//! will ever get; later exits and re-entries are ignored. An element whose
//! intersection is never reported simply stays hidden.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::RevealConfig;
use crate::host::{MotionHost, ViewportMargin};
use crate::ids::ElementId;
use crate::interp::Easing;
use crate::preference::MotionPreferenceAdapter;
use crate::request::{AnimationHandle, AnimationRequest, Transition};
use crate::value::{Property, PropertyValue, PropertyValues};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    #[default]
    Unseen,
    Triggered,
    Settled,
}

impl RevealPhase {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Triggered => "triggered",
            Self::Settled => "settled",
        }
    }

    #[inline]
    pub fn has_triggered(&self) -> bool {
        !matches!(self, Self::Unseen)
    }
}

/// Forward-only phase holder shared by every viewport-keyed one-shot.
#[derive(Copy, Clone, Debug, Default)]
pub struct RevealLatch {
    phase: RevealPhase,
    handle: Option<AnimationHandle>,
}

impl RevealLatch {
    #[inline]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[inline]
    pub fn handle(&self) -> Option<AnimationHandle> {
        self.handle
    }

    /// Feed an intersection report. Returns true exactly once: on the first
    /// `entered = true` while `Unseen`.
    pub fn enter(&mut self, entered: bool) -> bool {
        if !entered || self.phase != RevealPhase::Unseen {
            return false;
        }
        self.phase = RevealPhase::Triggered;
        true
    }

    pub(crate) fn record(&mut self, handle: AnimationHandle) {
        self.handle = Some(handle);
    }

    /// Completion notice from the host. Only the latch's own handle settles it.
    pub fn complete(&mut self, handle: AnimationHandle) -> bool {
        if self.phase == RevealPhase::Triggered && self.handle == Some(handle) {
            self.phase = RevealPhase::Settled;
            return true;
        }
        false
    }

    /// Handle still animating, if any.
    pub fn in_flight(&self) -> Option<AnimationHandle> {
        match self.phase {
            RevealPhase::Triggered => self.handle,
            _ => None,
        }
    }
}

/// Snapshot of an element's viewport observation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportObservation {
    pub element: ElementId,
    pub has_entered_once: bool,
    pub margin: ViewportMargin,
}

#[derive(Debug)]
pub struct VisibilityRevealer {
    element: ElementId,
    config: RevealConfig,
    preference: MotionPreferenceAdapter,
    latch: RevealLatch,
}

impl VisibilityRevealer {
    pub fn new(element: ElementId, config: RevealConfig, preference: MotionPreferenceAdapter) -> Self {
        Self {
            element,
            config,
            preference,
            latch: RevealLatch::default(),
        }
    }

    /// Override the configured delay for this instance.
    pub fn with_delay(mut self, delay: f32) -> Self {
        if delay.is_finite() && delay >= 0.0 {
            self.config.delay = delay;
        }
        self
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn phase(&self) -> RevealPhase {
        self.latch.phase()
    }

    pub fn observation(&self) -> ViewportObservation {
        ViewportObservation {
            element: self.element,
            has_entered_once: self.latch.phase().has_triggered(),
            margin: self.config.margin,
        }
    }

    /// Hidden state, read against the preference at call time.
    pub fn hidden_values(&self) -> PropertyValues {
        let offset = if self.preference.current().reduced {
            0.0
        } else {
            self.config.distance
        };
        let mut values = PropertyValues::new();
        values.insert(Property::Opacity, PropertyValue::Scalar(0.0));
        values.insert(Property::TranslateY, PropertyValue::Scalar(offset));
        values
    }

    pub fn reveal_request(&self) -> AnimationRequest {
        AnimationRequest::new(
            Transition::new(self.config.duration, Easing::EASE_OUT_EMPHASIZED)
                .delay(self.config.delay),
        )
        .to(Property::Opacity, 1.0)
        .to(Property::TranslateY, 0.0)
    }

    /// Register the observer and paint the hidden state.
    pub fn mount(&mut self, host: &mut dyn MotionHost) {
        host.observe_intersection(self.element, self.config.margin);
        if !self.latch.phase().has_triggered() {
            host.set_properties(self.element, self.hidden_values());
        }
    }

    /// Returns true if this report started the reveal.
    pub fn on_intersection(&mut self, host: &mut dyn MotionHost, entered: bool) -> bool {
        if !self.latch.enter(entered) {
            return false;
        }
        let handle = host.apply_animation(self.element, self.reveal_request());
        self.latch.record(handle);
        debug!(
            "reveal: {} unseen -> triggered (handle {:?})",
            self.element, handle
        );
        true
    }

    pub fn on_animation_complete(&mut self, handle: AnimationHandle) -> bool {
        let settled = self.latch.complete(handle);
        if settled {
            debug!("reveal: {} triggered -> settled", self.element);
        }
        settled
    }

    pub fn unmount(&mut self, host: &mut dyn MotionHost) {
        host.unobserve(self.element);
        if let Some(handle) = self.latch.in_flight() {
            host.cancel_animation(self.element, handle);
        }
    }
}
