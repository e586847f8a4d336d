//! Ambient looping signals keyed by an effect name.
//!
//! Only `"pulse"` is defined. Any other key (or none) yields a passthrough
//! that renders its content untouched and never talks to the host.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::PulseConfig;
use crate::host::MotionHost;
use crate::ids::ElementId;
use crate::interp::Easing;
use crate::request::{AnimationHandle, AnimationRequest, RepeatPolicy, Transition};
use crate::value::{Property, PropertyValue, RingShadow};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalEffect {
    Pulse,
}

impl SignalEffect {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pulse" => Some(Self::Pulse),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Pulse => "pulse",
        }
    }
}

#[derive(Debug)]
pub struct PulseSignal {
    element: ElementId,
    effect: Option<SignalEffect>,
    config: PulseConfig,
    handle: Option<AnimationHandle>,
}

impl PulseSignal {
    pub fn new(element: ElementId, effect: Option<SignalEffect>, config: PulseConfig) -> Self {
        Self {
            element,
            effect,
            config,
            handle: None,
        }
    }

    /// Build from an effect key; unknown keys produce a passthrough.
    pub fn from_key(element: ElementId, key: Option<&str>, config: PulseConfig) -> Self {
        let effect = key.and_then(SignalEffect::from_key);
        if effect.is_none() {
            debug!("pulse: {element} effect {key:?} not recognized, passthrough");
        }
        Self::new(element, effect, config)
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn effect(&self) -> Option<SignalEffect> {
        self.effect
    }

    #[inline]
    pub fn is_passthrough(&self) -> bool {
        self.effect.is_none()
    }

    #[inline]
    pub fn handle(&self) -> Option<AnimationHandle> {
        self.handle
    }

    /// Opaque ring -> expanded transparent ring -> no ring, looping forever.
    pub fn pulse_request(config: &PulseConfig) -> AnimationRequest {
        let ring = |spread: f32, alpha: f32| {
            PropertyValue::Shadow(RingShadow {
                spread,
                rgb: config.rgb,
                alpha,
            })
        };
        AnimationRequest::new(
            Transition::new(config.period, Easing::EASE_IN_OUT).repeat(RepeatPolicy::Infinite),
        )
        .keyframes(
            Property::BoxShadow,
            vec![
                ring(0.0, config.alpha),
                ring(config.spread, 0.0),
                ring(0.0, 0.0),
            ],
        )
    }

    /// Start the loop. Mounting twice keeps the first loop.
    pub fn mount(&mut self, host: &mut dyn MotionHost) -> Option<AnimationHandle> {
        match self.effect {
            Some(SignalEffect::Pulse) if self.handle.is_none() => {
                let handle = host.apply_animation(self.element, Self::pulse_request(&self.config));
                self.handle = Some(handle);
                Some(handle)
            }
            _ => None,
        }
    }

    pub fn unmount(&mut self, host: &mut dyn MotionHost) {
        if let Some(handle) = self.handle.take() {
            host.cancel_animation(self.element, handle);
        }
    }
}
