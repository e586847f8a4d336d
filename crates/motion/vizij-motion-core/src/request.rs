//! Animation requests handed to the host's interpolation engine.

use serde::{Deserialize, Serialize};

use crate::interp::Easing;
use crate::spring::SpringConfig;
use crate::value::{Property, PropertySet, PropertyValue, PropertyValues, Target};

/// Opaque handle returned by the host for an applied request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationHandle(pub u64);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    #[default]
    None,
    Infinite,
    InfiniteReverse,
}

impl RepeatPolicy {
    #[inline]
    pub fn is_looping(&self) -> bool {
        !matches!(self, RepeatPolicy::None)
    }
}

/// Timing for one request. Durations and delays are in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: f32,
    pub easing: Easing,
    #[serde(default)]
    pub delay: f32,
    #[serde(default)]
    pub repeat: RepeatPolicy,
}

impl Transition {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: 0.0,
            repeat: RepeatPolicy::None,
        }
    }

    /// Spring-timed transition; the duration is the spring's settle time.
    pub fn spring(config: SpringConfig) -> Self {
        Self::new(config.settle_duration(), Easing::Spring(config))
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn repeat(mut self, repeat: RepeatPolicy) -> Self {
        self.repeat = repeat;
        self
    }
}

/// Immutable once issued. Issuing a new request for the same element and
/// property set supersedes the previous one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub properties: PropertySet,
    /// Starting values; absent means "from whatever the element shows now".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<PropertyValues>,
    pub transition: Transition,
}

impl AnimationRequest {
    pub fn new(transition: Transition) -> Self {
        Self {
            properties: PropertySet::new(),
            from: None,
            transition,
        }
    }

    pub fn to(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        self.properties
            .insert(property, Target::Value(value.into()));
        self
    }

    pub fn keyframes(mut self, property: Property, frames: Vec<PropertyValue>) -> Self {
        self.properties.insert(property, Target::Keyframes(frames));
        self
    }

    pub fn starting_at(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        self.from
            .get_or_insert_with(PropertyValues::new)
            .insert(property, value.into());
        self
    }

    #[inline]
    pub fn target(&self, property: Property) -> Option<&Target> {
        self.properties.get(&property)
    }

    /// Final scalar value for `property`, if it animates to a scalar.
    pub fn target_scalar(&self, property: Property) -> Option<f32> {
        self.target(property)
            .and_then(Target::final_value)
            .and_then(PropertyValue::as_scalar)
    }

    pub fn from_scalar(&self, property: Property) -> Option<f32> {
        self.from
            .as_ref()
            .and_then(|f| f.get(&property))
            .and_then(PropertyValue::as_scalar)
    }
}
