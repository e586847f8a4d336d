//! Hover/press feedback driven by pointer state.
//!
//! | from    | event  | to      | request            |
//! |---------|--------|---------|--------------------|
//! | idle    | enter  | hovered | lift + grow        |
//! | hovered | leave  | idle    | neutral            |
//! | hovered | cancel | idle    | neutral            |
//! | hovered | down   | pressed | compress (scale)   |
//! | pressed | up     | hovered | lift + grow        |
//! | pressed | cancel | idle    | neutral            |
//! | pressed | leave  | idle    | neutral            |
//!
//! Every other pair is ignored. Each request starts from the spring-sampled
//! value at the event's timestamp, so retargeting mid-flight never snaps.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::PointerConfig;
use crate::host::MotionHost;
use crate::ids::ElementId;
use crate::request::{AnimationHandle, AnimationRequest, Transition};
use crate::spring::SpringMotion;
use crate::value::Property;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    Enter,
    Leave,
    Down,
    /// Release inside the element.
    Up,
    /// Release outside the element, or the platform cancelled the gesture.
    Cancel,
}

impl PointerState {
    /// Next state for `event`, or `None` when the event does not apply.
    pub fn next(self, event: PointerEvent) -> Option<PointerState> {
        use PointerEvent as E;
        use PointerState as S;
        match (self, event) {
            (S::Idle, E::Enter) => Some(S::Hovered),
            (S::Hovered, E::Leave | E::Cancel) => Some(S::Idle),
            (S::Hovered, E::Down) => Some(S::Pressed),
            (S::Pressed, E::Up) => Some(S::Hovered),
            (S::Pressed, E::Cancel | E::Leave) => Some(S::Idle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hovered => "hovered",
            Self::Pressed => "pressed",
        }
    }
}

/// Current interpolated (offset, scale).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerPose {
    pub translate_y: f32,
    pub scale: f32,
}

impl PointerPose {
    pub const NEUTRAL: PointerPose = PointerPose {
        translate_y: 0.0,
        scale: 1.0,
    };
}

#[derive(Debug)]
pub struct PointerInteraction {
    element: ElementId,
    config: PointerConfig,
    state: PointerState,
    offset: SpringMotion,
    scale: SpringMotion,
    handle: Option<AnimationHandle>,
}

impl PointerInteraction {
    pub fn new(element: ElementId, config: PointerConfig) -> Self {
        let spring = config.spring;
        Self {
            element,
            config,
            state: PointerState::Idle,
            offset: SpringMotion::at_rest(spring, PointerPose::NEUTRAL.translate_y),
            scale: SpringMotion::at_rest(spring, PointerPose::NEUTRAL.scale),
            handle: None,
        }
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Spring-sampled pose at host time `now`.
    pub fn current_values(&self, now: f64) -> PointerPose {
        PointerPose {
            translate_y: self.offset.sample(now).value,
            scale: self.scale.sample(now).value,
        }
    }

    pub fn mount(&mut self, host: &mut dyn MotionHost) {
        host.observe_pointer(self.element);
    }

    /// Apply `event` at host time `now`. Returns the handle of the request
    /// issued, or `None` if the event did not change state.
    pub fn on_pointer(
        &mut self,
        host: &mut dyn MotionHost,
        event: PointerEvent,
        now: f64,
    ) -> Option<AnimationHandle> {
        let next = self.state.next(event)?;
        debug!(
            "pointer: {} {} -> {} on {:?}",
            self.element,
            self.state.name(),
            next.name(),
            event
        );
        self.state = next;

        let mut request = AnimationRequest::new(Transition::spring(self.config.spring));
        match next {
            PointerState::Hovered => {
                request = self.retarget_offset(request, -self.config.hover_lift, now);
                request = self.retarget_scale(request, self.config.hover_scale, now);
            }
            PointerState::Pressed => {
                request = self.retarget_scale(request, self.config.press_scale, now);
            }
            PointerState::Idle => {
                request = self.retarget_offset(request, PointerPose::NEUTRAL.translate_y, now);
                request = self.retarget_scale(request, PointerPose::NEUTRAL.scale, now);
            }
        }

        let handle = host.apply_animation(self.element, request);
        self.handle = Some(handle);
        Some(handle)
    }

    fn retarget_offset(&mut self, request: AnimationRequest, target: f32, now: f64) -> AnimationRequest {
        let from = self.offset.retarget(now, target);
        request
            .to(Property::TranslateY, target)
            .starting_at(Property::TranslateY, from)
    }

    fn retarget_scale(&mut self, request: AnimationRequest, target: f32, now: f64) -> AnimationRequest {
        let from = self.scale.retarget(now, target);
        request
            .to(Property::Scale, target)
            .starting_at(Property::Scale, from)
    }

    pub fn unmount(&mut self, host: &mut dyn MotionHost) {
        host.unobserve(self.element);
        if let Some(handle) = self.handle.take() {
            host.cancel_animation(self.element, handle);
        }
    }
}
