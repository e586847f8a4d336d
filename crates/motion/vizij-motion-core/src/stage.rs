//! Stage: owns mounted decorators and routes host events to them.
//!
//! Methods:
//! - new, allocate_element, mount (spec -> decorator), unmount, dispatch, dispatch_all
//!
//! Events for elements that are not mounted are dropped; an unmounted element
//! must never animate.

use hashbrown::HashMap;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::host::MotionHost;
use crate::ids::{ElementId, IdAllocator};
use crate::pointer::{PointerEvent, PointerInteraction};
use crate::preference::MotionPreferenceAdapter;
use crate::progress::ScrollProgress;
use crate::pulse::PulseSignal;
use crate::request::AnimationHandle;
use crate::reveal::VisibilityRevealer;
use crate::scroll::ScrollLinkedEffect;
use crate::Result;

/// Declarative description of what to wrap an element with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecoratorSpec {
    Reveal {
        #[serde(default)]
        delay: Option<f32>,
    },
    Effect {
        #[serde(default)]
        effect: Option<String>,
    },
    Interaction {
        interaction: String,
        #[serde(default)]
        speed: Option<f32>,
    },
    Pointer,
}

#[derive(Debug)]
pub enum Decorator {
    Reveal(VisibilityRevealer),
    Pulse(PulseSignal),
    Scroll(ScrollLinkedEffect),
    Pointer(PointerInteraction),
}

impl Decorator {
    pub fn element(&self) -> ElementId {
        match self {
            Decorator::Reveal(d) => d.element(),
            Decorator::Pulse(d) => d.element(),
            Decorator::Scroll(d) => d.element(),
            Decorator::Pointer(d) => d.element(),
        }
    }

    fn mount(&mut self, host: &mut dyn MotionHost) {
        match self {
            Decorator::Reveal(d) => d.mount(host),
            Decorator::Pulse(d) => {
                d.mount(host);
            }
            Decorator::Scroll(d) => d.mount(host),
            Decorator::Pointer(d) => d.mount(host),
        }
    }

    fn unmount(&mut self, host: &mut dyn MotionHost) {
        match self {
            Decorator::Reveal(d) => d.unmount(host),
            Decorator::Pulse(d) => d.unmount(host),
            Decorator::Scroll(d) => d.unmount(host),
            Decorator::Pointer(d) => d.unmount(host),
        }
    }
}

/// Host-delivered event for one element. Times are host seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    Intersection {
        element: ElementId,
        entered: bool,
    },
    /// `progress` is absent (or `null`) while the element is unmeasured.
    ScrollProgress {
        element: ElementId,
        #[serde(default)]
        progress: Option<f32>,
    },
    Pointer {
        element: ElementId,
        event: PointerEvent,
        #[serde(default)]
        time: f64,
    },
    AnimationComplete {
        element: ElementId,
        handle: AnimationHandle,
    },
}

impl HostEvent {
    pub fn element(&self) -> ElementId {
        match self {
            HostEvent::Intersection { element, .. }
            | HostEvent::ScrollProgress { element, .. }
            | HostEvent::Pointer { element, .. }
            | HostEvent::AnimationComplete { element, .. } => *element,
        }
    }
}

#[derive(Debug)]
pub struct MotionStage {
    config: MotionConfig,
    preference: MotionPreferenceAdapter,
    ids: IdAllocator,
    decorators: HashMap<ElementId, Decorator>,
}

impl MotionStage {
    pub fn new(config: MotionConfig, preference: MotionPreferenceAdapter) -> Self {
        Self {
            config,
            preference,
            ids: IdAllocator::new(),
            decorators: HashMap::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    #[inline]
    pub fn preference(&self) -> &MotionPreferenceAdapter {
        &self.preference
    }

    /// Mint an id no mounted or previously reserved element uses.
    pub fn allocate_element(&mut self) -> ElementId {
        loop {
            let id = self.ids.alloc_element();
            if !self.decorators.contains_key(&id) {
                return id;
            }
        }
    }

    /// Build the decorator `spec` describes.
    pub fn build(&self, element: ElementId, spec: &DecoratorSpec) -> Decorator {
        match spec {
            DecoratorSpec::Reveal { delay } => {
                let mut revealer = VisibilityRevealer::new(
                    element,
                    self.config.reveal.clone(),
                    self.preference.clone(),
                );
                if let Some(delay) = delay {
                    revealer = revealer.with_delay(*delay);
                }
                Decorator::Reveal(revealer)
            }
            DecoratorSpec::Effect { effect } => Decorator::Pulse(PulseSignal::from_key(
                element,
                effect.as_deref(),
                self.config.pulse.clone(),
            )),
            DecoratorSpec::Interaction { interaction, speed } => Decorator::Scroll(
                ScrollLinkedEffect::from_key(element, interaction, *speed, &self.config),
            ),
            DecoratorSpec::Pointer => {
                Decorator::Pointer(PointerInteraction::new(element, self.config.pointer.clone()))
            }
        }
    }

    /// Build and mount a decorator for `element`.
    pub fn mount(
        &mut self,
        host: &mut dyn MotionHost,
        element: ElementId,
        spec: &DecoratorSpec,
    ) -> Result<()> {
        let decorator = self.build(element, spec);
        self.insert(host, decorator)
    }

    /// Mount a decorator built by the caller.
    pub fn insert(&mut self, host: &mut dyn MotionHost, mut decorator: Decorator) -> Result<()> {
        let element = decorator.element();
        if self.decorators.contains_key(&element) {
            warn!("stage: {element} already mounted");
            return Err(MotionError::DuplicateElement { element: element.0 });
        }
        self.ids.reserve(element);
        decorator.mount(host);
        debug!("stage: mounted {element}");
        self.decorators.insert(element, decorator);
        Ok(())
    }

    /// Detach observers and cancel pending animations. Returns false if
    /// nothing was mounted for `element`.
    pub fn unmount(&mut self, host: &mut dyn MotionHost, element: ElementId) -> bool {
        match self.decorators.remove(&element) {
            Some(mut decorator) => {
                decorator.unmount(host);
                debug!("stage: unmounted {element}");
                true
            }
            None => false,
        }
    }

    /// Unmount every decorator.
    pub fn clear(&mut self, host: &mut dyn MotionHost) {
        for (_, mut decorator) in self.decorators.drain() {
            decorator.unmount(host);
        }
    }

    /// Route one event to its decorator. Returns true if the element is
    /// mounted and its decorator handles this kind of event.
    pub fn dispatch(&mut self, host: &mut dyn MotionHost, event: &HostEvent) -> bool {
        let Some(decorator) = self.decorators.get_mut(&event.element()) else {
            debug!("stage: dropping {:?} for unmounted element", event);
            return false;
        };
        match (decorator, event) {
            (Decorator::Reveal(d), HostEvent::Intersection { entered, .. }) => {
                d.on_intersection(host, *entered);
            }
            (Decorator::Reveal(d), HostEvent::AnimationComplete { handle, .. }) => {
                d.on_animation_complete(*handle);
            }
            (Decorator::Scroll(d), HostEvent::Intersection { entered, .. }) => {
                d.on_intersection(host, *entered);
            }
            (Decorator::Scroll(d), HostEvent::ScrollProgress { progress, .. }) => {
                d.on_scroll_progress(host, ScrollProgress::from_option(*progress).get());
            }
            (Decorator::Scroll(d), HostEvent::Pointer { event, time, .. }) => {
                d.on_pointer(host, *event, *time);
            }
            (Decorator::Scroll(d), HostEvent::AnimationComplete { handle, .. }) => {
                d.on_animation_complete(*handle);
            }
            (Decorator::Pointer(d), HostEvent::Pointer { event, time, .. }) => {
                d.on_pointer(host, *event, *time);
            }
            (_, event) => {
                trace!("stage: {:?} not handled by {}", event, event.element());
                return false;
            }
        }
        true
    }

    /// Dispatch events in host emission order.
    pub fn dispatch_all<'a>(
        &mut self,
        host: &mut dyn MotionHost,
        events: impl IntoIterator<Item = &'a HostEvent>,
    ) -> usize {
        let mut delivered = 0;
        for event in events {
            if self.dispatch(host, event) {
                delivered += 1;
            }
        }
        delivered
    }

    pub fn decorator(&self, element: ElementId) -> Option<&Decorator> {
        self.decorators.get(&element)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }
}
