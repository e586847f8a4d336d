//! Vizij Motion Core (host-agnostic)
//!
//! Scroll- and pointer-driven decorators for page elements: one-shot reveals
//! on first viewport entry, looping ambient signals, scroll-linked parallax and
//! clip reveals, and spring-eased hover/press feedback.
//!
//! The crate never touches a renderer. Hosts report intersections, scroll
//! progress and pointer events; decorators answer with `AnimationRequest`s and
//! immediate property writes through the [`MotionHost`] trait. [`MotionStage`]
//! routes serializable [`HostEvent`]s to mounted decorators and
//! [`CommandBuffer`] records host calls for adapters that apply them per frame.

pub mod config;
pub mod error;
pub mod host;
pub mod ids;
pub mod interp;
pub mod pointer;
pub mod preference;
pub mod progress;
pub mod pulse;
pub mod request;
pub mod reveal;
pub mod scroll;
pub mod spring;
pub mod stage;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::{
    ClipRevealConfig, MotionConfig, ParallaxConfig, PointerConfig, PulseConfig, RevealConfig,
};
pub use error::MotionError;
pub use host::{CommandBuffer, HostCommand, MotionHost, ScrollWindow, ViewportMargin};
pub use ids::{ElementId, IdAllocator};
pub use interp::Easing;
pub use pointer::{PointerEvent, PointerInteraction, PointerPose, PointerState};
pub use preference::{LivePreference, MotionPreference, MotionPreferenceAdapter, PreferenceChannel};
pub use progress::ScrollProgress;
pub use pulse::{PulseSignal, SignalEffect};
pub use request::{AnimationHandle, AnimationRequest, RepeatPolicy, Transition};
pub use reveal::{RevealLatch, RevealPhase, ViewportObservation, VisibilityRevealer};
pub use scroll::{parallax_offset, InteractionMode, ScrollLinkedEffect};
pub use spring::{SpringConfig, SpringMotion, SpringSample};
pub use stage::{Decorator, DecoratorSpec, HostEvent, MotionStage};
pub use value::{ClipInset, Property, PropertySet, PropertyValue, PropertyValues, RingShadow, Target};

/// Result alias for fallible configuration and stage operations.
pub type Result<T> = core::result::Result<T, MotionError>;
