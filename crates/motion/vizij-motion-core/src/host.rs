//! Host capability contract and a recording implementation.
//!
//! The rendering host owns geometry, event delivery and interpolation. The
//! core talks to it only through [`MotionHost`]. [`CommandBuffer`] records
//! every call as a serializable [`HostCommand`] so adapters (WASM, tests) can
//! drain and apply them once per frame.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::ElementId;
use crate::request::{AnimationHandle, AnimationRequest};
use crate::value::PropertyValues;

/// Signed inset applied to the viewport root when testing intersection.
/// Negative values shrink the root so the trigger fires before the element
/// is fully on screen.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportMargin(pub f32);

impl ViewportMargin {
    pub const NONE: ViewportMargin = ViewportMargin(0.0);

    /// CSS `rootMargin` string.
    pub fn css(&self) -> String {
        format!("{}px", self.0)
    }
}

impl Default for ViewportMargin {
    fn default() -> Self {
        ViewportMargin(-50.0)
    }
}

/// Offsets defining the scroll-progress window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollWindow {
    /// From the element's start meeting the viewport end to the element's end
    /// meeting the viewport start.
    #[default]
    StartEndToEndStart,
}

impl ScrollWindow {
    pub fn offsets(&self) -> [&'static str; 2] {
        match self {
            ScrollWindow::StartEndToEndStart => ["start end", "end start"],
        }
    }
}

/// Capabilities the core consumes from the rendering host.
pub trait MotionHost {
    /// Start reporting `entered` crossings for `element`.
    fn observe_intersection(&mut self, element: ElementId, margin: ViewportMargin);
    /// Start reporting scroll progress of `element` over `window`.
    fn observe_scroll_progress(&mut self, element: ElementId, window: ScrollWindow);
    /// Start reporting pointer enter/leave/down/up/cancel for `element`.
    fn observe_pointer(&mut self, element: ElementId);
    /// Detach every observer registered for `element`.
    fn unobserve(&mut self, element: ElementId);
    /// Begin interpolating; supersedes the element's in-flight request for the
    /// same properties.
    fn apply_animation(&mut self, element: ElementId, request: AnimationRequest)
        -> AnimationHandle;
    fn cancel_animation(&mut self, element: ElementId, handle: AnimationHandle);
    /// Apply values immediately, without interpolation.
    fn set_properties(&mut self, element: ElementId, values: PropertyValues);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostCommand {
    ObserveIntersection {
        element: ElementId,
        margin: ViewportMargin,
    },
    ObserveScrollProgress {
        element: ElementId,
        window: ScrollWindow,
    },
    ObservePointer {
        element: ElementId,
    },
    Unobserve {
        element: ElementId,
    },
    ApplyAnimation {
        element: ElementId,
        handle: AnimationHandle,
        request: AnimationRequest,
    },
    CancelAnimation {
        element: ElementId,
        handle: AnimationHandle,
    },
    SetProperties {
        element: ElementId,
        values: PropertyValues,
    },
}

impl HostCommand {
    pub fn element(&self) -> ElementId {
        match self {
            HostCommand::ObserveIntersection { element, .. }
            | HostCommand::ObserveScrollProgress { element, .. }
            | HostCommand::ObservePointer { element }
            | HostCommand::Unobserve { element }
            | HostCommand::ApplyAnimation { element, .. }
            | HostCommand::CancelAnimation { element, .. }
            | HostCommand::SetProperties { element, .. } => *element,
        }
    }
}

/// Recording host: hands out handles and queues commands for later delivery.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    next_handle: u64,
    commands: Vec<HostCommand>,
    live: HashMap<ElementId, AnimationHandle>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Take every queued command, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every animation request recorded so far, in issue order.
    pub fn requests(&self) -> impl Iterator<Item = (ElementId, &AnimationRequest)> {
        self.commands.iter().filter_map(|c| match c {
            HostCommand::ApplyAnimation {
                element, request, ..
            } => Some((*element, request)),
            _ => None,
        })
    }

    pub fn requests_for(&self, element: ElementId) -> Vec<&AnimationRequest> {
        self.requests()
            .filter(|(e, _)| *e == element)
            .map(|(_, r)| r)
            .collect()
    }

    /// Most recent handle applied to `element` and not cancelled.
    pub fn live_handle(&self, element: ElementId) -> Option<AnimationHandle> {
        self.live.get(&element).copied()
    }
}

impl MotionHost for CommandBuffer {
    fn observe_intersection(&mut self, element: ElementId, margin: ViewportMargin) {
        self.commands
            .push(HostCommand::ObserveIntersection { element, margin });
    }

    fn observe_scroll_progress(&mut self, element: ElementId, window: ScrollWindow) {
        self.commands
            .push(HostCommand::ObserveScrollProgress { element, window });
    }

    fn observe_pointer(&mut self, element: ElementId) {
        self.commands.push(HostCommand::ObservePointer { element });
    }

    fn unobserve(&mut self, element: ElementId) {
        // A detached element has no animation the buffer still needs to track.
        self.live.remove(&element);
        self.commands.push(HostCommand::Unobserve { element });
    }

    fn apply_animation(
        &mut self,
        element: ElementId,
        request: AnimationRequest,
    ) -> AnimationHandle {
        self.next_handle += 1;
        let handle = AnimationHandle(self.next_handle);
        self.live.insert(element, handle);
        self.commands.push(HostCommand::ApplyAnimation {
            element,
            handle,
            request,
        });
        handle
    }

    fn cancel_animation(&mut self, element: ElementId, handle: AnimationHandle) {
        if self.live.get(&element) == Some(&handle) {
            self.live.remove(&element);
        }
        self.commands
            .push(HostCommand::CancelAnimation { element, handle });
    }

    fn set_properties(&mut self, element: ElementId, values: PropertyValues) {
        self.commands
            .push(HostCommand::SetProperties { element, values });
    }
}
