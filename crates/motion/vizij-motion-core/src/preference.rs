//! Reduced-motion preference.
//!
//! The preference is owned by the host (an accessibility setting). Decorators
//! receive a read-only `MotionPreferenceAdapter` at construction and only ever
//! call `current()`; nothing in this crate writes the signal.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionPreference {
    pub reduced: bool,
}

impl MotionPreference {
    pub const FULL: MotionPreference = MotionPreference { reduced: false };
    pub const REDUCED: MotionPreference = MotionPreference { reduced: true };
}

/// Host channel the preference is read from.
pub trait PreferenceChannel {
    fn read(&self) -> MotionPreference;
}

impl PreferenceChannel for MotionPreference {
    fn read(&self) -> MotionPreference {
        *self
    }
}

/// Host-owned preference cell. The host keeps its own `Rc` and calls `set`
/// when the platform setting changes.
#[derive(Debug, Default)]
pub struct LivePreference {
    reduced: Cell<bool>,
}

impl LivePreference {
    pub fn new(reduced: bool) -> Self {
        Self {
            reduced: Cell::new(reduced),
        }
    }

    pub fn set(&self, reduced: bool) {
        self.reduced.set(reduced);
    }
}

impl PreferenceChannel for LivePreference {
    fn read(&self) -> MotionPreference {
        MotionPreference {
            reduced: self.reduced.get(),
        }
    }
}

/// Shared read accessor over a `PreferenceChannel`.
#[derive(Clone)]
pub struct MotionPreferenceAdapter {
    channel: Rc<dyn PreferenceChannel>,
}

impl MotionPreferenceAdapter {
    pub fn new(channel: Rc<dyn PreferenceChannel>) -> Self {
        Self { channel }
    }

    /// Adapter over a constant preference.
    pub fn fixed(reduced: bool) -> Self {
        Self::new(Rc::new(MotionPreference { reduced }))
    }

    #[inline]
    pub fn current(&self) -> MotionPreference {
        self.channel.read()
    }
}

impl Default for MotionPreferenceAdapter {
    fn default() -> Self {
        Self::fixed(false)
    }
}

impl fmt::Debug for MotionPreferenceAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionPreferenceAdapter")
            .field("current", &self.current())
            .finish()
    }
}
