//! Error types for configuration and stage bookkeeping.
//!
//! Decorators themselves never fail: unknown keys fall back to passthrough and
//! out-of-range inputs are sanitized. Only decoding and mounting can error.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// JSON could not be decoded into the requested type
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// A configuration field holds an unusable value
    #[error("Invalid config value: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: f32,
        reason: String,
    },

    /// An element id is already owned by a mounted decorator
    #[error("Element already mounted: {element}")]
    DuplicateElement { element: u32 },
}

impl MotionError {
    pub(crate) fn invalid_config(field: &str, value: f32, reason: &str) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Serialization { .. } => "serialization",
            Self::InvalidConfig { .. } => "config",
            Self::DuplicateElement { .. } => "stage",
        }
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
