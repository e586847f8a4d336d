//! Easing curves carried on animation requests.
//!
//! Hosts usually map these onto their own interpolators (CSS timing
//! functions, a spring solver); `Easing::ease` gives the reference curve.

pub mod functions;

use serde::{Deserialize, Serialize};

use crate::spring::SpringConfig;
use functions::bezier_ease_t;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier { points: [f32; 4] },
    Spring(SpringConfig),
}

impl Easing {
    /// Strong deceleration used by reveals: `cubic-bezier(0.16, 1, 0.3, 1)`.
    pub const EASE_OUT_EMPHASIZED: Easing = Easing::CubicBezier {
        points: [0.16, 1.0, 0.3, 1.0],
    };

    /// Symmetric `cubic-bezier(0.42, 0, 0.58, 1)`.
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier {
        points: [0.42, 0.0, 0.58, 1.0],
    };

    /// Eased progress for normalized time `t`. Spring curves treat `t` as a
    /// fraction of their settle duration.
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicBezier { points: [x1, y1, x2, y2] } => bezier_ease_t(t, *x1, *y1, *x2, *y2),
            Easing::Spring(cfg) => {
                if t >= 1.0 {
                    1.0
                } else {
                    cfg.response(t * cfg.settle_duration())
                }
            }
        }
    }

    /// CSS timing-function string, where one exists.
    pub fn css(&self) -> Option<String> {
        match self {
            Easing::Linear => Some("linear".to_string()),
            Easing::CubicBezier { points: [x1, y1, x2, y2] } => {
                Some(format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"))
            }
            Easing::Spring(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_strings() {
        assert_eq!(
            Easing::EASE_OUT_EMPHASIZED.css().as_deref(),
            Some("cubic-bezier(0.16, 1, 0.3, 1)")
        );
        assert_eq!(Easing::Spring(SpringConfig::POINTER).css(), None);
    }

    #[test]
    fn spring_easing_reaches_one() {
        let e = Easing::Spring(SpringConfig::POINTER);
        assert_eq!(e.ease(0.0), 0.0);
        assert_eq!(e.ease(1.0), 1.0);
        assert!(e.ease(0.5) > 0.5);
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_value(Easing::EASE_IN_OUT).unwrap();
        assert_eq!(json["type"], "cubic_bezier");
        assert_eq!(json["points"].as_array().map(Vec::len), Some(4));
        let back: Easing = serde_json::from_value(json).unwrap();
        assert_eq!(back, Easing::EASE_IN_OUT);
        let spring: Easing =
            serde_json::from_str(r#"{"type":"spring","stiffness":400,"damping":17}"#).unwrap();
        assert_eq!(spring, Easing::Spring(SpringConfig::POINTER));
    }
}
