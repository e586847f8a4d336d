//! Damped-spring primitive used for pointer feedback.
//!
//! Model: a unit mass-spring-damper solved analytically. The damping ratio is
//! floored at 1.0, so every configuration is critically damped or overdamped
//! and a motion that starts at rest converges on its target without
//! overshoot. `SpringMotion` keeps (origin, velocity, start time) so it can be
//! retargeted mid-flight from its sampled state.

use serde::{Deserialize, Serialize};

/// Displacement (relative to a unit step) below which a spring counts as settled.
const REST_DISPLACEMENT: f32 = 1e-3;
/// Sampling step for the settle-time search, in seconds.
const SETTLE_STEP: f32 = 1.0 / 240.0;
/// Upper bound for the settle-time search, in seconds.
const MAX_SETTLE: f32 = 10.0;
/// Ratios closer than this to 1.0 use the critically damped closed form.
const CRITICAL_EPS: f32 = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
}

fn default_mass() -> f32 {
    1.0
}

impl SpringConfig {
    /// Hover/press profile: stiff and quick to settle.
    pub const POINTER: SpringConfig = SpringConfig {
        stiffness: 400.0,
        damping: 17.0,
        mass: 1.0,
    };

    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    #[inline]
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Raw damping ratio from the configured constants (may be below 1).
    #[inline]
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Damping ratio actually used when evolving the spring.
    #[inline]
    pub fn effective_ratio(&self) -> f32 {
        self.damping_ratio().max(1.0)
    }

    /// Displacement and velocity after `t` seconds, starting from displacement
    /// `x0` (value minus target) with velocity `v0`.
    pub fn evolve(&self, x0: f32, v0: f32, t: f32) -> (f32, f32) {
        let t = t.max(0.0);
        let w = self.natural_frequency();
        let zeta = self.effective_ratio();

        if (zeta - 1.0).abs() < CRITICAL_EPS {
            let b = v0 + w * x0;
            let decay = (-w * t).exp();
            let x = (x0 + b * t) * decay;
            let v = (v0 - w * b * t) * decay;
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = w * (-zeta + root);
            let r2 = w * (-zeta - root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            let e1 = (r1 * t).exp();
            let e2 = (r2 * t).exp();
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        }
    }

    /// Normalized step response in [0,1] at `t` seconds from rest.
    pub fn response(&self, t: f32) -> f32 {
        let (x, _) = self.evolve(1.0, 0.0, t);
        (1.0 - x).clamp(0.0, 1.0)
    }

    /// Seconds until a step from rest is within `REST_DISPLACEMENT` of its target.
    pub fn settle_duration(&self) -> f32 {
        let mut t = 0.0f32;
        while t < MAX_SETTLE {
            let (x, _) = self.evolve(1.0, 0.0, t);
            if x.abs() < REST_DISPLACEMENT {
                return t;
            }
            t += SETTLE_STEP;
        }
        MAX_SETTLE
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::POINTER
    }
}

/// Sampled spring state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringSample {
    pub value: f32,
    pub velocity: f32,
}

/// One scalar channel driven by a spring, retargetable at any time.
#[derive(Clone, Debug)]
pub struct SpringMotion {
    config: SpringConfig,
    origin: f32,
    velocity: f32,
    target: f32,
    started_at: f64,
}

impl SpringMotion {
    /// A spring resting at `value`.
    pub fn at_rest(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            origin: value,
            velocity: 0.0,
            target: value,
            started_at: 0.0,
        }
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Sample the spring at host time `now` (seconds). Times earlier than the
    /// last retarget are treated as the retarget instant.
    pub fn sample(&self, now: f64) -> SpringSample {
        let elapsed = (now - self.started_at).max(0.0) as f32;
        let (x, v) = self
            .config
            .evolve(self.origin - self.target, self.velocity, elapsed);
        SpringSample {
            value: self.target + x,
            velocity: v,
        }
    }

    /// Continue from the sampled state at `now` toward `target`. Returns the
    /// value the new motion starts from.
    pub fn retarget(&mut self, now: f64, target: f32) -> f32 {
        let current = self.sample(now);
        self.origin = current.value;
        self.velocity = current.velocity;
        self.target = target;
        self.started_at = now.max(self.started_at);
        current.value
    }

    pub fn is_at_rest(&self, now: f64) -> bool {
        let s = self.sample(now);
        (s.value - self.target).abs() < REST_DISPLACEMENT && s.velocity.abs() < REST_DISPLACEMENT
    }
}
