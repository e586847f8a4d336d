use approx::assert_abs_diff_eq;
use vizij_motion_core::{Easing, SpringConfig, SpringMotion, Transition};

fn configs() -> Vec<SpringConfig> {
    vec![
        SpringConfig::POINTER,
        // Overdamped.
        SpringConfig::new(100.0, 60.0, 1.0),
        // Heavy and soft.
        SpringConfig::new(120.0, 5.0, 3.0),
    ]
}

/// it should converge monotonically from rest for every configuration
#[test]
fn monotonic_from_rest() {
    for cfg in configs() {
        let mut m = SpringMotion::at_rest(cfg, 0.0);
        m.retarget(0.0, 10.0);
        let mut prev = m.sample(0.0).value;
        let settle = cfg.settle_duration() as f64;
        let steps = 200;
        for i in 1..=steps {
            let now = settle * i as f64 / steps as f64;
            let v = m.sample(now).value;
            assert!(v >= prev - 1e-5, "{cfg:?} regressed at {now}: {v} < {prev}");
            assert!(v <= 10.0 + 1e-4, "{cfg:?} overshot at {now}: {v}");
            prev = v;
        }
        assert_abs_diff_eq!(prev, 10.0, epsilon = 10.0 * 2e-3);
    }
}

/// it should continue from the sampled value and velocity when retargeted
#[test]
fn retarget_is_continuous() {
    let cfg = SpringConfig::POINTER;
    let mut m = SpringMotion::at_rest(cfg, 1.0);
    m.retarget(0.0, 1.02);
    let before = m.sample(0.04);
    let from = m.retarget(0.04, 0.98);
    assert_eq!(from, before.value);
    let after = m.sample(0.04);
    assert_abs_diff_eq!(after.value, before.value, epsilon = 1e-6);
    assert_abs_diff_eq!(after.velocity, before.velocity, epsilon = 1e-5);
    assert_eq!(m.target(), 0.98);
}

/// it should treat timestamps before the last retarget as the retarget instant
#[test]
fn stale_timestamps_clamp() {
    let mut m = SpringMotion::at_rest(SpringConfig::POINTER, 0.0);
    m.retarget(1.0, -2.0);
    assert_eq!(m.sample(0.5).value, 0.0);
    assert!(!m.is_at_rest(1.0));
    assert!(m.is_at_rest(3.0));
}

/// it should be within tolerance of the target at its settle duration
#[test]
fn settle_duration_matches_response() {
    for cfg in configs() {
        let d = cfg.settle_duration();
        assert!(cfg.response(d) > 0.998, "{cfg:?} response {}", cfg.response(d));
        assert_eq!(Transition::spring(cfg).duration, d);
        assert_eq!(Transition::spring(cfg).easing, Easing::Spring(cfg));
    }
}
