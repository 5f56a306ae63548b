//! Target and current-value clamping, with optional stop-on-clamp.

use crate::float::Float;
use crate::params::PhysicsParameters;

/// What current-value clamping did to a candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClampOutcome<F: Float> {
    pub value: F,
    pub velocity: F,
    pub clamped: bool,
}

/// Force `target` into the bounds when target clamping is configured.
pub fn clamp_target<F: Float>(params: &PhysicsParameters<F>, target: F) -> F {
    if params.clamp_target {
        target.clamp(params.min_value, params.max_value)
    } else {
        target
    }
}

/// Pull an overshooting candidate back to the nearest bound.
///
/// Velocity is only touched when `stop_on_clamp` is set, in which case it
/// becomes exactly zero.
pub fn clamp_candidate<F: Float>(params: &PhysicsParameters<F>, value: F, velocity: F) -> ClampOutcome<F> {
    if !params.clamp_current_value {
        return ClampOutcome { value, velocity, clamped: false };
    }

    let bounded = if value < params.min_value {
        params.min_value
    } else if value > params.max_value {
        params.max_value
    } else {
        return ClampOutcome { value, velocity, clamped: false };
    };

    let velocity = if params.stop_on_clamp { F::zero() } else { velocity };
    ClampOutcome { value: bounded, velocity, clamped: true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ScalarSpring;

    fn params(clamp_target: bool, clamp_current: bool, stop: bool) -> PhysicsParameters<f64> {
        let mut member = ScalarSpring::new(0.0).with_bounds(0.0, 1.0);
        member.clamp_target = clamp_target;
        member.clamp_current_value = clamp_current;
        member.stop_on_clamp = stop;
        PhysicsParameters::derive(&member, None, 7500.0)
    }

    #[test]
    fn target_clamped_only_when_configured() {
        assert_eq!(clamp_target(&params(true, false, false), 5.0), 1.0);
        assert_eq!(clamp_target(&params(false, false, false), 5.0), 5.0);
    }

    #[test]
    fn candidate_within_bounds_untouched() {
        let out = clamp_candidate(&params(false, true, true), 0.5, 3.0);
        assert_eq!(out, ClampOutcome { value: 0.5, velocity: 3.0, clamped: false });
    }

    #[test]
    fn overshoot_clamps_and_keeps_velocity_without_stop() {
        let out = clamp_candidate(&params(false, true, false), 1.3, 3.0);
        assert_eq!(out, ClampOutcome { value: 1.0, velocity: 3.0, clamped: true });
    }

    #[test]
    fn stop_on_clamp_zeroes_velocity() {
        let out = clamp_candidate(&params(false, true, true), -0.2, -4.0);
        assert_eq!(out, ClampOutcome { value: 0.0, velocity: 0.0, clamped: true });
    }
}
