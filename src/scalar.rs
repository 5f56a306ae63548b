//! State of one oscillating scalar.

use crate::float::Float;

/// One damped-oscillator scalar: the atomic member of every spring.
///
/// Fields are authored values. They may be out of range (negative drag,
/// inverted bounds); [`PhysicsParameters`](crate::params::PhysicsParameters)
/// sanitizes them before integration, so the spring stays animatable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScalarSpring<F: Float> {
    pub target: F,
    pub current_value: F,
    pub velocity: F,
    /// Value computed this tick, not yet committed to `current_value`.
    pub candidate_value: F,
    pub min_value: F,
    pub max_value: F,
    /// Stiffness.
    pub force: F,
    /// Damping coefficient.
    pub drag: F,
    pub clamp_target: bool,
    pub clamp_current_value: bool,
    pub stop_on_clamp: bool,
    pub enabled: bool,
    /// Set when current-value clamping was applied on the last update.
    pub clamped: bool,
}

impl<F: Float> ScalarSpring<F> {
    /// Spring at rest at `value`.
    pub fn new(value: F) -> Self {
        ScalarSpring {
            target: value,
            current_value: value,
            velocity: F::zero(),
            candidate_value: value,
            min_value: F::zero(),
            max_value: F::one(),
            force: F::from_f32(150.0),
            drag: F::from_f32(10.0),
            clamp_target: false,
            clamp_current_value: false,
            stop_on_clamp: false,
            enabled: true,
            clamped: false,
        }
    }

    pub fn with_force(mut self, force: F) -> Self {
        self.force = force;
        self
    }

    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_target(mut self, target: F) -> Self {
        self.target = target;
        self
    }

    pub fn with_bounds(mut self, min_value: F, max_value: F) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Overwrite the committed value. The candidate follows so that a
    /// commit without an update is a no-op.
    pub fn set_current_value(&mut self, value: F) {
        self.current_value = value;
        self.candidate_value = value;
    }

    pub fn commit_candidate(&mut self) {
        self.current_value = self.candidate_value;
    }

    /// Snap to target with zero velocity.
    pub fn reach_equilibrium(&mut self) {
        self.set_current_value(self.target);
        self.velocity = F::zero();
    }

    pub fn distance_to_target(&self) -> F {
        (self.current_value - self.target).abs()
    }

    pub fn candidate_distance_to_target(&self) -> F {
        (self.candidate_value - self.target).abs()
    }

    /// How far this tick's candidate has moved from the committed value.
    pub fn pending_change(&self) -> F {
        (self.candidate_value - self.current_value).abs()
    }
}

impl<F: Float> Default for ScalarSpring<F> {
    fn default() -> Self {
        Self::new(F::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_at_rest() {
        let s = ScalarSpring::new(2.0f64);
        assert_eq!(s.target, 2.0);
        assert_eq!(s.candidate_value, 2.0);
        assert_eq!(s.velocity, 0.0);
        assert!(s.enabled);
    }

    #[test]
    fn equilibrium_snaps_and_stops() {
        let mut s = ScalarSpring::new(0.0f64).with_target(3.0);
        s.velocity = 5.0;
        s.reach_equilibrium();
        assert_eq!(s.current_value, 3.0);
        assert_eq!(s.candidate_value, 3.0);
        assert_eq!(s.velocity, 0.0);
    }

    #[test]
    fn commit_copies_candidate() {
        let mut s = ScalarSpring::new(0.0f64);
        s.candidate_value = 0.7;
        assert!((s.pending_change() - 0.7).abs() < 1e-12);
        s.commit_candidate();
        assert_eq!(s.current_value, 0.7);
        assert_eq!(s.pending_change(), 0.0);
    }
}
