//! Derived physics parameters and their lazily refreshed cache.

use crate::float::Float;
use crate::scalar::ScalarSpring;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, warn};

/// Smallest stiffness a spring may have. Non-positive force is raised to this.
pub const MIN_FORCE: f32 = 1e-4;

/// Sanitized per-member settings, ready for the integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicsParameters<F: Float> {
    pub force: F,
    pub drag: F,
    /// Force above which the analytical solver is used.
    pub integration_force_threshold: F,
    pub always_analytical: bool,
    pub min_value: F,
    pub max_value: F,
    pub clamp_target: bool,
    pub clamp_current_value: bool,
    pub stop_on_clamp: bool,
}

impl<F: Float> PhysicsParameters<F> {
    /// Derive parameters for `member`. `common` overrides its force and drag.
    pub fn derive(member: &ScalarSpring<F>, common: Option<(F, F)>, force_threshold: F) -> Self {
        let (force, drag) = common.unwrap_or((member.force, member.drag));
        let (min_value, max_value) = ordered_bounds(member.min_value, member.max_value);
        PhysicsParameters {
            force: sanitize_force(force),
            drag: sanitize_drag(drag),
            integration_force_threshold: force_threshold,
            always_analytical: force_threshold < F::zero(),
            min_value,
            max_value,
            clamp_target: member.clamp_target,
            clamp_current_value: member.clamp_current_value,
            stop_on_clamp: member.stop_on_clamp,
        }
    }

    /// Whether this member should be stepped with the closed-form solution.
    pub fn use_analytical(&self) -> bool {
        self.always_analytical || self.force > self.integration_force_threshold
    }

    /// Undamped angular frequency `sqrt(force)`.
    pub fn angular_frequency(&self) -> F {
        self.force.sqrt()
    }

    /// `drag / (2 sqrt(force))`.
    pub fn damping_ratio(&self) -> F {
        self.drag / (F::two() * self.force.sqrt())
    }

    /// Invariants every derived entry must satisfy before use.
    pub fn is_valid(&self) -> bool {
        self.force.is_finite()
            && self.force > F::zero()
            && self.drag.is_finite()
            && self.drag >= F::zero()
            && !(self.min_value > self.max_value)
    }
}

/// Stiffness coerced to a small positive value when invalid.
pub fn sanitize_force<F: Float>(force: F) -> F {
    if force.is_finite() && force > F::zero() {
        force
    } else {
        F::from_f32(MIN_FORCE)
    }
}

/// Drag coerced to be non-negative.
pub fn sanitize_drag<F: Float>(drag: F) -> F {
    if drag.is_finite() && drag > F::zero() {
        drag
    } else {
        F::zero()
    }
}

/// Bounds in ascending order; inverted bounds are swapped.
pub fn ordered_bounds<F: Float>(min_value: F, max_value: F) -> (F, F) {
    if min_value > max_value {
        (max_value, min_value)
    } else {
        (min_value, max_value)
    }
}

/// Per-aggregate cache of [`PhysicsParameters`], one entry per member.
///
/// Setters mark the cache dirty; [`refresh`](Self::refresh) regenerates it
/// on the next read. A refresh also regenerates when the cached entries no
/// longer match the members (wrong count or an invalid entry).
#[derive(Clone, Debug)]
pub struct ParameterCache<F: Float> {
    entries: AllocVec<PhysicsParameters<F>>,
    force_threshold: F,
    dirty: bool,
}

impl<F: Float> ParameterCache<F> {
    pub fn new() -> Self {
        ParameterCache {
            entries: AllocVec::new(),
            force_threshold: F::zero(),
            dirty: true,
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bring the cache up to date and return its entries.
    pub fn refresh(
        &mut self,
        members: &[ScalarSpring<F>],
        common: Option<(F, F)>,
        force_threshold: F,
    ) -> &[PhysicsParameters<F>] {
        if !self.dirty && force_threshold != self.force_threshold {
            self.dirty = true;
        }
        if !self.dirty && !self.double_check(members.len()) {
            warn!("physics parameter cache found corrupt, regenerating");
            self.dirty = true;
        }
        if self.dirty {
            debug!(members = members.len(), "regenerating physics parameters");
            self.entries.clear();
            self.entries.extend(
                members.iter().map(|m| PhysicsParameters::derive(m, common, force_threshold)),
            );
            self.force_threshold = force_threshold;
            self.dirty = false;
        }
        &self.entries
    }

    fn double_check(&self, member_count: usize) -> bool {
        self.entries.len() == member_count && self.entries.iter().all(PhysicsParameters::is_valid)
    }
}

impl<F: Float> Default for ParameterCache<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_settings_are_coerced() {
        let mut member = ScalarSpring::new(0.0f64).with_force(-3.0).with_drag(-1.0).with_bounds(5.0, 1.0);
        member.clamp_current_value = true;
        let p = PhysicsParameters::derive(&member, None, 7500.0);
        assert!(p.force > 0.0);
        assert_eq!(p.drag, 0.0);
        assert_eq!((p.min_value, p.max_value), (1.0, 5.0));
        assert!(p.clamp_current_value);
        assert!(p.is_valid());
    }

    #[test]
    fn common_force_and_drag_override_member() {
        let member = ScalarSpring::new(0.0f64).with_force(10.0).with_drag(1.0);
        let p = PhysicsParameters::derive(&member, Some((400.0, 40.0)), 7500.0);
        assert_eq!(p.force, 400.0);
        assert_eq!(p.drag, 40.0);
        assert!((p.damping_ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn analytical_selection() {
        let member = ScalarSpring::new(0.0f64).with_force(8000.0);
        assert!(PhysicsParameters::derive(&member, None, 7500.0).use_analytical());
        let soft = ScalarSpring::new(0.0f64).with_force(100.0);
        assert!(!PhysicsParameters::derive(&soft, None, 7500.0).use_analytical());
        assert!(PhysicsParameters::derive(&soft, None, -1.0).use_analytical());
    }

    #[test]
    fn cache_regenerates_on_invalidate_and_threshold_change() {
        let mut members = [ScalarSpring::new(0.0f64).with_force(100.0)];
        let mut cache = ParameterCache::new();
        assert_eq!(cache.refresh(&members, None, 7500.0)[0].force, 100.0);

        members[0].force = 200.0;
        assert_eq!(cache.refresh(&members, None, 7500.0)[0].force, 100.0);
        cache.invalidate();
        assert_eq!(cache.refresh(&members, None, 7500.0)[0].force, 200.0);

        assert!(cache.refresh(&members, None, -1.0)[0].always_analytical);
    }

    #[test]
    fn cache_regenerates_when_member_count_changes() {
        let mut cache = ParameterCache::new();
        let one = [ScalarSpring::new(0.0f64)];
        assert_eq!(cache.refresh(&one, None, 7500.0).len(), 1);
        let two = [ScalarSpring::new(0.0f64), ScalarSpring::new(1.0f64)];
        assert_eq!(cache.refresh(&two, None, 7500.0).len(), 2);
    }
}
