//! Fixed-size collection of scalar springs updated as one logical value.

use crate::clamp::{clamp_candidate, clamp_target};
use crate::config::SpringConfig;
use crate::error::SpringError;
use crate::events::{EventNotifier, EventState};
use crate::float::Float;
use crate::integrator::integrate;
use crate::observer::SpringObserver;
use crate::params::ParameterCache;
use crate::scalar::ScalarSpring;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, warn};

/// An ordered set of [`ScalarSpring`]s sharing enable flags, optional common
/// force and drag, a parameter cache and an event notifier.
///
/// The typed springs (`FloatSpring`, `Vector3Spring`, `RotationSpring`, ...)
/// are thin wrappers that map their components onto member indices.
///
/// A tick is `update` followed by `commit_candidates`; the split lets a
/// wrapper inspect or rewrite candidates before they become current.
#[derive(Clone, Debug)]
pub struct SpringAggregate<F: Float> {
    members: AllocVec<ScalarSpring<F>>,
    declared_size: usize,
    common_force_and_drag: bool,
    common_force: F,
    common_drag: F,
    spring_enabled: bool,
    clamping_enabled: bool,
    events_enabled: bool,
    params: ParameterCache<F>,
    notifier: EventNotifier,
}

impl<F: Float> SpringAggregate<F> {
    /// Aggregate of `declared_size` default members, initialized.
    pub fn new(declared_size: usize) -> Self {
        Self::with_members(default_members(declared_size), declared_size)
    }

    /// Aggregate over existing members. The member count is validated on
    /// the first update or by [`check_correct_size`](Self::check_correct_size).
    pub fn with_members(members: AllocVec<ScalarSpring<F>>, declared_size: usize) -> Self {
        let mut aggregate = SpringAggregate {
            members,
            declared_size,
            common_force_and_drag: false,
            common_force: F::from_f32(150.0),
            common_drag: F::from_f32(10.0),
            spring_enabled: true,
            clamping_enabled: true,
            events_enabled: true,
            params: ParameterCache::new(),
            notifier: EventNotifier::new(),
        };
        aggregate.initialize();
        aggregate
    }

    /// Prepare members and re-bind the event notifier. Pending candidates
    /// are discarded.
    pub fn initialize(&mut self) {
        debug!(members = self.members.len(), declared = self.declared_size, "initializing spring");
        for member in self.members.iter_mut() {
            member.candidate_value = member.current_value;
            member.clamped = false;
        }
        self.params.invalidate();
        self.notifier.reset();
    }

    /// Reallocate default members if the member count does not match the
    /// declared size. Prior state of this aggregate is lost.
    ///
    /// Returns `true` if a repair happened; the fault also goes to `observer`.
    pub fn check_correct_size<O: SpringObserver>(&mut self, observer: &mut O) -> bool {
        if self.members.len() == self.declared_size {
            return false;
        }
        let fault = SpringError::SizeMismatch {
            expected: self.declared_size,
            found: self.members.len(),
        };
        warn!("{}", fault);
        self.members = default_members(self.declared_size);
        self.initialize();
        observer.on_fault(&fault);
        true
    }

    /// Advance every enabled member by `dt`, then check events.
    ///
    /// Results land in each member's `candidate_value` (and `velocity`);
    /// call [`commit_candidates`](Self::commit_candidates) to apply them.
    /// Numerical faults reset the offending member to equilibrium and are
    /// reported to `observer`; the remaining members update normally.
    pub fn update<O: SpringObserver>(&mut self, dt: F, config: &SpringConfig<F>, observer: &mut O) {
        if self.step(dt, config, observer) {
            self.check_events(config, observer);
        }
    }

    /// Advance every enabled member by `dt` without checking events.
    ///
    /// Returns `false` if the tick was skipped, because the spring is
    /// disabled or `dt` is invalid. Wrappers that rewrite candidates call
    /// this, adjust the candidates, then call
    /// [`check_events`](Self::check_events) themselves.
    pub fn step<O: SpringObserver>(&mut self, dt: F, config: &SpringConfig<F>, observer: &mut O) -> bool {
        if !self.spring_enabled {
            return false;
        }
        if !dt.is_finite() || dt < F::zero() {
            let fault = SpringError::InvalidTimeStep;
            warn!(dt = dt.to_f64(), "{}", fault);
            observer.on_fault(&fault);
            return false;
        }
        self.check_correct_size(observer);

        let clamping = self.clamping_enabled;
        let common = self.common_force_and_drag.then_some((self.common_force, self.common_drag));
        let params = self.params.refresh(&self.members, common, config.force_threshold);

        for (index, (member, p)) in self.members.iter_mut().zip(params).enumerate() {
            member.clamped = false;
            if !member.enabled {
                member.candidate_value = member.current_value;
                continue;
            }
            // The clamped target is written back; widening the bounds later
            // does not restore the authored value.
            if clamping {
                member.target = clamp_target(p, member.target);
            }

            match integrate(index, p, member.target, member.current_value, member.velocity, dt) {
                Ok(step) if clamping => {
                    let out = clamp_candidate(p, step.value, step.velocity);
                    member.candidate_value = out.value;
                    member.velocity = out.velocity;
                    member.clamped = out.clamped;
                }
                Ok(step) => {
                    member.candidate_value = step.value;
                    member.velocity = step.velocity;
                }
                Err(fault) => {
                    warn!("{}", fault);
                    member.reach_equilibrium();
                    observer.on_fault(&fault);
                }
            }
        }
        true
    }

    /// Make this tick's candidates the current values.
    pub fn commit_candidates(&mut self) {
        for member in self.members.iter_mut() {
            member.commit_candidate();
        }
    }

    /// Evaluate the event conditions against the pending candidates and
    /// notify `observer`. Does nothing if events are disabled.
    pub fn check_events<O: SpringObserver>(&mut self, config: &SpringConfig<F>, observer: &mut O) {
        if !self.events_enabled {
            return;
        }
        let mut enabled = self.members.iter().filter(|m| m.enabled);
        let state = EventState {
            on_target_and_settled: enabled.clone().all(|m| {
                m.candidate_distance_to_target() < config.target_threshold
                    && m.velocity.abs() < config.velocity_threshold
            }),
            value_changed: enabled.any(|m| m.pending_change() > config.change_threshold),
            clamped: self.is_clamped(),
        };
        self.notifier.notify(state, observer);
    }

    /// Snap every member to its target with zero velocity.
    pub fn reach_equilibrium(&mut self) {
        debug!("spring snapped to equilibrium");
        for member in self.members.iter_mut() {
            member.reach_equilibrium();
        }
    }

    /// Every enabled member is within the target threshold of its target.
    pub fn is_on_target(&self, config: &SpringConfig<F>) -> bool {
        self.enabled_members()
            .all(|m| m.distance_to_target() < config.target_threshold)
    }

    /// Every enabled member moves slower than the velocity threshold.
    pub fn is_close_to_stopping(&self, config: &SpringConfig<F>) -> bool {
        self.enabled_members()
            .all(|m| m.velocity.abs() < config.velocity_threshold)
    }

    /// Some member was clamped on the last update.
    pub fn is_clamped(&self) -> bool {
        self.members.iter().any(|m| m.clamped)
    }

    // ----------------------------------------------------------------------
    // Members
    // ----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn declared_size(&self) -> usize {
        self.declared_size
    }

    pub fn members(&self) -> &[ScalarSpring<F>] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&ScalarSpring<F>> {
        self.members.get(index)
    }

    /// Mutable member access. Marks the parameter cache dirty.
    pub fn member_mut(&mut self, index: usize) -> Option<&mut ScalarSpring<F>> {
        self.params.invalidate();
        self.members.get_mut(index)
    }

    /// Mutable access to all members. Marks the parameter cache dirty.
    pub fn members_mut(&mut self) -> &mut [ScalarSpring<F>] {
        self.params.invalidate();
        &mut self.members
    }

    /// Install externally restored members, e.g. after loading authored
    /// data. Call [`check_correct_size`](Self::check_correct_size) afterwards.
    pub fn replace_members(&mut self, members: AllocVec<ScalarSpring<F>>) {
        self.members = members;
        self.initialize();
    }

    fn enabled_members(&self) -> impl Iterator<Item = &ScalarSpring<F>> + Clone {
        self.members.iter().filter(|m| m.enabled)
    }

    /// Field of member `index`, or zero if the index is out of range.
    pub fn read(&self, index: usize, field: fn(&ScalarSpring<F>) -> F) -> F {
        self.members.get(index).map_or(F::zero(), field)
    }

    pub fn target(&self, index: usize) -> F {
        self.read(index, |m| m.target)
    }

    pub fn set_target(&mut self, index: usize, target: F) {
        if let Some(m) = self.members.get_mut(index) {
            m.target = target;
        }
    }

    pub fn current_value(&self, index: usize) -> F {
        self.read(index, |m| m.current_value)
    }

    pub fn set_current_value(&mut self, index: usize, value: F) {
        if let Some(m) = self.members.get_mut(index) {
            m.set_current_value(value);
        }
    }

    pub fn candidate_value(&self, index: usize) -> F {
        self.read(index, |m| m.candidate_value)
    }

    pub fn set_candidate_value(&mut self, index: usize, value: F) {
        if let Some(m) = self.members.get_mut(index) {
            m.candidate_value = value;
        }
    }

    pub fn velocity(&self, index: usize) -> F {
        self.read(index, |m| m.velocity)
    }

    pub fn set_velocity(&mut self, index: usize, velocity: F) {
        if let Some(m) = self.members.get_mut(index) {
            m.velocity = velocity;
        }
    }

    pub fn add_velocity(&mut self, index: usize, delta: F) {
        if let Some(m) = self.members.get_mut(index) {
            m.velocity = m.velocity + delta;
        }
    }

    // ----------------------------------------------------------------------
    // Shared settings
    // ----------------------------------------------------------------------

    pub fn common_force_and_drag(&self) -> bool {
        self.common_force_and_drag
    }

    /// When set, `common_force` and `common_drag` replace every member's own.
    pub fn set_common_force_and_drag(&mut self, enabled: bool) {
        self.common_force_and_drag = enabled;
        self.params.invalidate();
    }

    pub fn common_force(&self) -> F {
        self.common_force
    }

    pub fn set_common_force(&mut self, force: F) {
        self.common_force = force;
        self.params.invalidate();
    }

    pub fn common_drag(&self) -> F {
        self.common_drag
    }

    pub fn set_common_drag(&mut self, drag: F) {
        self.common_drag = drag;
        self.params.invalidate();
    }

    pub fn spring_enabled(&self) -> bool {
        self.spring_enabled
    }

    /// Takes effect on the next update.
    pub fn set_spring_enabled(&mut self, enabled: bool) {
        self.spring_enabled = enabled;
    }

    pub fn clamping_enabled(&self) -> bool {
        self.clamping_enabled
    }

    pub fn set_clamping_enabled(&mut self, enabled: bool) {
        self.clamping_enabled = enabled;
        self.params.invalidate();
    }

    pub fn events_enabled(&self) -> bool {
        self.events_enabled
    }

    pub fn set_events_enabled(&mut self, enabled: bool) {
        self.events_enabled = enabled;
    }

    pub fn set_member_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(m) = self.member_mut(index) {
            m.enabled = enabled;
        }
    }
}

fn default_members<F: Float>(count: usize) -> AllocVec<ScalarSpring<F>> {
    (0..count).map(|_| ScalarSpring::default()).collect()
}
