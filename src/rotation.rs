//! Orientation spring built from forward, up and local-axis sub-springs.
//!
//! Springing quaternion components directly produces non-unit
//! intermediates and uneven angular speed. Instead the orientation is
//! carried as two 3-component springs (forward and up directions) that are
//! re-orthonormalized on read, plus a third holding a local incremental
//! rotation in degrees about the basis' own right, up and forward axes.
//!
//! Member layout: `0..3` forward, `3..6` local axis (degrees), `6..9` up.

use crate::aggregate::SpringAggregate;
use crate::config::SpringConfig;
use crate::float::Float;
use crate::observer::SpringObserver;
use crate::quat::Quat;
use crate::vec::{Vec, Vec3};
use tracing::debug;

/// Number of scalar members in a rotation spring.
pub const ROTATION_MEMBERS: usize = 9;

const FORWARD: usize = 0;
const LOCAL: usize = 3;
const UP: usize = 6;

/// Largest local-axis change committed in one tick, in degrees.
pub const DEFAULT_MAX_LOCAL_ROTATION_STEP: f32 = 80.0;
/// Largest orientation change committed in one tick, in degrees.
pub const DEFAULT_MAX_ORIENTATION_STEP: f32 = 80.0;
/// Orientation jumps below this many degrees are committed unchecked.
pub const DEFAULT_ORIENTATION_SNAP_THRESHOLD: f32 = 15.0;
/// Correction passes used to restrict a target to one rotation axis.
pub const LIMIT_TARGET_PASSES: usize = 5;
/// Bisection steps used to fit a combined basis and local step under the
/// orientation limit.
const STEP_SEARCH_ITERATIONS: usize = 24;

/// Which rotational freedom a rotation spring's target may express.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AxisRestriction {
    #[default]
    None,
    OnlyX,
    OnlyY,
    OnlyZ,
}

impl AxisRestriction {
    /// The free axis and the two locked ones, or `None` if unrestricted.
    fn axes<F: Float>(self) -> Option<(Vec3<F>, [Vec3<F>; 2])> {
        let (x, y, z) = (Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z());
        match self {
            AxisRestriction::None => None,
            AxisRestriction::OnlyX => Some((x, [y, z])),
            AxisRestriction::OnlyY => Some((y, [x, z])),
            AxisRestriction::OnlyZ => Some((z, [x, y])),
        }
    }
}

/// Spring animating a 3D orientation.
#[derive(Clone, Debug)]
pub struct RotationSpring<F: Float> {
    aggregate: SpringAggregate<F>,
    axis_restriction: AxisRestriction,
    max_local_rotation_step: F,
    max_orientation_step: F,
    orientation_snap_threshold: F,
}

impl<F: Float> RotationSpring<F> {
    /// Spring at rest at `initial`.
    pub fn new(initial: Quat<F>) -> Self {
        let mut spring = RotationSpring {
            aggregate: SpringAggregate::new(ROTATION_MEMBERS),
            axis_restriction: AxisRestriction::None,
            max_local_rotation_step: F::from_f32(DEFAULT_MAX_LOCAL_ROTATION_STEP),
            max_orientation_step: F::from_f32(DEFAULT_MAX_ORIENTATION_STEP),
            orientation_snap_threshold: F::from_f32(DEFAULT_ORIENTATION_SNAP_THRESHOLD),
        };
        spring.reset(initial);
        spring
    }

    pub fn aggregate(&self) -> &SpringAggregate<F> {
        &self.aggregate
    }

    pub fn aggregate_mut(&mut self) -> &mut SpringAggregate<F> {
        &mut self.aggregate
    }

    fn read_vec3(&self, base: usize, current: bool) -> Vec3<F> {
        let get = |i| if current { self.aggregate.current_value(i) } else { self.aggregate.target(i) };
        Vec3::new(get(base), get(base + 1), get(base + 2))
    }

    fn candidate_vec3(&self, base: usize) -> Vec3<F> {
        Vec3::new(
            self.aggregate.candidate_value(base),
            self.aggregate.candidate_value(base + 1),
            self.aggregate.candidate_value(base + 2),
        )
    }

    fn write_targets(&mut self, base: usize, v: Vec3<F>) {
        self.aggregate.set_target(base, v.x);
        self.aggregate.set_target(base + 1, v.y);
        self.aggregate.set_target(base + 2, v.z);
    }

    fn write_currents(&mut self, base: usize, v: Vec3<F>) {
        self.aggregate.set_current_value(base, v.x);
        self.aggregate.set_current_value(base + 1, v.y);
        self.aggregate.set_current_value(base + 2, v.z);
    }

    fn write_candidates(&mut self, base: usize, v: Vec3<F>) {
        self.aggregate.set_candidate_value(base, v.x);
        self.aggregate.set_candidate_value(base + 1, v.y);
        self.aggregate.set_candidate_value(base + 2, v.z);
    }

    // ----------------------------------------------------------------------
    // Orientation
    // ----------------------------------------------------------------------

    /// Orientation currently shown: the forward/up basis with the local
    /// axis rotations applied on top.
    pub fn current_value(&self) -> Quat<F> {
        compose(self.read_vec3(FORWARD, true), self.read_vec3(UP, true), self.read_vec3(LOCAL, true))
    }

    /// Orientation the spring is heading to.
    pub fn target_value(&self) -> Quat<F> {
        compose(self.read_vec3(FORWARD, false), self.read_vec3(UP, false), self.read_vec3(LOCAL, false))
    }

    /// Orientation from the last update's candidates, not yet committed.
    pub fn candidate_value(&self) -> Quat<F> {
        compose(self.candidate_vec3(FORWARD), self.candidate_vec3(UP), self.candidate_vec3(LOCAL))
    }

    /// Aim the spring at `orientation`, subject to the axis restriction.
    /// The local-axis target is left unchanged.
    pub fn set_target(&mut self, orientation: Quat<F>) {
        let limited = self.limit_target_rotation(orientation);
        self.write_targets(FORWARD, limited.forward());
        self.write_targets(UP, limited.up());
    }

    /// Jump to `orientation` without animating. Clears the local rotation.
    pub fn set_current_value(&mut self, orientation: Quat<F>) {
        let limited = self.limit_target_rotation(orientation);
        self.write_currents(FORWARD, limited.forward());
        self.write_currents(UP, limited.up());
        self.write_currents(LOCAL, Vec3::zero());
    }

    /// Place the spring at rest at `orientation`, target included.
    pub fn reset(&mut self, orientation: Quat<F>) {
        self.set_current_value(orientation);
        self.set_target(orientation);
        self.write_targets(LOCAL, Vec3::zero());
        for member in self.aggregate.members_mut() {
            member.velocity = F::zero();
        }
    }

    pub fn axis_restriction(&self) -> AxisRestriction {
        self.axis_restriction
    }

    /// Restrict the target to one rotation axis and re-limit the current target.
    pub fn set_axis_restriction(&mut self, restriction: AxisRestriction) {
        self.axis_restriction = restriction;
        let target = compose(self.read_vec3(FORWARD, false), self.read_vec3(UP, false), Vec3::zero());
        self.set_target(target);
    }

    /// Strip rotation about the locked axes when a restriction is active.
    ///
    /// Each pass measures how far the free axis has been tipped out of the
    /// plane of every locked axis and rotates it back about that locked
    /// axis. The correction is iterative, not an exact projection.
    pub fn limit_target_rotation(&self, orientation: Quat<F>) -> Quat<F> {
        let Some((free, locked)) = self.axis_restriction.axes::<F>() else {
            return orientation;
        };
        let eps = F::from_f32(1e-10);
        let mut q = orientation.normalize();

        for _ in 0..LIMIT_TARGET_PASSES {
            for lock in locked {
                let tipped = q.rotate(free);
                let in_plane = tipped - lock.scale(tipped.dot(lock));
                if in_plane.length_sq() < eps {
                    continue;
                }
                let angle = in_plane.angle_between(free);
                if angle.is_near_zero(eps) {
                    continue;
                }
                let mut cancel_axis = in_plane.cross(free);
                if cancel_axis.length_sq() < eps {
                    cancel_axis = lock;
                }
                q = (Quat::from_axis_angle(cancel_axis, angle) * q).normalize();
            }
        }
        debug!(restriction = ?self.axis_restriction, "target rotation limited");
        q
    }

    // ----------------------------------------------------------------------
    // Local axis
    // ----------------------------------------------------------------------

    /// Committed local rotation, degrees about right/up/forward.
    pub fn local_axis_current(&self) -> Vec3<F> {
        self.read_vec3(LOCAL, true)
    }

    pub fn local_axis_target(&self) -> Vec3<F> {
        self.read_vec3(LOCAL, false)
    }

    pub fn set_local_axis_target(&mut self, degrees: Vec3<F>) {
        self.write_targets(LOCAL, degrees);
    }

    pub fn local_velocity(&self) -> Vec3<F> {
        Vec3::new(
            self.aggregate.velocity(LOCAL),
            self.aggregate.velocity(LOCAL + 1),
            self.aggregate.velocity(LOCAL + 2),
        )
    }

    /// Nudge the local rotation, in degrees per second.
    pub fn add_local_velocity(&mut self, degrees_per_second: Vec3<F>) {
        self.aggregate.add_velocity(LOCAL, degrees_per_second.x);
        self.aggregate.add_velocity(LOCAL + 1, degrees_per_second.y);
        self.aggregate.add_velocity(LOCAL + 2, degrees_per_second.z);
    }

    // ----------------------------------------------------------------------
    // Settings
    // ----------------------------------------------------------------------

    pub fn set_force(&mut self, force: F) {
        for member in self.aggregate.members_mut() {
            member.force = force;
        }
    }

    pub fn set_drag(&mut self, drag: F) {
        for member in self.aggregate.members_mut() {
            member.drag = drag;
        }
    }

    /// Force and drag for the local-axis members only.
    pub fn set_local_force_and_drag(&mut self, force: F, drag: F) {
        for member in self.aggregate.members_mut().iter_mut().skip(LOCAL).take(3) {
            member.force = force;
            member.drag = drag;
        }
    }

    pub fn set_max_local_rotation_step(&mut self, degrees: F) {
        self.max_local_rotation_step = degrees.abs();
    }

    pub fn set_max_orientation_step(&mut self, degrees: F) {
        self.max_orientation_step = degrees.abs();
    }

    pub fn set_orientation_snap_threshold(&mut self, degrees: F) {
        self.orientation_snap_threshold = degrees.abs();
    }

    // ----------------------------------------------------------------------
    // Lifecycle
    // ----------------------------------------------------------------------

    pub fn initialize(&mut self) {
        self.aggregate.initialize();
    }

    /// Advance by `dt`, rate-limit the candidates, then check events
    /// against the limited candidates.
    pub fn update<O: SpringObserver>(&mut self, dt: F, config: &SpringConfig<F>, observer: &mut O) {
        if self.aggregate.step(dt, config, observer) {
            self.process_candidate_value();
            self.aggregate.check_events(config, observer);
        }
    }

    /// Commit the rate-limited candidates from the last update.
    pub fn commit_candidates(&mut self) {
        self.aggregate.commit_candidates();
    }

    /// Limit how far this tick's candidates may rotate the spring.
    ///
    /// The local-axis step is capped at `max_local_rotation_step` degrees.
    /// If the forward/up basis would turn by more than the snap threshold,
    /// it is turned toward the candidate by at most `max_orientation_step`.
    /// Finally both steps are shrunk together until the composed
    /// orientation turns by at most `max_orientation_step`.
    ///
    /// [`update`](Self::update) already calls this before checking events.
    pub fn process_candidate_value(&mut self) {
        let local = self.local_axis_current();
        let step = (self.candidate_vec3(LOCAL) - local).clamp_length(self.max_local_rotation_step);

        let forward = self.candidate_vec3(FORWARD);
        let up = self.candidate_vec3(UP);
        let from = basis(self.read_vec3(FORWARD, true), self.read_vec3(UP, true));
        let mut to = basis(forward, up);
        let angle = from.angle_degrees(to);
        let mut rewrite_basis = false;
        if angle > self.orientation_snap_threshold {
            to = from.rotate_towards(to, self.max_orientation_step);
            rewrite_basis = true;
            debug!(angle = angle.to_f64(), "orientation step rate-limited");
        }

        let current = compose_on(from, local);
        let limit = self.max_orientation_step;
        let turn = |fraction: F| compose_on(from.slerp(to, fraction), local + step.scale(fraction));
        let mut fraction = F::one();
        if compose_on(to, local + step).angle_degrees(current) > limit {
            let mut lo = F::zero();
            let mut hi = F::one();
            for _ in 0..STEP_SEARCH_ITERATIONS {
                let mid = (lo + hi) * F::half();
                if turn(mid).angle_degrees(current) <= limit {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            fraction = lo;
            rewrite_basis = true;
            debug!(fraction = fraction.to_f64(), "combined rotation step rate-limited");
        }

        self.write_candidates(LOCAL, local + step.scale(fraction));
        if rewrite_basis {
            let limited = if fraction < F::one() { from.slerp(to, fraction) } else { to };
            self.write_candidates(FORWARD, limited.forward().scale(length_or_one(forward)));
            self.write_candidates(UP, limited.up().scale(length_or_one(up)));
        }
    }

    pub fn check_events<O: SpringObserver>(&mut self, config: &SpringConfig<F>, observer: &mut O) {
        self.aggregate.check_events(config, observer);
    }

    pub fn reach_equilibrium(&mut self) {
        self.aggregate.reach_equilibrium();
    }

    pub fn check_correct_size<O: SpringObserver>(&mut self, observer: &mut O) -> bool {
        self.aggregate.check_correct_size(observer)
    }

    pub fn is_on_target(&self, config: &SpringConfig<F>) -> bool {
        self.aggregate.is_on_target(config)
    }

    pub fn is_close_to_stopping(&self, config: &SpringConfig<F>) -> bool {
        self.aggregate.is_close_to_stopping(config)
    }

    pub fn is_clamped(&self) -> bool {
        self.aggregate.is_clamped()
    }
}

impl<F: Float> Default for RotationSpring<F> {
    fn default() -> Self {
        Self::new(Quat::identity())
    }
}

/// Look rotation from un-normalized forward/up, falling back to +Z for a
/// collapsed forward vector.
fn basis<F: Float>(forward: Vec3<F>, up: Vec3<F>) -> Quat<F> {
    let forward = forward.normalize();
    let forward = if forward.length_sq().is_near_zero(F::from_f32(1e-12)) {
        Vec3::unit_z()
    } else {
        forward
    };
    Quat::look_rotation(forward, up.normalize())
}

fn compose<F: Float>(forward: Vec3<F>, up: Vec3<F>, local: Vec3<F>) -> Quat<F> {
    compose_on(basis(forward, up), local)
}

/// `base` with local rotations (degrees) about its right, up and forward axes.
fn compose_on<F: Float>(base: Quat<F>, local: Vec3<F>) -> Quat<F> {
    let rx = Quat::from_axis_angle(base.right(), local.x.to_radians());
    let ry = Quat::from_axis_angle(base.up(), local.y.to_radians());
    let rz = Quat::from_axis_angle(base.forward(), local.z.to_radians());
    (rx * ry * rz * base).normalize()
}

fn length_or_one<F: Float>(v: Vec3<F>) -> F {
    let len = v.length();
    if len.is_near_zero(F::from_f32(1e-12)) { F::one() } else { len }
}
