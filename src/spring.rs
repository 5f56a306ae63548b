//! Typed springs: one scalar spring per component of a composite value.

use crate::aggregate::SpringAggregate;
use crate::color::Color;
use crate::config::SpringConfig;
use crate::float::Float;
use crate::observer::SpringObserver;
use crate::scalar::ScalarSpring;
use crate::vec::{Components, Scalar, Vec2, Vec3, Vec4};
use core::marker::PhantomData;

/// Spring animating a value of type `V` toward a moving target.
///
/// Each component of `V` is an independent [`ScalarSpring`]; this type only
/// packs and unpacks them. Methods taking a single scalar broadcast it to
/// every component, `*_per_component` variants take a full `V`.
///
/// ```
/// use sprung::{FloatSpring, Scalar, SpringConfig, NoOpObserver};
///
/// let mut spring: FloatSpring<f64> = FloatSpring::new(Scalar(0.0));
/// spring.set_target(Scalar(1.0));
/// let config = SpringConfig::new();
/// for _ in 0..200 {
///     spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
///     spring.commit_candidates();
/// }
/// assert!((spring.current_value().0 - 1.0).abs() < 0.005);
/// ```
#[derive(Clone, Debug)]
pub struct Spring<V: Components> {
    aggregate: SpringAggregate<V::Scalar>,
    _value: PhantomData<V>,
}

impl<V: Components> Spring<V> {
    /// Spring at rest at `initial`.
    pub fn new(initial: V) -> Self {
        let mut spring = Spring {
            aggregate: SpringAggregate::new(V::COUNT),
            _value: PhantomData,
        };
        spring.reset(initial);
        spring
    }

    /// Spring at rest at `initial` with uniform force and drag.
    pub fn with_force_and_drag(initial: V, force: V::Scalar, drag: V::Scalar) -> Self {
        let mut spring = Self::new(initial);
        spring.set_force(force);
        spring.set_drag(drag);
        spring
    }

    pub fn aggregate(&self) -> &SpringAggregate<V::Scalar> {
        &self.aggregate
    }

    pub fn aggregate_mut(&mut self) -> &mut SpringAggregate<V::Scalar> {
        &mut self.aggregate
    }

    fn gather(&self, field: fn(&ScalarSpring<V::Scalar>) -> V::Scalar) -> V {
        V::from_fn(|i| self.aggregate.read(i, field))
    }

    fn scatter<G: FnMut(usize, &mut ScalarSpring<V::Scalar>)>(&mut self, mut apply: G) {
        for (i, member) in self.aggregate.members_mut().iter_mut().enumerate().take(V::COUNT) {
            apply(i, member);
        }
    }

    // ----------------------------------------------------------------------
    // Lifecycle
    // ----------------------------------------------------------------------

    pub fn initialize(&mut self) {
        self.aggregate.initialize();
    }

    /// Advance by `dt`; see [`SpringAggregate::update`].
    pub fn update<O: SpringObserver>(&mut self, dt: V::Scalar, config: &SpringConfig<V::Scalar>, observer: &mut O) {
        self.aggregate.update(dt, config, observer);
    }

    pub fn commit_candidates(&mut self) {
        self.aggregate.commit_candidates();
    }

    pub fn check_events<O: SpringObserver>(&mut self, config: &SpringConfig<V::Scalar>, observer: &mut O) {
        self.aggregate.check_events(config, observer);
    }

    pub fn reach_equilibrium(&mut self) {
        self.aggregate.reach_equilibrium();
    }

    pub fn check_correct_size<O: SpringObserver>(&mut self, observer: &mut O) -> bool {
        self.aggregate.check_correct_size(observer)
    }

    /// Place the spring at rest at `value`, target included.
    pub fn reset(&mut self, value: V) {
        self.scatter(|i, m| {
            m.target = value.component(i);
            m.set_current_value(value.component(i));
            m.velocity = V::Scalar::zero();
        });
    }

    pub fn is_on_target(&self, config: &SpringConfig<V::Scalar>) -> bool {
        self.aggregate.is_on_target(config)
    }

    pub fn is_close_to_stopping(&self, config: &SpringConfig<V::Scalar>) -> bool {
        self.aggregate.is_close_to_stopping(config)
    }

    pub fn is_clamped(&self) -> bool {
        self.aggregate.is_clamped()
    }

    // ----------------------------------------------------------------------
    // State
    // ----------------------------------------------------------------------

    pub fn target(&self) -> V {
        self.gather(|m| m.target)
    }

    pub fn set_target(&mut self, target: V) {
        for i in 0..V::COUNT {
            self.aggregate.set_target(i, target.component(i));
        }
    }

    pub fn current_value(&self) -> V {
        self.gather(|m| m.current_value)
    }

    pub fn set_current_value(&mut self, value: V) {
        for i in 0..V::COUNT {
            self.aggregate.set_current_value(i, value.component(i));
        }
    }

    /// Value computed by the last update, not yet committed.
    pub fn candidate_value(&self) -> V {
        self.gather(|m| m.candidate_value)
    }

    pub fn velocity(&self) -> V {
        self.gather(|m| m.velocity)
    }

    pub fn set_velocity(&mut self, velocity: V) {
        for i in 0..V::COUNT {
            self.aggregate.set_velocity(i, velocity.component(i));
        }
    }

    /// Nudge: add `delta` to the current velocity.
    pub fn add_velocity(&mut self, delta: V) {
        for i in 0..V::COUNT {
            self.aggregate.add_velocity(i, delta.component(i));
        }
    }

    // ----------------------------------------------------------------------
    // Physics settings
    // ----------------------------------------------------------------------

    pub fn force(&self) -> V {
        self.gather(|m| m.force)
    }

    pub fn set_force(&mut self, force: V::Scalar) {
        self.scatter(|_, m| m.force = force);
    }

    pub fn set_force_per_component(&mut self, force: V) {
        self.scatter(|i, m| m.force = force.component(i));
    }

    pub fn drag(&self) -> V {
        self.gather(|m| m.drag)
    }

    pub fn set_drag(&mut self, drag: V::Scalar) {
        self.scatter(|_, m| m.drag = drag);
    }

    pub fn set_drag_per_component(&mut self, drag: V) {
        self.scatter(|i, m| m.drag = drag.component(i));
    }

    /// Use one force and drag for every component instead of their own.
    pub fn set_common_force_and_drag(&mut self, enabled: bool) {
        self.aggregate.set_common_force_and_drag(enabled);
    }

    pub fn set_common_force(&mut self, force: V::Scalar) {
        self.aggregate.set_common_force(force);
    }

    pub fn set_common_drag(&mut self, drag: V::Scalar) {
        self.aggregate.set_common_drag(drag);
    }

    // ----------------------------------------------------------------------
    // Clamping
    // ----------------------------------------------------------------------

    pub fn min_value(&self) -> V {
        self.gather(|m| m.min_value)
    }

    pub fn set_min_value(&mut self, min_value: V::Scalar) {
        self.scatter(|_, m| m.min_value = min_value);
    }

    pub fn set_min_value_per_component(&mut self, min_value: V) {
        self.scatter(|i, m| m.min_value = min_value.component(i));
    }

    pub fn max_value(&self) -> V {
        self.gather(|m| m.max_value)
    }

    pub fn set_max_value(&mut self, max_value: V::Scalar) {
        self.scatter(|_, m| m.max_value = max_value);
    }

    pub fn set_max_value_per_component(&mut self, max_value: V) {
        self.scatter(|i, m| m.max_value = max_value.component(i));
    }

    pub fn set_clamp_target(&mut self, clamp: bool) {
        self.scatter(|_, m| m.clamp_target = clamp);
    }

    pub fn set_clamp_current_value(&mut self, clamp: bool) {
        self.scatter(|_, m| m.clamp_current_value = clamp);
    }

    pub fn set_stop_on_clamp(&mut self, stop: bool) {
        self.scatter(|_, m| m.stop_on_clamp = stop);
    }

    /// Per-component clamp flags: `(clamp_target, clamp_current_value, stop_on_clamp)`.
    pub fn set_clamping_at(&mut self, index: usize, flags: (bool, bool, bool)) {
        if let Some(m) = self.aggregate.member_mut(index) {
            m.clamp_target = flags.0;
            m.clamp_current_value = flags.1;
            m.stop_on_clamp = flags.2;
        }
    }

    pub fn set_clamping_enabled(&mut self, enabled: bool) {
        self.aggregate.set_clamping_enabled(enabled);
    }

    pub fn set_spring_enabled(&mut self, enabled: bool) {
        self.aggregate.set_spring_enabled(enabled);
    }

    pub fn set_events_enabled(&mut self, enabled: bool) {
        self.aggregate.set_events_enabled(enabled);
    }
}

pub type FloatSpring<F> = Spring<Scalar<F>>;
pub type Vector2Spring<F> = Spring<Vec2<F>>;
pub type Vector3Spring<F> = Spring<Vec3<F>>;
pub type Vector4Spring<F> = Spring<Vec4<F>>;
pub type ColorSpring<F> = Spring<Color<F>>;
