//! Advances one scalar spring by one time step.
//!
//! Two strategies: a semi-implicit numerical step for moderate stiffness and
//! a closed-form solution of `x'' + 2ζω₀x' + ω₀²x = ω₀²·target` above the
//! force threshold. The closed form has three regimes selected by
//! [`DampingMode::classify`].

use crate::error::SpringError;
use crate::float::Float;
use crate::params::PhysicsParameters;

/// Half-width of the damping-ratio band treated as critically damped.
pub const CRITICAL_DAMPING_TOLERANCE: f32 = 1e-3;

/// Damping regime of the analytical solution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DampingMode<F: Float> {
    CriticallyDamped,
    Underdamped { ratio: F },
    Overdamped { ratio: F },
}

/// Result of one integration step: the candidate value and new velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Integration<F: Float> {
    pub value: F,
    pub velocity: F,
}

impl<F: Float> DampingMode<F> {
    /// Regime for damping ratio `zeta`.
    pub fn classify(zeta: F) -> Self {
        let one = F::one();
        if (zeta - one).abs() <= F::from_f32(CRITICAL_DAMPING_TOLERANCE) {
            DampingMode::CriticallyDamped
        } else if zeta < one {
            DampingMode::Underdamped { ratio: zeta }
        } else {
            DampingMode::Overdamped { ratio: zeta }
        }
    }

    /// Evolve displacement `x0` (current minus target) and velocity `v0`
    /// for `dt` seconds at angular frequency `w`. Returns the new
    /// displacement and velocity.
    pub fn solve(self, w: F, x0: F, v0: F, dt: F) -> (F, F) {
        match self {
            DampingMode::CriticallyDamped => {
                let exp_term = (-w * dt).exp();
                let c2 = v0 + x0 * w;
                let new_x = (x0 + c2 * dt) * exp_term;
                let new_v = (v0 - c2 * w * dt) * exp_term;
                (new_x, new_v)
            }
            DampingMode::Underdamped { ratio: zeta } => {
                let one = F::one();
                let alpha = w * (one - zeta * zeta).sqrt();
                let exp_term = (-zeta * w * dt).exp();
                let cos_term = (alpha * dt).cos();
                let sin_term = (alpha * dt).sin();

                // sin(αt)/α stays well defined as α -> 0.
                let sin_over_alpha = if alpha.is_near_zero(F::from_f32(1e-12)) {
                    dt
                } else {
                    sin_term / alpha
                };
                let b = v0 + x0 * zeta * w;

                let new_x = (x0 * cos_term + b * sin_over_alpha) * exp_term;
                let new_v = (v0 * cos_term
                    - (x0 * w * w + v0 * zeta * w) * sin_over_alpha)
                    * exp_term;
                (new_x, new_v)
            }
            DampingMode::Overdamped { ratio: zeta } => {
                let one = F::one();
                let s = (zeta * zeta - one).sqrt();
                let z1 = -w * (zeta + s);
                let z2 = -w * (zeta - s);
                let denom = one / (z2 - z1);

                let c1 = (x0 * z2 - v0) * denom;
                let c2 = (v0 - x0 * z1) * denom;

                let exp1 = (z1 * dt).exp();
                let exp2 = (z2 * dt).exp();

                let new_x = c1 * exp1 + c2 * exp2;
                let new_v = c1 * z1 * exp1 + c2 * z2 * exp2;
                (new_x, new_v)
            }
        }
    }
}

/// Semi-implicit Euler step: drag first, then spring force, then position.
pub fn step_numerical<F: Float>(
    params: &PhysicsParameters<F>,
    target: F,
    current: F,
    velocity: F,
    dt: F,
) -> Integration<F> {
    let damped = velocity / (F::one() + params.drag * dt);
    let force = params.force * (target - current);
    let velocity = damped + force * dt;
    Integration { value: current + velocity * dt, velocity }
}

/// Closed-form step in the regime chosen by the damping ratio.
pub fn step_analytical<F: Float>(
    params: &PhysicsParameters<F>,
    target: F,
    current: F,
    velocity: F,
    dt: F,
) -> Integration<F> {
    let mode = DampingMode::classify(params.damping_ratio());
    let (offset, velocity) = mode.solve(params.angular_frequency(), current - target, velocity, dt);
    Integration { value: target + offset, velocity }
}

/// Advance member `index` by `dt`, choosing the strategy from `params`.
///
/// Fails with [`SpringError::NonFiniteState`] if the step produced NaN or
/// infinity; the caller is responsible for recovering the member.
pub fn integrate<F: Float>(
    index: usize,
    params: &PhysicsParameters<F>,
    target: F,
    current: F,
    velocity: F,
    dt: F,
) -> Result<Integration<F>, SpringError> {
    let step = if params.use_analytical() {
        tracing::trace!(index, "analytical step");
        step_analytical(params, target, current, velocity, dt)
    } else {
        step_numerical(params, target, current, velocity, dt)
    };

    if step.value.is_finite() && step.velocity.is_finite() {
        Ok(step)
    } else {
        Err(SpringError::NonFiniteState {
            index,
            value: step.value.to_f64(),
            velocity: step.velocity.to_f64(),
        })
    }
}
