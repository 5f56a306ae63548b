//! Per-tick settings shared by every spring update.

use crate::float::Float;

/// Default force above which the closed-form solution replaces numerical stepping.
pub const DEFAULT_FORCE_THRESHOLD: f32 = 7500.0;
/// Distance to target under which a member counts as on target.
pub const DEFAULT_TARGET_THRESHOLD: f32 = 0.005;
/// Speed under which a member counts as settled.
pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 0.01;
/// Candidate-to-current difference above which the value counts as changed.
pub const DEFAULT_CHANGE_THRESHOLD: f32 = 0.01;

/// Settings passed into every spring update and event check.
///
/// # Builder Pattern
/// ```
/// use sprung::config::SpringConfig;
///
/// let config: SpringConfig<f64> = SpringConfig::new()
///     .with_force_threshold(5000.0)
///     .with_target_threshold(0.001);
/// assert!(!config.always_analytical());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringConfig<F: Float> {
    /// Force above which the analytical solver is used. Negative means
    /// "always analytical". Default: 7500.
    pub force_threshold: F,
    /// Default: 0.005.
    pub target_threshold: F,
    /// Default: 0.01.
    pub velocity_threshold: F,
    /// Default: 0.01.
    pub change_threshold: F,
}

impl<F: Float> SpringConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SpringConfig {
            force_threshold: F::from_f32(DEFAULT_FORCE_THRESHOLD),
            target_threshold: F::from_f32(DEFAULT_TARGET_THRESHOLD),
            velocity_threshold: F::from_f32(DEFAULT_VELOCITY_THRESHOLD),
            change_threshold: F::from_f32(DEFAULT_CHANGE_THRESHOLD),
        }
    }

    /// Set the force threshold for switching to the analytical solver.
    pub fn with_force_threshold(mut self, threshold: F) -> Self {
        self.force_threshold = threshold;
        self
    }

    /// Use the analytical solver for every force value.
    pub fn with_always_analytical(mut self) -> Self {
        self.force_threshold = -F::one();
        self
    }

    pub fn with_target_threshold(mut self, threshold: F) -> Self {
        self.target_threshold = threshold.abs();
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: F) -> Self {
        self.velocity_threshold = threshold.abs();
        self
    }

    pub fn with_change_threshold(mut self, threshold: F) -> Self {
        self.change_threshold = threshold.abs();
        self
    }

    /// True when the force threshold is the negative "always analytical" sentinel.
    pub fn always_analytical(&self) -> bool {
        self.force_threshold < F::zero()
    }
}

impl<F: Float> Default for SpringConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
