//! Faults reported to the host while springs keep running.

use core::fmt;

/// Recoverable faults raised during spring simulation.
///
/// None of these abort an update. They are delivered to the host through
/// [`SpringObserver::on_fault`](crate::observer::SpringObserver::on_fault)
/// after the spring has already recovered.
#[derive(Debug, Clone, PartialEq)]
pub enum SpringError {
    /// A scalar produced a non-finite value or velocity and was snapped to its target.
    NonFiniteState { index: usize, value: f64, velocity: f64 },
    /// The member array had the wrong length and was reallocated.
    SizeMismatch { expected: usize, found: usize },
    /// The time step was negative or non-finite; the tick was skipped.
    InvalidTimeStep,
}

impl fmt::Display for SpringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpringError::NonFiniteState { index, value, velocity } => write!(
                f,
                "spring member {} became non-finite (value {}, velocity {}); reset to target",
                index, value, velocity
            ),
            SpringError::SizeMismatch { expected, found } => write!(
                f,
                "spring has {} members but its type needs {}; members reallocated",
                found, expected
            ),
            SpringError::InvalidTimeStep => write!(f, "time step must be finite and non-negative"),
        }
    }
}
