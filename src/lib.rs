//! Damped-oscillator springs for animating values toward a moving target.
//!
//! `sprung` animates scalars, vectors, colors and orientations with a
//! physically modeled spring. The host owns the springs, feeds them a time
//! step each tick and reads back the result.
//!
//! # Features
//!
//! - **Two integrators**: semi-implicit Euler for moderate stiffness, closed-form
//!   (critically/under/over-damped) above a force threshold
//! - **Clamping**: per-component bounds on target and value, optional stop-on-clamp
//! - **Events**: edge-triggered `TargetReached`/`ClampingApplied`, level-triggered
//!   `CurrentValueChanged`, delivered through the `SpringObserver` trait
//! - **Typed springs**: `FloatSpring`, `Vector2Spring`..`Vector4Spring`, `ColorSpring`
//! - **Rotation springs**: forward/up basis plus local axis rotation, with
//!   axis restriction and per-tick rate limiting
//! - **Self-healing**: invalid settings are coerced, non-finite steps snap to
//!   equilibrium, wrongly sized member arrays are reallocated
//! - **`no_std` compatible**: needs only `alloc`
//!
//! A tick is `update` followed by `commit_candidates`:
//!
//! ```
//! use sprung::{EventLog, SpringConfig, SpringEvent, Vector3Spring, Vec3, Spring};
//!
//! // Over-damped: approaches without oscillating, so it arrives exactly once.
//! let mut spring: Vector3Spring<f64> =
//!     Spring::with_force_and_drag(Vec3::new(0.0, 0.0, 0.0), 100.0, 30.0);
//! spring.set_target(Vec3::new(1.0, 2.0, 3.0));
//!
//! let config = SpringConfig::new();
//! let mut log = EventLog::new();
//! for _ in 0..300 {
//!     spring.update(1.0 / 60.0, &config, &mut log);
//!     spring.commit_candidates();
//! }
//! assert_eq!(log.count(SpringEvent::TargetReached), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod color;
pub mod quat;
pub mod scalar;
pub mod params;
pub mod integrator;
pub mod clamp;
pub mod events;
pub mod aggregate;
pub mod spring;
pub mod rotation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Components, Vec, Scalar, Vec2, Vec3, Vec4};
pub use color::Color;
pub use quat::Quat;
pub use scalar::ScalarSpring;
pub use params::{PhysicsParameters, ParameterCache};
pub use integrator::{DampingMode, Integration};
pub use events::{SpringEvent, EventNotifier};
pub use aggregate::SpringAggregate;
pub use spring::{Spring, FloatSpring, Vector2Spring, Vector3Spring, Vector4Spring, ColorSpring};
pub use rotation::{RotationSpring, AxisRestriction};
pub use config::SpringConfig;
pub use observer::{SpringObserver, NoOpObserver, EventLog};
pub use error::SpringError;
