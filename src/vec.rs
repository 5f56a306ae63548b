//! Vector types and the component-access trait the typed springs build on.

use crate::float::Float;
use core::ops::{Add, Sub, Neg};

/// Fixed-size value made of independent scalar components.
///
/// Every typed spring stores one scalar spring per component; this trait is
/// how a composite value is split into, and rebuilt from, those scalars.
pub trait Components: Copy + core::fmt::Debug {
    /// The scalar (float) type of each component.
    type Scalar: Float;

    /// Number of components.
    const COUNT: usize;

    /// Component `index`. Panics if `index >= COUNT`.
    fn component(&self, index: usize) -> Self::Scalar;

    /// Build a value by evaluating `f` for each component index in order.
    fn from_fn<G: FnMut(usize) -> Self::Scalar>(f: G) -> Self;

    /// Value with every component set to `value`.
    fn uniform(value: Self::Scalar) -> Self {
        Self::from_fn(|_| value)
    }
}

/// Trait for vector types used in spring calculations.
pub trait Vec:
    Copy
    + Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Default
    + core::fmt::Debug
{
    /// The scalar (float) type for this vector.
    type Scalar: Float;

    /// Zero vector.
    fn zero() -> Self;

    /// Vector with all components set to the same value.
    fn splat(value: Self::Scalar) -> Self;

    /// Dot product.
    fn dot(self, other: Self) -> Self::Scalar;

    /// Squared length (avoids sqrt).
    fn length_sq(self) -> Self::Scalar {
        self.dot(self)
    }

    /// Length (magnitude).
    fn length(self) -> Self::Scalar {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(Self::Scalar::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(Self::Scalar::one() / len)
        }
    }

    /// Scale all components by a scalar.
    fn scale(self, s: Self::Scalar) -> Self;

    /// Rescale so the length does not exceed `max_length`.
    fn clamp_length(self, max_length: Self::Scalar) -> Self {
        let len = self.length();
        if len > max_length && len > Self::Scalar::zero() {
            self.scale(max_length / len)
        } else {
            self
        }
    }
}

// --------------------------------------------------------------------------
// Scalar<F>: 1D wrapper
// --------------------------------------------------------------------------

/// 1D "vector": a single number, the value type of a `FloatSpring`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Scalar<F: Float>(pub F);

impl<F: Float> Add for Scalar<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Scalar(self.0 + rhs.0) }
}

impl<F: Float> Sub for Scalar<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Scalar(self.0 - rhs.0) }
}

impl<F: Float> Neg for Scalar<F> {
    type Output = Self;
    fn neg(self) -> Self { Scalar(-self.0) }
}

impl<F: Float> Vec for Scalar<F> {
    type Scalar = F;
    fn zero() -> Self { Scalar(F::zero()) }
    fn splat(value: F) -> Self { Scalar(value) }
    fn dot(self, other: Self) -> F { self.0 * other.0 }
    fn scale(self, s: F) -> Self { Scalar(self.0 * s) }
}

impl<F: Float> Components for Scalar<F> {
    type Scalar = F;
    const COUNT: usize = 1;

    fn component(&self, index: usize) -> F {
        match index {
            0 => self.0,
            _ => panic!("Scalar component index {} out of range", index),
        }
    }

    fn from_fn<G: FnMut(usize) -> F>(mut f: G) -> Self {
        Scalar(f(0))
    }
}

// --------------------------------------------------------------------------
// Vec2<F>: 2D vector
// --------------------------------------------------------------------------

/// 2D vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Vec for Vec2<F> {
    type Scalar = F;
    fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }
    fn splat(value: F) -> Self { Vec2 { x: value, y: value } }
    fn dot(self, other: Self) -> F { self.x * other.x + self.y * other.y }
    fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }
}

impl<F: Float> Components for Vec2<F> {
    type Scalar = F;
    const COUNT: usize = 2;

    fn component(&self, index: usize) -> F {
        match index {
            0 => self.x,
            1 => self.y,
            _ => panic!("Vec2 component index {} out of range", index),
        }
    }

    fn from_fn<G: FnMut(usize) -> F>(mut f: G) -> Self {
        Vec2 { x: f(0), y: f(1) }
    }
}

// --------------------------------------------------------------------------
// Vec3<F>: 3D vector
// --------------------------------------------------------------------------

/// 3D vector. Also the basis-direction type used by rotation springs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    pub fn unit_x() -> Self { Vec3::new(F::one(), F::zero(), F::zero()) }
    pub fn unit_y() -> Self { Vec3::new(F::zero(), F::one(), F::zero()) }
    pub fn unit_z() -> Self { Vec3::new(F::zero(), F::zero(), F::one()) }

    /// 3D cross product.
    pub fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Unsigned angle to `other` in radians. Zero if either vector is degenerate.
    pub fn angle_between(self, other: Self) -> F {
        let denom = (self.length_sq() * other.length_sq()).sqrt();
        if denom.is_near_zero(F::from_f32(1e-15)) {
            return F::zero();
        }
        let cos = (self.dot(other) / denom).clamp(-F::one(), F::one());
        cos.acos()
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> Vec for Vec3<F> {
    type Scalar = F;
    fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }
    fn splat(value: F) -> Self { Vec3 { x: value, y: value, z: value } }
    fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }
}

impl<F: Float> Components for Vec3<F> {
    type Scalar = F;
    const COUNT: usize = 3;

    fn component(&self, index: usize) -> F {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("Vec3 component index {} out of range", index),
        }
    }

    fn from_fn<G: FnMut(usize) -> F>(mut f: G) -> Self {
        let x = f(0);
        let y = f(1);
        let z = f(2);
        Vec3 { x, y, z }
    }
}

// --------------------------------------------------------------------------
// Vec4<F>: 4D vector
// --------------------------------------------------------------------------

/// 4D vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec4<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
    pub w: F,
}

impl<F: Float> Vec4<F> {
    /// Create a new 4D vector.
    pub fn new(x: F, y: F, z: F, w: F) -> Self { Vec4 { x, y, z, w } }
}

impl<F: Float> Add for Vec4<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec4 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z, w: self.w + rhs.w }
    }
}

impl<F: Float> Sub for Vec4<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec4 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z, w: self.w - rhs.w }
    }
}

impl<F: Float> Neg for Vec4<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec4 { x: -self.x, y: -self.y, z: -self.z, w: -self.w } }
}

impl<F: Float> Vec for Vec4<F> {
    type Scalar = F;
    fn zero() -> Self { Vec4 { x: F::zero(), y: F::zero(), z: F::zero(), w: F::zero() } }
    fn splat(value: F) -> Self { Vec4 { x: value, y: value, z: value, w: value } }
    fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
    fn scale(self, s: F) -> Self {
        Vec4 { x: self.x * s, y: self.y * s, z: self.z * s, w: self.w * s }
    }
}

impl<F: Float> Components for Vec4<F> {
    type Scalar = F;
    const COUNT: usize = 4;

    fn component(&self, index: usize) -> F {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            3 => self.w,
            _ => panic!("Vec4 component index {} out of range", index),
        }
    }

    fn from_fn<G: FnMut(usize) -> F>(mut f: G) -> Self {
        let x = f(0);
        let y = f(1);
        let z = f(2);
        let w = f(3);
        Vec4 { x, y, z, w }
    }
}
