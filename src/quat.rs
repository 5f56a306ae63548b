//! Unit quaternion used to compose and compare orientations.
//!
//! Angles in this module are radians unless a function name says degrees.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use core::ops::Mul;

/// Rotation quaternion `w + xi + yj + zk`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quat<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
    pub w: F,
}

impl<F: Float> Default for Quat<F> {
    fn default() -> Self {
        Quat::identity()
    }
}

impl<F: Float> Quat<F> {
    pub fn new(x: F, y: F, z: F, w: F) -> Self {
        Quat { x, y, z, w }
    }

    pub fn identity() -> Self {
        Quat { x: F::zero(), y: F::zero(), z: F::zero(), w: F::one() }
    }

    /// Rotation of `angle` radians about `axis`. A degenerate axis gives identity.
    pub fn from_axis_angle(axis: Vec3<F>, angle: F) -> Self {
        let axis = axis.normalize();
        if axis.length_sq().is_near_zero(F::from_f32(1e-12)) {
            return Quat::identity();
        }
        let half = angle * F::half();
        let s = half.sin();
        Quat { x: axis.x * s, y: axis.y * s, z: axis.z * s, w: half.cos() }
    }

    /// Orientation whose local +Z points along `forward` and whose local +Y is
    /// as close to `up` as possible.
    ///
    /// Returns identity if `forward` is degenerate. If `up` is parallel to
    /// `forward`, a perpendicular fallback up is chosen.
    pub fn look_rotation(forward: Vec3<F>, up: Vec3<F>) -> Self {
        let eps = F::from_f32(1e-6);
        let f = forward.normalize();
        if f.length_sq().is_near_zero(eps) {
            return Quat::identity();
        }
        let mut r = up.cross(f);
        if r.length_sq().is_near_zero(eps) {
            let fallback = if f.y.abs() < F::from_f32(0.9) { Vec3::unit_y() } else { Vec3::unit_x() };
            r = fallback.cross(f);
        }
        let r = r.normalize();
        let u = f.cross(r);
        Self::from_basis(r, u, f)
    }

    /// Quaternion for the rotation matrix with columns `(right, up, forward)`.
    fn from_basis(r: Vec3<F>, u: Vec3<F>, f: Vec3<F>) -> Self {
        let (m00, m01, m02) = (r.x, u.x, f.x);
        let (m10, m11, m12) = (r.y, u.y, f.y);
        let (m20, m21, m22) = (r.z, u.z, f.z);
        let one = F::one();
        let quarter = F::from_f32(0.25);
        let trace = m00 + m11 + m22;

        let q = if trace > F::zero() {
            let s = (trace + one).sqrt() * F::two();
            Quat { w: quarter * s, x: (m21 - m12) / s, y: (m02 - m20) / s, z: (m10 - m01) / s }
        } else if m00 > m11 && m00 > m22 {
            let s = (one + m00 - m11 - m22).sqrt() * F::two();
            Quat { w: (m21 - m12) / s, x: quarter * s, y: (m01 + m10) / s, z: (m02 + m20) / s }
        } else if m11 > m22 {
            let s = (one + m11 - m00 - m22).sqrt() * F::two();
            Quat { w: (m02 - m20) / s, x: (m01 + m10) / s, y: quarter * s, z: (m12 + m21) / s }
        } else {
            let s = (one + m22 - m00 - m11).sqrt() * F::two();
            Quat { w: (m10 - m01) / s, x: (m02 + m20) / s, y: (m12 + m21) / s, z: quarter * s }
        };
        q.normalize()
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(self) -> Self {
        let len = self.dot(self).sqrt();
        if len.is_near_zero(F::from_f32(1e-12)) {
            return Quat::identity();
        }
        let inv = F::one() / len;
        Quat { x: self.x * inv, y: self.y * inv, z: self.z * inv, w: self.w * inv }
    }

    pub fn conjugate(self) -> Self {
        Quat { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    /// Rotate a vector by this (unit) quaternion.
    pub fn rotate(self, v: Vec3<F>) -> Vec3<F> {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v).scale(F::two());
        v + t.scale(self.w) + q.cross(t)
    }

    /// Local +Z expressed in world space.
    pub fn forward(self) -> Vec3<F> {
        self.rotate(Vec3::unit_z())
    }

    /// Local +Y expressed in world space.
    pub fn up(self) -> Vec3<F> {
        self.rotate(Vec3::unit_y())
    }

    /// Local +X expressed in world space.
    pub fn right(self) -> Vec3<F> {
        self.rotate(Vec3::unit_x())
    }

    /// Smallest angle between two orientations, in degrees.
    pub fn angle_degrees(self, other: Self) -> F {
        let d = self.normalize().dot(other.normalize()).abs().min(F::one());
        (F::two() * d.acos()).to_degrees()
    }

    /// Shortest-path spherical interpolation.
    pub fn slerp(self, other: Self, t: F) -> Self {
        let mut to = other;
        let mut cos = self.dot(other);
        if cos < F::zero() {
            to = Quat { x: -other.x, y: -other.y, z: -other.z, w: -other.w };
            cos = -cos;
        }
        let (a, b) = if cos > F::from_f32(0.9995) {
            (F::one() - t, t)
        } else {
            let theta = cos.min(F::one()).acos();
            let sin = theta.sin();
            (((F::one() - t) * theta).sin() / sin, (t * theta).sin() / sin)
        };
        Quat {
            x: self.x * a + to.x * b,
            y: self.y * a + to.y * b,
            z: self.z * a + to.z * b,
            w: self.w * a + to.w * b,
        }
        .normalize()
    }

    /// Rotate from `self` toward `to` by at most `max_degrees`.
    pub fn rotate_towards(self, to: Self, max_degrees: F) -> Self {
        let angle = self.angle_degrees(to);
        if angle.is_near_zero(F::from_f32(1e-9)) {
            return to;
        }
        let t = (max_degrees / angle).min(F::one());
        self.slerp(to, t)
    }
}

impl<F: Float> Mul for Quat<F> {
    type Output = Self;

    /// Hamilton product: `(a * b).rotate(v) == a.rotate(b.rotate(v))`.
    fn mul(self, b: Self) -> Self {
        let a = self;
        Quat {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3<f64>, b: Vec3<f64>) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn look_rotation_identity() {
        let q = Quat::look_rotation(Vec3::<f64>::unit_z(), Vec3::unit_y());
        assert!(q.angle_degrees(Quat::identity()) < 1e-4);
    }

    #[test]
    fn look_rotation_reproduces_basis() {
        let f = Vec3::new(1.0f64, 0.0, 0.0);
        let u = Vec3::new(0.0, 1.0, 0.0);
        let q = Quat::look_rotation(f, u);
        assert!(close(q.forward(), f));
        assert!(close(q.up(), u));
        assert!(close(q.right(), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn look_rotation_parallel_up_falls_back() {
        let q = Quat::look_rotation(Vec3::<f64>::unit_y(), Vec3::unit_y());
        assert!(close(q.forward(), Vec3::unit_y()));
    }

    #[test]
    fn axis_angle_quarter_turn() {
        let q = Quat::from_axis_angle(Vec3::<f64>::unit_y(), core::f64::consts::FRAC_PI_2);
        assert!(close(q.rotate(Vec3::unit_z()), Vec3::unit_x()));
        assert!((q.angle_degrees(Quat::identity()) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn rotate_towards_limits_step() {
        let to = Quat::from_axis_angle(Vec3::<f64>::unit_y(), 170f64.to_radians());
        let step = Quat::identity().rotate_towards(to, 80.0);
        assert!((step.angle_degrees(Quat::identity()) - 80.0).abs() < 1e-6);
        let done = Quat::identity().rotate_towards(to, 180.0);
        assert!(done.angle_degrees(to) < 1e-4);
    }

    #[test]
    fn product_composes_rotations() {
        let a = Quat::from_axis_angle(Vec3::<f64>::unit_x(), 0.3);
        let b = Quat::from_axis_angle(Vec3::<f64>::unit_y(), 0.7);
        let v = Vec3::new(0.2, -0.4, 0.9);
        assert!(close((a * b).rotate(v), a.rotate(b.rotate(v))));
    }
}
