//! Unit quaternions for rotations.
//!
//! [`Quat`] stores `(x, y, z, w)` with `w` as the scalar part. Any value used
//! as a rotation should have unit length; constructors that derive a rotation
//! (from Euler angles, an axis-angle pair or a rotation matrix) produce unit
//! quaternions, and [`Quat::normalize`] restores unit length after drift.
//!
//! Quaternions have no singularities, so conversion *to* a quaternion is a
//! total function for every rotation order.
//!
//! # Usage
//!
//! ```rust
//! use spatia_math::{Euler, Quat, RotationOrder, Vec3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let q = Quat::from_euler(&Euler::new(FRAC_PI_2, 0.0, 0.0, RotationOrder::Xyz));
//! let v = Vec3::Y.apply_quat(q);
//! assert!((v - Vec3::Z).length() < 1e-12);
//! ```

use crate::{Euler, Mat4, RotationOrder, Vec3};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Mul, MulAssign, Neg};

/// A quaternion `x*i + y*j + z*k + w`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quat {
    /// i component
    pub x: f64,
    /// j component
    pub y: f64,
    /// k component
    pub z: f64,
    /// Scalar component
    pub w: f64,
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from raw components. No normalization.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates from an `[x, y, z, w]` array.
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Converts to an `[x, y, z, w]` array.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Reads `[x, y, z, w]` from `slice` starting at `offset`.
    #[inline]
    pub fn from_slice_at(slice: &[f64], offset: usize) -> Self {
        Self::new(slice[offset], slice[offset + 1], slice[offset + 2], slice[offset + 3])
    }

    /// Writes `[x, y, z, w]` into `out` starting at `offset`.
    #[inline]
    pub fn write_to(self, out: &mut [f64], offset: usize) {
        out[offset..offset + 4].copy_from_slice(&self.to_array());
    }

    /// Rotation equivalent to the given Euler angles.
    ///
    /// Each order has its own half-angle product formula; the result is
    /// the rotation `R_a(θa) · R_b(θb) · R_c(θc)` for order `abc`.
    pub fn from_euler(euler: &Euler) -> Self {
        let (c1, c2, c3) = ((euler.x / 2.0).cos(), (euler.y / 2.0).cos(), (euler.z / 2.0).cos());
        let (s1, s2, s3) = ((euler.x / 2.0).sin(), (euler.y / 2.0).sin(), (euler.z / 2.0).sin());

        match euler.order {
            RotationOrder::Xyz => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Yxz => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::Zxy => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Zyx => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::Yzx => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Xzy => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
        }
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// `axis` is assumed to be normalized.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let half = angle / 2.0;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Extracts the rotation from the upper 3x3 of a matrix.
    ///
    /// The block must be a pure rotation (unscaled). The branch is chosen by
    /// the largest of the trace and the three diagonal terms so the divisor
    /// never approaches zero.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        let trace = m11 + m22 + m33;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::new(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::new((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::new((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        }
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`.
    ///
    /// Opposite vectors pick an arbitrary perpendicular axis.
    pub fn from_unit_vectors(from: Vec3, to: Vec3) -> Self {
        let r = from.dot(to) + 1.0;

        let q = if r < f64::EPSILON {
            if from.x.abs() > from.z.abs() {
                Self::new(-from.y, from.x, 0.0, 0.0)
            } else {
                Self::new(0.0, -from.z, from.y, 0.0)
            }
        } else {
            let c = from.cross(to);
            Self::new(c.x, c.y, c.z, r)
        };

        q.normalize()
    }

    /// Dot product of the four components.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Scales to unit length; the zero quaternion becomes identity.
    pub fn normalize(self) -> Self {
        let l = self.length();
        if l == 0.0 {
            Self::IDENTITY
        } else {
            let inv = 1.0 / l;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        }
    }

    /// Conjugate `(-x, -y, -z, w)`.
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Inverse rotation. Equal to the conjugate for unit quaternions.
    #[inline]
    pub fn invert(self) -> Self {
        self.conjugate()
    }

    /// Angle in radians between two unit rotations.
    #[inline]
    pub fn angle_to(self, other: Self) -> f64 {
        2.0 * self.dot(other).clamp(-1.0, 1.0).abs().acos()
    }

    /// Rotates towards `target` by at most `step` radians.
    pub fn rotate_towards(self, target: Self, step: f64) -> Self {
        let angle = self.angle_to(target);
        if angle == 0.0 {
            return self;
        }
        let t = (step / angle).min(1.0);
        self.slerp(target, t)
    }

    /// Hamilton product `self * other` (apply `other` first, then `self`).
    pub fn multiply(self, other: Self) -> Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (other.x, other.y, other.z, other.w);
        Self::new(
            ax * bw + aw * bx + ay * bz - az * by,
            ay * bw + aw * by + az * bx - ax * bz,
            az * bw + aw * bz + ax * by - ay * bx,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Product `other * self`.
    #[inline]
    pub fn premultiply(self, other: Self) -> Self {
        other.multiply(self)
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `target`. Falls back to a
    /// normalized lerp when the arc is too short for a stable sine.
    pub fn slerp(self, target: Self, t: f64) -> Self {
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return target;
        }

        let mut cos_half_theta = self.dot(target);
        let end = if cos_half_theta < 0.0 {
            cos_half_theta = -cos_half_theta;
            -target
        } else {
            target
        };

        if cos_half_theta >= 1.0 {
            return self;
        }

        let sqr_sin_half_theta = 1.0 - cos_half_theta * cos_half_theta;

        if sqr_sin_half_theta <= f64::EPSILON {
            let s = 1.0 - t;
            return Self::new(
                s * self.x + t * end.x,
                s * self.y + t * end.y,
                s * self.z + t * end.z,
                s * self.w + t * end.w,
            )
            .normalize();
        }

        let sin_half_theta = sqr_sin_half_theta.sqrt();
        let half_theta = sin_half_theta.atan2(cos_half_theta);
        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self::new(
            self.x * ratio_a + end.x * ratio_b,
            self.y * ratio_a + end.y * ratio_b,
            self.z * ratio_a + end.z * ratio_b,
            self.w * ratio_a + end.w * ratio_b,
        )
    }

    /// Free-function form of [`Quat::slerp`].
    #[inline]
    pub fn slerp_quats(a: Self, b: Self, t: f64) -> Self {
        a.slerp(b, t)
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Converts to glam DQuat.
    #[inline]
    pub fn to_glam(self) -> glam::DQuat {
        glam::DQuat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Creates from glam DQuat.
    #[inline]
    pub fn from_glam(q: glam::DQuat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl MulAssign for Quat {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(rhs);
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.apply_quat(self)
    }
}

impl Neg for Quat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<glam::DQuat> for Quat {
    #[inline]
    fn from(q: glam::DQuat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quat> for glam::DQuat {
    #[inline]
    fn from(q: Quat) -> glam::DQuat {
        q.to_glam()
    }
}

impl AbsDiffEq for Quat {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Quat {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
