//! 3D vector type for positions, directions and scale factors.
//!
//! [`Vec3`] is a plain `Copy` value. Besides the usual arithmetic it knows how
//! to pull bases, translations and scales out of a [`Mat4`] and how to be
//! rotated by a [`Quat`].
//!
//! # Usage
//!
//! ```rust
//! use spatia_math::{Quat, Vec3};
//!
//! let up = Vec3::new(0.0, 1.0, 0.0);
//! let q = Quat::from_axis_angle(Vec3::X, std::f64::consts::FRAC_PI_2);
//! let v = up.apply_quat(q);
//! assert!((v.z - 1.0).abs() < 1e-12);
//! ```

use crate::{Euler, Mat3, Mat4, Quat};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Position, direction or per-axis scale in 3D.
///
/// Fields are public; `v[0]..v[2]` indexes them in x, y, z order.
///
/// ```rust
/// use spatia_math::Vec3;
///
/// let v = Vec3::new(3.0, 4.0, 0.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v[0], 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// Origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit scale.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// +X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// +Y axis, the default up direction.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// +Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Negative unit Z (0, 0, -1), the viewing direction of cameras.
    pub const NEG_Z: Self = Self::new(0.0, 0.0, -1.0);

    /// Vector from its three components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis, e.g. a uniform scale.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// From `[x, y, z]`.
    #[inline]
    pub const fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// To `[x, y, z]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Reads three components from `slice` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the slice is shorter than `offset + 3`.
    #[inline]
    pub fn from_slice_at(slice: &[f64], offset: usize) -> Self {
        Self::new(slice[offset], slice[offset + 1], slice[offset + 2])
    }

    /// Writes the three components into `out` starting at `offset`.
    #[inline]
    pub fn write_to(self, out: &mut [f64], offset: usize) {
        out[offset..offset + 3].copy_from_slice(&self.to_array());
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Self::ZERO }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared_to(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Component-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Point between `self` (`t = 0`) and `other` (`t = 1`).
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Angle in radians between two vectors.
    ///
    /// Returns π/2 when either vector has zero length.
    pub fn angle_to(self, other: Self) -> f64 {
        let denominator = (self.length_squared() * other.length_squared()).sqrt();
        if denominator == 0.0 {
            return std::f64::consts::FRAC_PI_2;
        }
        let theta = self.dot(other) / denominator;
        theta.clamp(-1.0, 1.0).acos()
    }

    /// No NaN or infinite component.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// At least one NaN component.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Multiplies by a 3x3 matrix (`m * v`).
    #[inline]
    pub fn apply_mat3(self, m: &Mat3) -> Self {
        let e = &m.elements;
        Self::new(
            e[0] * self.x + e[3] * self.y + e[6] * self.z,
            e[1] * self.x + e[4] * self.y + e[7] * self.z,
            e[2] * self.x + e[5] * self.y + e[8] * self.z,
        )
    }

    /// Transforms a point by a 4x4 matrix, including the perspective divide.
    ///
    /// The implicit fourth component is 1. For affine matrices the divide is
    /// a no-op; for projection matrices this yields NDC coordinates.
    pub fn apply_mat4(self, m: &Mat4) -> Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        let w = 1.0 / (e[3] * x + e[7] * y + e[11] * z + e[15]);
        Self::new(
            (e[0] * x + e[4] * y + e[8] * z + e[12]) * w,
            (e[1] * x + e[5] * y + e[9] * z + e[13]) * w,
            (e[2] * x + e[6] * y + e[10] * z + e[14]) * w,
        )
    }

    /// Transforms a direction by the upper 3x3 of a matrix and normalizes it.
    ///
    /// Translation is ignored. Assumes the matrix has no perspective.
    pub fn transform_direction(self, m: &Mat4) -> Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        Self::new(
            e[0] * x + e[4] * y + e[8] * z,
            e[1] * x + e[5] * y + e[9] * z,
            e[2] * x + e[6] * y + e[10] * z,
        )
        .normalize()
    }

    /// Rotates this vector by a unit quaternion.
    ///
    /// Uses the `v + 2w(q×v) + 2q×(q×v)` expansion, which avoids building a
    /// matrix.
    pub fn apply_quat(self, q: Quat) -> Self {
        let (vx, vy, vz) = (self.x, self.y, self.z);
        let tx = 2.0 * (q.y * vz - q.z * vy);
        let ty = 2.0 * (q.z * vx - q.x * vz);
        let tz = 2.0 * (q.x * vy - q.y * vx);
        Self::new(
            vx + q.w * tx + q.y * tz - q.z * ty,
            vy + q.w * ty + q.z * tx - q.x * tz,
            vz + q.w * tz + q.x * ty - q.y * tx,
        )
    }

    /// Rotates this vector by `angle` radians around a unit `axis`.
    #[inline]
    pub fn apply_axis_angle(self, axis: Vec3, angle: f64) -> Self {
        self.apply_quat(Quat::from_axis_angle(axis, angle))
    }

    /// Rotates this vector by Euler angles.
    #[inline]
    pub fn apply_euler(self, euler: &Euler) -> Self {
        self.apply_quat(Quat::from_euler(euler))
    }

    /// Translation column of a matrix.
    #[inline]
    pub fn from_matrix_position(m: &Mat4) -> Self {
        Self::from_slice_at(&m.elements, 12)
    }

    /// Length of each basis column of a matrix.
    ///
    /// Always non-negative; reflections are resolved by [`Mat4::decompose`].
    pub fn from_matrix_scale(m: &Mat4) -> Self {
        Self::new(
            Self::from_matrix_column(m, 0).length(),
            Self::from_matrix_column(m, 1).length(),
            Self::from_matrix_column(m, 2).length(),
        )
    }

    /// First three rows of column `index` (0..=3) of a 4x4 matrix.
    #[inline]
    pub fn from_matrix_column(m: &Mat4, index: usize) -> Self {
        Self::from_slice_at(&m.elements, index * 4)
    }

    /// Column `index` (0..=2) of a 3x3 matrix.
    #[inline]
    pub fn from_mat3_column(m: &Mat3, index: usize) -> Self {
        Self::from_slice_at(&m.elements, index * 3)
    }

    /// The three Euler angles as a vector (order is dropped).
    #[inline]
    pub fn from_euler_angles(e: &Euler) -> Self {
        Self::new(e.x, e.y, e.z)
    }

    /// Converts to glam DVec3.
    #[inline]
    pub fn to_glam(self) -> glam::DVec3 {
        glam::DVec3::new(self.x, self.y, self.z)
    }

    /// Creates from glam DVec3.
    #[inline]
    pub fn from_glam(v: glam::DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

// Indexing
impl Index<usize> for Vec3 {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of bounds: {}", i),
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// Vec3 * Vec3 (component-wise)
impl Mul for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}

impl MulAssign<f64> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

// Vec3 / Vec3 (component-wise)
impl Div for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f64> for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    #[inline]
    fn from(a: [f64; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec3> for [f64; 3] {
    #[inline]
    fn from(v: Vec3) -> [f64; 3] {
        v.to_array()
    }
}

impl From<glam::DVec3> for Vec3 {
    #[inline]
    fn from(v: glam::DVec3) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec3> for glam::DVec3 {
    #[inline]
    fn from(v: Vec3) -> glam::DVec3 {
        v.to_glam()
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
