//! 4x4 homogeneous transform matrix.
//!
//! [`Mat4`] holds affine transforms (translate/rotate/scale) and projection
//! matrices. It is the type every scene node and camera hands to a renderer.
//!
//! # Convention
//!
//! Elements are stored **column-major** and the matrix acts on **column
//! vectors** (`p' = M * p`). Constructors that take arguments in reading order
//! ([`Mat4::set`], [`Mat4::from_rows`]) transpose into storage:
//!
//! ```text
//!                    | e0  e4  e8  e12 |
//! elements[0..16] => | e1  e5  e9  e13 |     translation = (e12, e13, e14)
//!                    | e2  e6  e10 e14 |
//!                    | e3  e7  e11 e15 |
//! ```
//!
//! Code that reads `elements` directly (GPU uploads, serializers) must use this
//! layout.
//!
//! # TRS composition
//!
//! [`Mat4::compose`] builds `T * R * S`; [`Mat4::decompose`] recovers the three
//! parts. A reflection (negative determinant) is always attributed to the
//! **X** scale axis.
//!
//! # Singular matrices
//!
//! [`Mat4::invert`] returns [`Mat4::ZERO`] when the determinant is exactly zero
//! rather than failing; check with [`Mat4::is_zero`] or use
//! [`Mat4::try_inverse`].
//!
//! # Usage
//!
//! ```rust
//! use spatia_math::{Mat4, Quat, Vec3};
//!
//! let m = Mat4::compose(
//!     Vec3::new(1.0, 2.0, 3.0),
//!     Quat::from_axis_angle(Vec3::Y, 0.5),
//!     Vec3::splat(2.0),
//! );
//! let (p, q, s) = m.decompose();
//! assert!((p - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-12);
//! assert!((s - Vec3::splat(2.0)).length() < 1e-12);
//! assert!(q.angle_to(Quat::from_axis_angle(Vec3::Y, 0.5)) < 1e-6);
//! ```

use crate::{Euler, Mat3, Quat, RotationOrder, Vec3};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Mul, MulAssign};

/// A 4x4 matrix, column-major.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4 {
    /// Matrix elements in column-major order.
    pub elements: [f64; 16],
}

impl Mat4 {
    /// Zero matrix. Also the sentinel returned by a failed [`Mat4::invert`].
    pub const ZERO: Self = Self { elements: [0.0; 16] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from elements given in row-major reading order.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    #[inline]
    pub const fn set(
        n11: f64, n12: f64, n13: f64, n14: f64,
        n21: f64, n22: f64, n23: f64, n24: f64,
        n31: f64, n32: f64, n33: f64, n34: f64,
        n41: f64, n42: f64, n43: f64, n44: f64,
    ) -> Self {
        Self {
            elements: [
                n11, n21, n31, n41,
                n12, n22, n32, n42,
                n13, n23, n33, n43,
                n14, n24, n34, n44,
            ],
        }
    }

    /// Creates a matrix from row arrays.
    #[rustfmt::skip]
    #[inline]
    pub const fn from_rows(r: [[f64; 4]; 4]) -> Self {
        Self::set(
            r[0][0], r[0][1], r[0][2], r[0][3],
            r[1][0], r[1][1], r[1][2], r[1][3],
            r[2][0], r[2][1], r[2][2], r[2][3],
            r[3][0], r[3][1], r[3][2], r[3][3],
        )
    }

    /// Creates from a column-major array.
    #[inline]
    pub const fn from_array(elements: [f64; 16]) -> Self {
        Self { elements }
    }

    /// Reads sixteen column-major elements from `slice` starting at `offset`.
    #[inline]
    pub fn from_slice_at(slice: &[f64], offset: usize) -> Self {
        let mut elements = [0.0; 16];
        elements.copy_from_slice(&slice[offset..offset + 16]);
        Self { elements }
    }

    /// Column-major array copy.
    #[inline]
    pub const fn to_array(&self) -> [f64; 16] {
        self.elements
    }

    /// Writes the column-major elements into `out` starting at `offset`.
    #[inline]
    pub fn write_to(&self, out: &mut [f64], offset: usize) {
        out[offset..offset + 16].copy_from_slice(&self.elements);
    }

    /// Embeds a 3x3 linear transform; translation zero, bottom row identity.
    #[rustfmt::skip]
    pub fn from_mat3(m: &Mat3) -> Self {
        let e = &m.elements;
        Self::set(
            e[0], e[3], e[6], 0.0,
            e[1], e[4], e[7], 0.0,
            e[2], e[5], e[8], 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[col * 4 + row]
    }

    /// True if every element is exactly zero (the failed-inverse sentinel).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.elements.iter().all(|&v| v == 0.0)
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|v| v.is_finite())
    }

    // ------------------------------------------------------------------
    // Bases and translation
    // ------------------------------------------------------------------

    /// Matrix whose first three columns are the given axes.
    #[rustfmt::skip]
    pub fn from_basis(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self::set(
            x.x, y.x, z.x, 0.0,
            x.y, y.y, z.y, 0.0,
            x.z, y.z, z.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// The first three columns as vectors.
    #[inline]
    pub fn extract_basis(&self) -> (Vec3, Vec3, Vec3) {
        (
            Vec3::from_matrix_column(self, 0),
            Vec3::from_matrix_column(self, 1),
            Vec3::from_matrix_column(self, 2),
        )
    }

    /// Translation column.
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_matrix_position(self)
    }

    /// Overwrites the translation column.
    #[inline]
    pub fn set_position(&mut self, v: Vec3) {
        self.elements[12] = v.x;
        self.elements[13] = v.y;
        self.elements[14] = v.z;
    }

    /// Copies the translation column of `other` into this matrix.
    #[inline]
    pub fn copy_position(&mut self, other: &Self) {
        self.set_position(other.position());
    }

    /// Rotation part of this matrix with scale removed.
    ///
    /// Translation is dropped. Reflections are not resolved; use
    /// [`Mat4::decompose`] for that.
    pub fn extract_rotation(&self) -> Self {
        let scale = Vec3::from_matrix_scale(self);
        let (x, y, z) = self.extract_basis();
        Self::from_basis(x / scale.x, y / scale.y, z / scale.z)
    }

    // ------------------------------------------------------------------
    // Rotation builders
    // ------------------------------------------------------------------

    /// Pure rotation matrix for Euler angles.
    ///
    /// Only the upper 3x3 carries data; translation is zero and the bottom
    /// row is `(0, 0, 0, 1)`.
    pub fn from_euler(euler: &Euler) -> Self {
        let mut te = Self::IDENTITY.elements;

        let (a, b) = (euler.x.cos(), euler.x.sin());
        let (c, d) = (euler.y.cos(), euler.y.sin());
        let (e, f) = (euler.z.cos(), euler.z.sin());

        match euler.order {
            RotationOrder::Xyz => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                te[0] = c * e;
                te[4] = -c * f;
                te[8] = d;
                te[1] = af + be * d;
                te[5] = ae - bf * d;
                te[9] = -b * c;
                te[2] = bf - ae * d;
                te[6] = be + af * d;
                te[10] = a * c;
            }
            RotationOrder::Yxz => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                te[0] = ce + df * b;
                te[4] = de * b - cf;
                te[8] = a * d;
                te[1] = a * f;
                te[5] = a * e;
                te[9] = -b;
                te[2] = cf * b - de;
                te[6] = df + ce * b;
                te[10] = a * c;
            }
            RotationOrder::Zxy => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                te[0] = ce - df * b;
                te[4] = -a * f;
                te[8] = de + cf * b;
                te[1] = cf + de * b;
                te[5] = a * e;
                te[9] = df - ce * b;
                te[2] = -a * d;
                te[6] = b;
                te[10] = a * c;
            }
            RotationOrder::Zyx => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                te[0] = c * e;
                te[4] = be * d - af;
                te[8] = ae * d + bf;
                te[1] = c * f;
                te[5] = bf * d + ae;
                te[9] = af * d - be;
                te[2] = -d;
                te[6] = b * c;
                te[10] = a * c;
            }
            RotationOrder::Yzx => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                te[0] = c * e;
                te[4] = bd - ac * f;
                te[8] = bc * f + ad;
                te[1] = f;
                te[5] = a * e;
                te[9] = -b * e;
                te[2] = -d * e;
                te[6] = ad * f + bc;
                te[10] = ac - bd * f;
            }
            RotationOrder::Xzy => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                te[0] = c * e;
                te[4] = -f;
                te[8] = d * e;
                te[1] = ac * f + bd;
                te[5] = a * e;
                te[9] = ad * f - bc;
                te[2] = bc * f - ad;
                te[6] = b * e;
                te[10] = bd * f + ac;
            }
        }

        Self { elements: te }
    }

    /// Pure rotation matrix for a unit quaternion.
    #[inline]
    pub fn from_quat(q: Quat) -> Self {
        Self::compose(Vec3::ZERO, q, Vec3::ONE)
    }

    /// Rotation of `theta` radians about X.
    #[rustfmt::skip]
    pub fn from_rotation_x(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::set(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation of `theta` radians about Y.
    #[rustfmt::skip]
    pub fn from_rotation_y(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::set(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation of `theta` radians about Z.
    #[rustfmt::skip]
    pub fn from_rotation_z(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::set(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation of `angle` radians about a unit `axis`.
    #[rustfmt::skip]
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (tx, ty) = (t * x, t * y);
        Self::set(
            tx * x + c, tx * y - s * z, tx * z + s * y, 0.0,
            tx * y + s * z, ty * y + c, ty * z - s * x, 0.0,
            tx * z - s * y, ty * z + s * x, t * z * z + c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Pure translation.
    #[rustfmt::skip]
    pub fn from_translation(v: Vec3) -> Self {
        Self::set(
            1.0, 0.0, 0.0, v.x,
            0.0, 1.0, 0.0, v.y,
            0.0, 0.0, 1.0, v.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Pure (possibly non-uniform) scale.
    #[rustfmt::skip]
    pub fn from_scale(v: Vec3) -> Self {
        Self::set(
            v.x, 0.0, 0.0, 0.0,
            0.0, v.y, 0.0, 0.0,
            0.0, 0.0, v.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Shear matrix. `xy` is the amount X shears along Y, and so on.
    #[rustfmt::skip]
    pub fn from_shear(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        Self::set(
            1.0, yx, zx, 0.0,
            xy, 1.0, zy, 0.0,
            xz, yz, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation that orients +Z from `target` towards `eye`, with `up` hint.
    ///
    /// Only the upper 3x3 is written; the translation column is kept. A
    /// degenerate `eye == target` looks down +Z, and an `up` parallel to the
    /// view direction is nudged so the basis stays well defined.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let mut z = eye - target;
        if z.length_squared() == 0.0 {
            // eye and target are in the same position
            z.z = 1.0;
        }
        z = z.normalize();

        let mut x = up.cross(z);
        if x.length_squared() == 0.0 {
            // up and z are parallel
            if up.z.abs() == 1.0 {
                z.x += 0.0001;
            } else {
                z.z += 0.0001;
            }
            z = z.normalize();
            x = up.cross(z);
        }
        x = x.normalize();
        let y = z.cross(x);

        let te = &mut self.elements;
        te[0] = x.x;
        te[4] = y.x;
        te[8] = z.x;
        te[1] = x.y;
        te[5] = y.y;
        te[9] = z.y;
        te[2] = x.z;
        te[6] = y.z;
        te[10] = z.z;
    }

    /// Identity with [`Mat4::look_at`] applied.
    #[inline]
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.look_at(eye, target, up);
        m
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// Matrix product `self * other`.
    pub fn mul_mat(&self, other: &Self) -> Self {
        let a = &self.elements;
        let b = &other.elements;
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a[row] * b[col * 4]
                    + a[4 + row] * b[col * 4 + 1]
                    + a[8 + row] * b[col * 4 + 2]
                    + a[12 + row] * b[col * 4 + 3];
            }
        }
        Self { elements: out }
    }

    /// Matrix product `other * self`.
    #[inline]
    pub fn premultiply(&self, other: &Self) -> Self {
        other.mul_mat(self)
    }

    /// Multiplies every element by a scalar.
    #[inline]
    pub fn scale_by(&self, s: f64) -> Self {
        Self {
            elements: self.elements.map(|v| v * s),
        }
    }

    /// Scales the three basis columns by `v` (post-multiplies a scale).
    pub fn scale(&self, v: Vec3) -> Self {
        let mut te = self.elements;
        for (col, s) in [v.x, v.y, v.z].into_iter().enumerate() {
            for row in 0..4 {
                te[col * 4 + row] *= s;
            }
        }
        Self { elements: te }
    }

    /// Largest basis column length.
    pub fn max_scale_on_axis(&self) -> f64 {
        let (x, y, z) = self.extract_basis();
        x.length_squared()
            .max(y.length_squared())
            .max(z.length_squared())
            .sqrt()
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[row * 4 + col] = self.elements[col * 4 + row];
            }
        }
        Self { elements: out }
    }

    /// Shared 2x2 sub-determinants used by both `determinant` and the inverse.
    #[inline]
    fn sub_determinants(&self) -> [f64; 12] {
        let a = &self.elements;
        [
            a[0] * a[5] - a[1] * a[4],
            a[0] * a[6] - a[2] * a[4],
            a[0] * a[7] - a[3] * a[4],
            a[1] * a[6] - a[2] * a[5],
            a[1] * a[7] - a[3] * a[5],
            a[2] * a[7] - a[3] * a[6],
            a[8] * a[13] - a[9] * a[12],
            a[8] * a[14] - a[10] * a[12],
            a[8] * a[15] - a[11] * a[12],
            a[9] * a[14] - a[10] * a[13],
            a[9] * a[15] - a[11] * a[13],
            a[10] * a[15] - a[11] * a[14],
        ]
    }

    /// Determinant.
    pub fn determinant(&self) -> f64 {
        let b = self.sub_determinants();
        b[0] * b[11] - b[1] * b[10] + b[2] * b[9] + b[3] * b[8] - b[4] * b[7] + b[5] * b[6]
    }

    /// Inverse, or `None` when the determinant is exactly zero.
    pub fn try_inverse(&self) -> Option<Self> {
        let b = self.sub_determinants();
        let det =
            b[0] * b[11] - b[1] * b[10] + b[2] * b[9] + b[3] * b[8] - b[4] * b[7] + b[5] * b[6];
        if det == 0.0 {
            return None;
        }
        let inv = 1.0 / det;

        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.elements;
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = b;

        Some(Self {
            elements: [
                (a11 * b11 - a12 * b10 + a13 * b09) * inv,
                (a02 * b10 - a01 * b11 - a03 * b09) * inv,
                (a31 * b05 - a32 * b04 + a33 * b03) * inv,
                (a22 * b04 - a21 * b05 - a23 * b03) * inv,
                (a12 * b08 - a10 * b11 - a13 * b07) * inv,
                (a00 * b11 - a02 * b08 + a03 * b07) * inv,
                (a32 * b02 - a30 * b05 - a33 * b01) * inv,
                (a20 * b05 - a22 * b02 + a23 * b01) * inv,
                (a10 * b10 - a11 * b08 + a13 * b06) * inv,
                (a01 * b08 - a00 * b10 - a03 * b06) * inv,
                (a30 * b04 - a31 * b02 + a33 * b00) * inv,
                (a21 * b02 - a20 * b04 - a23 * b00) * inv,
                (a11 * b07 - a10 * b09 - a12 * b06) * inv,
                (a00 * b09 - a01 * b07 + a02 * b06) * inv,
                (a31 * b01 - a30 * b03 - a32 * b00) * inv,
                (a20 * b03 - a21 * b01 + a22 * b00) * inv,
            ],
        })
    }

    /// Inverse, or [`Mat4::ZERO`] when the matrix is singular.
    ///
    /// No error is raised; callers that care compare against the sentinel
    /// with [`Mat4::is_zero`].
    #[inline]
    pub fn invert(&self) -> Self {
        self.try_inverse().unwrap_or(Self::ZERO)
    }

    /// Transforms a point (w = 1) with perspective divide.
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        p.apply_mat4(self)
    }

    /// Transforms a vector (w = 0): no translation, no normalization.
    #[inline]
    pub fn transform_vector3(&self, v: Vec3) -> Vec3 {
        let e = &self.elements;
        Vec3::new(
            e[0] * v.x + e[4] * v.y + e[8] * v.z,
            e[1] * v.x + e[5] * v.y + e[9] * v.z,
            e[2] * v.x + e[6] * v.y + e[10] * v.z,
        )
    }

    // ------------------------------------------------------------------
    // TRS
    // ------------------------------------------------------------------

    /// Builds `T(position) * R(quaternion) * S(scale)`.
    ///
    /// Each rotation basis column is multiplied by its scale component and
    /// `position` fills the translation column.
    pub fn compose(position: Vec3, quaternion: Quat, scale: Vec3) -> Self {
        let Quat { x, y, z, w } = quaternion;
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let (sx, sy, sz) = (scale.x, scale.y, scale.z);

        Self {
            elements: [
                (1.0 - (yy + zz)) * sx,
                (xy + wz) * sx,
                (xz - wy) * sx,
                0.0,
                (xy - wz) * sy,
                (1.0 - (xx + zz)) * sy,
                (yz + wx) * sy,
                0.0,
                (xz + wy) * sz,
                (yz - wx) * sz,
                (1.0 - (xx + yy)) * sz,
                0.0,
                position.x,
                position.y,
                position.z,
                1.0,
            ],
        }
    }

    /// Splits an affine matrix into `(position, quaternion, scale)`.
    ///
    /// Scale magnitudes are the basis column lengths. When the determinant
    /// is negative the X scale is negated (never Y or Z), so the remaining
    /// rotation block has a positive determinant before the quaternion is
    /// extracted.
    pub fn decompose(&self) -> (Vec3, Quat, Vec3) {
        let te = &self.elements;

        let mut sx = Vec3::new(te[0], te[1], te[2]).length();
        let sy = Vec3::new(te[4], te[5], te[6]).length();
        let sz = Vec3::new(te[8], te[9], te[10]).length();

        if self.determinant() < 0.0 {
            sx = -sx;
        }

        let position = Vec3::new(te[12], te[13], te[14]);

        let mut rotation = *self;
        let (inv_sx, inv_sy, inv_sz) = (1.0 / sx, 1.0 / sy, 1.0 / sz);
        for row in 0..3 {
            rotation.elements[row] *= inv_sx;
            rotation.elements[4 + row] *= inv_sy;
            rotation.elements[8 + row] *= inv_sz;
        }

        let quaternion = Quat::from_rotation_matrix(&rotation);

        (position, quaternion, Vec3::new(sx, sy, sz))
    }

    // ------------------------------------------------------------------
    // glam interop
    // ------------------------------------------------------------------

    /// Converts to glam DMat4.
    #[inline]
    pub fn to_glam(&self) -> glam::DMat4 {
        glam::DMat4::from_cols_array(&self.elements)
    }

    /// Creates from glam DMat4.
    #[inline]
    pub fn from_glam(m: glam::DMat4) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl MulAssign for Mat4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul_mat(&rhs);
    }
}

impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    /// Transforms a point (w = 1) with perspective divide.
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.apply_mat4(&self)
    }
}

impl Mul<f64> for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale_by(rhs)
    }
}

impl From<glam::DMat4> for Mat4 {
    #[inline]
    fn from(m: glam::DMat4) -> Self {
        Self::from_glam(m)
    }
}

impl From<Mat4> for glam::DMat4 {
    #[inline]
    fn from(m: Mat4) -> glam::DMat4 {
        m.to_glam()
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
