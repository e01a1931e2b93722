//! 3x3 matrix type for normal and linear transforms.
//!
//! [`Mat3`] is used for normal matrices (inverse-transpose of a model
//! matrix's upper 3x3) and other purely linear transforms.
//!
//! # Convention
//!
//! Elements are stored **column-major**, the same as [`crate::Mat4`], so
//! `elements` can be uploaded as-is. Constructors that take rows
//! ([`Mat3::from_rows`], [`Mat3::set`]) transpose into that layout:
//!
//! ```text
//!                   | e0 e3 e6 |
//! elements[0..9] => | e1 e4 e7 |
//!                   | e2 e5 e8 |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use spatia_math::{Mat3, Vec3};
//!
//! let m = Mat3::from_rows([
//!     [1.0, 2.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//! ]);
//! assert_eq!(m.elements[3], 2.0); // row 0, column 1
//! assert_eq!(m * Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 0.0));
//! ```

use crate::{Mat4, Vec3};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::Mul;

/// A 3x3 matrix, column-major.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat3 {
    /// Matrix elements in column-major order.
    pub elements: [f64; 9],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { elements: [0.0; 9] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Creates a matrix from elements given in row-major reading order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn set(
        n11: f64, n12: f64, n13: f64,
        n21: f64, n22: f64, n23: f64,
        n31: f64, n32: f64, n33: f64,
    ) -> Self {
        Self {
            elements: [n11, n21, n31, n12, n22, n32, n13, n23, n33],
        }
    }

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self::set(
            rows[0][0], rows[0][1], rows[0][2],
            rows[1][0], rows[1][1], rows[1][2],
            rows[2][0], rows[2][1], rows[2][2],
        )
    }

    /// Creates a matrix from column vectors.
    #[inline]
    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self {
            elements: [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z],
        }
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f64, d1: f64, d2: f64) -> Self {
        Self::set(d0, 0.0, 0.0, 0.0, d1, 0.0, 0.0, 0.0, d2)
    }

    /// Creates from a column-major array.
    #[inline]
    pub const fn from_array(elements: [f64; 9]) -> Self {
        Self { elements }
    }

    /// Reads nine column-major elements from `slice` starting at `offset`.
    #[inline]
    pub fn from_slice_at(slice: &[f64], offset: usize) -> Self {
        let mut elements = [0.0; 9];
        elements.copy_from_slice(&slice[offset..offset + 9]);
        Self { elements }
    }

    /// Column-major array copy.
    #[inline]
    pub const fn to_array(&self) -> [f64; 9] {
        self.elements
    }

    /// Writes the column-major elements into `out` starting at `offset`.
    #[inline]
    pub fn write_to(&self, out: &mut [f64], offset: usize) {
        out[offset..offset + 9].copy_from_slice(&self.elements);
    }

    /// Upper-left 3x3 block of a 4x4 matrix.
    pub fn from_mat4(m: &Mat4) -> Self {
        let e = &m.elements;
        Self {
            elements: [e[0], e[1], e[2], e[4], e[5], e[6], e[8], e[9], e[10]],
        }
    }

    /// Normal matrix for a model matrix: inverse-transpose of its upper 3x3.
    ///
    /// A singular model matrix yields the zero matrix.
    pub fn normal_matrix(m: &Mat4) -> Self {
        Self::from_mat4(m).invert().transpose()
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[col * 3 + row]
    }

    /// Returns a row as Vec3.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.elements[i], self.elements[3 + i], self.elements[6 + i])
    }

    /// Returns a column as Vec3.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::from_slice_at(&self.elements, i * 3)
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        Self {
            elements: [e[0], e[3], e[6], e[1], e[4], e[7], e[2], e[5], e[8]],
        }
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let e = &self.elements;
        let (a, b, c) = (e[0], e[1], e[2]);
        let (d, ee, f) = (e[3], e[4], e[5]);
        let (g, h, i) = (e[6], e[7], e[8]);
        a * ee * i - a * f * h - b * d * i + b * f * g + c * d * h - c * ee * g
    }

    /// Computes the inverse, or the all-zero matrix if singular.
    ///
    /// Callers that need to distinguish the failure use
    /// [`Mat3::try_inverse`].
    pub fn invert(&self) -> Self {
        self.try_inverse().unwrap_or(Self::ZERO)
    }

    /// Computes the inverse of this matrix.
    ///
    /// Returns `None` if the determinant is exactly zero.
    pub fn try_inverse(&self) -> Option<Self> {
        let e = &self.elements;
        let (n11, n21, n31) = (e[0], e[1], e[2]);
        let (n12, n22, n32) = (e[3], e[4], e[5]);
        let (n13, n23, n33) = (e[6], e[7], e[8]);

        let t11 = n33 * n22 - n32 * n23;
        let t12 = n32 * n13 - n33 * n12;
        let t13 = n23 * n12 - n22 * n13;

        let det = n11 * t11 + n21 * t12 + n31 * t13;
        if det == 0.0 {
            return None;
        }
        let inv = 1.0 / det;

        Some(Self {
            elements: [
                t11 * inv,
                (n31 * n23 - n33 * n21) * inv,
                (n32 * n21 - n31 * n22) * inv,
                t12 * inv,
                (n33 * n11 - n31 * n13) * inv,
                (n31 * n12 - n32 * n11) * inv,
                t13 * inv,
                (n21 * n13 - n23 * n11) * inv,
                (n22 * n11 - n21 * n12) * inv,
            ],
        })
    }

    /// Multiplies two matrices (`self * other`).
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for col in 0..3 {
            for row in 0..3 {
                result.elements[col * 3 + row] = (0..3)
                    .map(|k| self.get(row, k) * other.get(k, col))
                    .sum();
            }
        }
        result
    }

    /// Multiplies every element by a scalar.
    #[inline]
    pub fn scale_by(&self, s: f64) -> Self {
        Self {
            elements: self.elements.map(|v| v * s),
        }
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|x| x.is_finite())
    }

    /// Converts to glam DMat3.
    #[inline]
    pub fn to_glam(&self) -> glam::DMat3 {
        glam::DMat3::from_cols_array(&self.elements)
    }

    /// Creates from glam DMat3.
    #[inline]
    pub fn from_glam(m: glam::DMat3) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.apply_mat3(&self)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Mul<f64> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale_by(rhs)
    }
}

impl AbsDiffEq for Mat3 {
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

impl RelativeEq for Mat3 {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quat;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mat3_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn test_mat3_storage_is_column_major() {
        let m = Mat3::set(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.to_array(), [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.row(1), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.col(1), Vec3::new(2.0, 5.0, 8.0));
    }

    #[test]
    fn test_mat3_transpose() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let t = m.transpose();
        assert_eq!(t.get(0, 1), 4.0);
        assert_eq!(t.get(1, 0), 2.0);
    }

    #[test]
    fn test_mat3_determinant() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let inv = m.try_inverse().unwrap();
        assert_abs_diff_eq!(m * inv, Mat3::IDENTITY, epsilon = 1e-12);
    }

    #[test]
    fn test_mat3_singular_is_zero() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0], // Row 2 = 2 * Row 1
            [1.0, 1.0, 1.0],
        ]);
        assert!(m.try_inverse().is_none());
        assert_eq!(m.invert(), Mat3::ZERO);
    }

    #[test]
    fn test_mat3_mul_mat() {
        let a = Mat3::diagonal(2.0, 2.0, 2.0);
        let b = Mat3::diagonal(3.0, 3.0, 3.0);
        assert_eq!(a * b, Mat3::diagonal(6.0, 6.0, 6.0));
    }

    #[test]
    fn test_mat3_normal_matrix_non_uniform_scale() {
        let model = Mat4::compose(Vec3::ZERO, Quat::IDENTITY, Vec3::new(2.0, 1.0, 1.0));
        let n = Mat3::normal_matrix(&model);
        assert_abs_diff_eq!(n, Mat3::diagonal(0.5, 1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_mat3_glam_roundtrip() {
        let m = Mat3::set(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0);
        assert_eq!(Mat3::from_glam(m.to_glam()), m);
        assert_abs_diff_eq!(m.to_glam().determinant(), m.determinant(), epsilon = 1e-9);
    }
}
