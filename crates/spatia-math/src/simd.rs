//! SIMD batch transforms.
//!
//! Applies one [`Mat4`] to many points or directions at once using the `wide`
//! crate for portable SIMD on stable Rust. Points are processed four at a time
//! in structure-of-arrays form (`f64x4` lanes for x, y and z), with a scalar
//! tail for the remainder. Results match [`Vec3::apply_mat4`] and
//! [`Mat4::transform_vector3`] exactly up to floating-point rounding.
//!
//! # Example
//!
//! ```rust
//! use spatia_math::simd::transform_points;
//! use spatia_math::{Mat4, Vec3};
//!
//! let m = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
//! let out = transform_points(&m, &[Vec3::ZERO, Vec3::Y]);
//! assert_eq!(out[1], Vec3::new(1.0, 1.0, 0.0));
//! ```

use crate::{Mat4, Vec3};
use wide::f64x4;

/// Splatted matrix elements, built once per batch.
struct Lanes([f64x4; 16]);

impl Lanes {
    #[inline]
    fn new(m: &Mat4) -> Self {
        Self(m.elements.map(f64x4::splat))
    }

    /// Rows 0..3 of `M * (x, y, z, w)` for four points; `w` selects point or vector.
    #[inline]
    fn apply(&self, x: f64x4, y: f64x4, z: f64x4, w: f64) -> [f64x4; 4] {
        let e = &self.0;
        let w = f64x4::splat(w);
        [
            e[0] * x + e[4] * y + e[8] * z + e[12] * w,
            e[1] * x + e[5] * y + e[9] * z + e[13] * w,
            e[2] * x + e[6] * y + e[10] * z + e[14] * w,
            e[3] * x + e[7] * y + e[11] * z + e[15] * w,
        ]
    }
}

#[inline]
fn gather(chunk: &[Vec3]) -> (f64x4, f64x4, f64x4) {
    (
        f64x4::from([chunk[0].x, chunk[1].x, chunk[2].x, chunk[3].x]),
        f64x4::from([chunk[0].y, chunk[1].y, chunk[2].y, chunk[3].y]),
        f64x4::from([chunk[0].z, chunk[1].z, chunk[2].z, chunk[3].z]),
    )
}

#[inline]
fn scatter(out: &mut [Vec3], x: f64x4, y: f64x4, z: f64x4) {
    let (x, y, z) = (x.to_array(), y.to_array(), z.to_array());
    for (i, v) in out.iter_mut().enumerate() {
        *v = Vec3::new(x[i], y[i], z[i]);
    }
}

/// Transforms points in place (w = 1, with perspective divide).
pub fn transform_points_inplace(m: &Mat4, points: &mut [Vec3]) {
    let lanes = Lanes::new(m);
    let mut chunks = points.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let (x, y, z) = gather(chunk);
        let [tx, ty, tz, tw] = lanes.apply(x, y, z, 1.0);
        let inv_w = f64x4::splat(1.0) / tw;
        scatter(chunk, tx * inv_w, ty * inv_w, tz * inv_w);
    }
    for p in chunks.into_remainder() {
        *p = p.apply_mat4(m);
    }
}

/// Transforms points (w = 1, with perspective divide).
pub fn transform_points(m: &Mat4, points: &[Vec3]) -> Vec<Vec3> {
    let mut out = points.to_vec();
    transform_points_inplace(m, &mut out);
    out
}

/// Transforms direction vectors in place (w = 0, no divide, no normalize).
pub fn transform_vectors_inplace(m: &Mat4, vectors: &mut [Vec3]) {
    let lanes = Lanes::new(m);
    let mut chunks = vectors.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let (x, y, z) = gather(chunk);
        let [tx, ty, tz, _] = lanes.apply(x, y, z, 0.0);
        scatter(chunk, tx, ty, tz);
    }
    for v in chunks.into_remainder() {
        *v = m.transform_vector3(*v);
    }
}

/// Transforms a packed `[x0, y0, z0, x1, y1, z1, ...]` point buffer in place.
///
/// Trailing elements that do not form a full triple are left untouched.
pub fn transform_packed_points(m: &Mat4, buffer: &mut [f64]) {
    let lanes = Lanes::new(m);
    let mut quads = buffer.chunks_exact_mut(12);
    for quad in &mut quads {
        let x = f64x4::from([quad[0], quad[3], quad[6], quad[9]]);
        let y = f64x4::from([quad[1], quad[4], quad[7], quad[10]]);
        let z = f64x4::from([quad[2], quad[5], quad[8], quad[11]]);
        let [tx, ty, tz, tw] = lanes.apply(x, y, z, 1.0);
        let inv_w = f64x4::splat(1.0) / tw;
        let (tx, ty, tz) = (
            (tx * inv_w).to_array(),
            (ty * inv_w).to_array(),
            (tz * inv_w).to_array(),
        );
        for i in 0..4 {
            quad[i * 3] = tx[i];
            quad[i * 3 + 1] = ty[i];
            quad[i * 3 + 2] = tz[i];
        }
    }
    for triple in quads.into_remainder().chunks_exact_mut(3) {
        let p = Vec3::from_slice_at(triple, 0).apply_mat4(m);
        p.write_to(triple, 0);
    }
}
