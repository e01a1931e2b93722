//! Projection matrix construction.
//!
//! Both builders take a [`Frustum`] (the view volume in camera space, looking
//! down -Z) and produce a clip-space matrix for one of the two depth
//! conventions of [`CoordinateSystem`], optionally with reversed depth:
//!
//! | system   | normal depth         | reversed depth      |
//! |----------|----------------------|---------------------|
//! | `WebGl`  | near -> -1, far -> 1 | near -> 1, far -> 0 |
//! | `WebGpu` | near -> 0, far -> 1  | near -> 1, far -> 0 |
//!
//! Reversed depth always targets [1, 0], whatever the convention.
//!
//! # Example
//!
//! ```rust
//! use spatia_math::{CoordinateSystem, Frustum, Mat4, Vec3};
//!
//! let f = Frustum::new(-1.0, 1.0, 1.0, -1.0, 1.0, 100.0);
//! let m = Mat4::perspective(&f, CoordinateSystem::WebGpu, false);
//! let near = m.transform_point3(Vec3::new(0.0, 0.0, -1.0));
//! assert!(near.z.abs() < 1e-12);
//! ```

use crate::Mat4;
use spatia_core::CoordinateSystem;

/// View volume bounds. `left/right/top/bottom` lie on the near plane for
/// perspective projections and on any plane for orthographic ones.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frustum {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Near plane distance (positive).
    pub near: f64,
    /// Far plane distance (positive).
    pub far: f64,
}

impl Frustum {
    /// Creates a frustum from its six bounds.
    #[inline]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            near,
            far,
        }
    }

    /// Width on the bound plane.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height on the bound plane.
    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new(-1.0, 1.0, 1.0, -1.0, 0.1, 2000.0)
    }
}

impl Mat4 {
    /// Perspective (off-axis) projection.
    pub fn perspective(
        frustum: &Frustum,
        coordinate_system: CoordinateSystem,
        reversed_depth: bool,
    ) -> Self {
        let Frustum {
            left,
            right,
            top,
            bottom,
            near,
            far,
        } = *frustum;

        let x = 2.0 * near / (right - left);
        let y = 2.0 * near / (top - bottom);
        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);

        let (c, d) = match (coordinate_system, reversed_depth) {
            (_, true) => (near / (far - near), far * near / (far - near)),
            (CoordinateSystem::WebGl, false) => (
                -(far + near) / (far - near),
                -2.0 * far * near / (far - near),
            ),
            (CoordinateSystem::WebGpu, false) => {
                (-far / (far - near), -far * near / (far - near))
            }
        };

        let mut m = Self::ZERO;
        let te = &mut m.elements;
        te[0] = x;
        te[8] = a;
        te[5] = y;
        te[9] = b;
        te[10] = c;
        te[14] = d;
        te[11] = -1.0;
        m
    }

    /// Orthographic projection.
    pub fn orthographic(
        frustum: &Frustum,
        coordinate_system: CoordinateSystem,
        reversed_depth: bool,
    ) -> Self {
        let Frustum {
            left,
            right,
            top,
            bottom,
            near,
            far,
        } = *frustum;

        let w = 1.0 / (right - left);
        let h = 1.0 / (top - bottom);
        let p = 1.0 / (far - near);

        let (z, z_inv) = match (coordinate_system, reversed_depth) {
            (_, true) => (p, far * p),
            (CoordinateSystem::WebGl, false) => (-2.0 * p, -(far + near) * p),
            (CoordinateSystem::WebGpu, false) => (-p, -near * p),
        };

        let mut m = Self::ZERO;
        let te = &mut m.elements;
        te[0] = 2.0 * w;
        te[12] = -(right + left) * w;
        te[5] = 2.0 * h;
        te[13] = -(top + bottom) * h;
        te[10] = z;
        te[14] = z_inv;
        te[15] = 1.0;
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;
    use approx::assert_abs_diff_eq;

    const ALL: [(CoordinateSystem, bool, f64, f64); 4] = [
        (CoordinateSystem::WebGl, false, -1.0, 1.0),
        (CoordinateSystem::WebGl, true, 1.0, 0.0),
        (CoordinateSystem::WebGpu, false, 0.0, 1.0),
        (CoordinateSystem::WebGpu, true, 1.0, 0.0),
    ];

    fn frustum() -> Frustum {
        Frustum::new(-2.0, 3.0, 1.5, -0.5, 0.5, 50.0)
    }

    #[test]
    fn test_perspective_webgl_element_10() {
        let f = frustum();
        let m = Mat4::perspective(&f, CoordinateSystem::WebGl, false);
        assert_abs_diff_eq!(
            m.elements[10],
            -(f.far + f.near) / (f.far - f.near),
            epsilon = 1e-12
        );
        assert_eq!(m.elements[11], -1.0);
        assert_eq!(m.elements[15], 0.0);
    }

    #[test]
    fn test_perspective_depth_ranges() {
        let f = frustum();
        for (cs, reversed, near_z, far_z) in ALL {
            let m = Mat4::perspective(&f, cs, reversed);
            let n = m.transform_point3(Vec3::new(0.0, 0.0, -f.near));
            let fa = m.transform_point3(Vec3::new(0.0, 0.0, -f.far));
            assert_abs_diff_eq!(n.z, near_z, epsilon = 1e-9);
            assert_abs_diff_eq!(fa.z, far_z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_reversed_depth_ignores_convention() {
        let f = frustum();
        for build in [Mat4::perspective, Mat4::orthographic] {
            let gl = build(&f, CoordinateSystem::WebGl, true);
            let gpu = build(&f, CoordinateSystem::WebGpu, true);
            assert_abs_diff_eq!(gl, gpu, epsilon = 1e-12);

            let mid = gl.transform_point3(Vec3::new(0.0, 0.0, -0.5 * (f.near + f.far)));
            assert!(mid.z > 0.0 && mid.z < 1.0);
        }
    }

    #[test]
    fn test_perspective_edges_map_to_ndc() {
        let f = frustum();
        let m = Mat4::perspective(&f, CoordinateSystem::WebGl, false);
        let corner = m.transform_point3(Vec3::new(f.right, f.top, -f.near));
        assert_abs_diff_eq!(corner.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(corner.y, 1.0, epsilon = 1e-12);
        let corner = m.transform_point3(Vec3::new(f.left, f.bottom, -f.near));
        assert_abs_diff_eq!(corner.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(corner.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orthographic_depth_ranges() {
        let f = frustum();
        for (cs, reversed, near_z, far_z) in ALL {
            let m = Mat4::orthographic(&f, cs, reversed);
            let n = m.transform_point3(Vec3::new(f.left, f.bottom, -f.near));
            let fa = m.transform_point3(Vec3::new(f.right, f.top, -f.far));
            assert_abs_diff_eq!(n, Vec3::new(-1.0, -1.0, near_z), epsilon = 1e-12);
            assert_abs_diff_eq!(fa, Vec3::new(1.0, 1.0, far_z), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_projection_inverse_unprojects() {
        let f = frustum();
        let m = Mat4::perspective(&f, CoordinateSystem::WebGpu, true);
        let p = Vec3::new(0.3, -0.2, -7.0);
        let back = m.invert().transform_point3(m.transform_point3(p));
        assert_abs_diff_eq!(back, p, epsilon = 1e-9);
    }

    #[test]
    fn test_frustum_default() {
        let f = Frustum::default();
        assert_eq!(f.width(), 2.0);
        assert_eq!(f.height(), 2.0);
        assert!(f.near < f.far);
    }
}
