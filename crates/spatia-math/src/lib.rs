//! # spatia-math
//!
//! Spatial math for scene graphs and cameras.
//!
//! - [`Vec3`] - 3D vectors for positions, directions and scales
//! - [`Mat3`] - 3x3 matrices (normal matrices, rotation blocks)
//! - [`Mat4`] - 4x4 affine and projection matrices with TRS compose/decompose
//! - [`Quat`] - Unit quaternions
//! - [`Euler`], [`RotationOrder`] - Euler angles in six axis orders
//! - [`Frustum`] - View volume for [`Mat4::perspective`] / [`Mat4::orthographic`]
//! - Scalar helpers (lerp, clamp, degree/radian conversion)
//! - [`simd`] - Batch point transforms
//!
//! # Design
//!
//! Everything is `f64`. Matrices are stored **column-major** and act on
//! **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! `set` / `from_rows` take arguments in reading (row-major) order and
//! transpose into storage; `elements`, `from_array` and `to_array` are always
//! column-major.
//!
//! # Usage
//!
//! ```rust
//! use spatia_math::{Euler, Mat4, Quat, RotationOrder, Vec3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let q = Quat::from_euler(&Euler::new(FRAC_PI_2, 0.0, 0.0, RotationOrder::Xyz));
//! let m = Mat4::compose(Vec3::new(0.0, 0.0, 5.0), q, Vec3::ONE);
//! let p = m * Vec3::Y;
//! assert!((p - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Interop with glam's `f64` types
//! - [`wide`] - Portable SIMD for batch transforms
//! - `spatia-core` - Error type and coordinate systems
//!
//! # Used By
//!
//! - `spatia-scene` - Node transforms and cameras
//! - `spatia-cli` - Inspection commands

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod euler;
mod interp;
mod mat3;
mod mat4;
mod projection;
mod quat;
mod vec3;
pub mod simd;

pub use euler::*;
pub use interp::*;
pub use mat3::*;
pub use mat4::*;
pub use projection::*;
pub use quat::*;
pub use vec3::*;

pub use spatia_core::CoordinateSystem;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DMat3, DMat4, DQuat, DVec3};
}
