//! Euler angles with an explicit rotation order.
//!
//! An [`Euler`] is three angles in radians plus a [`RotationOrder`]. Order
//! `abc` means the rotation matrix is `R_a(θa) · R_b(θb) · R_c(θc)`, i.e. the
//! rotation about `c` is applied to a vector first.
//!
//! # Extraction and gimbal lock
//!
//! [`Euler::set_from_rotation_matrix`] recovers one angle with `asin` of a
//! single matrix entry (clamped to [-1, 1] so rounding can never produce NaN)
//! and the other two with `atan2`. When that entry reaches
//! [`GIMBAL_LOCK_THRESHOLD`] in magnitude, the first and last axes line up
//! and only their sum/difference is observable: a two-angle formula is used
//! and the remaining angle is reported as 0.
//!
//! # Lenient order names
//!
//! Orders parsed from text (`"XYZ"`, `"zyx"`, ...) go through
//! [`RotationOrder::from_str`], which is strict. The Euler-level helpers that
//! take names ([`Euler::set_from_rotation_matrix_named`],
//! [`Euler::reorder_named`], [`Euler::set_from_array`]) are lenient instead:
//! an unknown name emits a `tracing` warning and the Euler is left unchanged.
//!
//! # Usage
//!
//! ```rust
//! use spatia_math::{Euler, Mat4, RotationOrder};
//!
//! let e = Euler::new(0.1, 0.2, 0.3, RotationOrder::Yxz);
//! let m = Mat4::from_euler(&e);
//! let back = Euler::from_rotation_matrix(&m, RotationOrder::Yxz);
//! assert!((back.y - 0.2).abs() < 1e-12);
//! ```

use crate::{Mat4, Quat, Vec3};
use approx::{AbsDiffEq, RelativeEq};
use spatia_core::{Error, Result};
use std::str::FromStr;
use tracing::warn;

/// Magnitude of the `asin` input at which extraction switches to the
/// two-angle gimbal-lock formula.
pub const GIMBAL_LOCK_THRESHOLD: f64 = 0.9999999;

/// Order in which the three axis rotations are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationOrder {
    /// `Rx · Ry · Rz`
    #[default]
    Xyz,
    /// `Rx · Rz · Ry`
    Xzy,
    /// `Ry · Rx · Rz`
    Yxz,
    /// `Ry · Rz · Rx`
    Yzx,
    /// `Rz · Rx · Ry`
    Zxy,
    /// `Rz · Ry · Rx`
    Zyx,
}

impl RotationOrder {
    /// All six orders.
    pub const ALL: [Self; 6] = [Self::Xyz, Self::Xzy, Self::Yxz, Self::Yzx, Self::Zxy, Self::Zyx];

    /// Upper-case three-letter name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Xyz => "XYZ",
            Self::Xzy => "XZY",
            Self::Yxz => "YXZ",
            Self::Yzx => "YZX",
            Self::Zxy => "ZXY",
            Self::Zyx => "ZYX",
        }
    }
}

impl FromStr for RotationOrder {
    type Err = Error;

    /// Parses a three-letter order name, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XYZ" => Ok(Self::Xyz),
            "XZY" => Ok(Self::Xzy),
            "YXZ" => Ok(Self::Yxz),
            "YZX" => Ok(Self::Yzx),
            "ZXY" => Ok(Self::Zxy),
            "ZYX" => Ok(Self::Zyx),
            _ => Err(Error::unknown_rotation_order(s)),
        }
    }
}

impl std::fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Euler angles (radians) with a rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Euler {
    /// Rotation about X
    pub x: f64,
    /// Rotation about Y
    pub y: f64,
    /// Rotation about Z
    pub z: f64,
    /// Combination order
    pub order: RotationOrder,
}

impl Euler {
    /// Creates Euler angles.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, order: RotationOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Creates Euler angles in the default `XYZ` order.
    #[inline]
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, RotationOrder::Xyz)
    }

    /// Creates from `[x, y, z]` and an order.
    #[inline]
    pub const fn from_array(a: [f64; 3], order: RotationOrder) -> Self {
        Self::new(a[0], a[1], a[2], order)
    }

    /// The three angles as `[x, y, z]`. See [`Euler::order`] for the order.
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// The rotation order.
    #[inline]
    pub const fn order(&self) -> RotationOrder {
        self.order
    }

    /// The angles as a vector.
    #[inline]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Angles from a vector.
    #[inline]
    pub fn from_vec3(v: Vec3, order: RotationOrder) -> Self {
        Self::new(v.x, v.y, v.z, order)
    }

    /// Sets the angles from the vector, keeping the order.
    #[inline]
    pub fn set_from_vec3(&mut self, v: Vec3) {
        self.x = v.x;
        self.y = v.y;
        self.z = v.z;
    }

    /// Loads angles (and optionally an order name) from a flat array.
    ///
    /// A slice shorter than three values or an unknown `order` name is
    /// logged and leaves `self` untouched, angles included.
    pub fn set_from_array(&mut self, a: &[f64], order: Option<&str>) {
        let &[x, y, z, ..] = a else {
            warn!(len = a.len(), "Euler::set_from_array: need 3 angles, ignoring update");
            return;
        };
        let order = match order.map(str::parse::<RotationOrder>) {
            None => self.order,
            Some(Ok(order)) => order,
            Some(Err(err)) => {
                warn!(%err, "Euler::set_from_array: ignoring update");
                return;
            }
        };
        *self = Self::new(x, y, z, order);
    }

    /// Extracts Euler angles from the upper 3x3 (pure rotation) of `m`.
    pub fn from_rotation_matrix(m: &Mat4, order: RotationOrder) -> Self {
        let mut e = Self::new(0.0, 0.0, 0.0, order);
        e.set_from_rotation_matrix(m, order);
        e
    }

    /// Sets angles and order from the upper 3x3 (pure rotation) of `m`.
    ///
    /// Near gimbal lock the angle that can no longer be separated (the last
    /// axis of the order) is set to zero.
    pub fn set_from_rotation_matrix(&mut self, m: &Mat4, order: RotationOrder) {
        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        let (x, y, z) = match order {
            RotationOrder::Xyz => {
                let y = m13.clamp(-1.0, 1.0).asin();
                if m13.abs() < GIMBAL_LOCK_THRESHOLD {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            RotationOrder::Yxz => {
                let x = (-m23.clamp(-1.0, 1.0)).asin();
                if m23.abs() < GIMBAL_LOCK_THRESHOLD {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            RotationOrder::Zxy => {
                let x = m32.clamp(-1.0, 1.0).asin();
                if m32.abs() < GIMBAL_LOCK_THRESHOLD {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            RotationOrder::Zyx => {
                let y = (-m31.clamp(-1.0, 1.0)).asin();
                if m31.abs() < GIMBAL_LOCK_THRESHOLD {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            RotationOrder::Yzx => {
                let z = m21.clamp(-1.0, 1.0).asin();
                if m21.abs() < GIMBAL_LOCK_THRESHOLD {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            RotationOrder::Xzy => {
                let z = (-m12.clamp(-1.0, 1.0)).asin();
                if m12.abs() < GIMBAL_LOCK_THRESHOLD {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        *self = Self::new(x, y, z, order);
    }

    /// Like [`Euler::set_from_rotation_matrix`] but takes the order by name.
    ///
    /// Unknown names are reported through `tracing` and leave `self`
    /// unmodified.
    pub fn set_from_rotation_matrix_named(&mut self, m: &Mat4, order: &str) {
        match order.parse::<RotationOrder>() {
            Ok(order) => self.set_from_rotation_matrix(m, order),
            Err(err) => warn!(%err, "Euler::set_from_rotation_matrix: ignoring update"),
        }
    }

    /// Euler angles of a unit quaternion in the given order.
    pub fn from_quat(q: Quat, order: RotationOrder) -> Self {
        Self::from_rotation_matrix(&Mat4::from_quat(q), order)
    }

    /// Sets angles and order from a unit quaternion.
    #[inline]
    pub fn set_from_quat(&mut self, q: Quat, order: RotationOrder) {
        *self = Self::from_quat(q, order);
    }

    /// Re-expresses the same orientation in another order.
    ///
    /// Goes through a quaternion, so angle magnitudes beyond ±π (multiple
    /// turns) are not preserved: only the orientation is.
    pub fn reorder(&mut self, order: RotationOrder) {
        let q = Quat::from_euler(self);
        self.set_from_quat(q, order);
    }

    /// Value-returning form of [`Euler::reorder`].
    #[inline]
    pub fn reordered(mut self, order: RotationOrder) -> Self {
        self.reorder(order);
        self
    }

    /// [`Euler::reorder`] by order name; unknown names log and no-op.
    pub fn reorder_named(&mut self, order: &str) {
        match order.parse::<RotationOrder>() {
            Ok(order) => self.reorder(order),
            Err(err) => warn!(%err, "Euler::reorder: ignoring update"),
        }
    }

    /// Returns true if all angles are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Euler> for Quat {
    #[inline]
    fn from(e: Euler) -> Quat {
        Quat::from_euler(&e)
    }
}

impl AbsDiffEq for Euler {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.order == other.order && self.to_vec3().abs_diff_eq(&other.to_vec3(), epsilon)
    }
}

impl RelativeEq for Euler {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.order == other.order
            && self
                .to_vec3()
                .relative_eq(&other.to_vec3(), epsilon, max_relative)
    }
}
