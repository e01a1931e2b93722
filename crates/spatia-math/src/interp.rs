//! Scalar helpers used by the vector, rotation and camera code.
//!
//! - Linear interpolation ([`lerp`], [`inverse_lerp`], [`remap`])
//! - Clamping ([`clamp`], [`saturate`])
//! - Angle units ([`deg_to_rad`], [`rad_to_deg`])
//!
//! # Usage
//!
//! ```rust
//! use spatia_math::{deg_to_rad, lerp, remap};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(remap(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
//! assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-15);
//! ```

/// Degrees to radians multiplier.
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees multiplier.
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// `a` at `t = 0`, `b` at `t = 1`; extrapolates outside that range.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse linear interpolation: the `t` for which `lerp(a, b, t) == value`.
///
/// Returns 0 for a degenerate range.
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if a == b { 0.0 } else { (value - a) / (b - a) }
}

/// Maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
#[inline]
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    lerp(out_min, out_max, inverse_lerp(in_min, in_max, value))
}

/// Clamps a value to `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics on an inverted range.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Modulo that is always non-negative for a positive divisor.
#[inline]
pub fn euclidean_modulo(n: f64, m: f64) -> f64 {
    ((n % m) + m) % m
}

/// Degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

/// Radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD2DEG
}
