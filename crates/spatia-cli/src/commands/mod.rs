//! CLI command implementations

pub mod chain;
pub mod compose;
pub mod decompose;
pub mod euler;
pub mod project;

use anyhow::{Context, Result, bail};
use spatia_math::{DEG2RAD, Euler, Mat4, Quat, RAD2DEG, RotationOrder, Vec3};

/// Parses numbers separated by commas and/or whitespace.
pub fn parse_floats(s: &str) -> Result<Vec<f64>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<f64>()
                .with_context(|| format!("Invalid number '{p}' in '{s}'"))
        })
        .collect()
}

/// Parses exactly `N` numbers.
pub fn parse_fixed<const N: usize>(s: &str, what: &str) -> Result<[f64; N]> {
    let values = parse_floats(s)?;
    match <[f64; N]>::try_from(values.as_slice()) {
        Ok(array) => Ok(array),
        Err(_) => bail!("{what} needs {N} values, got {} in '{s}'", values.len()),
    }
}

/// Parses `x,y,z`.
pub fn parse_vec3(s: &str, what: &str) -> Result<Vec3> {
    parse_fixed::<3>(s, what).map(Vec3::from_array)
}

/// Parses a rotation order name.
pub fn parse_order(s: &str) -> Result<RotationOrder> {
    s.parse::<RotationOrder>()
        .with_context(|| format!("Invalid rotation order '{s}'"))
}

/// Multiplier that turns user angles into radians.
pub fn angle_unit(radians: bool) -> f64 {
    if radians { 1.0 } else { DEG2RAD }
}

/// Euler angles in degrees.
pub fn euler_degrees(e: &Euler) -> [f64; 3] {
    [e.x * RAD2DEG, e.y * RAD2DEG, e.z * RAD2DEG]
}

/// Short fixed-precision rendering of a vector.
pub fn fmt_vec3(v: Vec3) -> String {
    format!("({:.6}, {:.6}, {:.6})", v.x, v.y, v.z)
}

/// Short fixed-precision rendering of a quaternion.
pub fn fmt_quat(q: Quat) -> String {
    format!("({:.6}, {:.6}, {:.6}, {:.6})", q.x, q.y, q.z, q.w)
}

/// Prints a matrix row by row with a label.
pub fn print_matrix(label: &str, m: &Mat4) {
    println!("{label}:");
    for row in 0..4 {
        println!(
            "  [{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
            m.get(row, 0),
            m.get(row, 1),
            m.get(row, 2),
            m.get(row, 3)
        );
    }
}

/// Pretty-prints a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}
